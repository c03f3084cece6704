use ant_colony::prelude::*;
use clap::Parser;
use colored::Colorize;
use std::process::ExitCode;

fn main() -> ExitCode {
    init_tracing();
    let args = Args::parse();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {}", "error:".red().bold(), err);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> std::result::Result<(), Box<dyn std::error::Error>> {
    let mut config = match &args.config {
        Some(path) => WorldConfig::load(path)?,
        None => WorldConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }
    if let Some(width) = args.width {
        config.width = width;
    }
    if let Some(height) = args.height {
        config.height = height;
    }
    if let Some(ants) = args.ants {
        config.num_ants_to_spawn = ants;
    }
    if !args.frame_ms.is_finite() || args.frame_ms <= 0.0 {
        return Err("--frame-ms must be positive".into());
    }

    // Build world
    let mut world = World::new(config)?;

    // Run simulation
    let mut engine = SimulationEngine::new(args.suppress_events);
    let summary = engine.run_simulation(&mut world, args.ticks, args.frame_ms);

    // Print results
    engine.print_summary(&world, &summary);

    Ok(())
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init();
}
