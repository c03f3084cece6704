use clap::Parser;
use std::path::PathBuf;

/// CLI arguments for the ant colony simulation
#[derive(Parser, Debug)]
#[command(name = "ant_colony", about = "🐜 Headless ant colony foraging simulation")]
pub struct Args {
    /// Path to a TOML world configuration
    #[arg(short = 'c', long = "config")]
    pub config: Option<PathBuf>,

    /// Number of ticks to simulate
    #[arg(short = 't', long, default_value_t = 600)]
    pub ticks: u64,

    /// Milliseconds elapsed per tick
    #[arg(long, default_value_t = 100.0)]
    pub frame_ms: f32,

    /// Random seed (overrides the config file)
    #[arg(long)]
    pub seed: Option<u64>,

    /// World width (overrides the config file)
    #[arg(long)]
    pub width: Option<u32>,

    /// World height (overrides the config file)
    #[arg(long)]
    pub height: Option<u32>,

    /// Total ants the nest may spawn (overrides the config file)
    #[arg(short = 'n', long = "ants")]
    pub ants: Option<u32>,

    /// Suppress per-event logs (for benchmarks)
    #[arg(long, default_value_t = false)]
    pub suppress_events: bool,
}
