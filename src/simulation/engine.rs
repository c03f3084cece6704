use crate::world::{World, WorldStats};
use colored::Colorize;
use std::time::{Duration, Instant};
use tracing::info;

/// Outcome of a headless run
#[derive(Clone, Copy, Debug)]
pub struct RunSummary {
    pub ticks: u64,
    pub simulated_ms: f64,
    pub latency: Duration,
    pub stats: WorldStats,
}

/// Drives a world at a fixed frame time, standing in for a render loop.
pub struct SimulationEngine {
    suppress_events: bool,
}

impl SimulationEngine {
    /// Create a new simulation engine
    pub fn new(suppress_events: bool) -> Self {
        Self { suppress_events }
    }

    /// Call `world.update(frame_ms)` `ticks` times, reporting noteworthy events.
    pub fn run_simulation(&mut self, world: &mut World, ticks: u64, frame_ms: f32) -> RunSummary {
        info!(ticks, frame_ms, "Starting headless run");
        let sim_start = Instant::now();
        let mut previous = world.stats();

        for _ in 0..ticks {
            world.update(frame_ms);
            let current = world.stats();
            self.log_events(world, &previous, &current);
            previous = current;
        }

        let summary = RunSummary {
            ticks,
            simulated_ms: ticks as f64 * f64::from(frame_ms),
            latency: sim_start.elapsed(),
            stats: world.stats(),
        };
        info!(
            ticks,
            food_collected = summary.stats.food_collected,
            latency_ms = summary.latency.as_secs_f64() * 1000.0,
            "Headless run finished"
        );
        summary
    }

    /// Print one line per delivery and per newly spawned ant
    fn log_events(&self, world: &World, before: &WorldStats, after: &WorldStats) {
        if self.suppress_events {
            return;
        }
        for n in before.ants_spawned + 1..=after.ants_spawned {
            println!(
                "{} {} {}",
                "🐜".green(),
                format!("tick {}", world.tick()).dimmed(),
                format!("ant #{n} hatched").green()
            );
        }
        for n in before.food_collected + 1..=after.food_collected {
            println!(
                "{} {} {}",
                "🍯".yellow(),
                format!("tick {}", world.tick()).dimmed(),
                format!("food delivered to the nest (total {n})").yellow()
            );
        }
    }

    /// Print simulation summary
    pub fn print_summary(&self, world: &World, summary: &RunSummary) {
        let stats = &summary.stats;
        println!(
            "\n{}\n{} {:.3} ms {} {} {} {} {}",
            "===".bright_blue().bold(),
            "⏱️  Simulation Latency:".green().bold(),
            summary.latency.as_secs_f64() * 1000.0,
            format!("({:.1} s simulated)", summary.simulated_ms / 1000.0).dimmed(),
            "|".dimmed(),
            format!("ticks={}", summary.ticks).cyan(),
            format!("active={}", world.ants().count()).cyan(),
            format!("resting={}", world.resident_count()).cyan(),
        );
        println!(
            "{} {} {} {} {}",
            format!("spawned={}", stats.ants_spawned).cyan(),
            format!("food_collected={}", stats.food_collected).cyan(),
            format!("pheromones={}", world.pheromone_field().len()).cyan(),
            format!("moves={}", stats.moves_committed).cyan(),
            format!("rejected={}", stats.moves_rejected).cyan(),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WorldConfig;

    #[test]
    fn test_run_reports_world_counters() {
        let config = WorldConfig {
            seed: Some(3),
            ant_spawn_period_in_sec: 1.0,
            ..WorldConfig::default()
        };
        let mut world = World::new(config).unwrap();
        let mut engine = SimulationEngine::new(true);

        let summary = engine.run_simulation(&mut world, 50, 100.0);

        assert_eq!(summary.ticks, 50);
        assert_eq!(world.tick(), 50);
        assert_eq!(summary.simulated_ms, 5000.0);
        assert_eq!(summary.stats, world.stats());
        assert!(summary.stats.ants_spawned >= 2);
    }

    #[test]
    fn test_zero_ticks_leaves_world_untouched() {
        let config = WorldConfig {
            seed: Some(3),
            ..WorldConfig::default()
        };
        let mut world = World::new(config).unwrap();
        let before = world.stats();

        let summary = SimulationEngine::new(true).run_simulation(&mut world, 0, 100.0);

        assert_eq!(summary.ticks, 0);
        assert_eq!(world.tick(), 0);
        assert_eq!(summary.stats, before);
    }
}
