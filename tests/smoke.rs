// Integration tests for the binary using assert_cmd.
// These tests shell out the compiled binary and validate observable behavior.

use assert_cmd::prelude::*;
use predicates::prelude::*;
use predicates::str::contains;
use std::io::Write;
use std::process::Command;
use tempfile::NamedTempFile;

const BIN: &str = "ant_colony";

#[test]
fn prints_summary_with_defaults() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin(BIN)?;
    cmd.args(["--ticks", "200", "--seed", "42", "--suppress-events"]);

    cmd.assert()
        .success()
        .stdout(contains("==="))
        .stdout(contains("Simulation Latency"))
        .stdout(contains("ticks=200"))
        .stdout(contains("food_collected="));

    Ok(())
}

#[test]
fn reports_hatching_events_unless_suppressed() -> Result<(), Box<dyn std::error::Error>> {
    // Spawn period of 1s at 100ms frames: a second ant hatches within 20 ticks.
    let mut f = NamedTempFile::new()?;
    writeln!(f, "ant_spawn_period_in_sec = 1.0\nnum_ants_to_spawn = 3")?;

    let mut cmd = Command::cargo_bin(BIN)?;
    cmd.args(["--config", f.path().to_str().unwrap(), "--ticks", "20", "--seed", "5"]);
    cmd.assert().success().stdout(contains("ant #2 hatched"));

    let mut cmd = Command::cargo_bin(BIN)?;
    cmd.args([
        "--config",
        f.path().to_str().unwrap(),
        "--ticks",
        "20",
        "--seed",
        "5",
        "--suppress-events",
    ]);
    cmd.assert()
        .success()
        .stdout(contains("hatched").not())
        .stdout(contains("spawned=2"));

    Ok(())
}

#[test]
fn same_seed_gives_same_counters() -> Result<(), Box<dyn std::error::Error>> {
    let run = || -> Result<String, Box<dyn std::error::Error>> {
        let output = Command::cargo_bin(BIN)?
            .args(["--ticks", "300", "--seed", "9", "--suppress-events"])
            .output()?;
        let stdout = String::from_utf8(output.stdout)?;
        // Drop the latency line, keep the counters.
        Ok(stdout.lines().last().unwrap_or_default().to_string())
    };

    assert_eq!(run()?, run()?);
    Ok(())
}

#[test]
fn cli_overrides_apply() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin(BIN)?;
    cmd.args([
        "--ticks", "5",
        "--width", "300",
        "--height", "300",
        "--ants", "0",
        "--seed", "1",
        "--suppress-events",
    ]);

    cmd.assert()
        .success()
        .stdout(contains("spawned=0"))
        .stdout(contains("active=0"));

    Ok(())
}

#[test]
fn invalid_config_fails() -> Result<(), Box<dyn std::error::Error>> {
    let mut f = NamedTempFile::new()?;
    writeln!(f, "[ant]\nnest_pheromone_decay_factor_per_sec = 2.0")?;

    let mut cmd = Command::cargo_bin(BIN)?;
    cmd.args(["--config", f.path().to_str().unwrap(), "--ticks", "1"]);

    cmd.assert()
        .failure()
        .stderr(contains("nest_pheromone_decay_factor_per_sec"));

    Ok(())
}

#[test]
fn missing_config_file_fails() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin(BIN)?;
    cmd.args(["--config", "/no/such/world.toml", "--ticks", "1"]);

    cmd.assert().failure().stderr(contains("IO error"));

    Ok(())
}

#[test]
fn world_too_small_for_food_fails() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin(BIN)?;
    cmd.args(["--width", "100", "--height", "100", "--ticks", "1"]);

    cmd.assert()
        .failure()
        .stderr(contains("Could not place food source"));

    Ok(())
}
