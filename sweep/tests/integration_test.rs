//! Integration tests running the example configuration through the core
//!
//! The example file describes a long production sweep, so the step counts are
//! shortened before running.

use ising::{SimulationConfig, TemperatureSweep};
use std::fs;
use std::path::PathBuf;

/// Helper function to get the path to example files
fn example_path(filename: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("example")
        .join(filename)
}

fn load_example() -> SimulationConfig {
    let content = fs::read_to_string(example_path("sweep.yaml")).unwrap();
    serde_yml::from_str(&content).unwrap()
}

#[test]
fn test_example_config_is_valid() {
    let config = load_example();
    assert!(config.validate().is_ok());
    assert_eq!(config.size, 16);
}

#[test]
fn test_shortened_example_sweep() {
    let mut config = load_example();
    config.size = 8;
    config.num_steps = 400;
    config.num_burnin = 200;
    config.num_analysis = 200;

    let sweep = TemperatureSweep::new(config, 42).unwrap();
    let report = sweep.run();

    assert!(report.is_complete());
    assert_eq!(report.rows.len(), sweep.temperatures().len());
    assert_eq!(report.rows.len(), 16);
    for row in &report.rows {
        assert!(row.mean_magnetization >= 0.0 && row.mean_magnetization <= 1.0);
        assert!(row.mean_energy >= -2.0 - 1e-12 && row.mean_energy <= 2.0 + 1e-12);
        assert!(row.specific_heat.unwrap() >= 0.0);
        assert!(row.susceptibility.unwrap() >= 0.0);
    }
}
