//! Configuration management for temperature sweeps
//!
//! A sweep is described by an optional YAML file whose fields may all be
//! omitted. Missing fields take their defaults and command-line arguments
//! override whatever the file says.

mod args;

pub use args::Args;

use color_eyre::eyre::{eyre, Result, WrapErr};
use ising::{InitialState, SimulationConfig};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Sweep parameters as read from a configuration file
#[derive(Debug, Default, Clone, PartialEq, Deserialize, Serialize)]
pub struct SweepFile {
    pub t_min: Option<f64>,
    pub t_max: Option<f64>,
    pub t_step: Option<f64>,
    pub size: Option<usize>,
    pub num_steps: Option<usize>,
    pub num_analysis: Option<usize>,
    pub num_burnin: Option<usize>,
    pub coupling: Option<f64>,
    pub field: Option<f64>,
    pub flip_prop: Option<f64>,
    pub seed: Option<u64>,
    pub initial_state: Option<InitialState>,
    pub parallel: Option<bool>,
}

impl SweepFile {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .wrap_err_with(|| format!("Unable to read configuration file: {}", path.display()))?;
        serde_yml::from_str(&content).wrap_err("Failed to parse configuration file")
    }

    /// Apply default values to any missing parameters
    pub fn with_defaults(mut self) -> Self {
        let defaults = Self::defaults();
        self.t_min = self.t_min.or(defaults.t_min);
        self.t_max = self.t_max.or(defaults.t_max);
        self.t_step = self.t_step.or(defaults.t_step);
        self.num_steps = self.num_steps.or(defaults.num_steps);
        self.num_analysis = self.num_analysis.or(defaults.num_analysis);
        self.num_burnin = self.num_burnin.or(defaults.num_burnin);
        self.coupling = self.coupling.or(defaults.coupling);
        self.field = self.field.or(defaults.field);
        self.flip_prop = self.flip_prop.or(defaults.flip_prop);
        self.initial_state = self.initial_state.or(defaults.initial_state);
        self.parallel = self.parallel.or(defaults.parallel);
        self
    }

    fn defaults() -> Self {
        SweepFile {
            t_min: Some(2.0),
            t_max: Some(2.6),
            t_step: Some(0.1),
            size: None,
            num_steps: Some(100_000),
            num_analysis: Some(50_000),
            num_burnin: Some(0),
            coupling: Some(1.0),
            field: Some(0.0),
            flip_prop: Some(0.1),
            seed: None,
            initial_state: Some(InitialState::Fresh),
            parallel: Some(false),
        }
    }

    /// Overlay command-line arguments on top of the file values
    pub fn apply_args(mut self, args: &Args) -> Self {
        self.t_min = args.t_min.or(self.t_min);
        self.t_max = args.t_max.or(self.t_max);
        self.t_step = args.t_step.or(self.t_step);
        self.size = args.size.or(self.size);
        self.num_steps = args.num_steps.or(self.num_steps);
        self.num_analysis = args.num_analysis.or(self.num_analysis);
        self.num_burnin = args.num_burnin.or(self.num_burnin);
        self.coupling = args.coupling.or(self.coupling);
        self.field = args.field.or(self.field);
        self.flip_prop = args.flip_prop.or(self.flip_prop);
        self.seed = args.seed.or(self.seed);
        if args.carry_over {
            self.initial_state = Some(InitialState::CarryOver);
        }
        if args.parallel {
            self.parallel = Some(true);
        }
        self
    }

    /// Build the simulation configuration; every field except the seed must be set
    pub fn into_config(self) -> Result<SimulationConfig> {
        Ok(SimulationConfig {
            t_min: required(self.t_min, "t_min")?,
            t_max: required(self.t_max, "t_max")?,
            t_step: required(self.t_step, "t_step")?,
            size: required(self.size, "size")?,
            num_steps: required(self.num_steps, "num_steps")?,
            num_analysis: required(self.num_analysis, "num_analysis")?,
            num_burnin: required(self.num_burnin, "num_burnin")?,
            coupling: required(self.coupling, "coupling")?,
            field: required(self.field, "field")?,
            flip_prop: required(self.flip_prop, "flip_prop")?,
            initial_state: self.initial_state.unwrap_or_default(),
            parallel: self.parallel.unwrap_or(false),
        })
    }
}

fn required<T>(value: Option<T>, name: &str) -> Result<T> {
    value.ok_or_else(|| eyre!("Missing required parameter: {}", name))
}

/// Resolve the configuration and seed from the file (if any) and the arguments
pub fn resolve(args: &Args) -> Result<(SimulationConfig, Option<u64>)> {
    let file = match &args.config_file {
        Some(path) => SweepFile::from_file(path)?,
        None => SweepFile::default(),
    };

    let merged = file.with_defaults().apply_args(args);
    let seed = merged.seed;
    let config = merged.into_config()?;
    Ok((config, seed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults_fill_missing_fields() {
        let file = SweepFile {
            size: Some(16),
            ..Default::default()
        };
        let config = file.with_defaults().into_config().unwrap();

        assert_eq!(config.size, 16);
        assert_eq!(config.t_min, 2.0);
        assert_eq!(config.t_max, 2.6);
        assert_eq!(config.num_steps, 100_000);
        assert_eq!(config.num_analysis, 50_000);
        assert_eq!(config.flip_prop, 0.1);
        assert_eq!(config.initial_state, InitialState::Fresh);
        assert!(!config.parallel);
    }

    #[test]
    fn test_size_is_required() {
        let result = SweepFile::default().with_defaults().into_config();
        assert!(result.is_err());
    }

    #[test]
    fn test_args_override_file() {
        let file = SweepFile {
            size: Some(8),
            coupling: Some(0.5),
            seed: Some(3),
            ..Default::default()
        };
        let args = Args {
            size: Some(32),
            seed: Some(11),
            carry_over: true,
            ..Default::default()
        };

        let merged = file.with_defaults().apply_args(&args);
        assert_eq!(merged.seed, Some(11));

        let config = merged.into_config().unwrap();
        assert_eq!(config.size, 32);
        assert_eq!(config.coupling, 0.5);
        assert_eq!(config.initial_state, InitialState::CarryOver);
    }

    #[test]
    fn test_yaml_file_loading() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(
            temp_file,
            "t_min: 1.5\nt_max: 3.0\nt_step: 0.25\nsize: 12\nnum_steps: 2000\n\
             num_analysis: 1000\nnum_burnin: 500\ninitial_state: carry_over\nseed: 42"
        )
        .unwrap();

        let file = SweepFile::from_file(temp_file.path()).unwrap();
        assert_eq!(file.size, Some(12));
        assert_eq!(file.seed, Some(42));
        assert_eq!(file.coupling, None);

        let config = file.with_defaults().into_config().unwrap();
        assert_eq!(config.initial_state, InitialState::CarryOver);
        assert_eq!(config.coupling, 1.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_yaml_serialization() {
        let file = SweepFile {
            size: Some(20),
            field: Some(0.25),
            ..Default::default()
        }
        .with_defaults();

        let yaml = serde_yml::to_string(&file).unwrap();
        let deserialized: SweepFile = serde_yml::from_str(&yaml).unwrap();
        assert_eq!(deserialized, file);
    }

    #[test]
    fn test_resolve_without_file() {
        let args = Args {
            size: Some(10),
            t_min: Some(1.0),
            t_max: Some(1.0),
            ..Default::default()
        };
        let (config, seed) = resolve(&args).unwrap();
        assert_eq!(config.size, 10);
        assert_eq!(config.t_max, 1.0);
        assert_eq!(seed, None);
    }
}
