use crate::error::{Result, SimulationError};
use crate::lattice::Interaction;
use crate::sweep::{temperature_count, MAX_TEMPERATURES};
use serde::{Deserialize, Serialize};

/// How the lattice of each temperature is prepared
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InitialState {
    /// Random spins for every temperature
    #[default]
    Fresh,
    /// Start from the final lattice of the previous temperature
    CarryOver,
}

/// Parameters of a temperature sweep
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SimulationConfig {
    /// Lowest temperature (inclusive)
    pub t_min: f64,
    /// Highest temperature (inclusive)
    pub t_max: f64,
    /// Temperature increment
    pub t_step: f64,
    /// Lattice side length N
    pub size: usize,
    /// Monte Carlo steps per temperature, burn-in included
    pub num_steps: usize,
    /// Trailing steps whose samples enter the statistics
    pub num_analysis: usize,
    /// Leading steps that are never measured
    pub num_burnin: usize,
    /// Coupling constant J
    pub coupling: f64,
    /// External magnetic field B
    pub field: f64,
    /// Fraction of sites proposed for flipping per step
    pub flip_prop: f64,
    #[serde(default)]
    pub initial_state: InitialState,
    /// Run temperatures concurrently (fresh lattices only)
    #[serde(default)]
    pub parallel: bool,
}

impl SimulationConfig {
    /// Validate configuration parameters
    pub fn validate(&self) -> Result<()> {
        if self.size < 2 {
            return Err(invalid(format!(
                "lattice size must be at least 2, got {}",
                self.size
            )));
        }

        if !self.t_min.is_finite() || !self.t_max.is_finite() {
            return Err(invalid("temperature bounds must be finite".to_string()));
        }
        if self.t_min > self.t_max {
            return Err(invalid(format!(
                "t_min ({}) cannot be greater than t_max ({})",
                self.t_min, self.t_max
            )));
        }
        if !self.t_step.is_finite() || self.t_step <= 0.0 {
            return Err(invalid(format!(
                "t_step must be positive, got {}",
                self.t_step
            )));
        }
        if temperature_count(self.t_min, self.t_max, self.t_step).is_none() {
            return Err(invalid(format!(
                "t_step {} over [{}, {}] gives more than {} temperatures",
                self.t_step, self.t_min, self.t_max, MAX_TEMPERATURES
            )));
        }

        if self.num_burnin >= self.num_steps {
            return Err(invalid(format!(
                "num_burnin ({}) must be smaller than num_steps ({})",
                self.num_burnin, self.num_steps
            )));
        }
        if self.num_analysis == 0 {
            return Err(invalid("num_analysis must be positive".to_string()));
        }
        if self.num_analysis > self.num_steps - self.num_burnin {
            return Err(invalid(format!(
                "num_analysis ({}) cannot be greater than the {} steps available after burn-in",
                self.num_analysis,
                self.num_steps - self.num_burnin
            )));
        }

        if !(self.flip_prop > 0.0 && self.flip_prop <= 1.0) {
            return Err(invalid(format!(
                "flip_prop must lie in (0, 1], got {}",
                self.flip_prop
            )));
        }

        if !self.coupling.is_finite() || !self.field.is_finite() {
            return Err(invalid("coupling and field must be finite".to_string()));
        }

        if self.parallel && self.initial_state == InitialState::CarryOver {
            return Err(invalid(
                "parallel sweeps require a fresh lattice per temperature".to_string(),
            ));
        }

        Ok(())
    }

    pub fn interaction(&self) -> Interaction {
        Interaction::new(self.coupling, self.field)
    }

    /// Steps run before the analysis window opens, burn-in included
    pub fn num_warmup(&self) -> usize {
        self.num_steps.saturating_sub(self.num_analysis)
    }
}

fn invalid(reason: String) -> SimulationError {
    SimulationError::Configuration(reason)
}
