use crate::config::{InitialState, SimulationConfig};
use crate::error::{Result, SimulationError};
use crate::lattice::Lattice;
use crate::simulation;
use crate::statistics::{aggregate, TemperatureResult};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;
use tracing::{info, warn};

/// Largest number of temperatures a single sweep may visit
pub const MAX_TEMPERATURES: usize = 1_000_000;

/// Number of grid points from `t_min` to `t_max` inclusive.
///
/// `None` when the bounds or step do not describe a grid, or when the grid
/// would exceed [`MAX_TEMPERATURES`].
pub fn temperature_count(t_min: f64, t_max: f64, t_step: f64) -> Option<usize> {
    if t_step.is_nan() || t_step <= 0.0 || t_max < t_min {
        return None;
    }

    let intervals = ((t_max - t_min) / t_step + 1e-9).floor();
    if !intervals.is_finite() || intervals >= MAX_TEMPERATURES as f64 {
        return None;
    }

    (intervals as usize).checked_add(1)
}

/// Temperatures from `t_min` to `t_max` inclusive, spaced by `t_step`.
///
/// Points are computed as `t_min + i * t_step` so rounding does not
/// accumulate along the grid. Empty when [`temperature_count`] is `None`.
pub fn temperature_grid(t_min: f64, t_max: f64, t_step: f64) -> Vec<f64> {
    let count = temperature_count(t_min, t_max, t_step).unwrap_or(0);
    (0..count).map(|i| t_min + i as f64 * t_step).collect()
}

/// A temperature whose run did not produce a row
#[derive(Debug, Clone, PartialEq)]
pub struct TemperatureFailure {
    pub temperature: f64,
    pub error: SimulationError,
}

/// Rows of a finished sweep in increasing temperature order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SweepReport {
    pub rows: Vec<TemperatureResult>,
    pub failures: Vec<TemperatureFailure>,
}

impl SweepReport {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Runs the Metropolis chain over every temperature of a validated configuration
#[derive(Debug, Clone)]
pub struct TemperatureSweep {
    config: SimulationConfig,
    seed: u64,
    temperatures: Vec<f64>,
}

impl TemperatureSweep {
    /// Validate `config` before any simulation work is done
    pub fn new(config: SimulationConfig, seed: u64) -> Result<Self> {
        config.validate()?;
        let temperatures = temperature_grid(config.t_min, config.t_max, config.t_step);
        Ok(Self {
            config,
            seed,
            temperatures,
        })
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn temperatures(&self) -> &[f64] {
        &self.temperatures
    }

    /// Random number generator owned by the temperature at `index`
    pub fn rng_for(&self, index: usize) -> StdRng {
        StdRng::seed_from_u64(self.seed.wrapping_add(index as u64))
    }

    /// Run the temperature at `index`.
    ///
    /// A fresh random lattice is drawn when `lattice` is `None`. The final
    /// lattice is handed back so the next temperature can continue from it.
    /// An `index` past the end of the grid is a configuration error and the
    /// given lattice is returned untouched.
    pub fn run_temperature(
        &self,
        index: usize,
        lattice: Option<Lattice>,
    ) -> (Result<TemperatureResult>, Option<Lattice>) {
        let Some(&temperature) = self.temperatures.get(index) else {
            let error = SimulationError::Configuration(format!(
                "temperature index {} out of range for a grid of {}",
                index,
                self.temperatures.len()
            ));
            return (Err(error), lattice);
        };
        let mut rng = self.rng_for(index);

        let mut lattice = match lattice {
            Some(lattice) if lattice.size() == self.config.size => lattice,
            _ => match Lattice::random(self.config.size, &mut rng) {
                Ok(lattice) => lattice,
                Err(err) => return (Err(err), None),
            },
        };

        let stream = simulation::run(&mut lattice, &self.config, temperature, &mut rng);
        let result = aggregate(stream, temperature, self.config.size);

        (result, Some(lattice))
    }

    pub fn run(&self) -> SweepReport {
        self.run_with(|_| {})
    }

    /// Run every temperature and call `on_row` for each completed row in
    /// temperature order. A failing temperature is logged and skipped.
    pub fn run_with<F>(&self, mut on_row: F) -> SweepReport
    where
        F: FnMut(&TemperatureResult),
    {
        info!(
            "Sweeping {} temperatures from {} to {} on a {}x{} lattice (seed {})",
            self.temperatures.len(),
            self.config.t_min,
            self.config.t_max,
            self.config.size,
            self.config.size,
            self.seed
        );

        let outcomes: Vec<Result<TemperatureResult>> = if self.config.parallel {
            (0..self.temperatures.len())
                .into_par_iter()
                .map(|index| self.run_temperature(index, None).0)
                .collect()
        } else {
            let mut carried: Option<Lattice> = None;
            let mut outcomes = Vec::with_capacity(self.temperatures.len());
            for index in 0..self.temperatures.len() {
                let (outcome, lattice) = self.run_temperature(index, carried.take());
                if self.config.initial_state == InitialState::CarryOver {
                    carried = lattice;
                }
                outcomes.push(outcome);
            }
            outcomes
        };

        let mut report = SweepReport::default();
        for (temperature, outcome) in self.temperatures.iter().copied().zip(outcomes) {
            match outcome {
                Ok(row) => {
                    info!(
                        "T = {:.4}: <E> = {:.6}, <|M|> = {:.6}",
                        row.temperature, row.mean_energy, row.mean_magnetization
                    );
                    on_row(&row);
                    report.rows.push(row);
                }
                Err(error) => {
                    warn!("T = {:.4}: simulation failed, no row written: {}", temperature, error);
                    report.failures.push(TemperatureFailure { temperature, error });
                }
            }
        }

        report
    }
}
