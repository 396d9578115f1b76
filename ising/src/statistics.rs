//! Reduction of a sample stream into per-temperature equilibrium statistics.
//!
//! All quantities in a [`TemperatureResult`] are per spin. The magnetization
//! statistics use |M| so that the two symmetry-broken states do not cancel.

use crate::error::{Result, SimulationError};
use crate::simulation::Sample;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Running mean and variance (Welford's algorithm)
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RunningMoments {
    count: usize,
    mean: f64,
    m2: f64,
}

impl RunningMoments {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, value: f64) {
        self.count += 1;
        let delta = value - self.mean;
        self.mean += delta / self.count as f64;
        self.m2 += delta * (value - self.mean);
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// Population variance, zero for fewer than two values
    pub fn variance(&self) -> f64 {
        if self.count < 2 {
            0.0
        } else {
            (self.m2 / self.count as f64).max(0.0)
        }
    }

    pub fn std_dev(&self) -> f64 {
        self.variance().sqrt()
    }
}

/// Aggregated statistics of one temperature
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemperatureResult {
    pub temperature: f64,
    /// <E> / N^2
    pub mean_energy: f64,
    /// Standard deviation of E / N^2
    pub energy_std: f64,
    /// <|M|> / N^2
    pub mean_magnetization: f64,
    /// Standard deviation of |M| / N^2
    pub magnetization_std: f64,
    /// (<E^2> - <E>^2) / (T^2 N^2), undefined for T <= 0
    pub specific_heat: Option<f64>,
    /// (<M^2> - <|M|>^2) / (T N^2), undefined for T <= 0
    pub susceptibility: Option<f64>,
    /// 1 - <M^4> / (3 <M^2>^2)
    pub binder_cumulant: Option<f64>,
    pub samples: usize,
}

impl TemperatureResult {
    /// True when the fluctuation quantities could not be evaluated
    pub fn is_degenerate(&self) -> bool {
        self.specific_heat.is_none() || self.susceptibility.is_none()
    }
}

/// Reduce the samples of one temperature on an N x N lattice
pub fn aggregate<I>(samples: I, temperature: f64, size: usize) -> Result<TemperatureResult>
where
    I: IntoIterator<Item = Sample>,
{
    let sites = (size * size) as f64;
    let mut energy = RunningMoments::new();
    let mut abs_mag = RunningMoments::new();
    let mut mag2 = 0.0;
    let mut mag4 = 0.0;

    for sample in samples {
        let m = sample.magnetization as f64;
        energy.push(sample.energy);
        abs_mag.push(m.abs());
        mag2 += m * m;
        mag4 += m * m * m * m;
    }

    let count = energy.count();
    if count == 0 {
        return Err(SimulationError::NoSamples { temperature });
    }
    let mag2 = mag2 / count as f64;
    let mag4 = mag4 / count as f64;

    let fluctuations = temperature > 0.0 && temperature.is_finite();
    if !fluctuations {
        warn!(
            "T = {}: specific heat and susceptibility are undefined",
            temperature
        );
    }

    let result = TemperatureResult {
        temperature,
        mean_energy: energy.mean() / sites,
        energy_std: energy.std_dev() / sites,
        mean_magnetization: abs_mag.mean() / sites,
        magnetization_std: abs_mag.std_dev() / sites,
        specific_heat: fluctuations
            .then(|| energy.variance() / (temperature * temperature * sites)),
        susceptibility: fluctuations.then(|| abs_mag.variance() / (temperature * sites)),
        binder_cumulant: (mag2 > 0.0).then(|| 1.0 - mag4 / (3.0 * mag2 * mag2)),
        samples: count,
    };

    check_finite(&result)?;
    Ok(result)
}

fn check_finite(result: &TemperatureResult) -> Result<()> {
    let quantities = [
        ("mean energy", Some(result.mean_energy)),
        ("energy standard deviation", Some(result.energy_std)),
        ("mean magnetization", Some(result.mean_magnetization)),
        ("specific heat", result.specific_heat),
        ("susceptibility", result.susceptibility),
        ("Binder cumulant", result.binder_cumulant),
    ];

    for (quantity, value) in quantities {
        if value.is_some_and(|v| !v.is_finite()) {
            return Err(SimulationError::NumericDegeneracy {
                temperature: result.temperature,
                quantity,
            });
        }
    }

    Ok(())
}
