//! Metropolis Monte Carlo simulation of the 2D Ising model.
//!
//! A [`TemperatureSweep`] runs a burn-in followed by an analysis window at
//! every temperature of a [`SimulationConfig`] and reduces the recorded
//! energy and magnetization samples into one [`TemperatureResult`] per
//! temperature.

pub mod analysis;
pub mod config;
pub mod error;
pub mod lattice;
pub mod metropolis;
pub mod simulation;
pub mod statistics;
pub mod sweep;

pub use config::{InitialState, SimulationConfig};
pub use error::{Result, SimulationError};
pub use lattice::{Interaction, Lattice};
pub use metropolis::Metropolis;
pub use simulation::{Sample, SampleStream};
pub use statistics::{aggregate, TemperatureResult};
pub use sweep::{temperature_count, temperature_grid, SweepReport, TemperatureFailure, TemperatureSweep};
