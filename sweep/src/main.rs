//! Temperature sweep command-line interface
//!
//! Runs a Metropolis simulation of the 2D Ising model over a range of
//! temperatures and prints the equilibrium statistics of each one.

use color_eyre::eyre::Result;

mod app;
mod config;
mod io;

use app::SweepApplication;

fn main() -> Result<()> {
    color_eyre::install()?;
    SweepApplication::from_cli()?.run()
}
