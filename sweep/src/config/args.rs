//! Command-line argument parsing for temperature sweeps

use clap::Parser;

/// 2D Ising model temperature sweep with optional YAML configuration
#[derive(Parser, Debug, Default)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to a YAML configuration file
    #[arg(short, long)]
    pub config_file: Option<String>,

    /// Minimum temperature (inclusive)
    #[arg(long)]
    pub t_min: Option<f64>,

    /// Maximum temperature (inclusive)
    #[arg(long)]
    pub t_max: Option<f64>,

    /// Temperature step size
    #[arg(long)]
    pub t_step: Option<f64>,

    /// Lattice size (NxN)
    #[arg(short = 'n', long)]
    pub size: Option<usize>,

    /// Total number of steps per temperature
    #[arg(long)]
    pub num_steps: Option<usize>,

    /// Number of trailing steps used in analysis
    #[arg(long)]
    pub num_analysis: Option<usize>,

    /// Number of burn-in steps
    #[arg(long)]
    pub num_burnin: Option<usize>,

    /// Interaction strength J
    #[arg(short = 'j', long)]
    pub coupling: Option<f64>,

    /// Applied magnetic field B
    #[arg(short = 'b', long)]
    pub field: Option<f64>,

    /// Proportion of spins to consider flipping per step
    #[arg(long)]
    pub flip_prop: Option<f64>,

    /// Random seed (drawn from entropy when absent)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Start each temperature from the previous temperature's final lattice
    #[arg(long)]
    pub carry_over: bool,

    /// Run temperatures in parallel
    #[arg(long)]
    pub parallel: bool,

    /// Write the log to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<String>,
}
