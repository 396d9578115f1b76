mod report;

use self::report::report_summary;
use crate::config::{resolve, Args};
use crate::io::{print_results, setup_output};
use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use ising::{SimulationConfig, TemperatureSweep};
use tracing::info;

pub struct SweepApplication {
    args: Args,
    config: SimulationConfig,
    seed: u64,
}

impl SweepApplication {
    pub fn from_cli() -> Result<Self> {
        let args = Args::parse();
        Self::from_args(args)
    }

    pub fn from_args(args: Args) -> Result<Self> {
        let (config, seed) = resolve(&args)?;
        let seed = seed.unwrap_or_else(rand::random);
        Ok(Self { args, config, seed })
    }

    pub fn run(self) -> Result<()> {
        setup_output(self.args.output.as_ref());

        info!("Configuration loaded:\n{:?}", self.config);

        let sweep = TemperatureSweep::new(self.config, self.seed)
            .wrap_err("Invalid simulation configuration")?;
        info!("Random seed: {}", sweep.seed());
        let total = sweep.temperatures().len();
        let mut completed = 0;
        let report = sweep.run_with(|row| {
            completed += 1;
            info!(
                "Row {}/{} ready (T = {:.4}, {} samples)",
                completed, total, row.temperature, row.samples
            );
        });

        report_summary(&report, sweep.config());

        let stdout = std::io::stdout();
        let mut handle = stdout.lock();
        print_results(&mut handle, &report.rows)?;

        Ok(())
    }
}
