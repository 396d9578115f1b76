use ising::analysis::{critical_temperature, specific_heat_peak, susceptibility_peak};
use ising::{SimulationConfig, SweepReport};
use tracing::{info, warn};

pub fn report_summary(report: &SweepReport, config: &SimulationConfig) {
    info!(
        "\nSweep finished: {} of {} temperatures completed",
        report.rows.len(),
        report.rows.len() + report.failures.len()
    );

    for failure in &report.failures {
        warn!("  T = {:.4}: {}", failure.temperature, failure.error);
    }

    let degenerate = report.rows.iter().filter(|row| row.is_degenerate()).count();
    if degenerate > 0 {
        warn!(
            "{} rows have undefined specific heat and susceptibility (T <= 0)",
            degenerate
        );
    }

    if let Some(t_c) = critical_temperature(config.coupling) {
        info!("\nExact critical temperature (infinite lattice): {:.4}", t_c);
    }
    if let Some(t) = specific_heat_peak(&report.rows) {
        info!("  Specific heat peak at T = {:.4}", t);
    }
    if let Some(t) = susceptibility_peak(&report.rows) {
        info!("  Susceptibility peak at T = {:.4}", t);
    }
}
