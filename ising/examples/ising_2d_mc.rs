use ising::analysis;
use ising::{InitialState, SimulationConfig, TemperatureSweep};

/// 2D Ising Model Monte Carlo Simulation
///
/// This example demonstrates:
/// - Phase transition detection around the critical temperature
/// - Statistical property calculations (magnetization, energy, susceptibility, specific heat)
/// - Comparison with the exact critical temperature

fn main() {
    println!("🧲 2D Ising Model Monte Carlo Simulation");
    println!("=========================================\n");

    let config = SimulationConfig {
        t_min: 1.5,
        t_max: 3.5,
        t_step: 0.1,
        size: 32,
        num_steps: 3000,
        num_analysis: 2000,
        num_burnin: 1000,
        coupling: 1.0,
        field: 0.0,
        flip_prop: 1.0,
        initial_state: InitialState::Fresh,
        parallel: true,
    };
    let t_critical = analysis::critical_temperature_2d();

    println!("Simulation Parameters:");
    println!(
        "- Lattice size: {}×{} ({} spins)",
        config.size,
        config.size,
        config.size * config.size
    );
    println!("- Burn-in steps: {}", config.num_burnin);
    println!("- Sampling steps: {}", config.num_analysis);
    println!("- Critical temperature (exact): T_c = {:.4}", t_critical);
    println!("- Temperature range: {:.2} → {:.2}\n", config.t_min, config.t_max);

    let sweep = match TemperatureSweep::new(config, 2024) {
        Ok(sweep) => sweep,
        Err(err) => {
            eprintln!("Invalid configuration: {}", err);
            return;
        }
    };
    let report = sweep.run();

    println!("┌──────────┬──────────┬──────────┬──────────┬──────────┬──────────┐");
    println!("│    T     │   T/Tc   │    E     │   |M|    │    C     │    χ     │");
    println!("├──────────┼──────────┼──────────┼──────────┼──────────┼──────────┤");
    for row in &report.rows {
        println!(
            "│ {:8.4} │ {:8.4} │ {:8.4} │ {:8.4} │ {:8.4} │ {:8.4} │",
            row.temperature,
            row.temperature / t_critical,
            row.mean_energy,
            row.mean_magnetization,
            row.specific_heat.unwrap_or(f64::NAN),
            row.susceptibility.unwrap_or(f64::NAN)
        );
    }
    println!("└──────────┴──────────┴──────────┴──────────┴──────────┴──────────┘\n");

    println!("📈 Critical Behavior Analysis:");
    if let Some(t) = analysis::specific_heat_peak(&report.rows) {
        println!("- Specific heat peak at T = {:.4} (T/Tc = {:.4})", t, t / t_critical);
    }
    if let Some(t) = analysis::susceptibility_peak(&report.rows) {
        println!("- Susceptibility peak at T = {:.4} (T/Tc = {:.4})", t, t / t_critical);
    }
    for failure in &report.failures {
        println!("- T = {:.4} failed: {}", failure.temperature, failure.error);
    }
}
