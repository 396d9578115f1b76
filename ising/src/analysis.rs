//! Reference values for the square-lattice Ising model and simple analysis
//! of finished sweeps.

use crate::statistics::TemperatureResult;

/// Critical temperature of the 2D Ising model (Onsager's exact result)
/// T_c = 2J / (k_B * ln(1 + √2)) ≈ 2.269 J/k_B
pub fn critical_temperature_2d() -> f64 {
    2.0 / (1.0 + 2.0_f64.sqrt()).ln()
}

/// Critical temperature for coupling `coupling`, or `None` when there is no
/// ferromagnetic transition to speak of
pub fn critical_temperature(coupling: f64) -> Option<f64> {
    (coupling > 0.0).then(|| coupling * critical_temperature_2d())
}

/// Theoretical magnetization per site at T=0 (all spins aligned)
pub fn magnetization_at_zero_temp() -> f64 {
    1.0
}

/// Energy per site at T=0 in zero field.
/// Each spin has 4 aligned neighbours, E = -J * 4 / 2 = -2J per site
pub fn energy_per_site_at_zero_temp(coupling: f64) -> f64 {
    -2.0 * coupling.abs()
}

/// Temperature at which `quantity` peaks over the rows of a sweep
pub fn peak_temperature<F>(rows: &[TemperatureResult], quantity: F) -> Option<f64>
where
    F: Fn(&TemperatureResult) -> Option<f64>,
{
    rows.iter()
        .filter_map(|row| quantity(row).map(|value| (row.temperature, value)))
        .filter(|(_, value)| value.is_finite())
        .max_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(temperature, _)| temperature)
}

/// Specific heat peak, an estimate of T_c on a finite lattice
pub fn specific_heat_peak(rows: &[TemperatureResult]) -> Option<f64> {
    peak_temperature(rows, |row| row.specific_heat)
}

/// Susceptibility peak, an estimate of T_c on a finite lattice
pub fn susceptibility_peak(rows: &[TemperatureResult]) -> Option<f64> {
    peak_temperature(rows, |row| row.susceptibility)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn row(temperature: f64, specific_heat: Option<f64>) -> TemperatureResult {
        TemperatureResult {
            temperature,
            mean_energy: -1.0,
            energy_std: 0.1,
            mean_magnetization: 0.5,
            magnetization_std: 0.1,
            specific_heat,
            susceptibility: specific_heat.map(|c| 2.0 - c),
            binder_cumulant: None,
            samples: 10,
        }
    }

    #[test]
    fn test_critical_temperature() {
        assert_relative_eq!(critical_temperature_2d(), 2.269, epsilon = 0.001);
        assert_relative_eq!(critical_temperature(2.0).unwrap(), 4.538, epsilon = 0.001);
        assert_eq!(critical_temperature(-1.0), None);
    }

    #[test]
    fn test_zero_temperature_references() {
        assert_eq!(magnetization_at_zero_temp(), 1.0);
        assert_eq!(energy_per_site_at_zero_temp(1.0), -2.0);
        assert_eq!(energy_per_site_at_zero_temp(-0.5), -1.0);
    }

    #[test]
    fn test_peaks_skip_undefined_rows() {
        let rows = vec![
            row(0.0, None),
            row(1.0, Some(0.4)),
            row(2.0, Some(1.7)),
            row(3.0, Some(0.9)),
        ];
        assert_eq!(specific_heat_peak(&rows), Some(2.0));
        assert_eq!(susceptibility_peak(&rows), Some(1.0));
        assert_eq!(specific_heat_peak(&rows[..1]), None);
    }
}
