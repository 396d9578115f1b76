//! Output formatting and logging utilities

use color_eyre::eyre::Result;
use ising::TemperatureResult;
use std::fmt;
use std::fs::File;
use std::io::Write;
use std::time::SystemTime as StdSystemTime;
use tracing::info;
use tracing_subscriber::{
    fmt::format::Writer, fmt::layer, fmt::time::FormatTime, layer::SubscriberExt,
    util::SubscriberInitExt, Registry,
};

/// Custom time formatter that shows only seconds
struct SecondPrecisionTimer;

impl FormatTime for SecondPrecisionTimer {
    fn format_time(&self, w: &mut Writer<'_>) -> fmt::Result {
        let now = StdSystemTime::now();
        let duration = now
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default();

        // Format as HH:MM:SS (only seconds precision)
        let total_seconds = duration.as_secs();
        let hours = (total_seconds / 3600) % 24;
        let minutes = (total_seconds / 60) % 60;
        let seconds = total_seconds % 60;

        write!(w, "{:02}:{:02}:{:02}", hours, minutes, seconds)
    }
}

/// Setup log output to file or stdout
pub fn setup_output(output_path: Option<&String>) {
    match output_path {
        Some(path) => match File::create(path) {
            Ok(log) => {
                let file_layer = layer()
                    .with_writer(log)
                    .with_timer(SecondPrecisionTimer)
                    .with_ansi(false);
                Registry::default().with(file_layer).init();
                info!("Log will be written to: {}", path);
            }
            Err(err) => {
                eprintln!("Could not create log file {}: {}", path, err);
            }
        },
        None => {
            let stdout_layer = layer()
                .with_writer(std::io::stdout)
                .with_timer(SecondPrecisionTimer)
                .with_ansi(true);
            Registry::default().with(stdout_layer).init();
        }
    }
}

fn optional(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.6}", v),
        None => "n/a".to_string(),
    }
}

/// Print one table row per temperature
pub fn print_results<W: Write>(writer: &mut W, rows: &[TemperatureResult]) -> Result<()> {
    writeln!(
        writer,
        "{:>10} {:>12} {:>10} {:>10} {:>10} {:>12} {:>12} {:>10}",
        "T", "<E>", "std(E)", "<|M|>", "std(M)", "C", "chi", "U4"
    )?;
    writeln!(writer, "{}", "-".repeat(93))?;

    for row in rows {
        writeln!(
            writer,
            "{:>10.4} {:>12.6} {:>10.6} {:>10.6} {:>10.6} {:>12} {:>12} {:>10}",
            row.temperature,
            row.mean_energy,
            row.energy_std,
            row.mean_magnetization,
            row.magnetization_std,
            optional(row.specific_heat),
            optional(row.susceptibility),
            optional(row.binder_cumulant)
        )?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_print_results() {
        let rows = vec![TemperatureResult {
            temperature: 0.0,
            mean_energy: -2.0,
            energy_std: 0.0,
            mean_magnetization: 1.0,
            magnetization_std: 0.0,
            specific_heat: None,
            susceptibility: None,
            binder_cumulant: Some(2.0 / 3.0),
            samples: 10,
        }];

        let mut buffer = Vec::new();
        print_results(&mut buffer, &rows).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("<|M|>"));
        assert!(lines[2].contains("-2.000000"));
        assert!(lines[2].contains("n/a"));
        assert!(lines[2].contains("0.666667"));
    }
}
