/// Errors raised by the simulation core.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SimulationError {
    #[error("invalid configuration: {0}")]
    Configuration(String),

    #[error("lattice size must be at least 2, got {0}")]
    LatticeSize(usize),

    #[error("spin at ({row}, {col}) is {value}, expected +1 or -1")]
    InvalidSpin { row: usize, col: usize, value: i8 },

    #[error("no samples recorded at T = {temperature}")]
    NoSamples { temperature: f64 },

    #[error("{quantity} is not finite at T = {temperature}")]
    NumericDegeneracy {
        temperature: f64,
        quantity: &'static str,
    },
}

pub type Result<T> = std::result::Result<T, SimulationError>;
