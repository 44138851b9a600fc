use thiserror::Error;

/// Errors produced while building, querying or exporting pitch-bend tables
#[derive(Debug, Error)]
pub enum BendError {
    /// Bend range is not usable (non-finite, negative, or zero where a divisor is needed)
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Raw value outside the 14-bit pitch-bend domain
    #[error("pitch bend value {value} out of range (0-{max})")]
    OutOfRange { value: i64, max: u16 },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, BendError>;
