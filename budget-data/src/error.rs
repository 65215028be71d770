use thiserror::Error;

/// Errors raised while exporting or importing calculator state as CSV.
#[derive(Debug, Error)]
pub enum CsvCodecError {
    /// The source could not be read.
    #[error("failed to read CSV source: {0}")]
    FileRead(#[from] std::io::Error),

    /// The file does not have the expected header + data row layout.
    #[error("invalid CSV format: {0}")]
    InvalidFormat(String),

    /// A cell holds a value that is not valid for its column.
    #[error("invalid value '{value}' in column '{column}': {reason}")]
    Validation {
        column: String,
        value: String,
        reason: &'static str,
    },

    /// The csv crate failed to read or write a record.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// An import was started while another one on the same importer was
    /// still running.
    #[error("another import is already in progress")]
    ImportInProgress,
}

impl CsvCodecError {
    pub(crate) fn validation(
        column: &str,
        value: &str,
        reason: &'static str,
    ) -> Self {
        Self::Validation {
            column: column.to_string(),
            value: value.to_string(),
            reason,
        }
    }
}
