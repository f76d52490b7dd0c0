use thiserror::Error;

/// Failures surfaced by the analysis pipeline.
///
/// Malformed cells never end up here: they are coerced to defaults by the
/// normalizer. Only structural problems with the request reject it.
#[derive(Debug, Error)]
pub enum AnalyzerError {
    #[error("{table} is missing required column '{column}'")]
    Schema { table: &'static str, column: String },
    #[error("{0} is required")]
    MissingInput(&'static str),
    #[error("invalid value '{value}' for {name}")]
    InvalidOption { name: &'static str, value: String },
    #[error("could not read table: {0}")]
    Table(#[from] csv::Error),
    #[error("malformed upload: {0}")]
    Upload(String),
    #[error("internal error: {0}")]
    Internal(String),
}

impl AnalyzerError {
    /// Whether the caller can fix the request and retry.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, AnalyzerError::Internal(_))
    }
}
