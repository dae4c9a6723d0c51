use thiserror::Error;

/// Failures surfaced to the caller of an upload-and-process cycle.
/// Numeric edge cases inside extraction are not errors unless the
/// degenerate policy asks for it; they end up as `MetricFlag`s instead.
/// A NaN/infinite input sample is always an error.
#[derive(Debug, Error)]
pub enum UploadError {
    #[error("csv parse failed: {0}")]
    Parse(#[from] csv::Error),

    #[error("no data rows in upload")]
    EmptyInput,

    #[error("degenerate force signal: {reason}")]
    DegenerateSignal { reason: String },

    #[error("non-finite {field} at sample {index}")]
    NonFiniteSample { index: usize, field: &'static str },

    #[error("invalid config: {0}")]
    Config(String),

    #[error("invalid athlete profile: {0}")]
    Profile(String),
}

impl UploadError {
    /// Short label used for telemetry and JSON responses.
    pub fn kind(&self) -> &'static str {
        match self {
            UploadError::Parse(_) => "parse_failure",
            UploadError::EmptyInput => "empty_input",
            UploadError::DegenerateSignal { .. } => "degenerate_signal",
            UploadError::NonFiniteSample { .. } => "non_finite_sample",
            UploadError::Config(_) => "config",
            UploadError::Profile(_) => "profile",
        }
    }
}
