//! Shared error type across the assetcache crates.

use thiserror::Error;

/// Stable diagnostic codes (attached to log lines).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Status tool could not be launched or exited non-zero.
    Process,
    /// Status output was not valid JSON.
    Decode,
    /// Status output had no usable top-level `result` object.
    Schema,
    /// A required field was absent from an otherwise valid snapshot.
    MissingField,
    /// A field was present but had the wrong type or an unparsable value.
    InvalidField,
    /// Startup configuration error.
    Config,
    /// Registry update against an unregistered metric name.
    UnknownMetric,
}

impl ErrorKind {
    /// String representation used in structured log fields.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::Process => "PROCESS",
            ErrorKind::Decode => "DECODE",
            ErrorKind::Schema => "SCHEMA",
            ErrorKind::MissingField => "MISSING_FIELD",
            ErrorKind::InvalidField => "INVALID_FIELD",
            ErrorKind::Config => "CONFIG",
            ErrorKind::UnknownMetric => "UNKNOWN_METRIC",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, ExporterError>;

/// Unified error type used by core and the exporter service.
#[derive(Debug, Error)]
pub enum ExporterError {
    #[error("status tool failed: {0}")]
    Process(String),
    #[error("status output is not valid JSON: {0}")]
    Decode(String),
    #[error("status output has no top-level `result` object")]
    Schema,
    #[error("missing field: {0}")]
    MissingField(&'static str),
    #[error("field {field} is not {expected}")]
    InvalidField {
        field: &'static str,
        expected: &'static str,
    },
    #[error("config: {0}")]
    Config(String),
    #[error("unknown metric: {0}")]
    UnknownMetric(String),
}

impl ExporterError {
    /// Map the error to its stable diagnostic code.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ExporterError::Process(_) => ErrorKind::Process,
            ExporterError::Decode(_) => ErrorKind::Decode,
            ExporterError::Schema => ErrorKind::Schema,
            ExporterError::MissingField(_) => ErrorKind::MissingField,
            ExporterError::InvalidField { .. } => ErrorKind::InvalidField,
            ExporterError::Config(_) => ErrorKind::Config,
            ExporterError::UnknownMetric(_) => ErrorKind::UnknownMetric,
        }
    }
}
