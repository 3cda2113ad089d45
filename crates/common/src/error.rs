//! Field-scoped enrichment errors.

use thiserror::Error;

/// Error raised by a single enrichment step.
///
/// None of these abort enrichment of a record. The pipeline logs them and
/// moves on; the record keeps every field that was already applied.
/// [`EnrichError::field`] names the field that was skipped:
/// - [`EnrichError::MalformedUrl`] → `url`
/// - [`EnrichError::InvalidHost`] → `url.host`
/// - [`EnrichError::InvalidSuccessFlag`] → `success`
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EnrichError {
    /// The request URL could not be parsed as an absolute URL.
    ///
    /// The carried value has its query string removed.
    #[error("malformed request url: {0}")]
    MalformedUrl(String),

    /// The placeholder host was rejected when substituted into a URL.
    #[error("invalid placeholder host: {0}")]
    InvalidHost(String),

    /// A `Succeeded` activity tag did not hold a boolean.
    #[error("invalid success flag: {0:?}")]
    InvalidSuccessFlag(String),
}

impl EnrichError {
    /// Returns the record field that was left untouched because of this error.
    pub fn field(&self) -> &'static str {
        match self {
            EnrichError::MalformedUrl(_) => "url",
            EnrichError::InvalidHost(_) => "url.host",
            EnrichError::InvalidSuccessFlag(_) => "success",
        }
    }
}
