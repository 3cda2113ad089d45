//! Line protocol spoken by the `fn-enricher` command-line host.
//!
//! Each stdin line is one JSON [`EnrichRequest`]; each stdout line is the
//! matching [`EnrichResponse`].

use serde::{Deserialize, Serialize};

use crate::record::TelemetryRecord;
use crate::scope::{ActivityTags, AmbientScope};

// ---------------------------------------------------------------------------
// Enrich
// ---------------------------------------------------------------------------

/// One record plus the ambient context active when it was emitted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrichRequest {
    /// The record to enrich.
    pub record: TelemetryRecord,
    /// Logged scope of the invocation, if any.
    #[serde(default)]
    pub scope: Option<AmbientScope>,
    /// Tags of the active span, if a span is active.
    #[serde(default)]
    pub activity: Option<ActivityTags>,
}

/// Output line: either the enriched record or an error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrichResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub record: Option<TelemetryRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorResponse>,
}

impl EnrichResponse {
    /// Successful response carrying the enriched record.
    pub fn ok(record: TelemetryRecord) -> Self {
        Self {
            record: Some(record),
            error: None,
        }
    }

    /// Error response for a line that could not be processed.
    pub fn error(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            record: None,
            error: Some(ErrorResponse::new(code, message)),
        }
    }
}

// ---------------------------------------------------------------------------
// Error response
// ---------------------------------------------------------------------------

/// Error body emitted for an unprocessable input line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Short machine-readable error code (e.g. `"bad_request"`).
    pub code: String,
    /// Human-readable description.
    pub message: String,
}

impl ErrorResponse {
    /// Construct an [`ErrorResponse`] from a code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}
