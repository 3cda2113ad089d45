//! Telemetry record model, ambient scope types, and errors shared across
//! `fn-enricher` crates.

pub mod error;
pub mod keys;
pub mod protocol;
pub mod record;
pub mod scope;

pub use error::EnrichError;
pub use record::{RecordKind, RequestData, TelemetryContext, TelemetryRecord};
pub use scope::{ActivityTags, AmbientScope};
