//! Telemetry initializers: the stages of the enrichment pipeline.
//!
//! Each initializer edits one record in place. Initializers only fill fields
//! that are empty or apply a deterministic rewrite, so running a stage twice
//! leaves the record as it was after the first run.
//!
//! # Error contract
//!
//! An initializer applies every field it can. If one field fails it keeps
//! going and reports the failure through its return value; the pipeline logs
//! it and never drops the record.

pub mod context;
pub mod request;
pub mod scope;

pub use context::ContextInitializer;
pub use request::RequestNormalizer;
pub use scope::ScopeProjector;

use common::{EnrichError, TelemetryRecord};

use crate::ambient::Ambient;

/// One stage of the enrichment pipeline.
pub trait TelemetryInitializer: Send + Sync {
    /// Stage name for identification, removal and logging.
    fn name(&self) -> &'static str;

    /// Enrich `record` in place.
    ///
    /// # Errors
    ///
    /// Returns the first field-scoped failure. All other fields have been
    /// applied when this returns.
    fn initialize(&self, record: &mut TelemetryRecord, ambient: &Ambient<'_>)
        -> Result<(), EnrichError>;
}
