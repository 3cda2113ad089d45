//! Telemetry enrichment for hosted function invocations.
//!
//! [`EnrichmentPipeline`] runs an ordered chain of [`TelemetryInitializer`]s
//! over every outgoing record, filling in deployment identity and projecting
//! the ambient invocation scope and span tags onto it.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use common::TelemetryRecord;
//! use enricher::{Ambient, EnricherConfig, EnrichmentPipeline, NodeNameCache, RoleInstance};
//! use enricher::env::ProcessEnvironment;
//!
//! let cfg = EnricherConfig::default();
//! let pipeline = EnrichmentPipeline::standard(
//!     &cfg,
//!     Arc::new(ProcessEnvironment),
//!     Arc::new(RoleInstance::new()),
//!     NodeNameCache::new(&cfg.node_name_suffix),
//! );
//!
//! let mut record = TelemetryRecord::request("GET /orders/5", Some("https://app.example/orders/5?code=s"));
//! pipeline.initialize(Some(&mut record), &Ambient::none());
//! assert_eq!(record.as_request().unwrap().url.as_deref(), Some("https://localhost/orders/5"));
//! ```

pub mod ambient;
pub mod config;
pub mod env;
pub mod identity;
pub mod initializers;
pub mod pipeline;
pub mod telemetry;

pub use ambient::{activity_tags_from_attributes, Ambient};
pub use config::EnricherConfig;
pub use identity::{NodeNameCache, RoleInstance};
pub use initializers::TelemetryInitializer;
pub use pipeline::EnrichmentPipeline;
