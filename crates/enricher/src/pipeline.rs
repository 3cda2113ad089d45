//! The ordered chain of initializers applied to every record.
//!
//! ```text
//! record ──► context ──► request ──► scope ──► transport
//! ```
//!
//! Stages run in registration order. A failing stage is logged and skipped;
//! the record always reaches the end of the chain.

use std::sync::Arc;

use common::TelemetryRecord;
use tracing::warn;

use crate::ambient::Ambient;
use crate::config::EnricherConfig;
use crate::env::Environment;
use crate::identity::{NodeNameCache, RoleInstance};
use crate::initializers::{
    ContextInitializer, RequestNormalizer, ScopeProjector, TelemetryInitializer,
};

/// An ordered chain of [`TelemetryInitializer`]s.
#[derive(Default)]
pub struct EnrichmentPipeline {
    initializers: Vec<Box<dyn TelemetryInitializer>>,
}

impl EnrichmentPipeline {
    /// Create an empty pipeline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the standard context → request → scope chain.
    ///
    /// The role instance memo and the node name cache are owned by the caller
    /// and live for the whole process; pass the same instances to every
    /// pipeline built in that process.
    pub fn standard(
        cfg: &EnricherConfig,
        env: Arc<dyn Environment>,
        role_instance: Arc<RoleInstance>,
        node_names: NodeNameCache,
    ) -> Self {
        let mut pipeline = Self::new();
        pipeline.push(ContextInitializer::new(
            env,
            role_instance,
            node_names,
            cfg.fallback_identity.clone(),
            cfg.default_ip.clone(),
        ));
        pipeline.push(RequestNormalizer::new(cfg.placeholder_host.clone()));
        pipeline.push(ScopeProjector::new());
        pipeline
    }

    /// Append an initializer to the end of the chain.
    pub fn push<I: TelemetryInitializer + 'static>(&mut self, initializer: I) {
        self.initializers.push(Box::new(initializer));
    }

    /// Remove every initializer named `name`. Returns `true` if any was removed.
    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.initializers.len();
        self.initializers.retain(|i| i.name() != name);
        self.initializers.len() != before
    }

    /// Names of all initializers in chain order.
    pub fn names(&self) -> Vec<&'static str> {
        self.initializers.iter().map(|i| i.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.initializers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.initializers.is_empty()
    }

    /// Run every initializer over `record`. An absent record is a no-op.
    pub fn initialize(&self, record: Option<&mut TelemetryRecord>, ambient: &Ambient<'_>) {
        let Some(record) = record else {
            return;
        };

        for initializer in &self.initializers {
            if let Err(e) = initializer.initialize(record, ambient) {
                warn!(
                    initializer = initializer.name(),
                    field = e.field(),
                    error = %e,
                    "enrichment step skipped a field"
                );
            }
        }
    }
}
