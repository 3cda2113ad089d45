//! Identity defaults: role name, role instance, node name, source IP and
//! process id.

use std::sync::Arc;

use common::keys::property;
use common::record::fill_if_empty;
use common::{EnrichError, TelemetryRecord};

use super::TelemetryInitializer;
use crate::ambient::Ambient;
use crate::env::Environment;
use crate::identity::{NodeNameCache, RoleInstance, SlotIdentity};

/// Fills identity fields a record lacks. Never overwrites a non-empty value.
pub struct ContextInitializer {
    env: Arc<dyn Environment>,
    role_instance: Arc<RoleInstance>,
    node_names: NodeNameCache,
    fallback_identity: String,
    default_ip: String,
    process_id: String,
}

impl ContextInitializer {
    pub fn new(
        env: Arc<dyn Environment>,
        role_instance: Arc<RoleInstance>,
        node_names: NodeNameCache,
        fallback_identity: impl Into<String>,
        default_ip: impl Into<String>,
    ) -> Self {
        Self {
            env,
            role_instance,
            node_names,
            fallback_identity: fallback_identity.into(),
            default_ip: default_ip.into(),
            process_id: std::process::id().to_string(),
        }
    }
}

impl TelemetryInitializer for ContextInitializer {
    fn name(&self) -> &'static str {
        "context"
    }

    fn initialize(
        &self,
        record: &mut TelemetryRecord,
        _ambient: &Ambient<'_>,
    ) -> Result<(), EnrichError> {
        let identity = SlotIdentity::new(self.env.as_ref(), &self.fallback_identity);
        let ctx = &mut record.context;

        if ctx.cloud_role_name.is_empty() {
            fill_if_empty(&mut ctx.cloud_role_name, identity.get());
        }

        if let Some(instance) = self.role_instance.get(self.env.as_ref()) {
            fill_if_empty(&mut ctx.cloud_role_instance, instance);
        }

        if ctx.node_name.is_empty() && !identity.get().is_empty() {
            ctx.node_name = self.node_names.get_or_create(identity.get());
        }

        fill_if_empty(&mut ctx.location_ip, &self.default_ip);

        record
            .properties
            .entry(property::PROCESS_ID.to_owned())
            .or_insert_with(|| self.process_id.clone());

        Ok(())
    }
}
