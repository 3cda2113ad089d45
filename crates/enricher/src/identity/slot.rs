//! Slot identity: the site name qualified by its deployment slot.
//!
//! Unlike the role instance, the slot identity is re-read from the environment
//! for every record, since a slot swap changes it under a running process.
//! [`SlotIdentity`] memoises it for the duration of one record only.

use std::cell::OnceCell;

use crate::env::{self, Environment};

/// Name of the default deployment slot, omitted from the identity.
pub const PRODUCTION_SLOT: &str = "production";

/// Combine site and slot names into a lower-case logical identity.
///
/// - `site` + non-default `slot` → `"site-slot"`
/// - `site` + absent or `production` slot → `"site"`
/// - no site → `fallback`
pub fn resolve_slot_identity(env: &dyn Environment, fallback: &str) -> String {
    let Some(site) = env::non_empty_var(env, env::WEBSITE_SITE_NAME) else {
        return fallback.to_owned();
    };

    let identity = match env::non_empty_var(env, env::WEBSITE_SLOT_NAME) {
        Some(slot) if !slot.eq_ignore_ascii_case(PRODUCTION_SLOT) => format!("{site}-{slot}"),
        _ => site,
    };
    identity.to_lowercase()
}

/// Lazily evaluated slot identity, scoped to one enrichment call.
pub struct SlotIdentity<'a> {
    env: &'a dyn Environment,
    fallback: &'a str,
    value: OnceCell<String>,
}

impl<'a> SlotIdentity<'a> {
    pub fn new(env: &'a dyn Environment, fallback: &'a str) -> Self {
        Self {
            env,
            fallback,
            value: OnceCell::new(),
        }
    }

    /// Resolve on first use; later calls within the same record reuse it.
    pub fn get(&self) -> &str {
        self.value
            .get_or_init(|| resolve_slot_identity(self.env, self.fallback))
    }
}
