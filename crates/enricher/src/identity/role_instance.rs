//! Role instance name: the first non-empty of a fixed fallback chain of
//! environment variables, resolved once per process.

use std::sync::OnceLock;

use tracing::debug;

use crate::env::{self, Environment};

/// Variables consulted for the role instance name, highest priority first.
pub const ROLE_INSTANCE_CHAIN: [&str; 3] = [
    env::WEBSITE_INSTANCE_ID,
    env::COMPUTERNAME,
    env::CONTAINER_NAME,
];

/// Return the first non-empty value of [`ROLE_INSTANCE_CHAIN`], if any.
pub fn resolve_role_instance(env: &dyn Environment) -> Option<String> {
    ROLE_INSTANCE_CHAIN
        .iter()
        .find_map(|name| env::non_empty_var(env, name))
}

/// Process-lifetime memo of [`resolve_role_instance`].
///
/// The first call to [`RoleInstance::get`] reads the environment; every later
/// call returns that result, even if the environment has changed since.
#[derive(Debug, Default)]
pub struct RoleInstance {
    value: OnceLock<Option<String>>,
}

impl RoleInstance {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the memoised role instance, resolving it on first use.
    pub fn get(&self, env: &dyn Environment) -> Option<&str> {
        self.value
            .get_or_init(|| {
                let resolved = resolve_role_instance(env);
                debug!(role_instance = ?resolved, "resolved role instance");
                resolved
            })
            .as_deref()
    }
}
