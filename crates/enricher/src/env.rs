//! Read access to the process environment.
//!
//! The identity resolvers go through [`Environment`] rather than `std::env`
//! directly so that tests can supply fixed values and so that the host can
//! route lookups through its own settings layer.

use std::collections::HashMap;

/// Unique instance id of the hosting container or site.
pub const WEBSITE_INSTANCE_ID: &str = "WEBSITE_INSTANCE_ID";
/// Machine name.
pub const COMPUTERNAME: &str = "COMPUTERNAME";
/// Container name, set on container-based hosting plans.
pub const CONTAINER_NAME: &str = "CONTAINER_NAME";
/// Logical site (application) name.
pub const WEBSITE_SITE_NAME: &str = "WEBSITE_SITE_NAME";
/// Deployment slot name; absent or `production` for the default slot.
pub const WEBSITE_SLOT_NAME: &str = "WEBSITE_SLOT_NAME";

/// A source of environment variables.
#[cfg_attr(test, mockall::automock)]
pub trait Environment: Send + Sync {
    /// Return the value of `name`, or `None` if it is unset.
    fn var(&self, name: &str) -> Option<String>;
}

/// Like [`Environment::var`], but treats an empty value as unset.
pub fn non_empty_var(env: &dyn Environment, name: &str) -> Option<String> {
    env.var(name).filter(|v| !v.is_empty())
}

/// Reads the live process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnvironment;

impl Environment for ProcessEnvironment {
    fn var(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}

impl Environment for HashMap<String, String> {
    fn var(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn map_environment_lookup() {
        let env: HashMap<String, String> = [
            (WEBSITE_SITE_NAME.to_string(), "app".to_string()),
            (WEBSITE_SLOT_NAME.to_string(), String::new()),
        ]
        .into_iter()
        .collect();

        assert_eq!(env.var(WEBSITE_SITE_NAME).as_deref(), Some("app"));
        assert_eq!(env.var(WEBSITE_SLOT_NAME).as_deref(), Some(""));
        assert_eq!(non_empty_var(&env, WEBSITE_SLOT_NAME), None);
        assert_eq!(env.var(COMPUTERNAME), None);
    }

    #[test]
    fn non_empty_var_filters_empty() {
        let mut env = MockEnvironment::new();
        env.expect_var().returning(|_| Some(String::new()));
        assert_eq!(non_empty_var(&env, CONTAINER_NAME), None);
    }
}
