//! Process-wide cache of decorated node names, keyed by slot identity.
//!
//! The cache only ever grows: once a name is stored for an identity it is
//! returned unchanged for the rest of the process lifetime.

use std::sync::Arc;

use dashmap::DashMap;

/// Shared, case-insensitive map from slot identity to node name.
///
/// Cheap to clone; clones share the same map.
#[derive(Clone, Debug)]
pub struct NodeNameCache {
    names: Arc<DashMap<String, String>>,
    suffix: Arc<str>,
}

impl NodeNameCache {
    /// Create an empty cache that decorates identities with `suffix`.
    pub fn new(suffix: &str) -> Self {
        Self {
            names: Arc::new(DashMap::new()),
            suffix: Arc::from(suffix),
        }
    }

    /// Return the node name for `identity`, computing and storing it on a miss.
    ///
    /// Concurrent misses on the same key may each build a candidate, but only
    /// the first one inserted is ever returned.
    pub fn get_or_create(&self, identity: &str) -> String {
        let key = identity.to_lowercase();
        if let Some(name) = self.names.get(&key) {
            return name.value().clone();
        }
        self.names
            .entry(key)
            .or_insert_with(|| format!("{identity}{}", self.suffix))
            .value()
            .clone()
    }

    /// Return the number of cached identities.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
