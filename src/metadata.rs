//! Shared metadata bag
//!
//! Metadata is a handle, not a value: cloning a [`Metadata`] shares the
//! underlying map, and every contextual error holding a clone observes writes
//! made through any of the others.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;
use serde_json::Value;

/// Reference-shared map from field name to value
#[derive(Clone, Default)]
pub struct Metadata {
    inner: Arc<RwLock<HashMap<String, Value>>>,
}

impl Metadata {
    /// Create a new, empty bag with its own storage
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a copy of the value stored under `field`
    pub fn get(&self, field: &str) -> Option<Value> {
        self.inner.read().get(field).cloned()
    }

    /// Store `value` under `field`, returning the value it replaced
    ///
    /// The write is visible through every handle sharing this storage.
    pub fn insert(&self, field: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.inner.write().insert(field.into(), value.into())
    }

    /// Whether a value is stored under `field`
    pub fn contains_key(&self, field: &str) -> bool {
        self.inner.read().contains_key(field)
    }

    /// Number of stored fields
    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    /// Whether no fields are stored
    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    /// Field names currently stored, in no particular order
    pub fn keys(&self) -> Vec<String> {
        self.inner.read().keys().cloned().collect()
    }

    /// Owned copy of the current contents
    ///
    /// Later writes to the bag do not show up in the returned map.
    pub fn snapshot(&self) -> HashMap<String, Value> {
        self.inner.read().clone()
    }

    /// Whether both handles refer to the same storage
    pub fn shares_storage_with(&self, other: &Metadata) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for Metadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.inner.read().iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_insert_overwrites() {
        let metadata = Metadata::new();

        assert_eq!(metadata.insert("attempt", 1), None);
        assert_eq!(metadata.insert("attempt", 2), Some(json!(1)));
        assert_eq!(metadata.get("attempt"), Some(json!(2)));
        assert_eq!(metadata.len(), 1);
    }

    #[test]
    fn test_clone_shares_storage() {
        let metadata = Metadata::new();
        let shared = metadata.clone();

        shared.insert("user_id", "user-789");

        assert!(metadata.shares_storage_with(&shared));
        assert_eq!(metadata.get("user_id"), Some(json!("user-789")));
    }

    #[test]
    fn test_new_bags_are_independent() {
        let first = Metadata::new();
        let second = Metadata::new();

        first.insert("host", "localhost:5432");

        assert!(!first.shares_storage_with(&second));
        assert!(second.is_empty());
        assert!(!second.contains_key("host"));
    }

    #[test]
    fn test_snapshot_is_detached() {
        let metadata = Metadata::new();
        metadata.insert("timeout_ms", 5000);

        let snapshot = metadata.snapshot();
        metadata.insert("retry", true);

        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot.get("timeout_ms"), Some(&json!(5000)));
        assert_eq!(metadata.len(), 2);
    }

    #[test]
    fn test_keys_and_debug() {
        let metadata = Metadata::new();
        metadata.insert("operation", "fetch_user");

        assert_eq!(metadata.keys(), vec!["operation".to_string()]);
        assert_eq!(format!("{metadata:?}"), r#"{"operation": String("fetch_user")}"#);
    }
}
