use std::collections::HashMap;

use tokio::sync::RwLock;

use crate::{KeyValueStore, StorageError};

/// In-memory fallback store; contents do not survive a restart.
#[derive(Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, serde_json::Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<serde_json::Value>, StorageError> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: serde_json::Value) -> Result<(), StorageError> {
        self.entries.write().await.insert(key.to_string(), value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn absent_key_reads_back_none() {
        let store = MemoryStore::new();
        assert_eq!(store.get("missing").await.unwrap(), None);
    }

    #[tokio::test]
    async fn set_replaces_the_whole_value() {
        let store = MemoryStore::new();
        store.set("k", json!({"a": 1, "b": 2})).await.unwrap();
        store.set("k", json!({"a": 3})).await.unwrap();

        let value = store.get("k").await.unwrap().unwrap();
        assert_eq!(value, json!({"a": 3}));
    }
}
