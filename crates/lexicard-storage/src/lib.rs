use std::path::Path;
use std::sync::Arc;

mod file;
mod keys;
mod memory;

pub use file::JsonFileStore;
pub use keys::{
    LANGUAGE_KEY, WORDS_KEY, load_target_language, load_words, save_target_language, save_words,
};
pub use memory::MemoryStore;

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Durable key-value storage with JSON-serializable values.
///
/// No transactions, no partial updates; every `set` replaces the whole value
/// under its key.
#[async_trait::async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<serde_json::Value>, StorageError>;

    async fn set(&self, key: &str, value: serde_json::Value) -> Result<(), StorageError>;
}

/// Picks a backend by host capability: the file store when the data
/// directory is usable, otherwise an in-memory fallback.
pub fn open_default(data_dir: &Path) -> Arc<dyn KeyValueStore> {
    match JsonFileStore::open(data_dir) {
        Ok(store) => Arc::new(store),
        Err(e) => {
            tracing::warn!(
                "data dir {} unusable ({e}), falling back to in-memory storage",
                data_dir.display()
            );
            Arc::new(MemoryStore::new())
        }
    }
}
