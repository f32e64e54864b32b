use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tokio::sync::Mutex;

use crate::{KeyValueStore, StorageError};

const STORE_FILE: &str = "store.json";

/// File-backed store: one JSON object holding all keys, rewritten whole on
/// every `set`.
pub struct JsonFileStore {
    path: PathBuf,
    // Serializes read-modify-write cycles on the backing file.
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    /// Opens (and probes) the data directory; fails when it cannot be
    /// created or written, so the caller can fall back to memory.
    pub fn open(data_dir: &Path) -> Result<Self, StorageError> {
        std::fs::create_dir_all(data_dir)?;

        let path = data_dir.join(STORE_FILE);
        if !path.exists() {
            std::fs::write(&path, "{}")?;
        }

        Ok(Self {
            path,
            write_lock: Mutex::new(()),
        })
    }

    async fn read_all(&self) -> Result<HashMap<String, serde_json::Value>, StorageError> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(HashMap::new()),
            Err(e) => return Err(e.into()),
        };

        if raw.trim().is_empty() {
            return Ok(HashMap::new());
        }

        Ok(serde_json::from_str(&raw)?)
    }
}

#[async_trait::async_trait]
impl KeyValueStore for JsonFileStore {
    async fn get(&self, key: &str) -> Result<Option<serde_json::Value>, StorageError> {
        let mut all = self.read_all().await?;
        Ok(all.remove(key))
    }

    async fn set(&self, key: &str, value: serde_json::Value) -> Result<(), StorageError> {
        let _guard = self.write_lock.lock().await;

        let mut all = self.read_all().await?;
        all.insert(key.to_string(), value);

        let serialized = serde_json::to_string_pretty(&all)?;
        tokio::fs::write(&self.path, serialized).await?;
        Ok(())
    }
}
