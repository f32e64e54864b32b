use std::env;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

fn default_data_dir() -> PathBuf {
    env::var("HOME")
        .map(|home| PathBuf::from(home).join(".lexicard"))
        .unwrap_or_else(|_| PathBuf::from(".lexicard"))
}

#[derive(Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory holding the JSON store. When it cannot be created or
    /// written, the app falls back to an in-memory store.
    pub data_dir: PathBuf,
}

impl StorageConfig {
    pub fn from_env() -> Self {
        let data_dir = env::var("LEXICARD_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_data_dir());

        Self { data_dir }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}
