use crate::errors::AppError;
use std::{collections::BTreeMap, env, path::Path, path::PathBuf};
use tokio::fs;
use tracing::error;

pub const HABITS_KEY: &str = "habits";
pub const CURRENT_DATE_KEY: &str = "currentDate";
pub const GRAPH_INDEX_KEY: &str = "graphIndex";
pub const THEME_KEY: &str = "theme";

/// String-to-string persistence in the shape of browser local storage.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: String);
    fn remove(&mut self, key: &str);
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) {
        self.entries.insert(key.to_string(), value);
    }

    fn remove(&mut self, key: &str) {
        self.entries.remove(key);
    }
}

pub fn resolve_data_path() -> Result<PathBuf, std::io::Error> {
    if let Ok(path) = env::var("APP_DATA_PATH") {
        return Ok(PathBuf::from(path));
    }

    Ok(PathBuf::from("data/habits.json"))
}

pub async fn load_store(path: &Path) -> MemoryStore {
    match fs::read(path).await {
        Ok(bytes) => match serde_json::from_slice(&bytes) {
            Ok(entries) => MemoryStore { entries },
            Err(err) => {
                error!("failed to parse data file: {err}");
                MemoryStore::default()
            }
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => MemoryStore::default(),
        Err(err) => {
            error!("failed to read data file: {err}");
            MemoryStore::default()
        }
    }
}

pub async fn persist_store(path: &Path, store: &MemoryStore) -> Result<(), AppError> {
    let payload = serde_json::to_vec_pretty(&store.entries).map_err(AppError::internal)?;
    fs::write(path, payload).await.map_err(AppError::internal)?;
    Ok(())
}
