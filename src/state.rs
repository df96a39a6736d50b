use crate::storage::MemoryStore;
use crate::tracker::Tracker;
use std::{path::PathBuf, sync::Arc};
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub data_path: PathBuf,
    pub tracker: Arc<Mutex<Tracker>>,
    pub store: Arc<Mutex<MemoryStore>>,
}

impl AppState {
    pub fn new(data_path: PathBuf, tracker: Tracker, store: MemoryStore) -> Self {
        Self {
            data_path,
            tracker: Arc::new(Mutex::new(tracker)),
            store: Arc::new(Mutex::new(store)),
        }
    }
}
