pub mod app;
pub mod config;
pub mod errors;
pub mod gaps;
pub mod handlers;
pub mod heatmap;
pub mod models;
pub mod record;
pub mod state;
pub mod storage;
pub mod store;
pub mod streak;
pub mod tracker;
pub mod ui;
pub mod window;

pub use app::router;
pub use config::TrackerConfig;
pub use errors::TrackerError;
pub use state::AppState;
pub use storage::{load_store, resolve_data_path, KeyValueStore, MemoryStore};
pub use store::HabitStore;
pub use tracker::Tracker;
