//! Storage layer for atomic file operations.

mod atomic_json;
mod config_storage;

pub use atomic_json::AtomicJsonFile;
pub use config_storage::ConfigStorage;
