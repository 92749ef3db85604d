//! File-backed implementations of the FacultyHub storage seams.
//!
//! - [`paths`]: where configuration and persisted identity live
//! - [`storage`]: atomic JSON files and the `config.toml` loader
//! - [`identity_repository`]: the durable identity used by the session store

pub mod identity_repository;
pub mod paths;
pub mod storage;

pub use crate::identity_repository::FileIdentityRepository;
pub use crate::paths::{FacultyHubPaths, PathError};
pub use crate::storage::{AtomicJsonFile, ConfigStorage};
