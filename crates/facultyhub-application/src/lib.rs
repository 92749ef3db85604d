//! Application layer for FacultyHub.
//!
//! Use cases and view models that coordinate the session store, the
//! workflow engine and the resource clients. Each operation catches its
//! errors at the boundary: the caller gets a `Result`, and the user gets a
//! notice or a `failed` workflow state.

pub mod admin;
pub mod auth;
pub mod collections;
pub mod context;
pub mod dashboard;
pub mod patents;
pub mod projects;
pub mod reconcile;
pub mod report;
pub mod scholar_sync;
pub mod settings;
pub mod signup;

pub use context::FacultyHub;
