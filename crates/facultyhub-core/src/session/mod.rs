//! Session domain module.
//!
//! # Module Structure
//!
//! - `model`: the `Session` snapshot
//! - `repository`: durable identity storage trait and an in-memory implementation
//! - `store`: the `SessionStore`, sole writer of the current identity

mod model;
mod repository;
mod store;

pub use model::Session;
pub use repository::{IdentityRepository, InMemoryIdentityRepository};
pub use store::{SessionStore, SessionTerminator};
