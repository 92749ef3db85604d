//! Core types and state machines of the FacultyHub client.
//!
//! Nothing in this crate performs I/O directly. Durable storage, the HTTP
//! transport and navigation are reached through the traits declared here
//! ([`session::IdentityRepository`], [`session::SessionTerminator`],
//! [`workflow::WorkflowSubmitter`], [`navigation::Navigator`]) and
//! implemented by the outer crates.

pub mod analytics;
pub mod config;
pub mod error;
pub mod guard;
pub mod model;
pub mod navigation;
pub mod notice;
pub mod optimistic;
pub mod session;
pub mod workflow;

pub use error::{ClientError, Result};
