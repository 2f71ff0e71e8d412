//! taskgate core: transport-agnostic wire types and the shared error surface.
//!
//! This crate defines the JSON contracts of the task endpoints and the error
//! type shared by the server and its tests. It intentionally carries no
//! transport or runtime dependencies.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here.
//! All fallible paths must surface as `TaskGateError`/`Result`.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod protocol;

/// Shared result type.
pub use error::{Result, TaskGateError};
