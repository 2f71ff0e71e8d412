//! taskgate server library entry.
//!
//! Wires the admission gate, the statistics aggregator and the task processor
//! behind an axum router. Consumed by the binary (`main.rs`) and by
//! integration tests.

pub mod admission;
pub mod app_state;
pub mod config;
pub mod lifecycle;
pub mod obs;
pub mod ops;
pub mod processor;
pub mod router;
pub mod transport;
