//! Admission control.
//!
//! Bounds how many tasks may be inside their simulated-work section at once.

pub mod gate;

pub use gate::{AdmissionGate, GatePermit};
