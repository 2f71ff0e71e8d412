//! Top-level facade crate for taskgate.
//!
//! Re-exports core types and the server library so users can depend on a single crate.

pub mod core {
    pub use taskgate_core::*;
}

pub mod server {
    pub use taskgate_server::*;
}
