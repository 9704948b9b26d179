//! Infrastructure implementations.
//!
//! Contains port trait implementations for external dependencies.

pub mod clock;
pub mod config;
pub mod feed;
pub mod memory_store;
pub mod network_state;
pub mod ports;
pub mod snapshot_file;
