//! mergesheet core - pure domain logic with no process or file I/O
//!
//! This crate contains the domain types, the ports (interfaces) and the
//! export pipeline for mergesheet. It does not run git or touch the
//! filesystem; that is done by the adapters in the `mergesheet` crate.

pub mod app;
pub mod domain;
pub mod error;
pub mod ports;

// Re-exports for ergonomics
pub use domain::*;
pub use error::*;
