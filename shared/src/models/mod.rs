//! Data models
//!
//! Employee projections returned by the badge API.

pub mod employee;

// Re-exports
pub use employee::*;
