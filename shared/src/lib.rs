//! Shared types for the badge workspace
//!
//! Wire DTOs exchanged with the badge API: authentication payloads,
//! the operator identity record and employee projections.

pub mod client;
pub mod models;
pub mod serde_helpers;
pub mod util;

// Re-exports
pub use serde::{Deserialize, Serialize};
