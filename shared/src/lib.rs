//! Calorie Tracker Shared Library
//!
//! API types, input validation and calorie-target formulas shared by the
//! backend and any Rust client.

pub mod health_metrics;
pub mod types;
pub mod validation;

// Re-export commonly used items
pub use health_metrics::*;
pub use types::*;
