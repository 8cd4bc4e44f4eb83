//! Meshwork Core
//!
//! This crate provides the fundamental types shared by every Meshwork
//! crate: node identifiers and the closed label category set.
//!
//! # Modules
//!
//! - [`types`] - Core data types (`NodeId`, `Label`)
//! - [`error`] - Error types

pub mod error;
pub mod types;

// Re-export commonly used types
pub use error::CoreError;
pub use types::{Label, NodeId};
