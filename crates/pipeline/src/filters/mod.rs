//! Filter implementations for the candidate pipeline.
//!
//! This module contains all the concrete filter implementations
//! that can be composed into a FilterPipeline.

pub mod disliked_attribute;

// Re-export for convenience
pub use disliked_attribute::{Attribute, DislikedAttributeFilter};
