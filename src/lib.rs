//! Class-diagram to configuration generator.
//!
//! - [`model`]: class declarations, multiplicities, and the linked containment graph
//! - [`parse`]: model markup and flat JSON readers
//! - [`render`]: hierarchical configuration document and flat metadata catalog
//! - [`delta`]: additions/deletions/updates between two flat configurations
//! - [`pipeline`]: the full run producing all four output documents

pub mod config;
pub mod delta;
pub mod error;
pub mod model;
pub mod parse;
pub mod pipeline;
pub mod render;

pub use error::{Error, Result};
