//! Input readers: model markup and flat JSON documents.

pub mod json;
pub mod xml;

pub use json::{read_delta, read_flat_config};
pub use xml::{MarkupError, ModelSpec, parse_model_file, parse_model_str};
