//! Errors raised while building or traversing a class model.

use thiserror::Error;

/// Which end of an aggregation edge referenced a class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeEnd {
    Source,
    Target,
}

impl std::fmt::Display for EdgeEnd {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EdgeEnd::Source => f.write_str("source"),
            EdgeEnd::Target => f.write_str("target"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("aggregation {end} references unknown class: {name}")]
    UnknownClass { name: String, end: EdgeEnd },

    #[error("multiplicity {raw:?} must have the form `n` or `min..max`")]
    Multiplicity { raw: String },

    #[error("no class is flagged as root")]
    NoRoot,

    #[error("more than one class is flagged as root: {}", .names.join(", "))]
    MultipleRoots { names: Vec<String> },

    #[error("cyclic containment: {}", .path.join(" -> "))]
    CyclicContainment { path: Vec<String> },
}
