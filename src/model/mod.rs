//! Class model: declarations, multiplicities and the linked containment graph.

pub mod builder;
pub mod class;
pub mod error;
pub mod multiplicity;

pub use builder::{ClassModel, ModelBuilder, ModelLinker};
pub use class::{AggregationDecl, Attribute, ClassDecl, ClassId, ClassNode};
pub use error::{EdgeEnd, ModelError};
pub use multiplicity::Multiplicity;
