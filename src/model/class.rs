//! Class model types.
//!
//! We keep two representations, the same split the builder relies on:
//! - `ClassDecl` / `AggregationDecl`: raw declarations as read from the model markup
//! - `ClassNode`: a registered class, linked to its children by `ClassId`

use crate::model::Multiplicity;

/// Position of a class in the model's class set.
///
/// Ids are stable for the lifetime of a `ClassModel`: classes are never removed,
/// and a redeclared class keeps the slot of its first declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClassId(pub usize);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    /// Declared type name, rendered verbatim.
    pub ty: String,
}

impl Attribute {
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
        }
    }
}

/// A class declaration before it is registered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassDecl {
    pub name: String,
    pub is_root: bool,
    pub documentation: String,
    pub attributes: Vec<Attribute>,
}

impl ClassDecl {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_root: false,
            documentation: String::new(),
            attributes: Vec::new(),
        }
    }

    pub fn root(mut self) -> Self {
        self.is_root = true;
        self
    }

    pub fn documented(mut self, documentation: impl Into<String>) -> Self {
        self.documentation = documentation.into();
        self
    }

    pub fn with_attribute(mut self, name: impl Into<String>, ty: impl Into<String>) -> Self {
        self.attributes.push(Attribute::new(name, ty));
        self
    }
}

/// "`source` is contained in `target`".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregationDecl {
    pub source: String,
    pub target: String,
    pub source_multiplicity: String,
    /// Kept verbatim; nothing downstream reads it.
    pub target_multiplicity: Option<String>,
}

impl AggregationDecl {
    pub fn new(
        source: impl Into<String>,
        target: impl Into<String>,
        source_multiplicity: impl Into<String>,
    ) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            source_multiplicity: source_multiplicity.into(),
            target_multiplicity: None,
        }
    }
}

/// A registered class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassNode {
    pub name: String,
    pub is_root: bool,
    pub documentation: String,
    pub attributes: Vec<Attribute>,
    /// Contained classes, in edge-declaration order. May repeat, may form cycles.
    pub children: Vec<ClassId>,
    /// Bounds as a contained child; `0..0` until an aggregation names this class as source.
    pub multiplicity: Multiplicity,
}

impl From<ClassDecl> for ClassNode {
    fn from(decl: ClassDecl) -> Self {
        Self {
            name: decl.name,
            is_root: decl.is_root,
            documentation: decl.documentation,
            attributes: decl.attributes,
            children: Vec::new(),
            multiplicity: Multiplicity::unset(),
        }
    }
}
