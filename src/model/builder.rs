//! Class model construction.
//!
//! Building is two-phase and the phases are separate types:
//! 1. `ModelBuilder` registers class declarations (`add_class`)
//! 2. `ModelLinker` resolves aggregation edges by name (`add_aggregation`)
//!
//! `ModelLinker::build` then resolves the unique root and freezes the result
//! into a `ClassModel`.

use crate::model::{
    AggregationDecl, ClassDecl, ClassId, ClassNode, EdgeEnd, ModelError, Multiplicity,
};
use indexmap::IndexMap;
use log::{debug, warn};

/// Declaration phase.
#[derive(Debug, Default)]
pub struct ModelBuilder {
    classes: IndexMap<String, ClassNode>,
}

impl ModelBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a class. A later declaration with the same name replaces the
    /// earlier one but keeps its position in the class set.
    pub fn add_class(&mut self, decl: ClassDecl) -> ClassId {
        let name = decl.name.clone();
        let (index, previous) = self.classes.insert_full(name, ClassNode::from(decl));
        if previous.is_some() {
            warn!(class = self.classes[index].name.as_str(); "duplicate class declaration, keeping the last one");
        }
        ClassId(index)
    }

    /// Finish declaring classes and start linking them.
    pub fn link(self) -> ModelLinker {
        let sourced = vec![false; self.classes.len()];
        ModelLinker {
            classes: self.classes,
            sourced,
        }
    }
}

/// Linking phase: every class is known, aggregations can be resolved.
#[derive(Debug)]
pub struct ModelLinker {
    classes: IndexMap<String, ClassNode>,
    /// Classes whose bounds were already set by an earlier edge.
    sourced: Vec<bool>,
}

impl ModelLinker {
    /// Append `source` to `target`'s children and set `source`'s bounds from
    /// the source-side multiplicity. Repeated edges from the same source
    /// overwrite its bounds.
    pub fn add_aggregation(&mut self, edge: &AggregationDecl) -> Result<(), ModelError> {
        let source = self.lookup(&edge.source, EdgeEnd::Source)?;
        let target = self.lookup(&edge.target, EdgeEnd::Target)?;
        let multiplicity = Multiplicity::parse(&edge.source_multiplicity)?;

        self.classes[target.0].children.push(source);

        let node = &mut self.classes[source.0];
        if self.sourced[source.0] && node.multiplicity != multiplicity {
            debug!(
                class = node.name.as_str(),
                old = node.multiplicity.to_string(),
                new = multiplicity.to_string();
                "aggregation overwrites earlier bounds"
            );
        }
        node.multiplicity = multiplicity;
        self.sourced[source.0] = true;

        Ok(())
    }

    /// Resolve the single root class and freeze the model.
    pub fn build(self) -> Result<ClassModel, ModelError> {
        let roots: Vec<usize> = self
            .classes
            .values()
            .enumerate()
            .filter(|(_, node)| node.is_root)
            .map(|(i, _)| i)
            .collect();

        let root = match roots.as_slice() {
            [] => return Err(ModelError::NoRoot),
            [only] => ClassId(*only),
            _ => {
                return Err(ModelError::MultipleRoots {
                    names: roots
                        .iter()
                        .map(|&i| self.classes[i].name.clone())
                        .collect(),
                });
            }
        };

        Ok(ClassModel {
            classes: self.classes,
            root,
        })
    }

    fn lookup(&self, name: &str, end: EdgeEnd) -> Result<ClassId, ModelError> {
        self.classes
            .get_index_of(name)
            .map(ClassId)
            .ok_or_else(|| ModelError::UnknownClass {
                name: name.to_string(),
                end,
            })
    }
}

/// A fully linked class model with exactly one root.
#[derive(Debug, Clone)]
pub struct ClassModel {
    classes: IndexMap<String, ClassNode>,
    root: ClassId,
}

impl ClassModel {
    /// Declare-then-link in one call.
    pub fn from_decls(
        classes: impl IntoIterator<Item = ClassDecl>,
        aggregations: &[AggregationDecl],
    ) -> Result<Self, ModelError> {
        let mut builder = ModelBuilder::new();
        for decl in classes {
            builder.add_class(decl);
        }
        let mut linker = builder.link();
        for edge in aggregations {
            linker.add_aggregation(edge)?;
        }
        linker.build()
    }

    pub fn root_id(&self) -> ClassId {
        self.root
    }

    pub fn root(&self) -> &ClassNode {
        &self.classes[self.root.0]
    }

    pub fn node(&self, id: ClassId) -> &ClassNode {
        &self.classes[id.0]
    }

    pub fn get(&self, name: &str) -> Option<&ClassNode> {
        self.classes.get(name)
    }

    /// Classes in first-declaration order.
    pub fn classes(&self) -> impl Iterator<Item = &ClassNode> {
        self.classes.values()
    }

    pub fn children<'a>(&'a self, node: &'a ClassNode) -> impl Iterator<Item = &'a ClassNode> {
        node.children.iter().map(move |id| self.node(*id))
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}
