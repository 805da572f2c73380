//! Flat metadata catalog: one record per class, independent of tree shape.

use serde::Serialize;

use crate::model::ClassModel;

/// Parameter type recorded for a contained child class.
pub const CLASS_PARAMETER_TYPE: &str = "class";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetaRecord {
    pub class: String,
    pub documentation: String,
    #[serde(rename = "isRoot")]
    pub is_root: bool,
    pub max: String,
    pub min: String,
    /// Attributes in declaration order, then children in containment order.
    pub parameters: Vec<Parameter>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Parameter {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
}

/// One record per class, in class-set order. Never recurses, so cyclic
/// containment is fine here.
pub fn build_meta(model: &ClassModel) -> Vec<MetaRecord> {
    model
        .classes()
        .map(|node| {
            let attributes = node.attributes.iter().map(|a| Parameter {
                name: a.name.clone(),
                ty: a.ty.clone(),
            });
            let children = model.children(node).map(|child| Parameter {
                name: child.name.clone(),
                ty: CLASS_PARAMETER_TYPE.to_string(),
            });

            MetaRecord {
                class: node.name.clone(),
                documentation: node.documentation.clone(),
                is_root: node.is_root,
                max: node.multiplicity.max.clone(),
                min: node.multiplicity.min.clone(),
                parameters: attributes.chain(children).collect(),
            }
        })
        .collect()
}
