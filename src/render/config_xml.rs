//! Hierarchical configuration document.
//!
//! The tree mirrors containment from the root class down: one element per
//! class, one text field per attribute holding the attribute's declared type,
//! one nested element per child class. Serialized without an XML declaration.

use quick_xml::Writer;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};

use crate::error::{Error, Result};
use crate::model::{ClassId, ClassModel, ModelError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigNode {
    pub name: String,
    /// (attribute name, declared type)
    pub fields: Vec<(String, String)>,
    pub children: Vec<ConfigNode>,
}

/// Render the containment tree below the model's root.
///
/// A class reachable along several paths is rendered once per path. A class
/// that contains itself, directly or transitively, is an error.
pub fn build_config_tree(model: &ClassModel) -> std::result::Result<ConfigNode, ModelError> {
    let mut path = Vec::new();
    render_class(model, model.root_id(), &mut path)
}

fn render_class(
    model: &ClassModel,
    id: ClassId,
    path: &mut Vec<ClassId>,
) -> std::result::Result<ConfigNode, ModelError> {
    if let Some(start) = path.iter().position(|p| *p == id) {
        let mut cycle: Vec<String> = path[start..]
            .iter()
            .map(|p| model.node(*p).name.clone())
            .collect();
        cycle.push(model.node(id).name.clone());
        return Err(ModelError::CyclicContainment { path: cycle });
    }

    let node = model.node(id);
    path.push(id);
    let children = node
        .children
        .iter()
        .map(|child| render_class(model, *child, path))
        .collect::<std::result::Result<Vec<_>, _>>()?;
    path.pop();

    Ok(ConfigNode {
        name: node.name.clone(),
        fields: node
            .attributes
            .iter()
            .map(|a| (a.name.clone(), a.ty.clone()))
            .collect(),
        children,
    })
}

/// Serialize with `indent` spaces per level and a trailing newline.
pub fn write_config_xml(tree: &ConfigNode, indent: usize) -> Result<String> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', indent);
    write_node(&mut writer, tree)?;

    let mut xml = String::from_utf8(writer.into_inner()).map_err(serialize_error)?;
    xml.push('\n');
    Ok(xml)
}

fn write_node(writer: &mut Writer<Vec<u8>>, node: &ConfigNode) -> Result<()> {
    if node.fields.is_empty() && node.children.is_empty() {
        return emit(writer, Event::Empty(BytesStart::new(node.name.as_str())));
    }

    emit(writer, Event::Start(BytesStart::new(node.name.as_str())))?;
    for (name, value) in &node.fields {
        if value.is_empty() {
            emit(writer, Event::Empty(BytesStart::new(name.as_str())))?;
        } else {
            emit(writer, Event::Start(BytesStart::new(name.as_str())))?;
            emit(writer, Event::Text(BytesText::new(value)))?;
            emit(writer, Event::End(BytesEnd::new(name.as_str())))?;
        }
    }
    for child in &node.children {
        write_node(writer, child)?;
    }
    emit(writer, Event::End(BytesEnd::new(node.name.as_str())))
}

fn emit(writer: &mut Writer<Vec<u8>>, event: Event<'_>) -> Result<()> {
    writer.write_event(event).map_err(serialize_error)
}

fn serialize_error(err: impl std::fmt::Display) -> Error {
    Error::Serialize {
        what: "configuration document",
        message: err.to_string(),
    }
}
