//! Model markup reader.
//!
//! Expected shape (element nesting below the document element is free-form):
//!
//! ```xml
//! <Model>
//!   <Class name="Device" isRoot="true" documentation="Top level">
//!     <Attribute name="serial" type="string"/>
//!   </Class>
//!   <Class name="Port"/>
//!   <Aggregation source="Port" target="Device"
//!                sourceMultiplicity="0..*" targetMultiplicity="1"/>
//! </Model>
//! ```
//!
//! - every `Class` below the document element is a declaration, in document order
//! - `Attribute` counts only as a direct child of a `Class`
//! - every `Aggregation` below the document element is an edge
//! - anything else is skipped

use std::fs;
use std::path::Path;

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use thiserror::Error;

use crate::error::{Error, Result};
use crate::model::{AggregationDecl, Attribute, ClassDecl, ClassModel, ModelError};

const CLASS: &[u8] = b"Class";
const ATTRIBUTE: &[u8] = b"Attribute";
const AGGREGATION: &[u8] = b"Aggregation";

#[derive(Debug, Error)]
pub enum MarkupError {
    #[error("syntax error at byte {position}")]
    Syntax {
        position: u64,
        #[source]
        source: quick_xml::Error,
    },

    #[error("<{element}> at byte {position} is missing required attribute `{attribute}`")]
    MissingAttribute {
        element: &'static str,
        attribute: &'static str,
        position: u64,
    },

    #[error("document has no root element")]
    NoDocumentElement,

    #[error("element after the document element at byte {position}")]
    TrailingElement { position: u64 },

    #[error("unclosed element <{name}>")]
    Unclosed { name: String },
}

/// Raw declarations read from the model markup, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModelSpec {
    pub classes: Vec<ClassDecl>,
    pub aggregations: Vec<AggregationDecl>,
}

impl ModelSpec {
    /// Register every class, then resolve every aggregation.
    pub fn build(&self) -> std::result::Result<ClassModel, ModelError> {
        ClassModel::from_decls(self.classes.iter().cloned(), &self.aggregations)
    }
}

/// An element that is still open while scanning.
struct Open {
    name: String,
    /// Index into `ModelSpec::classes` when the element is a class declaration.
    class: Option<usize>,
}

pub fn parse_model_file(path: impl AsRef<Path>) -> Result<ModelSpec> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_model_str(&text).map_err(|source| Error::Markup {
        path: path.to_path_buf(),
        source,
    })
}

pub fn parse_model_str(text: &str) -> std::result::Result<ModelSpec, MarkupError> {
    let mut reader = Reader::from_str(text);
    reader.config_mut().trim_text(true);

    let mut spec = ModelSpec::default();
    let mut open: Vec<Open> = Vec::new();
    let mut seen_document_element = false;

    loop {
        let event = reader.read_event().map_err(|source| MarkupError::Syntax {
            position: reader.error_position() as u64,
            source,
        })?;
        let position = reader.buffer_position() as u64;

        match event {
            Event::Start(_) | Event::Empty(_) if open.is_empty() && seen_document_element => {
                return Err(MarkupError::TrailingElement { position });
            }
            Event::Start(e) => {
                let class = visit_element(&e, &open, &mut spec, position)?;
                seen_document_element = true;
                open.push(Open {
                    name: String::from_utf8_lossy(e.name().as_ref()).into_owned(),
                    class,
                });
            }
            Event::Empty(e) => {
                visit_element(&e, &open, &mut spec, position)?;
                seen_document_element = true;
            }
            Event::End(_) => {
                open.pop();
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some(unclosed) = open.pop() {
        return Err(MarkupError::Unclosed {
            name: unclosed.name,
        });
    }
    if !seen_document_element {
        return Err(MarkupError::NoDocumentElement);
    }

    Ok(spec)
}

/// Record whatever declaration `e` carries. Returns the class index when `e`
/// opens a class declaration.
fn visit_element(
    e: &BytesStart<'_>,
    open: &[Open],
    spec: &mut ModelSpec,
    position: u64,
) -> std::result::Result<Option<usize>, MarkupError> {
    // The document element itself is never a declaration.
    let Some(parent) = open.last() else {
        return Ok(None);
    };

    match e.name().as_ref() {
        CLASS => {
            let name = required(e, "Class", "name", position)?;
            let is_root = optional(e, "isRoot", position)?.as_deref() == Some("true");
            let documentation = optional(e, "documentation", position)?.unwrap_or_default();
            spec.classes.push(ClassDecl {
                name,
                is_root,
                documentation,
                attributes: Vec::new(),
            });
            Ok(Some(spec.classes.len() - 1))
        }
        ATTRIBUTE => {
            if let Some(owner) = parent.class {
                let name = required(e, "Attribute", "name", position)?;
                let ty = required(e, "Attribute", "type", position)?;
                spec.classes[owner].attributes.push(Attribute { name, ty });
            }
            Ok(None)
        }
        AGGREGATION => {
            spec.aggregations.push(AggregationDecl {
                source: required(e, "Aggregation", "source", position)?,
                target: required(e, "Aggregation", "target", position)?,
                source_multiplicity: required(e, "Aggregation", "sourceMultiplicity", position)?,
                target_multiplicity: optional(e, "targetMultiplicity", position)?,
            });
            Ok(None)
        }
        _ => Ok(None),
    }
}

fn optional(
    e: &BytesStart<'_>,
    key: &str,
    position: u64,
) -> std::result::Result<Option<String>, MarkupError> {
    let syntax = |source: quick_xml::Error| MarkupError::Syntax { position, source };

    match e.try_get_attribute(key).map_err(|err| syntax(err.into()))? {
        Some(attr) => Ok(Some(attr.unescape_value().map_err(syntax)?.into_owned())),
        None => Ok(None),
    }
}

fn required(
    e: &BytesStart<'_>,
    element: &'static str,
    attribute: &'static str,
    position: u64,
) -> std::result::Result<String, MarkupError> {
    optional(e, attribute, position)?.ok_or(MarkupError::MissingAttribute {
        element,
        attribute,
        position,
    })
}
