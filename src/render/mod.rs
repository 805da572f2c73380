//! Output rendering: hierarchical configuration document, metadata catalog,
//! and indented JSON.

pub mod config_xml;
pub mod meta;

pub use config_xml::{ConfigNode, build_config_tree, write_config_xml};
pub use meta::{MetaRecord, Parameter, build_meta};

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

use crate::error::{Error, Result};

/// Pretty-print `value` as JSON with `indent` spaces per level.
pub fn to_json_pretty<T: Serialize + ?Sized>(
    value: &T,
    indent: usize,
    what: &'static str,
) -> Result<String> {
    let indent = " ".repeat(indent);
    let mut buf = Vec::new();
    let mut ser = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(indent.as_bytes()));
    value.serialize(&mut ser).map_err(|e| Error::Serialize {
        what,
        message: e.to_string(),
    })?;

    let mut json = String::from_utf8(buf).map_err(|e| Error::Serialize {
        what,
        message: e.to_string(),
    })?;
    json.push('\n');
    Ok(json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn json_uses_requested_indent() {
        let out = to_json_pretty(&json!({"a": [1]}), 4, "test").unwrap();
        assert_eq!(out, "{\n    \"a\": [\n        1\n    ]\n}\n");
    }

    #[test]
    fn non_ascii_is_written_unescaped() {
        let out = to_json_pretty(&json!({"doc": "Größe µs"}), 2, "test").unwrap();
        assert_eq!(out, "{\n  \"doc\": \"Größe µs\"\n}\n");
    }
}
