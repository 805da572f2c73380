//! Flat configuration and delta document readers.

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::delta::{Delta, FlatConfig};
use crate::error::{Error, Result};

/// Read a flat configuration document. The top-level value must be an object.
pub fn read_flat_config(path: impl AsRef<Path>) -> Result<FlatConfig> {
    let path = path.as_ref();
    match read_json::<Value>(path)? {
        Value::Object(map) => Ok(map),
        _ => Err(Error::NotAnObject {
            path: path.to_path_buf(),
        }),
    }
}

pub fn read_delta(path: impl AsRef<Path>) -> Result<Delta> {
    read_json(path.as_ref())
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let text = fs::read_to_string(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| Error::Json {
        path: path.to_path_buf(),
        source,
    })
}
