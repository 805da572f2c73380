//! Error taxonomy for a `confgen` run.
//!
//! Every variant aborts the run; there is no warn-and-continue path.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::model::ModelError;
use crate::parse::MarkupError;

#[derive(Debug, Error)]
pub enum Error {
    #[error("input file {} not found", .0.display())]
    MissingInput(PathBuf),

    #[error("failed to read {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write {}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed model markup in {}", .path.display())]
    Markup {
        path: PathBuf,
        #[source]
        source: MarkupError,
    },

    #[error("malformed JSON document {}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("malformed configuration document {}: top-level value must be an object", .path.display())]
    NotAnObject { path: PathBuf },

    #[error("invalid model: {0}")]
    Model(#[from] ModelError),

    #[error("failed to serialize {what}: {message}")]
    Serialize { what: &'static str, message: String },

    #[error("missing settings file: {}", .0.display())]
    MissingSettings(PathBuf),

    #[error("failed to parse settings file {}: {message}", .path.display())]
    Settings { path: PathBuf, message: String },
}

pub type Result<T> = std::result::Result<T, Error>;
