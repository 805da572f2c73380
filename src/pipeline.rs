//! End-to-end run: model markup + two flat configurations in, four documents out.
//!
//! Every artifact is produced in memory before anything touches the output
//! directory, so a failing run writes nothing.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use log::{debug, info};
use tempfile::NamedTempFile;

use crate::config::AppConfig;
use crate::delta::{self, Delta, FlatConfig};
use crate::error::{Error, Result};
use crate::parse;
use crate::render;

/// The rendered outputs of one run.
#[derive(Debug, Clone)]
pub struct Artifacts {
    pub config_xml: String,
    pub meta_json: String,
    pub delta: Delta,
    pub delta_json: String,
    pub patched: FlatConfig,
    pub patched_json: String,
}

/// Fail on the first required input that does not exist.
pub fn check_inputs(config: &AppConfig) -> Result<()> {
    for path in config.required_inputs() {
        if !path.is_file() {
            return Err(Error::MissingInput(path));
        }
    }
    Ok(())
}

pub fn generate(config: &AppConfig) -> Result<Artifacts> {
    let model_path = config.model_path();
    let spec = parse::parse_model_file(&model_path)?;
    info!(
        path = model_path.display().to_string(),
        classes = spec.classes.len(),
        aggregations = spec.aggregations.len();
        "Parsed class model"
    );

    let model = spec.build()?;
    debug!(root = model.root().name.as_str(); "Resolved root class");

    let tree = render::build_config_tree(&model)?;
    let config_xml = render::write_config_xml(&tree, config.format.xml_indent)?;

    let meta = render::build_meta(&model);
    let meta_json = render::to_json_pretty(&meta, config.format.json_indent, "metadata catalog")?;

    let base = parse::read_flat_config(config.config_path())?;
    let patched = parse::read_flat_config(config.patched_config_path())?;

    let delta = delta::diff(&base, &patched);
    info!(
        additions = delta.additions.len(),
        deletions = delta.deletions.len(),
        updates = delta.updates.len();
        "Computed configuration delta"
    );
    let delta_json = render::to_json_pretty(&delta, config.format.json_indent, "delta")?;

    let patched = delta::apply(&base, &delta);
    let patched_json =
        render::to_json_pretty(&patched, config.format.json_indent, "patched configuration")?;

    Ok(Artifacts {
        config_xml,
        meta_json,
        delta,
        delta_json,
        patched,
        patched_json,
    })
}

pub fn prepare_output_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).map_err(|source| Error::Write {
        path: dir.to_path_buf(),
        source,
    })
}

/// Write the four documents; returns the written paths in order.
///
/// Every document is first staged in a temporary file next to its
/// destination. Nothing is renamed into place until all four are staged, and
/// staged files are removed when any step fails.
pub fn write_artifacts(config: &AppConfig, artifacts: &Artifacts) -> Result<Vec<PathBuf>> {
    let outputs = [
        (&config.outputs.config_xml, &artifacts.config_xml),
        (&config.outputs.meta, &artifacts.meta_json),
        (&config.outputs.delta, &artifacts.delta_json),
        (&config.outputs.patched_config, &artifacts.patched_json),
    ];

    let mut staged = Vec::with_capacity(outputs.len());
    for (file, contents) in outputs {
        let path = config.output_path(file);
        let temp = stage_file(&path, contents)?;
        staged.push((path, temp));
    }

    let mut written: Vec<PathBuf> = Vec::with_capacity(staged.len());
    for (path, temp) in staged {
        if let Err(err) = temp.persist(&path) {
            for done in &written {
                let _ = fs::remove_file(done);
            }
            return Err(Error::Write {
                path,
                source: err.error,
            });
        }
        debug!(path = path.display().to_string(); "Wrote output");
        written.push(path);
    }
    Ok(written)
}

/// Write `contents` to a temporary file in the directory of `path`.
fn stage_file(path: &Path, contents: &str) -> Result<NamedTempFile> {
    let write_error = |source: io::Error| Error::Write {
        path: path.to_path_buf(),
        source,
    };
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };

    let mut temp = tempfile::Builder::new()
        .prefix(".confgen-")
        .tempfile_in(dir)
        .map_err(write_error)?;
    temp.write_all(contents.as_bytes()).map_err(write_error)?;
    Ok(temp)
}

/// Check inputs, render everything, then create the output directory and write.
pub fn run(config: &AppConfig) -> Result<Vec<PathBuf>> {
    check_inputs(config)?;
    let artifacts = generate(config)?;

    prepare_output_dir(&config.output_dir)?;
    let written = write_artifacts(config, &artifacts)?;

    info!(
        output_dir = config.output_dir.display().to_string(),
        files = written.len();
        "Outputs written"
    );
    Ok(written)
}

/// Delta between two flat configuration files.
pub fn diff_files(base: &Path, patched: &Path) -> Result<Delta> {
    let base = parse::read_flat_config(base)?;
    let patched = parse::read_flat_config(patched)?;
    Ok(delta::diff(&base, &patched))
}

/// Apply a delta file to a flat configuration file.
pub fn patch_files(base: &Path, delta: &Path) -> Result<FlatConfig> {
    let base = parse::read_flat_config(base)?;
    let delta = parse::read_delta(delta)?;
    Ok(delta::apply(&base, &delta))
}

pub fn write_file(path: &Path, contents: &str) -> Result<()> {
    fs::write(path, contents).map_err(|source| Error::Write {
        path: path.to_path_buf(),
        source,
    })
}
