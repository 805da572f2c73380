//! Application configuration.
//!
//! ```toml
//! input_dir = "input"
//! output_dir = "out"
//!
//! [inputs]
//! model = "impulse_test_input.xml"
//! config = "config.json"
//! patched_config = "patched_config.json"
//!
//! [outputs]
//! config_xml = "config.xml"
//! meta = "meta.json"
//! delta = "delta.json"
//! patched_config = "res_patched_config.json"
//!
//! [format]
//! xml_indent = 2
//! json_indent = 4
//! ```
//!
//! Every key is optional; missing keys take the values shown above.

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use log::{debug, info};
use serde::Deserialize;

use crate::error::{Error, Result};

/// Looked up in the working directory when no explicit path is given.
pub const LOCAL_CONFIG_FILE: &str = "confgen.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub inputs: InputFiles,
    pub outputs: OutputFiles,
    pub format: FormatConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InputFiles {
    pub model: String,
    pub config: String,
    pub patched_config: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputFiles {
    pub config_xml: String,
    pub meta: String,
    pub delta: String,
    pub patched_config: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FormatConfig {
    pub xml_indent: usize,
    pub json_indent: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("input"),
            output_dir: PathBuf::from("out"),
            inputs: InputFiles::default(),
            outputs: OutputFiles::default(),
            format: FormatConfig::default(),
        }
    }
}

impl Default for InputFiles {
    fn default() -> Self {
        Self {
            model: "impulse_test_input.xml".to_string(),
            config: "config.json".to_string(),
            patched_config: "patched_config.json".to_string(),
        }
    }
}

impl Default for OutputFiles {
    fn default() -> Self {
        Self {
            config_xml: "config.xml".to_string(),
            meta: "meta.json".to_string(),
            delta: "delta.json".to_string(),
            patched_config: "res_patched_config.json".to_string(),
        }
    }
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            xml_indent: 2,
            json_indent: 4,
        }
    }
}

impl AppConfig {
    pub fn model_path(&self) -> PathBuf {
        self.input_dir.join(&self.inputs.model)
    }

    pub fn config_path(&self) -> PathBuf {
        self.input_dir.join(&self.inputs.config)
    }

    pub fn patched_config_path(&self) -> PathBuf {
        self.input_dir.join(&self.inputs.patched_config)
    }

    /// Required inputs, in the order they are checked.
    pub fn required_inputs(&self) -> [PathBuf; 3] {
        [
            self.model_path(),
            self.config_path(),
            self.patched_config_path(),
        ]
    }

    pub fn output_path(&self, file: &str) -> PathBuf {
        self.output_dir.join(file)
    }
}

/// Find and load configuration.
///
/// Search order:
/// 1. Explicit path if provided (must exist)
/// 2. `confgen.toml` in the working directory
/// 3. Platform-specific config directory
/// 4. Defaults
pub fn load_config(explicit_path: Option<impl AsRef<Path>>) -> Result<AppConfig> {
    if let Some(path) = explicit_path {
        let path = path.as_ref();
        info!(path = path.display().to_string(); "Loading configuration from explicit path");
        return load_config_file(path);
    }

    let local = Path::new(LOCAL_CONFIG_FILE);
    if local.exists() {
        info!(path = local.display().to_string(); "Loading configuration from local path");
        return load_config_file(local);
    }

    if let Some(dirs) = ProjectDirs::from("", "", "confgen") {
        let system = dirs.config_dir().join("config.toml");
        if system.exists() {
            info!(path = system.display().to_string(); "Loading configuration from system path");
            return load_config_file(&system);
        }
        debug!(path = system.display().to_string(); "System configuration file not found");
    } else {
        debug!("Could not determine platform-specific config directory");
    }

    debug!("No configuration file found, using defaults");
    Ok(AppConfig::default())
}

pub fn load_config_file(path: impl AsRef<Path>) -> Result<AppConfig> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(Error::MissingSettings(path.to_path_buf()));
    }

    let content = fs::read_to_string(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_config(&content).map_err(|message| Error::Settings {
        path: path.to_path_buf(),
        message,
    })
}

fn parse_config(content: &str) -> std::result::Result<AppConfig, String> {
    toml::from_str(content).map_err(|e| e.to_string())
}
