use std::fs;
use std::path::{Path, PathBuf};
use serde::Deserialize;
use tracing::debug;

use crate::data::loader::DEFAULT_EXTENSION;
use crate::error::{Error, Result};
use crate::plot::chart::ChartStyle;
use crate::plot::render::OutputFormat;

/// Settings read from an optional TOML file; every key has a default.
///
/// ```toml
/// data_dir = "data"
/// extension = "dat"
/// page_title = "Fibonacci V2"
/// output = "fibonacci.html"
/// format = "html"
///
/// [chart]
/// width = 800
/// height = 300
/// point_size = 2
/// ```
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub extension: String,
    pub page_title: String,
    pub output: PathBuf,
    pub format: OutputFormat,
    pub chart: ChartStyle,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            extension: DEFAULT_EXTENSION.to_string(),
            page_title: "Fibonacci V2".to_string(),
            output: PathBuf::from("fibonacci.html"),
            format: OutputFormat::Html,
            chart: ChartStyle::default(),
        }
    }
}

impl AppConfig {
    pub fn from_toml(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Defaults when `path` is `None`; a missing file named explicitly is an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                debug!("Reading config from {}", path.display());
                let text = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
                Self::from_toml(&text)
            }
            None => Ok(Self::default()),
        }
    }
}
