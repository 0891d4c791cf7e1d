use std::path::PathBuf;
use thiserror::Error;

use crate::data::parser::FormatError;

#[derive(Error, Debug)]
pub enum Error {
    #[error("{file}: {source}")]
    Format {
        file: String,
        #[source]
        source: FormatError,
    },

    #[error("No .{extension} files found!")]
    NoData { extension: String },

    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io { path: path.into(), source }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
