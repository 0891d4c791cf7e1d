use std::path::Path;
use tracing::{debug, info};

use crate::data::dataset::{Dataset, Record};
use crate::data::parser;
use crate::data::source::DataSource;
use crate::error::{Error, Result};

pub const DEFAULT_EXTENSION: &str = "dat";

/// Turns a directory of benchmark files into one combined dataset.
#[derive(Clone, Debug)]
pub struct DatasetLoader {
    extension: String,
}

impl Default for DatasetLoader {
    fn default() -> Self {
        Self::new(DEFAULT_EXTENSION)
    }
}

impl DatasetLoader {
    /// `extension` is matched without the leading dot.
    pub fn new(extension: impl Into<String>) -> Self {
        let extension = extension.into();
        Self { extension: extension.trim_start_matches('.').to_string() }
    }

    pub fn is_benchmark_file(&self, name: &str) -> bool {
        Path::new(name).extension().and_then(|e| e.to_str()) == Some(self.extension.as_str())
    }

    /// Load every benchmark file of `listing`, in listing order.
    ///
    /// Fails on the first file that does not parse; there are no partial datasets.
    pub fn load<F>(&self, listing: &[String], mut read: F) -> Result<Dataset>
    where
        F: FnMut(&str) -> Result<String>,
    {
        // other files in the directory are ignored
        let files: Vec<&String> = listing.iter().filter(|n| self.is_benchmark_file(n)).collect();
        if files.is_empty() {
            return Err(Error::NoData { extension: self.extension.clone() });
        }

        let file_count = files.len();
        let mut records = Vec::new();
        for file in files {
            let raw = read(file)?;
            let rows = parser::parse(&raw).map_err(|source| Error::Format { file: file.clone(), source })?;
            let method = method_name(file); // file stem
            debug!("{}: {} records for method {}", file, rows.len(), method);
            records.extend(rows.into_iter().map(|m| Record::new(method.clone(), m)));
        }

        let dataset = Dataset::new(records);
        info!("Loaded {} records from {} .{} files", dataset.len(), file_count, self.extension);
        Ok(dataset)
    }

    pub fn load_from(&self, source: &dyn DataSource) -> Result<Dataset> {
        let listing = source.list()?;
        self.load(&listing, |name| source.read(name))
    }
}

/// File name without its extension.
pub fn method_name(file: &str) -> String {
    Path::new(file)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(file)
        .to_string()
}
