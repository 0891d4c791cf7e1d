use std::io::Write;
use std::path::{Path, PathBuf};
use clap::ValueEnum;
use serde::Deserialize;
use tempfile::NamedTempFile;
use tracing::info;

use crate::error::{Error, Result};
use crate::plot::chart::ChartSpec;
use crate::plot::plot_html::HtmlRenderer;
use crate::plot::plot_json::JsonRenderer;

/// Draws a chart. Gesture handling and tooltips belong to whatever displays the output.
pub trait Renderer {
    fn render(&mut self, spec: &ChartSpec) -> Result<()>;
}

impl<R: Renderer + ?Sized> Renderer for Box<R> {
    fn render(&mut self, spec: &ChartSpec) -> Result<()> {
        (**self).render(spec)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Standalone plotly page
    #[default]
    Html,
    /// Vega-Lite specification
    Json,
}

/// Renderer for `format` writing to `output`.
pub fn renderer_for(format: OutputFormat, output: impl Into<PathBuf>, page_title: &str) -> Box<dyn Renderer> {
    let output = output.into();
    match format {
        OutputFormat::Html => Box::new(HtmlRenderer::new(output, page_title)),
        OutputFormat::Json => Box::new(JsonRenderer::new(output)),
    }
}

/// Replace `path` with `contents` via a uniquely named sibling temp file and a rename.
///
/// The temp file is removed on any failure, and nothing else next to `path` is touched.
pub(crate) fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    // dropped (and deleted) on every early return below
    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| Error::io(dir, e))?;
    tmp.write_all(contents.as_bytes()).map_err(|e| Error::io(tmp.path(), e))?;
    tmp.as_file().sync_all().map_err(|e| Error::io(tmp.path(), e))?;
    tmp.persist(path).map_err(|e| Error::io(path, e.error))?;

    info!("Wrote {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn entries(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn existing_tmp_sibling_is_left_alone() {
        let dir = TempDir::new().unwrap();
        let keep = dir.path().join("chart.tmp");
        fs::write(&keep, "user notes").unwrap();

        let path = dir.path().join("chart.html");
        write_atomic(&path, "<html></html>").unwrap();
        write_atomic(&path, "<html>again</html>").unwrap();

        assert_eq!(fs::read_to_string(&keep).unwrap(), "user notes");
        assert_eq!(fs::read_to_string(&path).unwrap(), "<html>again</html>");
        assert_eq!(entries(dir.path()), ["chart.html", "chart.tmp"]);
    }

    #[test]
    fn failed_replace_leaves_no_temp_file() {
        let dir = TempDir::new().unwrap();
        // a non-empty directory cannot be replaced by a file
        let path = dir.path().join("chart.html");
        fs::create_dir(&path).unwrap();
        fs::write(path.join("inner"), "x").unwrap();

        assert!(matches!(write_atomic(&path, "<html></html>"), Err(Error::Io { .. })));
        assert_eq!(entries(dir.path()), ["chart.html"]);
    }

    #[test]
    fn missing_directory_is_an_io_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nope").join("chart.html");
        assert!(matches!(write_atomic(&path, "x"), Err(Error::Io { .. })));
    }
}
