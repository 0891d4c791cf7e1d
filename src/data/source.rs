use std::fs;
use std::path::PathBuf;

use crate::error::{Error, Result};

/// Where benchmark files come from: a flat listing of names plus a way to read one.
pub trait DataSource {
    fn list(&self) -> Result<Vec<String>>;
    fn read(&self, name: &str) -> Result<String>;
}

/// A single flat directory on disk.
#[derive(Clone, Debug)]
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl DataSource for DirectorySource {
    /// Regular files only, sorted by name.
    fn list(&self) -> Result<Vec<String>> {
        let entries = fs::read_dir(&self.root).map_err(|e| Error::io(&self.root, e))?;

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| Error::io(&self.root, e))?;
            let is_file = entry.file_type().map_err(|e| Error::io(entry.path(), e))?.is_file();
            if !is_file {
                continue;
            }
            if let Some(name) = entry.file_name().to_str() {
                names.push(name.to_string());
            }
        }
        names.sort();
        Ok(names)
    }

    fn read(&self, name: &str) -> Result<String> {
        let path = self.root.join(name);
        fs::read_to_string(&path).map_err(|e| Error::io(path, e))
    }
}

/// In-memory files, listed in insertion order.
#[derive(Clone, Debug, Default)]
pub struct MemorySource {
    files: Vec<(String, String)>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(mut self, name: impl Into<String>, contents: impl Into<String>) -> Self {
        self.insert(name, contents);
        self
    }

    /// Adds a file, replacing the contents of an existing one with the same name.
    pub fn insert(&mut self, name: impl Into<String>, contents: impl Into<String>) {
        let name = name.into();
        let contents = contents.into();
        match self.files.iter_mut().find(|(n, _)| *n == name) {
            Some((_, c)) => *c = contents,
            None => self.files.push((name, contents)),
        }
    }

    pub fn remove(&mut self, name: &str) {
        self.files.retain(|(n, _)| n != name);
    }
}

impl DataSource for MemorySource {
    fn list(&self) -> Result<Vec<String>> {
        Ok(self.files.iter().map(|(n, _)| n.clone()).collect())
    }

    fn read(&self, name: &str) -> Result<String> {
        self.files
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, c)| c.clone())
            .ok_or_else(|| Error::io(name, std::io::Error::from(std::io::ErrorKind::NotFound)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn directory_listing_is_sorted_and_skips_subdirectories() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("zeta.dat"), "").unwrap();
        fs::write(dir.path().join("alpha.dat"), "").unwrap();
        fs::write(dir.path().join("notes.txt"), "").unwrap();
        fs::create_dir(dir.path().join("nested.dat")).unwrap();

        let source = DirectorySource::new(dir.path());
        assert_eq!(source.list().unwrap(), vec!["alpha.dat", "notes.txt", "zeta.dat"]);
    }

    #[test]
    fn missing_directory_is_an_io_error() {
        let dir = TempDir::new().unwrap();
        let source = DirectorySource::new(dir.path().join("absent"));
        assert!(matches!(source.list(), Err(Error::Io { .. })));
    }

    #[test]
    fn memory_source_replaces_and_removes() {
        let mut source = MemorySource::new().with_file("a.dat", "1").with_file("b.dat", "2");
        source.insert("a.dat", "3");
        assert_eq!(source.read("a.dat").unwrap(), "3");
        source.remove("b.dat");
        assert_eq!(source.list().unwrap(), vec!["a.dat"]);
        assert!(source.read("b.dat").is_err());
    }
}
