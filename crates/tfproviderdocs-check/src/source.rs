//! Where documents come from.
//!
//! Paths handed to a source are `/`-separated and relative to the provider
//! root, e.g. `docs/resources` and `docs/resources/thing.md`.

use crate::error::SourceError;
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};

pub trait DocumentSource {
    /// Names of the regular files directly inside `directory`, sorted.
    fn list_files(&self, directory: &str) -> Result<Vec<String>, SourceError>;

    fn read_document(&self, path: &str) -> Result<String, SourceError>;

    /// Filesystem root that relative paths resolve against, if any. Absolute
    /// directories handed to a check are made relative to it.
    fn base_path(&self) -> Option<&Path> {
        None
    }
}

/// Documents on the local filesystem under `base_path`.
#[derive(Debug, Clone)]
pub struct FsSource {
    base_path: PathBuf,
}

impl FsSource {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    fn resolve(&self, relative: &str) -> PathBuf {
        relative
            .split('/')
            .filter(|segment| !segment.is_empty())
            .fold(self.base_path.clone(), |path, segment| path.join(segment))
    }
}

impl DocumentSource for FsSource {
    fn list_files(&self, directory: &str) -> Result<Vec<String>, SourceError> {
        let path = self.resolve(directory);
        let list_error = |message: String| SourceError::List {
            path: path.display().to_string(),
            message,
        };

        let mut files = Vec::new();
        for entry in fs::read_dir(&path).map_err(|e| list_error(e.to_string()))? {
            let entry = entry.map_err(|e| list_error(e.to_string()))?;
            let file_type = entry.file_type().map_err(|e| list_error(e.to_string()))?;
            if file_type.is_file() {
                files.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        files.sort();
        Ok(files)
    }

    fn base_path(&self) -> Option<&Path> {
        Some(&self.base_path)
    }

    fn read_document(&self, path: &str) -> Result<String, SourceError> {
        let resolved = self.resolve(path);
        fs::read_to_string(&resolved).map_err(|e| SourceError::Read {
            path: resolved.display().to_string(),
            message: e.to_string(),
        })
    }
}

/// In-memory documents keyed by relative path.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    files: BTreeMap<String, String>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(mut self, path: impl Into<String>, contents: impl Into<String>) -> Self {
        self.insert(path, contents);
        self
    }

    pub fn insert(&mut self, path: impl Into<String>, contents: impl Into<String>) {
        self.files.insert(path.into(), contents.into());
    }

    /// Distinct parent directories of every stored file.
    pub fn directories(&self) -> Vec<String> {
        self.files
            .keys()
            .filter_map(|path| path.rsplit_once('/').map(|(dir, _)| dir.to_string()))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

impl DocumentSource for MemorySource {
    fn list_files(&self, directory: &str) -> Result<Vec<String>, SourceError> {
        let directory = directory.trim_end_matches('/');
        Ok(self
            .files
            .keys()
            .filter_map(|path| match path.rsplit_once('/') {
                Some((parent, name)) if parent == directory => Some(name.to_string()),
                _ => None,
            })
            .collect())
    }

    fn read_document(&self, path: &str) -> Result<String, SourceError> {
        self.files.get(path).cloned().ok_or_else(|| SourceError::Read {
            path: path.to_string(),
            message: "no such document".to_string(),
        })
    }
}
