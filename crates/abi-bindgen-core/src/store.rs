//! Where artifacts come from.
//!
//! The collector only talks to an [`ArtifactStore`], so the fail-fast and
//! per-file parse behaviour can be exercised against [`MemoryArtifactStore`]
//! without touching a real file system.

use crate::error::{CollectError, Result};
use std::cell::Cell;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// One entry of an artifact directory listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactEntry {
    pub file_name: String,
    pub is_file: bool,
}

/// Read-only access to a flat directory of compiled artifacts.
pub trait ArtifactStore {
    /// Location reported in error messages.
    fn location(&self) -> &Path;

    fn exists(&self) -> bool;

    /// Entries in listing order. No sort is applied.
    fn list(&self) -> Result<Vec<ArtifactEntry>>;

    fn read(&self, file_name: &str) -> Result<String>;
}

/// Artifact store backed by a directory on disk.
#[derive(Debug, Clone)]
pub struct FsArtifactStore {
    root: PathBuf,
}

impl FsArtifactStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl ArtifactStore for FsArtifactStore {
    fn location(&self) -> &Path {
        &self.root
    }

    fn exists(&self) -> bool {
        self.root.is_dir()
    }

    fn list(&self) -> Result<Vec<ArtifactEntry>> {
        let mut entries = Vec::new();
        for entry in WalkDir::new(&self.root)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
        {
            let entry = entry.map_err(|e| CollectError::Read {
                path: e
                    .path()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| self.root.clone()),
                source: e.into(),
            })?;
            let file_name = entry
                .file_name()
                .to_str()
                .ok_or_else(|| CollectError::NonUtf8Name {
                    path: entry.path().to_path_buf(),
                })?
                .to_string();
            entries.push(ArtifactEntry {
                file_name,
                is_file: entry.file_type().is_file(),
            });
        }
        Ok(entries)
    }

    fn read(&self, file_name: &str) -> Result<String> {
        let path = self.root.join(file_name);
        fs::read_to_string(&path).map_err(|source| CollectError::Read { path, source })
    }
}

#[derive(Debug, Clone)]
enum MemoryEntry {
    File(String),
    Dir,
}

/// In-memory artifact directory. Keeps insertion order as listing order.
#[derive(Debug)]
pub struct MemoryArtifactStore {
    location: PathBuf,
    present: bool,
    entries: Vec<(String, MemoryEntry)>,
    accesses: Cell<usize>,
}

impl MemoryArtifactStore {
    pub fn new(location: impl Into<PathBuf>) -> Self {
        Self {
            location: location.into(),
            present: true,
            entries: Vec::new(),
            accesses: Cell::new(0),
        }
    }

    /// A store whose directory does not exist.
    pub fn missing(location: impl Into<PathBuf>) -> Self {
        Self {
            present: false,
            ..Self::new(location)
        }
    }

    pub fn with_file(mut self, file_name: impl Into<String>, contents: impl Into<String>) -> Self {
        self.entries
            .push((file_name.into(), MemoryEntry::File(contents.into())));
        self
    }

    pub fn with_dir(mut self, name: impl Into<String>) -> Self {
        self.entries.push((name.into(), MemoryEntry::Dir));
        self
    }

    /// Number of `list` and `read` calls served so far.
    pub fn accesses(&self) -> usize {
        self.accesses.get()
    }

    fn touch(&self) {
        self.accesses.set(self.accesses.get() + 1);
    }
}

impl ArtifactStore for MemoryArtifactStore {
    fn location(&self) -> &Path {
        &self.location
    }

    fn exists(&self) -> bool {
        self.present
    }

    fn list(&self) -> Result<Vec<ArtifactEntry>> {
        self.touch();
        Ok(self
            .entries
            .iter()
            .map(|(name, entry)| ArtifactEntry {
                file_name: name.clone(),
                is_file: matches!(entry, MemoryEntry::File(_)),
            })
            .collect())
    }

    fn read(&self, file_name: &str) -> Result<String> {
        self.touch();
        match self.entries.iter().find(|(name, _)| name == file_name) {
            Some((_, MemoryEntry::File(contents))) => Ok(contents.clone()),
            _ => Err(CollectError::Read {
                path: self.location.join(file_name),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such artifact"),
            }),
        }
    }
}
