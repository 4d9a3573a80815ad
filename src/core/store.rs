//! Persistence seam for plans and progress
//!
//! The engine never touches storage directly: the host injects a
//! [`Repository`] and owns its lifecycle. [`JsonFileStore`] backs the CLI,
//! [`MemoryStore`] backs tests and embedders that persist elsewhere.

use crate::core::error::{CurriculumError, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Completed course ids per curriculum name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompletedSet(BTreeMap<String, Vec<String>>);

impl CompletedSet {
    /// Create an empty completed-set
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Completed ids for a curriculum (empty if none were recorded)
    #[must_use]
    pub fn for_curriculum(&self, curriculum: &str) -> &[String] {
        self.0.get(curriculum).map_or(&[], Vec::as_slice)
    }

    /// Whether `course_id` is completed in `curriculum`
    #[must_use]
    pub fn contains(&self, curriculum: &str, course_id: &str) -> bool {
        self.for_curriculum(curriculum).iter().any(|id| id == course_id)
    }

    /// Replace the completed ids of a curriculum
    pub fn set(&mut self, curriculum: &str, course_ids: Vec<String>) {
        self.0.insert(curriculum.to_string(), course_ids);
    }

    /// Forget all progress of a curriculum
    pub fn clear(&mut self, curriculum: &str) -> bool {
        self.0.remove(curriculum).is_some()
    }

    /// Curriculum names with recorded progress
    pub fn curricula(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

/// Load/save access to one persisted document
pub trait Repository<T> {
    /// Load the document; `Ok(None)` when nothing has been stored yet
    ///
    /// # Errors
    /// Returns an error if the stored document exists but cannot be read or parsed.
    fn load(&self) -> Result<Option<T>>;

    /// Replace the stored document
    ///
    /// # Errors
    /// Returns an error if the document cannot be written.
    fn save(&mut self, value: &T) -> Result<()>;
}

/// Stores a document as pretty-printed JSON in a single file
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Create a store backed by `path`; the file is created on first save
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// File backing this store
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn staging_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(std::ffi::OsStr::to_os_string)
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn store_error(&self, source: std::io::Error) -> CurriculumError {
        CurriculumError::Store {
            path: self.path.clone(),
            source,
        }
    }
}

impl<T: Serialize + DeserializeOwned> Repository<T> for JsonFileStore {
    fn load(&self) -> Result<Option<T>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(self.store_error(e)),
        };
        if content.trim().is_empty() {
            return Ok(None);
        }
        Ok(Some(serde_json::from_str(&content)?))
    }

    fn save(&mut self, value: &T) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| self.store_error(e))?;
        }
        let json = serde_json::to_string_pretty(value)?;

        // stage beside the target, then swap it in
        let staging = self.staging_path();
        fs::write(&staging, json).map_err(|e| self.store_error(e))?;
        fs::rename(&staging, &self.path).map_err(|e| {
            let _ = fs::remove_file(&staging);
            self.store_error(e)
        })
    }
}

/// Keeps the document in memory
#[derive(Debug, Clone, Default)]
pub struct MemoryStore<T> {
    value: Option<T>,
    saves: usize,
}

impl<T> MemoryStore<T> {
    /// Create an empty store
    #[must_use]
    pub const fn new() -> Self {
        Self {
            value: None,
            saves: 0,
        }
    }

    /// Create a store that already holds `value`
    #[must_use]
    pub const fn with_value(value: T) -> Self {
        Self {
            value: Some(value),
            saves: 0,
        }
    }

    /// Number of times [`Repository::save`] was called
    #[must_use]
    pub const fn save_count(&self) -> usize {
        self.saves
    }

    /// The stored value, if any
    #[must_use]
    pub const fn value(&self) -> Option<&T> {
        self.value.as_ref()
    }
}

impl<T: Clone> Repository<T> for MemoryStore<T> {
    fn load(&self) -> Result<Option<T>> {
        Ok(self.value.clone())
    }

    fn save(&mut self, value: &T) -> Result<()> {
        self.value = Some(value.clone());
        self.saves += 1;
        Ok(())
    }
}
