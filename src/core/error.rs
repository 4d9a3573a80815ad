//! Error types for curriculum loading, import, and progress tracking

use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by the curriculum engine and its stores.
#[derive(Debug, Error)]
pub enum CurriculumError {
    /// An imported curriculum was rejected before normalization.
    #[error("Invalid curriculum import: {0}")]
    InvalidImport(String),

    /// No curriculum with the given name exists in the plan library.
    #[error("Unknown curriculum: '{0}'")]
    UnknownCurriculum(String),

    /// No course with the given id (or label) exists in the curriculum.
    #[error("Unknown course: '{0}'")]
    UnknownCourse(String),

    /// No year with the given label has courses in the curriculum.
    #[error("Unknown year: '{0}'")]
    UnknownYear(String),

    /// Reading or writing a persisted store failed.
    #[error("Store error at {}: {source}", path.display())]
    Store {
        /// File backing the store
        path: PathBuf,
        /// Underlying I/O failure
        #[source]
        source: std::io::Error,
    },

    /// A persisted document could not be (de)serialized.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result alias used throughout the core.
pub type Result<T> = std::result::Result<T, CurriculumError>;
