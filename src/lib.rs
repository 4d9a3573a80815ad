//! Shared library for `correlativas`
//! Contains the curriculum engine used by the CLI and by embedding hosts

pub mod core;
pub mod logger;

pub use crate::core::config;
pub use crate::core::error::{CurriculumError, Result};
pub use crate::core::get_version;
pub use crate::core::graph::CurriculumGraph;
pub use crate::core::library::PlanLibrary;
pub use crate::core::planner::Planner;
pub use crate::core::store::{CompletedSet, JsonFileStore, MemoryStore, Repository};
