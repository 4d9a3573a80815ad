//! Graph nodes handed to the renderer

use super::course::{Course, Position};
use super::year::Year;
use serde::Serialize;

/// A node of the rendered curriculum graph: either a course or a year header
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "data", rename_all = "lowercase")]
pub enum Node {
    /// A course node
    Course(Course),
    /// A year header node
    Year(Year),
}

impl Node {
    /// Node id
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::Course(course) => &course.id,
            Self::Year(year) => &year.id,
        }
    }

    /// Display label
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Course(course) => &course.label,
            Self::Year(year) => &year.label,
        }
    }

    /// Display coordinates
    #[must_use]
    pub const fn position(&self) -> Position {
        match self {
            Self::Course(course) => course.position,
            Self::Year(year) => year.position,
        }
    }

    /// The course, when this is a course node
    #[must_use]
    pub const fn as_course(&self) -> Option<&Course> {
        match self {
            Self::Course(course) => Some(course),
            Self::Year(_) => None,
        }
    }
}
