//! Year model

use super::course::Position;
use serde::Serialize;

/// A named grouping of courses (año)
///
/// Years are drawn as header nodes and may be required as a whole by a course,
/// which stands for every course assigned to the year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Year {
    /// Node id; the year label itself
    pub id: String,
    /// Display name (e.g., "Primer año")
    pub label: String,
    /// 1-based ordinal in the plan
    pub index: usize,
    /// Display coordinates
    pub position: Position,
    /// Ids of the courses assigned to this year, in normalized order
    pub course_ids: Vec<String>,
}

impl Year {
    /// Create a year node with no courses
    #[must_use]
    pub fn new(label: &str, index: usize, position: Position) -> Self {
        Self {
            id: label.to_string(),
            label: label.to_string(),
            index,
            position,
            course_ids: Vec::new(),
        }
    }

    /// Number of courses in the year
    #[must_use]
    pub const fn course_count(&self) -> usize {
        self.course_ids.len()
    }
}
