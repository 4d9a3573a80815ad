//! Unlock state: which courses the student may start
//!
//! A course is enabled when it is done, when it has no prerequisites, or when
//! every *direct* prerequisite is done.

use crate::core::error::{CurriculumError, Result};
use crate::core::models::{Course, Reachability, DAG};
use crate::core::reachability::full_path;
use std::collections::{HashMap, HashSet};

/// Apply the unlock rule to one course
///
/// `is_done` answers completion for prerequisite ids; unknown ids count as
/// not done.
pub fn is_enabled(course: &Course, dag: &DAG, is_done: impl Fn(&str) -> bool) -> bool {
    course.done || dag.get_prerequisites(&course.id).iter().all(|id| is_done(id.as_str()))
}

/// Enabled flag for every course, aligned with `courses`
#[must_use]
pub fn derive_enabled(courses: &[Course], dag: &DAG) -> Vec<bool> {
    let done = done_lookup(courses);
    courses
        .iter()
        .map(|course| is_enabled(course, dag, |id| done.get(id).copied().unwrap_or(false)))
        .collect()
}

fn done_lookup(courses: &[Course]) -> HashMap<&str, bool> {
    courses.iter().map(|c| (c.id.as_str(), c.done)).collect()
}

/// Result of flipping one course's completion
#[derive(Debug, Clone)]
pub struct Toggle {
    /// Updated course list
    pub courses: Vec<Course>,
    /// Courses whose enabled flag was recomputed
    pub recomputed: Reachability,
}

/// Flip the completion of `course_id` and recompute the courses it can affect
///
/// Only courses on the full path of `course_id` can change, so those are
/// re-evaluated and every other course keeps its flag. The input is left
/// untouched.
///
/// # Errors
/// Returns [`CurriculumError::UnknownCourse`] if `course_id` is not in `courses`.
pub fn toggle_done(courses: &[Course], dag: &DAG, course_id: &str, done: bool) -> Result<Toggle> {
    if !courses.iter().any(|c| c.id == course_id) {
        return Err(CurriculumError::UnknownCourse(course_id.to_string()));
    }

    let mut updated = courses.to_vec();
    for course in updated.iter_mut().filter(|c| c.id == course_id) {
        course.done = done;
    }

    let recomputed = full_path(dag, course_id);
    let scope: HashSet<&str> = recomputed.ids.iter().map(String::as_str).collect();
    let enabled: Vec<bool> = {
        let done = done_lookup(&updated);
        updated
            .iter()
            .map(|course| {
                if scope.contains(course.id.as_str()) {
                    is_enabled(course, dag, |id| done.get(id).copied().unwrap_or(false))
                } else {
                    course.enabled
                }
            })
            .collect()
    };
    for (course, enabled) in updated.iter_mut().zip(enabled) {
        course.enabled = enabled;
    }

    Ok(Toggle {
        courses: updated,
        recomputed,
    })
}

/// Ids of completed courses, in course order
#[must_use]
pub fn completed_ids(courses: &[Course]) -> Vec<String> {
    courses
        .iter()
        .filter(|c| c.done)
        .map(|c| c.id.clone())
        .collect()
}
