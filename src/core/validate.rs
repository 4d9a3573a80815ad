//! Curriculum consistency checks
//!
//! The graph builder tolerates dangling references, duplicate labels and
//! courses that require themselves, and never hangs on cycles. These checks surface those soft inconsistencies so
//! the caller can fix the plan.

use crate::core::graph::CurriculumGraph;
use crate::core::graph_builder::{resolve_reference, Resolution};
use std::collections::HashMap;
use std::fmt;

/// The category of a validation finding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueKind {
    /// A `requires` entry names neither a course nor a year with courses
    UnresolvedReference,
    /// A course requires itself, by label or through its own year
    SelfReference,
    /// Two or more courses share a label; references resolve to the first
    DuplicateLabel,
    /// Prerequisites form a cycle
    Cycle,
}

/// A single validation finding
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    /// The category of the finding
    pub kind: IssueKind,
    /// Ids of the courses involved
    pub course_ids: Vec<String>,
    /// A human-readable message
    pub message: String,
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// Check a built curriculum for dangling references, duplicate labels, and cycles
///
/// # Errors
/// Returns every issue found, unresolved references first, then self
/// references, then duplicate labels, then cycles.
pub fn validate(graph: &CurriculumGraph) -> Result<(), Vec<ValidationIssue>> {
    let mut issues = unresolved_references(graph);
    issues.extend(self_references(graph));
    issues.extend(duplicate_labels(graph));
    issues.extend(cycles(graph));

    if issues.is_empty() {
        Ok(())
    } else {
        Err(issues)
    }
}

fn unresolved_references(graph: &CurriculumGraph) -> Vec<ValidationIssue> {
    let courses = graph.courses();
    courses
        .iter()
        .flat_map(move |course| {
            course
                .requires
                .iter()
                .filter(move |reference| {
                    resolve_reference(courses, reference) == Resolution::Unresolved
                })
                .map(move |reference| ValidationIssue {
                    kind: IssueKind::UnresolvedReference,
                    course_ids: vec![course.id.clone()],
                    message: format!(
                        "Course '{}' ({}): prerequisite '{reference}' not found",
                        course.label, course.id
                    ),
                })
        })
        .collect()
}

/// The builder drops these edges, so the cycle never reaches the DAG
fn self_references(graph: &CurriculumGraph) -> Vec<ValidationIssue> {
    let courses = graph.courses();
    courses
        .iter()
        .flat_map(move |course| {
            course
                .requires
                .iter()
                .filter(move |reference| match resolve_reference(courses, reference) {
                    Resolution::Course(found) => found.id == course.id,
                    Resolution::Year(members) => members.iter().any(|m| m.id == course.id),
                    Resolution::Unresolved => false,
                })
                .map(move |reference| ValidationIssue {
                    kind: IssueKind::SelfReference,
                    course_ids: vec![course.id.clone()],
                    message: format!(
                        "Course '{}' ({}): prerequisite '{reference}' includes the course itself",
                        course.label, course.id
                    ),
                })
        })
        .collect()
}

fn duplicate_labels(graph: &CurriculumGraph) -> Vec<ValidationIssue> {
    let mut by_label: HashMap<&str, Vec<&str>> = HashMap::new();
    let mut order: Vec<&str> = Vec::new();
    for course in graph.courses() {
        let ids = by_label.entry(&course.label).or_default();
        if ids.is_empty() {
            order.push(&course.label);
        }
        ids.push(&course.id);
    }

    order
        .into_iter()
        .filter_map(|label| {
            let ids = &by_label[label];
            (ids.len() > 1).then(|| ValidationIssue {
                kind: IssueKind::DuplicateLabel,
                course_ids: ids.iter().map(ToString::to_string).collect(),
                message: format!(
                    "Label '{label}' is used by {} courses ({}); references resolve to {}",
                    ids.len(),
                    ids.join(", "),
                    ids[0]
                ),
            })
        })
        .collect()
}

fn cycles(graph: &CurriculumGraph) -> Option<ValidationIssue> {
    let stuck = graph.dag().topological_order().err()?;
    Some(ValidationIssue {
        kind: IssueKind::Cycle,
        message: format!(
            "Prerequisite cycle involving or blocked by: {}",
            stuck.join(", ")
        ),
        course_ids: stuck,
    })
}
