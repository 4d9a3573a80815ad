//! Path and reachability queries over a built curriculum
//!
//! All functions are pure: they read a course list and its [`DAG`] and return
//! fresh results in course order.

use crate::core::models::{Category, Course, Reachability, DAG};
use crate::warn;
use std::collections::HashSet;

/// Courses that require `course_id`, directly or transitively
#[must_use]
pub fn forward_reachable(dag: &DAG, course_id: &str) -> Reachability {
    let reach = dag.forward(course_id);
    if reach.cycle_detected {
        warn!("Cycle detected while following courses that require '{course_id}'");
    }
    reach
}

/// Transitive prerequisites of `course_id`
#[must_use]
pub fn backward_reachable(dag: &DAG, course_id: &str) -> Reachability {
    let reach = dag.backward(course_id);
    if reach.cycle_detected {
        warn!("Cycle detected while following prerequisites of '{course_id}'");
    }
    reach
}

/// Everything connected to `course_id`: forward ∪ backward ∪ {`course_id`}
#[must_use]
pub fn full_path(dag: &DAG, course_id: &str) -> Reachability {
    let forward = forward_reachable(dag, course_id);
    let backward = backward_reachable(dag, course_id);

    let mut members: HashSet<&str> = forward
        .ids
        .iter()
        .chain(&backward.ids)
        .map(String::as_str)
        .collect();
    members.insert(course_id);

    let mut ids: Vec<String> = dag
        .courses
        .iter()
        .filter(|id| members.contains(id.as_str()))
        .cloned()
        .collect();
    if !dag.contains_course(course_id) {
        ids.push(course_id.to_string());
    }

    Reachability {
        ids,
        cycle_detected: forward.cycle_detected || backward.cycle_detected,
    }
}

/// Courses assigned to the year labelled `year`, in course order
#[must_use]
pub fn filter_by_year<'a>(courses: &'a [Course], year: &str) -> Vec<&'a Course> {
    courses.iter().filter(|c| c.year == year).collect()
}

/// Courses of a category plus every prerequisite they transitively need
///
/// The prerequisites are included even when they belong to another category,
/// so the selection explains why its courses are unlocked.
#[must_use]
pub fn filter_by_category<'a>(
    courses: &'a [Course],
    dag: &DAG,
    category: Category,
) -> Vec<&'a Course> {
    let mut selected: HashSet<String> = HashSet::new();
    for course in courses.iter().filter(|c| c.category == category) {
        selected.insert(course.id.clone());
        selected.extend(backward_reachable(dag, &course.id).ids);
    }

    courses
        .iter()
        .filter(|c| selected.contains(&c.id))
        .collect()
}

/// Number of courses connected to `course_id` (its full path minus itself)
#[must_use]
pub fn correlativa_count(dag: &DAG, course_id: &str) -> usize {
    full_path(dag, course_id).len().saturating_sub(1)
}

/// Course ids ranked by [`correlativa_count`], most connected first
///
/// Ties keep course order.
#[must_use]
pub fn rank_by_correlativas(courses: &[Course], dag: &DAG) -> Vec<(String, usize)> {
    let mut ranking: Vec<(String, usize)> = courses
        .iter()
        .map(|c| (c.id.clone(), correlativa_count(dag, &c.id)))
        .collect();
    ranking.sort_by(|a, b| b.1.cmp(&a.1));
    ranking
}
