//! Prerequisite resolution
//!
//! Each entry of a course's `requires` list names either another course (by
//! label) or a whole year (by year label). This module turns those references
//! into directed edges between normalized course ids.

use crate::core::models::{Course, Edge};
use crate::debug;
use std::collections::HashSet;

/// What a single `requires` entry refers to
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution<'a> {
    /// A course with exactly this label (first match in course order)
    Course(&'a Course),
    /// Every course of the year with this label
    Year(Vec<&'a Course>),
    /// Neither a course label nor a year with courses
    Unresolved,
}

/// Resolve one reference against the normalized courses
///
/// Course labels take precedence over year labels; matching is exact and
/// case-sensitive.
#[must_use]
pub fn resolve_reference<'a>(courses: &'a [Course], reference: &str) -> Resolution<'a> {
    if let Some(course) = courses.iter().find(|c| c.label == reference) {
        return Resolution::Course(course);
    }

    let year_courses: Vec<&Course> = courses.iter().filter(|c| c.year == reference).collect();
    if year_courses.is_empty() {
        Resolution::Unresolved
    } else {
        Resolution::Year(year_courses)
    }
}

/// Edges produced by [`build_edges`], with the endpoint sets used for handle flags
#[derive(Debug, Clone, Default)]
pub struct EdgeSet {
    /// Edges in emission order (course order, then `requires` order)
    pub edges: Vec<Edge>,
    /// Ids of courses with at least one prerequisite edge
    pub targets: HashSet<String>,
    /// Ids of courses that are a prerequisite of something
    pub sources: HashSet<String>,
}

impl EdgeSet {
    fn push(&mut self, source: &str, target: &str) {
        // A course requiring its own year would otherwise depend on itself
        if source == target {
            return;
        }
        let edge = Edge::new(source, target);
        if self.edges.contains(&edge) {
            return;
        }
        self.sources.insert(edge.source.clone());
        self.targets.insert(edge.target.clone());
        self.edges.push(edge);
    }
}

/// Resolve every `requires` entry into edges
///
/// References that resolve to nothing are dropped. Repeated references yield
/// a single edge, and a course is never its own prerequisite; validation
/// reports the dropped self references.
#[must_use]
pub fn build_edges(courses: &[Course]) -> EdgeSet {
    let mut set = EdgeSet::default();

    for course in courses {
        for reference in &course.requires {
            match resolve_reference(courses, reference) {
                Resolution::Course(source) => set.push(&source.id, &course.id),
                Resolution::Year(sources) => {
                    for source in sources {
                        set.push(&source.id, &course.id);
                    }
                }
                Resolution::Unresolved => {
                    debug!(
                        "Dropping unresolved prerequisite '{reference}' of '{}'",
                        course.label
                    );
                }
            }
        }
    }

    set
}

/// Set `has_incoming_edge` / `has_outgoing_edge` from an edge set
pub fn apply_edge_flags(courses: &mut [Course], set: &EdgeSet) {
    for course in courses {
        course.has_incoming_edge = set.targets.contains(&course.id);
        course.has_outgoing_edge = set.sources.contains(&course.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::{Curriculum, RawCourse, Term};
    use crate::core::normalizer::normalize;
    use crate::core::store::CompletedSet;

    fn courses(curriculum: &Curriculum) -> Vec<Course> {
        normalize(curriculum, &CompletedSet::new()).courses
    }

    fn pairs(set: &EdgeSet) -> Vec<(&str, &str)> {
        set.edges
            .iter()
            .map(|e| (e.source.as_str(), e.target.as_str()))
            .collect()
    }

    #[test]
    fn test_label_reference() {
        let curriculum = Curriculum::new("X").with_year(
            "Year 1",
            vec![
                RawCourse::new("Math I", Term::FirstHalf),
                RawCourse::new("Physics I", Term::FirstHalf).requiring("Math I"),
            ],
        );
        let set = build_edges(&courses(&curriculum));

        assert_eq!(pairs(&set), vec![("y1-m1", "y1-m2")]);
        assert_eq!(set.edges[0].id, "y1-m1-y1-m2");
    }

    #[test]
    fn test_whole_year_reference() {
        let curriculum = Curriculum::new("X")
            .with_year(
                "Year 1",
                vec![
                    RawCourse::new("A", Term::FirstHalf),
                    RawCourse::new("B", Term::SecondHalf),
                    RawCourse::new("C", Term::FullYear),
                ],
            )
            .with_year(
                "Year 2",
                vec![RawCourse::new("D", Term::FirstHalf).requiring("Year 1")],
            );
        let set = build_edges(&courses(&curriculum));

        assert_eq!(
            pairs(&set),
            vec![("y1-m1", "y2-m1"), ("y1-m2", "y2-m1"), ("y1-m3", "y2-m1")]
        );
    }

    #[test]
    fn test_label_wins_over_year() {
        let curriculum = Curriculum::new("X")
            .with_year("Taller", vec![RawCourse::new("A", Term::FirstHalf)])
            .with_year(
                "Year 2",
                vec![
                    RawCourse::new("Taller", Term::FirstHalf),
                    RawCourse::new("B", Term::SecondHalf).requiring("Taller"),
                ],
            );
        let set = build_edges(&courses(&curriculum));

        assert_eq!(pairs(&set), vec![("y2-m1", "y2-m2")]);
    }

    #[test]
    fn test_unresolved_reference_dropped() {
        let curriculum = Curriculum::new("X").with_year(
            "Year 1",
            vec![RawCourse::new("A", Term::FirstHalf).requiring("Renamed course")],
        );
        let set = build_edges(&courses(&curriculum));
        assert!(set.edges.is_empty());
    }

    #[test]
    fn test_reference_is_case_sensitive() {
        let curriculum = Curriculum::new("X").with_year(
            "Year 1",
            vec![
                RawCourse::new("Math I", Term::FirstHalf),
                RawCourse::new("B", Term::FirstHalf).requiring("math i"),
            ],
        );
        assert!(build_edges(&courses(&curriculum)).edges.is_empty());
    }

    #[test]
    fn test_duplicate_references_deduplicated() {
        let curriculum = Curriculum::new("X").with_year(
            "Year 1",
            vec![
                RawCourse::new("A", Term::FirstHalf),
                RawCourse::new("B", Term::SecondHalf)
                    .requiring("A")
                    .requiring("A")
                    .requiring("Year 1"),
            ],
        );
        let set = build_edges(&courses(&curriculum));
        assert_eq!(pairs(&set), vec![("y1-m1", "y1-m2")]);
    }

    #[test]
    fn test_duplicate_label_first_match_wins() {
        let curriculum = Curriculum::new("X")
            .with_year("Year 1", vec![RawCourse::new("Seminario", Term::FirstHalf)])
            .with_year(
                "Year 2",
                vec![
                    RawCourse::new("Seminario", Term::FirstHalf),
                    RawCourse::new("B", Term::SecondHalf).requiring("Seminario"),
                ],
            );
        let set = build_edges(&courses(&curriculum));
        assert_eq!(pairs(&set), vec![("y1-m1", "y2-m2")]);
    }

    #[test]
    fn test_edge_flags() {
        let curriculum = Curriculum::new("X").with_year(
            "Year 1",
            vec![
                RawCourse::new("A", Term::FirstHalf),
                RawCourse::new("B", Term::FirstHalf).requiring("A"),
                RawCourse::new("C", Term::SecondHalf),
            ],
        );
        let mut courses = courses(&curriculum);
        let set = build_edges(&courses);
        apply_edge_flags(&mut courses, &set);

        assert!(courses[0].has_outgoing_edge && !courses[0].has_incoming_edge);
        assert!(courses[1].has_incoming_edge && !courses[1].has_outgoing_edge);
        assert!(!courses[2].has_incoming_edge && !courses[2].has_outgoing_edge);
    }
}
