//! Directed graph of course prerequisites (correlativas)

use serde::Serialize;
use std::collections::{HashMap, HashSet, VecDeque};

/// A directed prerequisite edge: `source` must be done before `target` is enabled
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Edge {
    /// Edge id, `"<source>-<target>"`
    pub id: String,
    /// Prerequisite course id
    pub source: String,
    /// Dependent course id
    pub target: String,
}

impl Edge {
    /// Create an edge between two course ids
    #[must_use]
    pub fn new(source: &str, target: &str) -> Self {
        Self {
            id: format!("{source}-{target}"),
            source: source.to_string(),
            target: target.to_string(),
        }
    }
}

/// Course ids reached by a traversal
///
/// `ids` follows course insertion order. `cycle_detected` is set when the
/// traversal ran into a node that was still on its own path, in which case
/// the result is still complete but the graph is not acyclic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reachability {
    /// Reached course ids, in course order
    pub ids: Vec<String>,
    /// Whether a cycle was found while traversing
    pub cycle_detected: bool,
}

impl Reachability {
    /// Whether `id` was reached
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|reached| reached == id)
    }

    /// Number of reached courses
    #[must_use]
    pub const fn len(&self) -> usize {
        self.ids.len()
    }

    /// Whether nothing was reached
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
    OnPath,
    Finished,
}

/// Prerequisite graph over course ids
///
/// The DAG uses two association lists:
/// - `dependencies`: maps each course to its direct prerequisites
/// - `dependents`: maps each course to the courses that directly require it
///
/// Nothing prevents a malformed curriculum from producing a cycle, so every
/// traversal guards itself with a visited set.
#[derive(Debug, Clone, Default)]
pub struct DAG {
    /// Maps course id -> direct prerequisite ids
    pub dependencies: HashMap<String, Vec<String>>,

    /// Maps course id -> ids of courses that directly require it
    pub dependents: HashMap<String, Vec<String>>,

    /// All course ids, in insertion order
    pub courses: Vec<String>,
}

impl DAG {
    /// Create a new empty DAG
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a DAG from course ids and edges
    ///
    /// Edges naming unknown courses add those courses at the end.
    #[must_use]
    pub fn from_edges<'a>(course_ids: impl IntoIterator<Item = &'a str>, edges: &[Edge]) -> Self {
        let mut dag = Self::new();
        for id in course_ids {
            dag.add_course(id);
        }
        for edge in edges {
            dag.add_prerequisite(&edge.target, &edge.source);
        }
        dag
    }

    /// Add a course to the DAG
    pub fn add_course(&mut self, course_id: &str) {
        if !self.dependencies.contains_key(course_id) {
            self.courses.push(course_id.to_string());
            self.dependencies.insert(course_id.to_string(), Vec::new());
            self.dependents.insert(course_id.to_string(), Vec::new());
        }
    }

    /// Add a prerequisite relationship (idempotent)
    ///
    /// # Arguments
    /// * `course_id` - Course that requires the prerequisite
    /// * `prerequisite_id` - Course that must be done first
    pub fn add_prerequisite(&mut self, course_id: &str, prerequisite_id: &str) {
        self.add_course(course_id);
        self.add_course(prerequisite_id);

        if let Some(deps) = self.dependencies.get_mut(course_id) {
            if !deps.iter().any(|d| d == prerequisite_id) {
                deps.push(prerequisite_id.to_string());
            }
        }

        if let Some(deps) = self.dependents.get_mut(prerequisite_id) {
            if !deps.iter().any(|d| d == course_id) {
                deps.push(course_id.to_string());
            }
        }
    }

    /// Direct prerequisites of a course (empty for unknown courses)
    #[must_use]
    pub fn get_prerequisites(&self, course_id: &str) -> &[String] {
        self.dependencies.get(course_id).map_or(&[], Vec::as_slice)
    }

    /// Courses that directly require a course (empty for unknown courses)
    #[must_use]
    pub fn get_dependents(&self, course_id: &str) -> &[String] {
        self.dependents.get(course_id).map_or(&[], Vec::as_slice)
    }

    /// Get the number of courses in the DAG
    #[must_use]
    pub const fn course_count(&self) -> usize {
        self.courses.len()
    }

    /// Check if a course exists in the DAG
    #[must_use]
    pub fn contains_course(&self, course_id: &str) -> bool {
        self.dependencies.contains_key(course_id)
    }

    /// Every course that transitively requires `course_id`
    #[must_use]
    pub fn forward(&self, course_id: &str) -> Reachability {
        self.closure(course_id, &self.dependents)
    }

    /// Every transitive prerequisite of `course_id`
    #[must_use]
    pub fn backward(&self, course_id: &str) -> Reachability {
        self.closure(course_id, &self.dependencies)
    }

    /// Depth-first closure from `start` over `adjacency`, excluding `start` itself
    fn closure<'a>(
        &'a self,
        start: &'a str,
        adjacency: &'a HashMap<String, Vec<String>>,
    ) -> Reachability {
        let mut marks: HashMap<&'a str, Mark> = HashMap::new();
        let mut stack: Vec<(&'a str, usize)> = vec![(start, 0)];
        let mut cycle_detected = false;
        marks.insert(start, Mark::OnPath);

        while let Some(&(node, next)) = stack.last() {
            let neighbours = adjacency.get(node).map_or(&[][..], Vec::as_slice);
            let Some(neighbour) = neighbours.get(next) else {
                marks.insert(node, Mark::Finished);
                stack.pop();
                continue;
            };
            if let Some(top) = stack.last_mut() {
                top.1 += 1;
            }
            let neighbour = neighbour.as_str();
            match marks.get(neighbour) {
                Some(Mark::OnPath) => cycle_detected = true,
                Some(Mark::Finished) => {}
                None => {
                    marks.insert(neighbour, Mark::OnPath);
                    stack.push((neighbour, 0));
                }
            }
        }

        Reachability {
            ids: self
                .courses
                .iter()
                .filter(|id| id.as_str() != start && marks.contains_key(id.as_str()))
                .cloned()
                .collect(),
            cycle_detected,
        }
    }

    /// Courses in prerequisite-first order (Kahn's algorithm)
    ///
    /// # Errors
    /// Returns the ids of the courses that could not be ordered (those on or
    /// behind a cycle), in course order.
    pub fn topological_order(&self) -> Result<Vec<String>, Vec<String>> {
        let mut indegree: HashMap<&str, usize> = self
            .courses
            .iter()
            .map(|id| (id.as_str(), self.get_prerequisites(id).len()))
            .collect();

        let mut queue: VecDeque<&str> = self
            .courses
            .iter()
            .map(String::as_str)
            .filter(|id| indegree.get(id).copied() == Some(0))
            .collect();

        let mut order = Vec::with_capacity(self.courses.len());
        while let Some(id) = queue.pop_front() {
            order.push(id.to_string());
            for dependent in self.get_dependents(id) {
                if let Some(count) = indegree.get_mut(dependent.as_str()) {
                    *count -= 1;
                    if *count == 0 {
                        queue.push_back(dependent);
                    }
                }
            }
        }

        if order.len() == self.courses.len() {
            Ok(order)
        } else {
            let ordered: HashSet<&str> = order.iter().map(String::as_str).collect();
            Err(self
                .courses
                .iter()
                .filter(|id| !ordered.contains(id.as_str()))
                .cloned()
                .collect())
        }
    }
}

impl std::fmt::Display for DAG {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Prerequisite graph ({} courses):", self.courses.len())?;
        writeln!(f)?;

        for course_id in &self.courses {
            let deps = self.get_prerequisites(course_id);
            if deps.is_empty() {
                writeln!(f, "  {course_id} ← (no prerequisites)")?;
            } else {
                writeln!(f, "  {course_id} ← {}", deps.join(", "))?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain() -> DAG {
        // a -> b -> c, a -> d
        DAG::from_edges(
            ["a", "b", "c", "d"],
            &[Edge::new("a", "b"), Edge::new("b", "c"), Edge::new("a", "d")],
        )
    }

    #[test]
    fn test_dag_creation() {
        let dag = DAG::new();
        assert_eq!(dag.course_count(), 0);
    }

    #[test]
    fn test_add_course() {
        let mut dag = DAG::new();
        dag.add_course("y1-m1");
        dag.add_course("y1-m1");
        assert_eq!(dag.course_count(), 1);
        assert!(dag.contains_course("y1-m1"));
    }

    #[test]
    fn test_add_prerequisite() {
        let mut dag = DAG::new();
        dag.add_prerequisite("y2-m1", "y1-m1");

        assert_eq!(dag.course_count(), 2);
        assert_eq!(dag.get_prerequisites("y2-m1"), ["y1-m1".to_string()]);
        assert_eq!(dag.get_dependents("y1-m1"), ["y2-m1".to_string()]);
    }

    #[test]
    fn test_duplicate_prerequisite() {
        let mut dag = DAG::new();
        dag.add_prerequisite("y2-m1", "y1-m1");
        dag.add_prerequisite("y2-m1", "y1-m1");

        assert_eq!(dag.get_prerequisites("y2-m1").len(), 1);
    }

    #[test]
    fn test_edge_id() {
        let edge = Edge::new("y1-m1", "y2-m3");
        assert_eq!(edge.id, "y1-m1-y2-m3");
    }

    #[test]
    fn test_forward_closure() {
        let dag = chain();
        let forward = dag.forward("a");
        assert_eq!(forward.ids, vec!["b", "c", "d"]);
        assert!(!forward.cycle_detected);
        assert!(dag.forward("c").is_empty());
    }

    #[test]
    fn test_backward_closure() {
        let dag = chain();
        assert_eq!(dag.backward("c").ids, vec!["a", "b"]);
        assert!(dag.backward("a").is_empty());
    }

    #[test]
    fn test_diamond_is_not_a_cycle() {
        let dag = DAG::from_edges(
            ["a", "b", "c", "d"],
            &[
                Edge::new("a", "b"),
                Edge::new("a", "c"),
                Edge::new("b", "d"),
                Edge::new("c", "d"),
            ],
        );
        let forward = dag.forward("a");
        assert_eq!(forward.ids, vec!["b", "c", "d"]);
        assert!(!forward.cycle_detected);
        assert!(dag.topological_order().is_ok());
    }

    #[test]
    fn test_cycle_terminates_and_is_flagged() {
        let dag = DAG::from_edges(
            ["a", "b", "c"],
            &[Edge::new("a", "b"), Edge::new("b", "c"), Edge::new("c", "a")],
        );
        let forward = dag.forward("a");
        assert!(forward.cycle_detected);
        assert_eq!(forward.ids, vec!["b", "c"]);

        let backward = dag.backward("b");
        assert!(backward.cycle_detected);
    }

    #[test]
    fn test_topological_order() {
        let order = chain().topological_order().unwrap();
        let pos = |id: &str| order.iter().position(|o| o == id).unwrap();
        assert!(pos("a") < pos("b"));
        assert!(pos("b") < pos("c"));
        assert!(pos("a") < pos("d"));
    }

    #[test]
    fn test_topological_order_reports_cycle_members() {
        let dag = DAG::from_edges(
            ["root", "a", "b", "tail"],
            &[
                Edge::new("root", "a"),
                Edge::new("a", "b"),
                Edge::new("b", "a"),
                Edge::new("b", "tail"),
            ],
        );
        assert_eq!(dag.topological_order().unwrap_err(), vec!["a", "b", "tail"]);
    }

    #[test]
    fn test_dag_display() {
        let display = format!("{}", chain());
        assert!(display.contains("Prerequisite graph (4 courses)"));
        assert!(display.contains("c ← b"));
        assert!(display.contains("a ← (no prerequisites)"));
    }
}
