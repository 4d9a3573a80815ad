//! The derived curriculum graph
//!
//! [`CurriculumGraph::build`] runs the whole pipeline (normalize, resolve
//! edges, derive unlock state) and exposes the queries a renderer needs.

use crate::core::error::{CurriculumError, Result};
use crate::core::graph_builder::{apply_edge_flags, build_edges};
use crate::core::models::{Category, Course, Curriculum, Edge, Node, Reachability, Year, DAG};
use crate::core::normalizer::normalize;
use crate::core::store::CompletedSet;
use crate::core::{reachability, unlock};
use crate::debug;

/// A curriculum with resolved edges and unlock state
#[derive(Debug, Clone)]
pub struct CurriculumGraph {
    name: String,
    courses: Vec<Course>,
    years: Vec<Year>,
    edges: Vec<Edge>,
    dag: DAG,
}

impl CurriculumGraph {
    /// Build the graph of `curriculum` with progress from `completed`
    #[must_use]
    pub fn build(curriculum: &Curriculum, completed: &CompletedSet) -> Self {
        let normalized = normalize(curriculum, completed);
        let mut courses = normalized.courses;

        let edge_set = build_edges(&courses);
        apply_edge_flags(&mut courses, &edge_set);

        let dag = DAG::from_edges(courses.iter().map(|c| c.id.as_str()), &edge_set.edges);
        let enabled = unlock::derive_enabled(&courses, &dag);
        for (course, enabled) in courses.iter_mut().zip(enabled) {
            course.enabled = enabled;
        }

        debug!(
            "Built graph for '{}': {} courses, {} edges",
            curriculum.name,
            courses.len(),
            edge_set.edges.len()
        );

        Self {
            name: curriculum.name.clone(),
            courses,
            years: normalized.years,
            edges: edge_set.edges,
            dag,
        }
    }

    /// Curriculum name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Normalized courses, in year order
    #[must_use]
    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    /// Year nodes, in plan order
    #[must_use]
    pub fn years(&self) -> &[Year] {
        &self.years
    }

    /// Prerequisite edges
    #[must_use]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Adjacency view of the edges
    #[must_use]
    pub const fn dag(&self) -> &DAG {
        &self.dag
    }

    /// Look up a course by id
    #[must_use]
    pub fn course(&self, id: &str) -> Option<&Course> {
        self.courses.iter().find(|c| c.id == id)
    }

    /// Look up a course by id, falling back to its label
    ///
    /// # Errors
    /// Returns [`CurriculumError::UnknownCourse`] if neither matches.
    pub fn find_course(&self, id_or_label: &str) -> Result<&Course> {
        self.course(id_or_label)
            .or_else(|| self.courses.iter().find(|c| c.label == id_or_label))
            .ok_or_else(|| CurriculumError::UnknownCourse(id_or_label.to_string()))
    }

    /// Courses that require `id`, directly or transitively
    #[must_use]
    pub fn forward_reachable(&self, id: &str) -> Reachability {
        reachability::forward_reachable(&self.dag, id)
    }

    /// Transitive prerequisites of `id`
    #[must_use]
    pub fn backward_reachable(&self, id: &str) -> Reachability {
        reachability::backward_reachable(&self.dag, id)
    }

    /// Everything connected to `id`, including `id`
    #[must_use]
    pub fn full_path(&self, id: &str) -> Reachability {
        reachability::full_path(&self.dag, id)
    }

    /// Courses of the full path of `id`, in course order
    #[must_use]
    pub fn path_courses(&self, id: &str) -> Vec<&Course> {
        let path = self.full_path(id);
        self.courses.iter().filter(|c| path.contains(&c.id)).collect()
    }

    /// Courses of one year
    #[must_use]
    pub fn filter_by_year(&self, year: &str) -> Vec<&Course> {
        reachability::filter_by_year(&self.courses, year)
    }

    /// Courses of one category plus their prerequisites
    #[must_use]
    pub fn filter_by_category(&self, category: Category) -> Vec<&Course> {
        reachability::filter_by_category(&self.courses, &self.dag, category)
    }

    /// Number of courses connected to `id`
    #[must_use]
    pub fn correlativa_count(&self, id: &str) -> usize {
        reachability::correlativa_count(&self.dag, id)
    }

    /// Course ids by number of connected courses, most connected first
    #[must_use]
    pub fn ranking(&self) -> Vec<(String, usize)> {
        reachability::rank_by_correlativas(&self.courses, &self.dag)
    }

    /// Short description of how connected a course is
    ///
    /// # Errors
    /// Returns [`CurriculumError::UnknownCourse`] if `id` is not a course.
    pub fn correlativa_hint(&self, id: &str) -> Result<String> {
        let course = self.find_course(id)?;
        Ok(match self.correlativa_count(&course.id) {
            0 => format!("{} no tiene correlativas", course.label),
            1 => format!("{} tiene 1 correlativa", course.label),
            n => format!("{} tiene {n} correlativas", course.label),
        })
    }

    /// Year headers followed by every course, as render nodes
    #[must_use]
    pub fn nodes(&self) -> Vec<Node> {
        self.years
            .iter()
            .cloned()
            .map(Node::Year)
            .chain(self.courses.iter().cloned().map(Node::Course))
            .collect()
    }

    /// The header of one year followed by its courses
    ///
    /// # Errors
    /// Returns [`CurriculumError::UnknownYear`] if no year has that label.
    pub fn year_view(&self, year: &str) -> Result<Vec<Node>> {
        let header = self
            .years
            .iter()
            .find(|y| y.label == year)
            .ok_or_else(|| CurriculumError::UnknownYear(year.to_string()))?;
        Ok(std::iter::once(Node::Year(header.clone()))
            .chain(self.filter_by_year(year).into_iter().cloned().map(Node::Course))
            .collect())
    }

    /// Mark a course done or not done and refresh unlock state
    ///
    /// Returns the set of courses whose enabled flag was recomputed.
    ///
    /// # Errors
    /// Returns [`CurriculumError::UnknownCourse`] if `id` is not a course.
    pub fn set_done(&mut self, id: &str, done: bool) -> Result<Reachability> {
        let toggle = unlock::toggle_done(&self.courses, &self.dag, id, done)?;
        self.courses = toggle.courses;
        Ok(toggle.recomputed)
    }

    /// Ids of completed courses, in course order
    #[must_use]
    pub fn completed_ids(&self) -> Vec<String> {
        unlock::completed_ids(&self.courses)
    }
}
