//! Plan library and progress, wired to their stores
//!
//! [`Planner`] is what a host embeds: it loads the plan library and the
//! completed-set once, builds graphs on demand, and writes back through the
//! injected [`Repository`] implementations whenever the user changes something.

use crate::core::error::Result;
use crate::core::graph::CurriculumGraph;
use crate::core::library::{PlanLibrary, Upsert};
use crate::core::models::Curriculum;
use crate::core::store::{CompletedSet, Repository};
use crate::{error, info, warn};

/// Curricula plus per-curriculum progress, backed by two stores
#[derive(Debug)]
pub struct Planner<P, S> {
    plans: P,
    progress: S,
    library: PlanLibrary,
    completed: CompletedSet,
}

impl<P, S> Planner<P, S>
where
    P: Repository<PlanLibrary>,
    S: Repository<CompletedSet>,
{
    /// Load the library and progress from their stores
    ///
    /// An empty plans store yields the bundled default plans and an empty
    /// progress store yields no progress. Nothing is written until the first
    /// change.
    ///
    /// # Errors
    /// Returns an error if either store holds a document that cannot be read.
    pub fn open(plans: P, progress: S) -> Result<Self> {
        let library = if let Some(library) = plans.load()? {
            library
        } else {
            info!("No saved plans found, using bundled defaults");
            PlanLibrary::defaults()?
        };
        let completed = progress.load()?.unwrap_or_default();

        Ok(Self {
            plans,
            progress,
            library,
            completed,
        })
    }

    /// The loaded plan library
    #[must_use]
    pub const fn library(&self) -> &PlanLibrary {
        &self.library
    }

    /// The loaded completed-set
    #[must_use]
    pub const fn completed(&self) -> &CompletedSet {
        &self.completed
    }

    /// The curriculum named `name`, or the first one if `name` is `None` or unknown
    ///
    /// # Errors
    /// Returns an error only if the library is empty.
    pub fn select_or_first(&self, name: Option<&str>) -> Result<&Curriculum> {
        if let Some(name) = name {
            if let Some(curriculum) = self.library.get(name) {
                return Ok(curriculum);
            }
            warn!("Plan '{name}' not found, falling back to the first plan");
        }
        self.library.select(None)
    }

    /// Build the graph of a curriculum with its recorded progress
    ///
    /// # Errors
    /// Returns [`crate::core::error::CurriculumError::UnknownCurriculum`] if
    /// `name` matches no curriculum.
    pub fn graph(&self, name: &str) -> Result<CurriculumGraph> {
        let curriculum = self.library.select(Some(name))?;
        Ok(CurriculumGraph::build(curriculum, &self.completed))
    }

    /// Build the graph of the selected curriculum, falling back to the first one
    ///
    /// # Errors
    /// Returns an error only if the library is empty.
    pub fn selected_graph(&self, name: Option<&str>) -> Result<CurriculumGraph> {
        let curriculum = self.select_or_first(name)?;
        Ok(CurriculumGraph::build(curriculum, &self.completed))
    }

    /// Mark a course done or not done and persist the curriculum's progress
    ///
    /// `course` may be an id or a label. Returns the completed-set as saved.
    ///
    /// # Errors
    /// Returns an error if the curriculum or course is unknown (nothing is
    /// persisted), or if the progress store fails to save.
    pub fn on_course_done_changed(
        &mut self,
        curriculum: &str,
        course: &str,
        done: bool,
    ) -> Result<CompletedSet> {
        let mut graph = self.graph(curriculum)?;
        let course_id = graph.find_course(course)?.id.clone();
        let recomputed = graph.set_done(&course_id, done)?;
        info!(
            "{} '{course_id}' in '{curriculum}', {} courses re-evaluated",
            if done { "Checked" } else { "Unchecked" },
            recomputed.len()
        );

        let mut updated = self.completed.clone();
        updated.set(curriculum, graph.completed_ids());
        self.progress.save(&updated).inspect_err(|e| {
            error!("Failed to save progress: {e}");
        })?;

        self.completed = updated;
        Ok(self.completed.clone())
    }

    /// Import a curriculum, replacing any existing one with the same name
    ///
    /// The document is fully validated before the library is touched.
    ///
    /// # Errors
    /// Returns [`crate::core::error::CurriculumError::InvalidImport`] for a
    /// malformed document, or a store error if the library cannot be saved.
    pub fn import_json(&mut self, json: &str) -> Result<Upsert> {
        let curriculum = Curriculum::from_json(json)?;
        let name = curriculum.name.clone();

        let mut updated = self.library.clone();
        let outcome = updated.upsert(curriculum);
        self.save_library(updated)?;

        info!(
            "{} plan '{name}'",
            match outcome {
                Upsert::Added => "Imported",
                Upsert::Replaced => "Replaced",
            }
        );
        Ok(outcome)
    }

    /// Serialize a curriculum in the export format
    ///
    /// # Errors
    /// Returns [`crate::core::error::CurriculumError::UnknownCurriculum`] if
    /// `name` matches no curriculum.
    pub fn export_json(&self, name: &str) -> Result<String> {
        self.library.select(Some(name))?.to_json()
    }

    /// Replace the library with the bundled default plans
    ///
    /// Progress is kept; it is keyed by curriculum name.
    ///
    /// # Errors
    /// Returns a store error if the library cannot be saved.
    pub fn reset_plans(&mut self) -> Result<()> {
        self.save_library(PlanLibrary::defaults()?)?;
        info!("Plans reset to defaults");
        Ok(())
    }

    fn save_library(&mut self, library: PlanLibrary) -> Result<()> {
        self.plans.save(&library).inspect_err(|e| {
            error!("Failed to save plans: {e}");
        })?;
        self.library = library;
        Ok(())
    }
}
