//! The collection of curricula a user can pick from
//!
//! A fresh install starts from the bundled default plans; imports add to or
//! replace entries by name.

use crate::core::error::{CurriculumError, Result};
use crate::core::models::Curriculum;
use serde::{Deserialize, Serialize};

/// Bundled plans used on first run and on reset
const DEFAULT_PLANS: &str = include_str!("../assets/default_plans.json");

/// Outcome of [`PlanLibrary::upsert`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upsert {
    /// A new curriculum was appended
    Added,
    /// A curriculum with the same name was replaced
    Replaced,
}

/// An ordered list of curricula, unique by name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlanLibrary {
    plans: Vec<Curriculum>,
}

impl PlanLibrary {
    /// Create a library from a list of curricula
    #[must_use]
    pub const fn new(plans: Vec<Curriculum>) -> Self {
        Self { plans }
    }

    /// The bundled default plans
    ///
    /// # Errors
    /// Returns an error if the bundled document cannot be parsed.
    pub fn defaults() -> Result<Self> {
        Ok(serde_json::from_str(DEFAULT_PLANS)?)
    }

    /// All curricula, in library order
    #[must_use]
    pub fn plans(&self) -> &[Curriculum] {
        &self.plans
    }

    /// Curriculum names, in library order
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.plans.iter().map(|p| p.name.as_str()).collect()
    }

    /// Number of curricula
    #[must_use]
    pub fn len(&self) -> usize {
        self.plans.len()
    }

    /// Whether the library holds no curricula
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.plans.is_empty()
    }

    /// Look up a curriculum by name
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Curriculum> {
        self.plans.iter().find(|p| p.name == name)
    }

    /// The named curriculum, or the first one when no name is given
    ///
    /// # Errors
    /// Returns [`CurriculumError::UnknownCurriculum`] if `name` matches no
    /// curriculum, or if the library is empty.
    pub fn select(&self, name: Option<&str>) -> Result<&Curriculum> {
        match name {
            Some(name) => self
                .get(name)
                .ok_or_else(|| CurriculumError::UnknownCurriculum(name.to_string())),
            None => self
                .plans
                .first()
                .ok_or_else(|| CurriculumError::UnknownCurriculum("<empty library>".to_string())),
        }
    }

    /// Add a curriculum, replacing any existing one with the same name in place
    pub fn upsert(&mut self, curriculum: Curriculum) -> Upsert {
        if let Some(existing) = self.plans.iter_mut().find(|p| p.name == curriculum.name) {
            *existing = curriculum;
            Upsert::Replaced
        } else {
            self.plans.push(curriculum);
            Upsert::Added
        }
    }

    /// Remove a curriculum by name
    pub fn remove(&mut self, name: &str) -> Option<Curriculum> {
        let index = self.plans.iter().position(|p| p.name == name)?;
        Some(self.plans.remove(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::{RawCourse, Term};

    #[test]
    fn test_defaults_parse() {
        let library = PlanLibrary::defaults().unwrap();
        assert!(!library.is_empty());
        assert_eq!(library.names()[0], "Licenciatura en Ciencias de Datos");
    }

    #[test]
    fn test_select_falls_back_to_first() {
        let library = PlanLibrary::defaults().unwrap();
        let first = library.select(None).unwrap();
        assert_eq!(first.name, library.names()[0]);
        assert!(matches!(
            library.select(Some("Astrología")),
            Err(CurriculumError::UnknownCurriculum(_))
        ));
    }

    #[test]
    fn test_select_empty_library() {
        let library = PlanLibrary::new(Vec::new());
        assert!(library.select(None).is_err());
    }

    #[test]
    fn test_upsert_replaces_by_name() {
        let mut library = PlanLibrary::new(vec![Curriculum::new("A"), Curriculum::new("B")]);

        let replacement = Curriculum::new("A")
            .with_year("Primer año", vec![RawCourse::new("Nueva", Term::FirstHalf)]);
        assert_eq!(library.upsert(replacement), Upsert::Replaced);
        assert_eq!(library.names(), vec!["A", "B"]);
        assert_eq!(library.get("A").unwrap().course_count(), 1);

        assert_eq!(library.upsert(Curriculum::new("C")), Upsert::Added);
        assert_eq!(library.names(), vec!["A", "B", "C"]);
    }

    #[test]
    fn test_remove() {
        let mut library = PlanLibrary::new(vec![Curriculum::new("A"), Curriculum::new("B")]);
        assert!(library.remove("A").is_some());
        assert!(library.remove("A").is_none());
        assert_eq!(library.len(), 1);
    }

    #[test]
    fn test_json_is_plain_array() {
        let library = PlanLibrary::new(vec![Curriculum::new("A")]);
        let json = serde_json::to_string(&library).unwrap();
        assert_eq!(json, r#"[{"name":"A","plan":{}}]"#);
    }
}
