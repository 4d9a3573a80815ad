//! Curriculum model and its import/export format

use super::course::RawCourse;
use crate::core::error::{CurriculumError, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};

/// Courses of a plan keyed by year label, in the order the years were written
pub type RawPlan = IndexMap<String, Vec<RawCourse>>;

/// A named curriculum, as stored and exchanged
///
/// Serializes to `{ "name": ..., "plan": { "<year>": [course, ...] } }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Curriculum {
    /// Curriculum name (e.g., "Licenciatura en Ciencias de Datos")
    pub name: String,

    /// Courses per year
    #[serde(deserialize_with = "deserialize_plan")]
    pub plan: RawPlan,
}

/// Years whose course list is `null` are read as empty
fn deserialize_plan<'de, D>(deserializer: D) -> std::result::Result<RawPlan, D::Error>
where
    D: Deserializer<'de>,
{
    let plan = IndexMap::<String, Option<Vec<RawCourse>>>::deserialize(deserializer)?;
    Ok(plan
        .into_iter()
        .map(|(year, courses)| (year, courses.unwrap_or_default()))
        .collect())
}

impl Curriculum {
    /// Create an empty curriculum
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            plan: IndexMap::new(),
        }
    }

    /// Append a year with its courses, replacing the courses if the year already exists
    pub fn add_year(&mut self, label: impl Into<String>, courses: Vec<RawCourse>) {
        self.plan.insert(label.into(), courses);
    }

    /// Builder form of [`add_year`](Self::add_year)
    #[must_use]
    pub fn with_year(mut self, label: impl Into<String>, courses: Vec<RawCourse>) -> Self {
        self.add_year(label, courses);
        self
    }

    /// Total number of courses across all years
    #[must_use]
    pub fn course_count(&self) -> usize {
        self.plan.values().map(Vec::len).sum()
    }

    /// Parse an exported curriculum
    ///
    /// The whole document is validated before anything is returned, so a
    /// malformed import never yields a partial curriculum.
    ///
    /// # Errors
    /// Returns [`CurriculumError::InvalidImport`] if the JSON is malformed, a
    /// `name` or `plan` field is missing, the name is blank, or a course
    /// record has the wrong shape.
    pub fn from_json(json: &str) -> Result<Self> {
        let curriculum: Self =
            serde_json::from_str(json).map_err(|e| CurriculumError::InvalidImport(e.to_string()))?;

        if curriculum.name.trim().is_empty() {
            return Err(CurriculumError::InvalidImport(
                "curriculum name is empty".to_string(),
            ));
        }

        Ok(curriculum)
    }

    /// Serialize to the pretty-printed export format
    ///
    /// # Errors
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::Term;

    fn sample() -> Curriculum {
        Curriculum::new("Ingeniería")
            .with_year(
                "Primer año",
                vec![
                    RawCourse::new("Análisis I", Term::FirstHalf),
                    RawCourse::new("Álgebra", Term::SecondHalf).requiring("Análisis I"),
                ],
            )
            .with_year(
                "Segundo año",
                vec![RawCourse::new("Análisis II", Term::FirstHalf).requiring("Primer año")],
            )
    }

    #[test]
    fn test_course_count() {
        assert_eq!(sample().course_count(), 3);
    }

    #[test]
    fn test_export_import_round_trip() {
        let original = sample();
        let json = original.to_json().unwrap();
        let imported = Curriculum::from_json(&json).unwrap();

        assert_eq!(imported, original);
        let years: Vec<&String> = imported.plan.keys().collect();
        assert_eq!(years, vec!["Primer año", "Segundo año"]);
    }

    #[test]
    fn test_import_preserves_year_order() {
        let json = r#"{"name":"X","plan":{"Zeta":[],"Alfa":[],"Medio":[]}}"#;
        let curriculum = Curriculum::from_json(json).unwrap();
        let years: Vec<&str> = curriculum.plan.keys().map(String::as_str).collect();
        assert_eq!(years, vec!["Zeta", "Alfa", "Medio"]);
    }

    #[test]
    fn test_import_missing_name_rejected() {
        let result = Curriculum::from_json(r#"{"plan":{}}"#);
        assert!(matches!(result, Err(CurriculumError::InvalidImport(_))));
    }

    #[test]
    fn test_import_missing_plan_rejected() {
        let result = Curriculum::from_json(r#"{"name":"Sin plan"}"#);
        assert!(matches!(result, Err(CurriculumError::InvalidImport(_))));
    }

    #[test]
    fn test_import_blank_name_rejected() {
        let result = Curriculum::from_json(r#"{"name":"  ","plan":{}}"#);
        assert!(matches!(result, Err(CurriculumError::InvalidImport(_))));
    }

    #[test]
    fn test_import_null_year_is_empty() {
        let curriculum = Curriculum::from_json(r#"{"name":"X","plan":{"Primer año":null}}"#).unwrap();
        assert!(curriculum.plan["Primer año"].is_empty());
    }
}
