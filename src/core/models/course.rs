//! Course model
//!
//! [`RawCourse`] is the editable record stored in a curriculum plan; [`Course`]
//! is the normalized form carrying its id, year, layout position, and derived
//! graph state.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Scheduling slot of a course within its year (cuatrimestre)
///
/// Serialized as the integers `1`, `2`, and `3`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Term {
    /// First half of the year
    FirstHalf = 1,
    /// Second half of the year
    SecondHalf = 2,
    /// Spans the whole year
    FullYear = 3,
}

impl Term {
    /// Layout column offset for half-year terms (0 or 1); `None` for full-year courses.
    #[must_use]
    pub const fn column(self) -> Option<i32> {
        match self {
            Self::FirstHalf => Some(0),
            Self::SecondHalf => Some(1),
            Self::FullYear => None,
        }
    }
}

impl TryFrom<u8> for Term {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::FirstHalf),
            2 => Ok(Self::SecondHalf),
            3 => Ok(Self::FullYear),
            other => Err(format!("invalid term {other}, expected 1, 2 or 3")),
        }
    }
}

impl From<Term> for u8 {
    fn from(term: Term) -> Self {
        term as Self
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FirstHalf => write!(f, "1º cuatrimestre"),
            Self::SecondHalf => write!(f, "2º cuatrimestre"),
            Self::FullYear => write!(f, "anual"),
        }
    }
}

/// Display category of a course, used for category filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    /// Counts towards the intermediate degree (título intermedio)
    IntermediateDegree,
    /// Only counts towards the full degree (título completo)
    FullDegree,
}

impl Category {
    /// Background color the course is drawn with
    #[must_use]
    pub const fn background(self) -> &'static str {
        match self {
            Self::IntermediateDegree => "rgb(241, 197, 152)",
            Self::FullDegree => "rgb(199, 214, 236)",
        }
    }
}

impl From<bool> for Category {
    fn from(is_intermediate_degree: bool) -> Self {
        if is_intermediate_degree {
            Self::IntermediateDegree
        } else {
            Self::FullDegree
        }
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "intermediate" | "intermediate-degree" | "intermedio" => Ok(Self::IntermediateDegree),
            "full" | "full-degree" | "completo" => Ok(Self::FullDegree),
            _ => Err(format!("Unknown course category: {s}")),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IntermediateDegree => write!(f, "intermediate-degree"),
            Self::FullDegree => write!(f, "full-degree"),
        }
    }
}

/// Display coordinates of a graph node
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    /// Horizontal offset
    pub x: i32,
    /// Vertical offset
    pub y: i32,
}

/// A course as written in a curriculum plan, before normalization
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawCourse {
    /// Display name; also the key other courses use to require this one
    pub label: String,

    /// Scheduling slot within the year
    #[serde(rename = "cuatrimestre")]
    pub term: Term,

    /// Whether the course belongs to the intermediate degree
    #[serde(rename = "tituloIntermedio", default)]
    pub is_intermediate_degree: bool,

    /// Prerequisite references: course labels or year labels
    #[serde(default)]
    pub requires: Vec<String>,

    /// Weekly hours, dropped when absent or NaN
    #[serde(
        default,
        deserialize_with = "deserialize_week_hours",
        skip_serializing_if = "week_hours_absent"
    )]
    pub week_hours: Option<f64>,

    /// Link to the course page
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_link: Option<String>,
}

fn deserialize_week_hours<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.filter(|hours| !hours.is_nan()))
}

#[allow(clippy::ref_option)]
fn week_hours_absent(hours: &Option<f64>) -> bool {
    hours.is_none_or(f64::is_nan)
}

impl RawCourse {
    /// Create a course with no prerequisites
    ///
    /// # Arguments
    /// * `label` - Display name
    /// * `term` - Scheduling slot
    #[must_use]
    pub fn new(label: impl Into<String>, term: Term) -> Self {
        Self {
            label: label.into(),
            term,
            is_intermediate_degree: false,
            requires: Vec::new(),
            week_hours: None,
            external_link: None,
        }
    }

    /// Add a prerequisite reference (course label or year label)
    #[must_use]
    pub fn requiring(mut self, reference: impl Into<String>) -> Self {
        self.requires.push(reference.into());
        self
    }

    /// Mark the course as part of the intermediate degree
    #[must_use]
    pub const fn intermediate(mut self) -> Self {
        self.is_intermediate_degree = true;
        self
    }
}

/// A normalized course: uniquely identified, placed, and carrying derived state
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    /// Stable id within this snapshot, `y<year>-m<position>`
    pub id: String,
    /// Label of the year the course belongs to
    pub year: String,
    /// Display name
    pub label: String,
    /// Scheduling slot
    pub term: Term,
    /// Display category
    pub category: Category,
    /// Prerequisite references as written in the plan
    pub requires: Vec<String>,
    /// Weekly hours
    #[serde(skip_serializing_if = "Option::is_none")]
    pub week_hours: Option<f64>,
    /// Link to the course page
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_link: Option<String>,
    /// Display coordinates
    pub position: Position,
    /// Whether the student completed the course
    pub done: bool,
    /// Whether the student may start the course
    pub enabled: bool,
    /// Whether any edge points into this course
    pub has_incoming_edge: bool,
    /// Whether any edge leaves this course
    pub has_outgoing_edge: bool,
}

impl Course {
    /// Build a normalized course from its raw record
    ///
    /// Graph-derived flags start out cleared; they are filled in when the
    /// curriculum graph is built.
    #[must_use]
    pub fn from_raw(raw: &RawCourse, id: String, year: &str, position: Position) -> Self {
        Self {
            id,
            year: year.to_string(),
            label: raw.label.clone(),
            term: raw.term,
            category: Category::from(raw.is_intermediate_degree),
            requires: raw.requires.clone(),
            week_hours: raw.week_hours,
            external_link: raw.external_link.clone(),
            position,
            done: false,
            enabled: false,
            has_incoming_edge: false,
            has_outgoing_edge: false,
        }
    }

    /// Background color used by the renderer
    #[must_use]
    pub const fn background(&self) -> &'static str {
        self.category.background()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_term_ordering() {
        assert!(Term::FirstHalf < Term::SecondHalf);
        assert!(Term::SecondHalf < Term::FullYear);
    }

    #[test]
    fn test_term_rejects_out_of_range() {
        assert!(Term::try_from(0).is_err());
        assert!(Term::try_from(4).is_err());
        assert_eq!(Term::try_from(2), Ok(Term::SecondHalf));
    }

    #[test]
    fn test_raw_course_from_json() {
        let raw: RawCourse = serde_json::from_str(
            r#"{"label":"Análisis I","tituloIntermedio":true,"cuatrimestre":1,"requires":[],"weekHours":6}"#,
        )
        .unwrap();

        assert_eq!(raw.label, "Análisis I");
        assert_eq!(raw.term, Term::FirstHalf);
        assert!(raw.is_intermediate_degree);
        assert_eq!(raw.week_hours, Some(6.0));
        assert!(raw.external_link.is_none());
    }

    #[test]
    fn test_raw_course_ignores_editor_id() {
        let raw: RawCourse = serde_json::from_str(
            r#"{"id":"k3j9x0a1b","label":"Álgebra","tituloIntermedio":false,"cuatrimestre":2,"requires":["Análisis I"]}"#,
        )
        .unwrap();

        let json = serde_json::to_string(&raw).unwrap();
        assert!(!json.contains("k3j9x0a1b"));
        assert_eq!(raw.requires, vec!["Análisis I".to_string()]);
    }

    #[test]
    fn test_null_week_hours_dropped() {
        let raw: RawCourse = serde_json::from_str(
            r#"{"label":"Taller","tituloIntermedio":false,"cuatrimestre":3,"requires":[],"weekHours":null}"#,
        )
        .unwrap();

        assert!(raw.week_hours.is_none());
        assert!(!serde_json::to_string(&raw).unwrap().contains("weekHours"));
    }

    #[test]
    fn test_nan_week_hours_not_serialized() {
        let mut raw = RawCourse::new("Taller", Term::FullYear);
        raw.week_hours = Some(f64::NAN);

        assert!(!serde_json::to_string(&raw).unwrap().contains("weekHours"));
    }

    #[test]
    fn test_bad_term_rejected() {
        let result = serde_json::from_str::<RawCourse>(
            r#"{"label":"X","tituloIntermedio":false,"cuatrimestre":7,"requires":[]}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_category_from_flag_and_str() {
        assert_eq!(Category::from(true), Category::IntermediateDegree);
        assert_eq!(Category::from(false), Category::FullDegree);
        assert_eq!("intermedio".parse(), Ok(Category::IntermediateDegree));
        assert_eq!("full".parse(), Ok(Category::FullDegree));
        assert!("other".parse::<Category>().is_err());
    }

    #[test]
    fn test_from_raw_copies_fields() {
        let raw = RawCourse::new("Física I", Term::SecondHalf)
            .requiring("Análisis I")
            .intermediate();
        let course = Course::from_raw(&raw, "y1-m2".to_string(), "Primer año", Position::default());

        assert_eq!(course.id, "y1-m2");
        assert_eq!(course.year, "Primer año");
        assert_eq!(course.category, Category::IntermediateDegree);
        assert_eq!(course.background(), "rgb(241, 197, 152)");
        assert_eq!(course.requires, vec!["Análisis I".to_string()]);
        assert!(!course.done);
        assert!(!course.enabled);
    }
}
