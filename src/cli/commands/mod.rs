//! CLI command handlers for `correlativas`.
//!
//! Each command is implemented in its own submodule. Handlers print `✓`/`✗`
//! lines and exit with status 1 on failure.

pub mod config;
pub mod graph;
pub mod plans;
pub mod progress;

use correlativas::config::Config;
use correlativas::core::graph::CurriculumGraph;
use correlativas::core::models::Course;
use correlativas::{error, verbose};
use correlativas::{JsonFileStore, Planner};

/// Planner backed by the plans and progress files named in the config
pub type FilePlanner = Planner<JsonFileStore, JsonFileStore>;

/// Print `✗ message` to stderr and exit with status 1
pub fn fail(message: &str) -> ! {
    eprintln!("✗ {message}");
    std::process::exit(1);
}

/// Open the planner from the configured files, exiting on failure
pub fn open_planner(config: &Config) -> FilePlanner {
    let plans = JsonFileStore::new(&config.paths.plans_file);
    let progress = JsonFileStore::new(&config.paths.progress_file);
    verbose!("Plans file: {}", plans.path().display());
    verbose!("Progress file: {}", progress.path().display());
    Planner::open(plans, progress).unwrap_or_else(|e| {
        error!("Failed to open planner: {e}");
        fail(&format!("Failed to load plans or progress: {e}"))
    })
}

/// Build the graph of the selected plan, exiting on failure
pub fn selected_graph(planner: &FilePlanner, config: &Config) -> CurriculumGraph {
    planner
        .selected_graph(config.selected_plan())
        .unwrap_or_else(|e| fail(&e.to_string()))
}

/// One course as a status line: `[x] y1-m1  Label  (term)  state`
pub fn course_line(course: &Course) -> String {
    let mark = if course.done { "x" } else { " " };
    let state = if course.done {
        "done"
    } else if course.enabled {
        "available"
    } else {
        "locked"
    };
    format!(
        "[{mark}] {:<7} {}  ({})  {state}",
        course.id, course.label, course.term
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use correlativas::core::models::{Position, RawCourse, Term};

    #[test]
    fn test_course_line() {
        let raw = RawCourse::new("Álgebra I", Term::SecondHalf);
        let mut course = Course::from_raw(&raw, "y1-m2".to_string(), "Primer año", Position::default());
        assert_eq!(
            course_line(&course),
            "[ ] y1-m2   Álgebra I  (2º cuatrimestre)  locked"
        );

        course.done = true;
        assert!(course_line(&course).starts_with("[x] y1-m2"));
        assert!(course_line(&course).ends_with("done"));
    }
}
