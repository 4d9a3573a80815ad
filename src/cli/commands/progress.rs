//! Check/uncheck command handler

use super::{fail, open_planner, selected_graph};
use correlativas::config::Config;
use correlativas::core::graph::CurriculumGraph;

/// Mark a course of the selected plan done or not done and save progress
pub fn run(config: &Config, course: &str, done: bool) {
    let mut planner = open_planner(config);
    let before = selected_graph(&planner, config);
    let course = before
        .find_course(course)
        .unwrap_or_else(|e| fail(&e.to_string()))
        .clone();

    if course.done == done {
        let state = if done { "done" } else { "not done" };
        println!("✓ {} ({}) is already {state}", course.label, course.id);
        return;
    }

    let name = before.name().to_string();
    if let Err(e) = planner.on_course_done_changed(&name, &course.id, done) {
        fail(&e.to_string());
    }
    let after = planner
        .graph(&name)
        .unwrap_or_else(|e| fail(&e.to_string()));

    let verb = if done { "Checked" } else { "Unchecked" };
    println!("✓ {verb} {} ({})", course.label, course.id);

    let (unlocked, locked) = enabled_changes(&before, &after);
    for label in unlocked {
        println!("  now available: {label}");
    }
    for label in locked {
        println!("  now locked: {label}");
    }
}

/// Labels of not-done courses whose availability changed between two snapshots
fn enabled_changes<'a>(
    before: &CurriculumGraph,
    after: &'a CurriculumGraph,
) -> (Vec<&'a str>, Vec<&'a str>) {
    let mut unlocked = Vec::new();
    let mut locked = Vec::new();
    for course in after.courses().iter().filter(|c| !c.done) {
        match before.course(&course.id).map(|c| c.enabled) {
            Some(false) if course.enabled => unlocked.push(course.label.as_str()),
            Some(true) if !course.enabled => locked.push(course.label.as_str()),
            _ => {}
        }
    }
    (unlocked, locked)
}
