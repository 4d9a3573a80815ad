//! Read-only graph commands: graph, path, year, category, rank, validate

use super::{course_line, fail, open_planner, selected_graph};
use correlativas::config::Config;
use correlativas::core::graph::CurriculumGraph;
use correlativas::core::models::{Category, Course, Edge, Node};
use correlativas::core::validate::{validate, IssueKind};
use correlativas::warn;
use serde::Serialize;

/// Render payload printed by `graph --json`
#[derive(Serialize)]
struct GraphDocument<'a> {
    name: &'a str,
    nodes: Vec<Node>,
    edges: &'a [Edge],
}

/// Print the selected plan: courses grouped by year, then edges
pub fn run_graph(config: &Config, json: bool) {
    let planner = open_planner(config);
    let graph = selected_graph(&planner, config);

    if json {
        let document = GraphDocument {
            name: graph.name(),
            nodes: graph.nodes(),
            edges: graph.edges(),
        };
        match serde_json::to_string_pretty(&document) {
            Ok(out) => println!("{out}"),
            Err(e) => fail(&format!("Failed to serialize graph: {e}")),
        }
        return;
    }

    println!("\n=== {} ===", graph.name());
    for year in graph.years() {
        println!("\n{} ({} courses)", year.label, year.course_count());
        for course in graph.filter_by_year(&year.label) {
            println!("  {}", course_line(course));
        }
    }

    println!("\nEdges ({}):", graph.edges().len());
    for edge in graph.edges() {
        println!("  {} → {}", edge.source, edge.target);
    }
}

/// Print the full path of one course
pub fn run_path(config: &Config, course: &str) {
    let planner = open_planner(config);
    let graph = selected_graph(&planner, config);
    let course = graph
        .find_course(course)
        .unwrap_or_else(|e| fail(&e.to_string()));

    let prerequisites = graph.backward_reachable(&course.id);
    let dependents = graph.forward_reachable(&course.id);
    if prerequisites.cycle_detected || dependents.cycle_detected {
        warn!("Path of '{}' crosses a prerequisite cycle", course.id);
    }

    println!("\n=== {} ===", course_line(course));
    match graph.correlativa_hint(&course.id) {
        Ok(hint) => println!("{hint}"),
        Err(e) => fail(&e.to_string()),
    }

    print_section(&graph, "Requires", &prerequisites.ids);
    print_section(&graph, "Required by", &dependents.ids);
}

fn print_section(graph: &CurriculumGraph, title: &str, ids: &[String]) {
    println!("\n{title} ({}):", ids.len());
    for course in ids.iter().filter_map(|id| graph.course(id)) {
        println!("  {}", course_line(course));
    }
}

/// Print the courses of one year
pub fn run_year(config: &Config, label: &str) {
    let planner = open_planner(config);
    let graph = selected_graph(&planner, config);
    let view = graph
        .year_view(label)
        .unwrap_or_else(|e| fail(&e.to_string()));

    for node in &view {
        match node {
            Node::Year(year) => println!("\n=== {} ===", year.label),
            Node::Course(course) => println!("  {}", course_line(course)),
        }
    }
}

/// Print the courses of a category together with their prerequisites
pub fn run_category(config: &Config, category: Category) {
    let planner = open_planner(config);
    let graph = selected_graph(&planner, config);
    let courses = graph.filter_by_category(category);

    println!("\n=== {category} ({} courses) ===", courses.len());
    for course in &courses {
        let marker = if course.category == category { " " } else { "+" };
        println!("{marker} {}", course_line(course));
    }
    if courses.iter().any(|c| c.category != category) {
        println!("\n+ prerequisite from another category");
    }
}

/// Check the selected plan and report every issue
pub fn run_validate(config: &Config) {
    let planner = open_planner(config);
    let graph = selected_graph(&planner, config);

    match validate(&graph) {
        Ok(()) => println!("✓ {} is consistent ({} courses)", graph.name(), graph.courses().len()),
        Err(issues) => {
            for issue in &issues {
                let tag = match issue.kind {
                    IssueKind::UnresolvedReference => "unresolved",
                    IssueKind::SelfReference => "self",
                    IssueKind::DuplicateLabel => "duplicate",
                    IssueKind::Cycle => "cycle",
                };
                eprintln!("✗ [{tag}] {issue}");
            }
            let cycles = issues
                .iter()
                .filter(|i| matches!(i.kind, IssueKind::Cycle | IssueKind::SelfReference))
                .count();
            if cycles > 0 {
                std::process::exit(1);
            }
            println!("{} warning(s) in {}", issues.len(), graph.name());
        }
    }
}

/// Print the most connected courses of the selected plan
pub fn run_rank(config: &Config, limit: usize) {
    let planner = open_planner(config);
    let graph = selected_graph(&planner, config);

    println!("\n=== {}: most connected courses ===", graph.name());
    for (position, (course, count)) in most_connected(&graph, limit).into_iter().enumerate() {
        println!("{:>3}. {:<3} {}", position + 1, count, course_line(course));
    }
}

fn most_connected(graph: &CurriculumGraph, limit: usize) -> Vec<(&Course, usize)> {
    graph
        .ranking()
        .into_iter()
        .take(limit)
        .filter_map(|(id, count)| graph.course(&id).map(|c| (c, count)))
        .collect()
}
