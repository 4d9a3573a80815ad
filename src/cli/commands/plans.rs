//! Plans command handler

use super::{fail, open_planner};
use crate::args::PlansSubcommand;
use correlativas::config::Config;
use correlativas::core::library::Upsert;
use correlativas::error;
use std::fs;
use std::io::{self, Write};
use std::path::Path;

/// Dispatch plans subcommands
pub fn run(subcommand: Option<PlansSubcommand>, config: &Config) {
    match subcommand {
        None | Some(PlansSubcommand::List) => handle_list(config),
        Some(PlansSubcommand::Show { name }) => handle_show(config, name.as_deref()),
        Some(PlansSubcommand::Export { name, output }) => {
            handle_export(config, name.as_deref(), output.as_deref());
        }
        Some(PlansSubcommand::Import { file }) => handle_import(config, &file),
        Some(PlansSubcommand::Reset) => handle_reset(config),
    }
}

/// List plan names, marking the selected one
pub fn handle_list(config: &Config) {
    let planner = open_planner(config);
    let selected = planner
        .select_or_first(config.selected_plan())
        .map(|c| c.name.clone())
        .ok();

    println!("\n=== Plans ===\n");
    for plan in planner.library().plans() {
        let marker = if selected.as_deref() == Some(plan.name.as_str()) {
            "*"
        } else {
            " "
        };
        let done = planner.completed().for_curriculum(&plan.name).len();
        println!(
            "{marker} {} ({} years, {} courses, {done} done)",
            plan.name,
            plan.plan.len(),
            plan.course_count()
        );
    }
}

/// Print the years and courses of a plan as written
pub fn handle_show(config: &Config, name: Option<&str>) {
    let planner = open_planner(config);
    let curriculum = planner
        .select_or_first(name.or_else(|| config.selected_plan()))
        .unwrap_or_else(|e| fail(&e.to_string()));

    println!("\n=== {} ===", curriculum.name);
    for (year, courses) in &curriculum.plan {
        println!("\n{year}");
        for course in courses {
            let requires = if course.requires.is_empty() {
                String::new()
            } else {
                format!("  ← {}", course.requires.join(", "))
            };
            println!("  - {} ({}){requires}", course.label, course.term);
        }
    }
}

/// Export a plan to stdout or to a file
pub fn handle_export(config: &Config, name: Option<&str>, output: Option<&Path>) {
    let planner = open_planner(config);
    let name = match name.or_else(|| config.selected_plan()) {
        Some(name) => name.to_string(),
        None => planner
            .select_or_first(None)
            .map(|c| c.name.clone())
            .unwrap_or_else(|e| fail(&e.to_string())),
    };
    let json = planner
        .export_json(&name)
        .unwrap_or_else(|e| fail(&e.to_string()));

    match output {
        None => println!("{json}"),
        Some(path) => {
            if let Err(e) = fs::write(path, json) {
                error!("Failed to write {}: {e}", path.display());
                fail(&format!("Failed to write {}: {e}", path.display()));
            }
            println!("✓ Exported '{name}' to {}", path.display());
        }
    }
}

/// Import a plan file into the library
pub fn handle_import(config: &Config, file: &Path) {
    let json = fs::read_to_string(file)
        .unwrap_or_else(|e| fail(&format!("Failed to read {}: {e}", file.display())));

    let mut planner = open_planner(config);
    match planner.import_json(&json) {
        Ok(Upsert::Added) => println!("✓ Imported plan from {}", file.display()),
        Ok(Upsert::Replaced) => println!("✓ Replaced plan with {}", file.display()),
        Err(e) => fail(&e.to_string()),
    }
}

/// Replace the library with the bundled plans after confirmation
pub fn handle_reset(config: &Config) {
    print!("Replace all plans with the bundled defaults? Imported plans are lost. (y/n): ");
    io::stdout().flush().ok();

    let mut response = String::new();
    io::stdin().read_line(&mut response).ok();

    if response.trim().eq_ignore_ascii_case("y") || response.trim().eq_ignore_ascii_case("yes") {
        let mut planner = open_planner(config);
        if let Err(e) = planner.reset_plans() {
            fail(&e.to_string());
        }
        println!("✓ Plans reset to defaults");
    } else {
        println!("✗ Reset cancelled");
    }
}
