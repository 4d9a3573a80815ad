//! Command-line interface entry point for `correlativas`

mod args;
mod commands;

use args::{Cli, Command};
use clap::Parser;
use correlativas::config::Config;
use correlativas::info;
use correlativas::logger::{enable_debug, enable_verbose, init_file_logging, set_level, Level};

fn main() {
    let args = Cli::parse();

    // Load configuration once at startup and apply CLI overrides to it
    let mut config = Config::load();
    let defaults = Config::from_defaults();
    config.apply_overrides(&args.to_config_overrides());

    // CLI flag overrides config; otherwise use config logging.level; fallback warn
    let effective_level = args
        .log_level
        .map(std::convert::Into::into)
        .or_else(|| config.logging.level.parse::<Level>().ok())
        .unwrap_or(Level::Warn);

    let mut level = effective_level;
    if args.debug_flag || level == Level::Debug {
        level = Level::Debug;
        enable_debug();
    }

    let verbose = args.verbose || config.logging.verbose;
    if verbose {
        enable_verbose();
    }
    set_level(level);

    // CLI flag wins, otherwise use config logging.file if set
    let config_log_path: Option<std::path::PathBuf> = if config.logging.file.is_empty() {
        None
    } else {
        Some(std::path::PathBuf::from(&config.logging.file))
    };

    if let Some(log_path) = args.log_file.as_ref().or(config_log_path.as_ref()) {
        let display_path = log_path.to_string_lossy();
        if init_file_logging(log_path) {
            if verbose {
                eprintln!("✓ File logging initialized at: {display_path}");
            } else {
                info!("File logging initialized at: {display_path}");
            }
        } else {
            eprintln!("✗ Failed to initialize file logging at: {display_path}");
        }
    }

    match args.command {
        Command::Config { subcommand } => {
            commands::config::run(subcommand, &config, &defaults);
        }
        Command::Plans { subcommand } => commands::plans::run(subcommand, &config),
        Command::Graph { json } => commands::graph::run_graph(&config, json),
        Command::Path { course } => commands::graph::run_path(&config, &course),
        Command::Year { label } => commands::graph::run_year(&config, &label),
        Command::Category { category } => {
            commands::graph::run_category(&config, category.into());
        }
        Command::Rank { limit } => commands::graph::run_rank(&config, limit),
        Command::Validate => commands::graph::run_validate(&config),
        Command::Check { course } => commands::progress::run(&config, &course, true),
        Command::Uncheck { course } => commands::progress::run(&config, &course, false),
    }
}
