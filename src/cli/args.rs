//! CLI argument definitions for `correlativas`

use clap::{builder::BoolishValueParser, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use correlativas::config::ConfigOverrides;
use correlativas::core::models::Category;
use correlativas::logger::Level;

/// CLI log level argument
///
/// Represents log levels that can be passed via CLI arguments. Converts to lowercase
/// strings for config storage and to `logger::Level` for runtime use.
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum LogLevelArg {
    /// Error-level logging
    Error,
    /// Warning-level logging
    Warn,
    /// Info-level logging
    Info,
    /// Debug-level logging
    Debug,
}

impl From<LogLevelArg> for Level {
    fn from(arg: LogLevelArg) -> Self {
        match arg {
            LogLevelArg::Error => Self::Error,
            LogLevelArg::Warn => Self::Warn,
            LogLevelArg::Info => Self::Info,
            LogLevelArg::Debug => Self::Debug,
        }
    }
}

impl std::fmt::Display for LogLevelArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", Level::from(*self))
    }
}

/// Degree track selectable on the command line
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum CategoryArg {
    /// Courses of the intermediate degree
    Intermediate,
    /// Courses only required for the full degree
    Full,
}

impl From<CategoryArg> for Category {
    fn from(arg: CategoryArg) -> Self {
        match arg {
            CategoryArg::Intermediate => Self::IntermediateDegree,
            CategoryArg::Full => Self::FullDegree,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum ConfigSubcommand {
    /// Display configuration values.
    ///
    /// If a KEY is provided, displays only that configuration value.
    /// If no KEY is provided, displays all configuration values.
    Get {
        /// Optional configuration key to display (e.g., `level`, `plans_file`, `plan`)
        #[arg(value_name = "KEY")]
        key: Option<String>,
    },
    /// Set a configuration value.
    Set {
        /// Configuration key to set
        #[arg(value_name = "KEY")]
        key: String,
        /// Value to set
        #[arg(value_name = "VALUE")]
        value: String,
    },
    /// Unset a configuration value.
    Unset {
        /// Configuration key to unset
        #[arg(value_name = "KEY")]
        key: String,
    },
    /// Reset configuration to defaults (requires confirmation).
    Reset,
}

#[derive(Debug, Subcommand)]
pub enum PlansSubcommand {
    /// List the plans in the library.
    List,
    /// Show the years and courses of a plan.
    Show {
        /// Plan name (defaults to the selected plan)
        #[arg(value_name = "NAME")]
        name: Option<String>,
    },
    /// Export a plan as JSON.
    Export {
        /// Plan name (defaults to the selected plan)
        #[arg(value_name = "NAME")]
        name: Option<String>,

        /// Write to a file instead of stdout
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
    /// Import a plan from a JSON file, replacing a plan with the same name.
    Import {
        /// Path to the exported plan
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
    /// Replace the library with the bundled plans (requires confirmation).
    Reset,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage configuration.
    ///
    /// If no subcommand is provided, displays all configuration values.
    Config {
        #[command(subcommand)]
        subcommand: Option<ConfigSubcommand>,
    },
    /// Manage the plan library.
    ///
    /// If no subcommand is provided, lists the plans.
    Plans {
        #[command(subcommand)]
        subcommand: Option<PlansSubcommand>,
    },
    /// Print every course with its state and the prerequisite edges.
    Graph {
        /// Print render nodes and edges as JSON instead
        #[arg(long)]
        json: bool,
    },
    /// Print everything connected to a course.
    Path {
        /// Course id (e.g. `y2-m1`) or label
        #[arg(value_name = "COURSE")]
        course: String,
    },
    /// Print the courses of one year.
    Year {
        /// Year label as written in the plan
        #[arg(value_name = "LABEL")]
        label: String,
    },
    /// Print the courses of a degree track plus their prerequisites.
    Category {
        /// Degree track
        #[arg(value_enum, value_name = "CATEGORY")]
        category: CategoryArg,
    },
    /// Print the courses connected to the most other courses.
    Rank {
        /// Number of courses to print
        #[arg(short, long, default_value_t = 10)]
        limit: usize,
    },
    /// Mark a course as done.
    Check {
        /// Course id or label
        #[arg(value_name = "COURSE")]
        course: String,
    },
    /// Mark a course as not done.
    Uncheck {
        /// Course id or label
        #[arg(value_name = "COURSE")]
        course: String,
    },
    /// Report dangling references, duplicate labels, and prerequisite cycles.
    Validate,
}

#[derive(Parser, Debug)]
#[command(
    name = "correlativas",
    about = "Track progress through a curriculum and its prerequisite graph",
    version = env!("CARGO_PKG_VERSION")
)]
pub struct Cli {
    /// Set the runtime log level (error|warn|info|debug). Falls back to config if omitted.
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevelArg>,

    /// Enable verbose output (runtime only)
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,

    /// Enable debug-level logging and runtime debug flag (shorthand)
    #[arg(long = "debug")]
    pub debug_flag: bool,

    /// Write runtime logs to a file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Plan to act on (overrides the selected plan for this run)
    #[arg(short, long, value_name = "NAME", global = true)]
    pub plan: Option<String>,

    // --- Config overrides ---
    /// Override config logging level (stored in config file)
    #[arg(long = "config-level", value_enum)]
    pub config_level: Option<LogLevelArg>,

    /// Override config log file path
    #[arg(long = "config-log-file", value_name = "PATH")]
    pub config_log_file: Option<PathBuf>,

    /// Override config verbose flag (true/false)
    #[arg(long = "config-verbose", value_parser = BoolishValueParser::new())]
    pub config_verbose: Option<bool>,

    /// Override the plans file
    #[arg(long = "plans-file", value_name = "PATH")]
    pub plans_file: Option<PathBuf>,

    /// Override the progress file
    #[arg(long = "progress-file", value_name = "PATH")]
    pub progress_file: Option<PathBuf>,

    /// Subcommand to execute.
    /// A subcommand is required to run the CLI.
    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Convert CLI flags into config overrides
    ///
    /// `None` means the config value is kept.
    pub fn to_config_overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            level: self.config_level.map(|lvl| lvl.to_string()),
            file: self
                .config_log_file
                .as_ref()
                .map(|p| p.to_string_lossy().to_string()),
            verbose: self.config_verbose,
            plans_file: self
                .plans_file
                .as_ref()
                .map(|p| p.to_string_lossy().to_string()),
            progress_file: self
                .progress_file
                .as_ref()
                .map(|p| p.to_string_lossy().to_string()),
            plan: self.plan.clone(),
        }
    }
}
