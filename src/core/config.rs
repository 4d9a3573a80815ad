//! Configuration module for `correlativas`

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Default CLI configuration loaded based on build profile.
/// Uses release defaults in release mode, debug defaults in debug mode.
#[cfg(not(debug_assertions))]
const CONFIG_DEFAULTS: &str = include_str!("../assets/DefaultCLIConfigRelease.toml");

#[cfg(debug_assertions)]
const CONFIG_DEFAULTS: &str = include_str!("../assets/DefaultCLIConfigDebug.toml");

#[cfg(not(debug_assertions))]
const CONFIG_FILE_NAME: &str = "config.toml";

#[cfg(debug_assertions)]
const CONFIG_FILE_NAME: &str = "dconfig.toml";

/// Variable expanded to the config directory in path values
const DIR_VARIABLE: &str = "$CORRELATIVAS";

/// Logging configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug)
    #[serde(default)]
    pub level: String,
    /// Log file path
    #[serde(default)]
    pub file: String,
    /// Enable verbose output
    #[serde(default)]
    pub verbose: bool,
}

/// Paths configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PathsConfig {
    /// JSON file holding the plan library
    #[serde(default)]
    pub plans_file: String,
    /// JSON file holding completed courses per plan
    #[serde(default)]
    pub progress_file: String,
}

/// Plan selection
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlanConfig {
    /// Name of the plan commands act on when none is given
    #[serde(default)]
    pub selected: String,
}

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Logging settings
    pub logging: LoggingConfig,
    /// Path settings
    #[serde(default)]
    pub paths: PathsConfig,
    /// Plan settings
    #[serde(default)]
    pub plan: PlanConfig,
}

/// Optional CLI overrides for configuration values
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    /// Override logging level
    pub level: Option<String>,
    /// Override log file path
    pub file: Option<String>,
    /// Override verbose flag
    pub verbose: Option<bool>,
    /// Override plans file
    pub plans_file: Option<String>,
    /// Override progress file
    pub progress_file: Option<String>,
    /// Override selected plan
    pub plan: Option<String>,
}

impl Config {
    /// Get the `$CORRELATIVAS` directory path
    ///
    /// Returns:
    /// - Linux: `~/.config/correlativas`
    /// - macOS: `~/Library/Application Support/correlativas`
    /// - Windows: `%APPDATA%\correlativas`
    #[must_use]
    pub fn get_correlativas_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("correlativas")
    }

    /// Merge missing fields from defaults into this config
    ///
    /// Fields that are empty here and non-empty in `defaults` are filled in,
    /// so configs written by older versions pick up new settings.
    ///
    /// # Returns
    ///
    /// `true` if any fields were added/changed, `false` otherwise
    pub fn merge_defaults(&mut self, defaults: &Self) -> bool {
        let fields = [
            (&mut self.logging.level, &defaults.logging.level),
            (&mut self.logging.file, &defaults.logging.file),
            (&mut self.paths.plans_file, &defaults.paths.plans_file),
            (&mut self.paths.progress_file, &defaults.paths.progress_file),
            (&mut self.plan.selected, &defaults.plan.selected),
        ];

        let mut changed = false;
        for (value, default) in fields {
            if value.is_empty() && !default.is_empty() {
                value.clone_from(default);
                changed = true;
            }
        }
        changed
    }

    /// Apply CLI-provided overrides onto the loaded configuration
    ///
    /// Overrides last for this run only; the config file is not touched.
    /// Only non-`None` values replace config values.
    ///
    /// # Examples
    ///
    /// ```ignore
    /// let mut config = Config::load();
    /// let overrides = ConfigOverrides {
    ///     level: Some("debug".to_string()),
    ///     ..Default::default()
    /// };
    /// config.apply_overrides(&overrides);
    /// ```
    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(level) = &overrides.level {
            self.logging.level.clone_from(level);
        }
        if let Some(file) = &overrides.file {
            self.logging.file = Self::expand_variables(file);
        }
        if let Some(verbose) = overrides.verbose {
            self.logging.verbose = verbose;
        }

        if let Some(plans_file) = &overrides.plans_file {
            self.paths.plans_file = Self::expand_variables(plans_file);
        }
        if let Some(progress_file) = &overrides.progress_file {
            self.paths.progress_file = Self::expand_variables(progress_file);
        }

        if let Some(plan) = &overrides.plan {
            self.plan.selected.clone_from(plan);
        }
    }

    /// Get the user config file path
    ///
    /// `config.toml` for release builds, `dconfig.toml` for debug builds,
    /// inside [`get_correlativas_dir`](Self::get_correlativas_dir).
    #[must_use]
    pub fn get_config_file_path() -> PathBuf {
        Self::get_correlativas_dir().join(CONFIG_FILE_NAME)
    }

    /// Expand `$CORRELATIVAS` to the config directory
    #[must_use]
    fn expand_variables(value: &str) -> String {
        if value.contains(DIR_VARIABLE) {
            let dir = Self::get_correlativas_dir();
            value.replace(DIR_VARIABLE, dir.to_str().unwrap_or("."))
        } else {
            value.to_string()
        }
    }

    /// Initialize config from a TOML string
    ///
    /// `$CORRELATIVAS` is expanded in path values. Missing fields use their
    /// serde defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML cannot be parsed or doesn't match the expected schema
    ///
    /// # Examples
    ///
    /// ```ignore
    /// let config = Config::from_toml(r#"
    /// [logging]
    /// level = "info"
    /// file = "$CORRELATIVAS/correlativas.log"
    /// "#)?;
    /// ```
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        let mut config: Self = toml::from_str(toml_str)?;

        config.logging.file = Self::expand_variables(&config.logging.file);
        config.paths.plans_file = Self::expand_variables(&config.paths.plans_file);
        config.paths.progress_file = Self::expand_variables(&config.paths.progress_file);

        Ok(config)
    }

    /// Load configuration from embedded defaults
    ///
    /// The defaults differ between debug and release builds:
    /// - Debug: Uses `DefaultCLIConfigDebug.toml`
    /// - Release: Uses `DefaultCLIConfigRelease.toml`
    ///
    /// The embedded file is checked by the test suite; should it ever fail
    /// to parse, an empty config is returned.
    #[must_use]
    pub fn from_defaults() -> Self {
        Self::from_toml(CONFIG_DEFAULTS).unwrap_or_default()
    }

    /// Load configuration from file, or create from defaults if not found
    ///
    /// - If the config file exists: loads it, merges missing fields from
    ///   defaults, and saves it back when something was added
    /// - On first run: creates the config directory and writes the defaults
    ///
    /// Falls back to defaults if the file cannot be read or parsed.
    #[must_use]
    pub fn load() -> Self {
        Self::load_from(&Self::get_config_file_path())
    }

    /// [`load`](Self::load) against an explicit file
    #[must_use]
    pub fn load_from(config_file: &Path) -> Self {
        let defaults = Self::from_defaults();

        if config_file.exists() {
            if let Ok(content) = fs::read_to_string(config_file) {
                if let Ok(mut config) = Self::from_toml(&content) {
                    if config.merge_defaults(&defaults) {
                        let _ = config.save_to(config_file);
                    }
                    return config;
                }
            }
        } else {
            let _ = defaults.save_to(config_file);
            return defaults;
        }

        defaults
    }

    /// Save configuration to the platform config file
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be created or the file
    /// cannot be written.
    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        self.save_to(&Self::get_config_file_path())
    }

    /// [`save`](Self::save) to an explicit file
    ///
    /// # Errors
    /// Returns an error if the parent directory cannot be created or the file
    /// cannot be written.
    pub fn save_to(&self, config_file: &Path) -> Result<(), Box<dyn std::error::Error>> {
        if let Some(parent) = config_file.parent() {
            fs::create_dir_all(parent)?;
        }
        let toml_str = toml::to_string_pretty(self)?;
        fs::write(config_file, toml_str)?;
        Ok(())
    }

    /// Get a configuration value by key
    ///
    /// Supported keys:
    /// - `level`: Logging level ("debug", "info", "warn", "error")
    /// - `file`: Log file path
    /// - `verbose`: Verbose logging boolean
    /// - `plans_file`: Plan library JSON file
    /// - `progress_file`: Completed courses JSON file
    /// - `plan`: Selected plan name
    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "level" => Some(self.logging.level.clone()),
            "file" => Some(self.logging.file.clone()),
            "verbose" => Some(self.logging.verbose.to_string()),
            "plans_file" | "plans-file" => Some(self.paths.plans_file.clone()),
            "progress_file" | "progress-file" => Some(self.paths.progress_file.clone()),
            "plan" | "selected" => Some(self.plan.selected.clone()),
            _ => None,
        }
    }

    /// Set a configuration value by key
    ///
    /// Updates the in-memory config. Call [`save()`](Config::save) to persist changes.
    ///
    /// # Errors
    /// Returns an error if the key is not recognized or the value cannot be
    /// parsed (e.g., "maybe" for verbose).
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), String> {
        match key {
            "level" => {
                value
                    .parse::<crate::logger::Level>()
                    .map_err(|_| format!("Invalid log level: '{value}'"))?;
                self.logging.level = value.to_lowercase();
            }
            "file" => self.logging.file = Self::expand_variables(value),
            "verbose" => {
                self.logging.verbose = value
                    .parse::<bool>()
                    .map_err(|_| format!("Invalid boolean value for 'verbose': '{value}'"))?;
            }
            "plans_file" | "plans-file" => self.paths.plans_file = Self::expand_variables(value),
            "progress_file" | "progress-file" => {
                self.paths.progress_file = Self::expand_variables(value);
            }
            "plan" | "selected" => self.plan.selected = value.to_string(),
            _ => return Err(format!("Unknown config key: '{key}'")),
        }
        Ok(())
    }

    /// Unset a configuration value by key (reset to its default)
    ///
    /// Updates the in-memory config. Call [`save()`](Config::save) to persist changes.
    ///
    /// # Errors
    /// Returns an error if the key is not recognized.
    pub fn unset(&mut self, key: &str, defaults: &Self) -> Result<(), String> {
        match key {
            "level" => self.logging.level.clone_from(&defaults.logging.level),
            "file" => self.logging.file.clone_from(&defaults.logging.file),
            "verbose" => self.logging.verbose = defaults.logging.verbose,
            "plans_file" | "plans-file" => {
                self.paths.plans_file.clone_from(&defaults.paths.plans_file);
            }
            "progress_file" | "progress-file" => self
                .paths
                .progress_file
                .clone_from(&defaults.paths.progress_file),
            "plan" | "selected" => self.plan.selected.clone_from(&defaults.plan.selected),
            _ => return Err(format!("Unknown config key: '{key}'")),
        }
        Ok(())
    }

    /// Reset all configuration to defaults
    ///
    /// Deletes the configuration file so the next [`load()`](Config::load)
    /// recreates it. Succeeds if the file does not exist.
    ///
    /// # Errors
    /// Returns an error if the config file exists but cannot be deleted.
    pub fn reset() -> Result<(), std::io::Error> {
        let config_file = Self::get_config_file_path();
        if config_file.exists() {
            fs::remove_file(config_file)?;
        }
        Ok(())
    }

    /// Selected plan name, if one is configured
    #[must_use]
    pub fn selected_plan(&self) -> Option<&str> {
        Some(self.plan.selected.as_str()).filter(|name| !name.is_empty())
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[logging]")?;
        writeln!(f, "  level = \"{}\"", self.logging.level)?;
        writeln!(f, "  file = \"{}\"", self.logging.file)?;
        writeln!(f, "  verbose = {}", self.logging.verbose)?;

        writeln!(f, "\n[paths]")?;
        writeln!(f, "  plans_file = \"{}\"", self.paths.plans_file)?;
        writeln!(f, "  progress_file = \"{}\"", self.paths.progress_file)?;

        writeln!(f, "\n[plan]")?;
        writeln!(f, "  selected = \"{}\"", self.plan.selected)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_defaults_parse() {
        let config = Config::from_toml(CONFIG_DEFAULTS).unwrap();
        assert!(!config.logging.level.is_empty());
        assert!(config.paths.plans_file.ends_with("plans.json"));
        assert!(!config.paths.plans_file.contains(DIR_VARIABLE));
    }

    #[test]
    fn test_expand_variables() {
        let expanded = Config::expand_variables("$CORRELATIVAS/progress.json");
        assert!(expanded.ends_with("progress.json"));
        assert!(!expanded.contains(DIR_VARIABLE));
        assert_eq!(Config::expand_variables("/tmp/x.json"), "/tmp/x.json");
    }

    #[test]
    fn test_selected_plan_empty_is_none() {
        let mut config = Config::default();
        assert_eq!(config.selected_plan(), None);
        config.plan.selected = "Datos".to_string();
        assert_eq!(config.selected_plan(), Some("Datos"));
    }

    #[test]
    fn test_set_rejects_bad_level() {
        let mut config = Config::default();
        assert!(config.set("level", "loud").is_err());
        assert!(config.set("level", "DEBUG").is_ok());
        assert_eq!(config.logging.level, "debug");
    }
}
