//! Config command handler

use super::fail;
use crate::args::ConfigSubcommand;
use correlativas::config::Config;
use std::io::{self, Write};

/// Dispatch config subcommands
///
/// `config` carries this run's CLI overrides and is only displayed; `set`
/// and `unset` edit the stored file so overrides never leak into it.
pub fn run(subcommand: Option<ConfigSubcommand>, config: &Config, defaults: &Config) {
    match subcommand {
        None => handle_config_get(config, None),
        Some(ConfigSubcommand::Get { key }) => handle_config_get(config, key),
        Some(ConfigSubcommand::Set { key, value }) => handle_config_set(&key, &value),
        Some(ConfigSubcommand::Unset { key }) => handle_config_unset(defaults, &key),
        Some(ConfigSubcommand::Reset) => handle_config_reset(),
    }
}

/// Handle the config get subcommand
pub fn handle_config_get(config: &Config, key: Option<String>) {
    if let Some(k) = key {
        match config.get(&k) {
            Some(value) => println!("{value}"),
            None => fail(&format!("Unknown config key: '{k}'")),
        }
    } else {
        println!("\n=== Configuration ===\n");
        print!("{config}");
    }
}

/// Handle the config set subcommand
pub fn handle_config_set(key: &str, value: &str) {
    let mut stored = Config::load();
    if let Err(e) = stored.set(key, value) {
        fail(&e);
    }

    if let Err(e) = stored.save() {
        fail(&format!("Failed to save config: {e}"));
    }

    println!("✓ Set {key} = {value}");
}

/// Handle the config unset subcommand
pub fn handle_config_unset(defaults: &Config, key: &str) {
    let mut stored = Config::load();
    if let Err(e) = stored.unset(key, defaults) {
        fail(&e);
    }

    if let Err(e) = stored.save() {
        fail(&format!("Failed to save config: {e}"));
    }

    println!("✓ Reset {key} to default");
}

/// Handle the config reset subcommand
pub fn handle_config_reset() {
    if !Config::get_config_file_path().exists() {
        println!("✓ Config is already at defaults");
        return;
    }

    print!("Are you sure you want to reset config to defaults? (y/n): ");
    io::stdout().flush().ok();

    let mut response = String::new();
    io::stdin().read_line(&mut response).ok();

    if response.trim().eq_ignore_ascii_case("y") || response.trim().eq_ignore_ascii_case("yes") {
        if let Err(e) = Config::reset() {
            fail(&format!("Failed to remove config file: {e}"));
        }
        println!("✓ Config reset to defaults");
    } else {
        println!("✗ Reset cancelled");
    }
}
