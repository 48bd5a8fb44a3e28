// core/env.rs

//! # Environment Variable Handling
//!
//! Loads string variables from a `.env` file and `-e KEY=VALUE` overrides.

use std::collections::HashMap;
use std::path::Path;

use log::debug;

/// Load variables from a `.env` file and apply CLI overrides.
///
/// A missing file is not an error; an unparseable one is logged and skipped.
///
/// # Arguments
/// * `env_file` - Path to the `.env` file (relative to cwd)
/// * `overrides` - Additional `KEY=VALUE` pairs from `-e` CLI flags
pub fn load_env_vars(env_file: &Path, overrides: &[String]) -> HashMap<String, String> {
    let mut env_vars = HashMap::new();

    if env_file.exists() {
        debug!("Loading variables from: {:?}", env_file);
        match dotenvy::from_path_iter(env_file) {
            Ok(iter) => {
                for (key, value) in iter.flatten() {
                    debug!("  Loaded variable: {}", key);
                    env_vars.insert(key, value);
                }
            }
            Err(e) => {
                debug!("Warning: could not load env file {:?}: {}", env_file, e);
            }
        }
    } else {
        debug!("No env file found at: {:?}", env_file);
    }

    for override_str in overrides {
        match parse_env_var(override_str) {
            Some((key, value)) => {
                debug!("  Override variable: {}", key);
                env_vars.insert(key, value);
            }
            None => debug!("Ignoring malformed override {:?}, expected KEY=VALUE", override_str),
        }
    }

    env_vars
}

/// Parse a single `KEY=VALUE` string. The value may itself contain `=`.
pub fn parse_env_var(s: &str) -> Option<(String, String)> {
    let (key, value) = s.split_once('=')?;
    let key = key.trim();
    if key.is_empty() {
        return None;
    }
    Some((key.to_string(), value.to_string()))
}
