// app.rs

//! # Application Constants
//!
//! Names, defaults and accepted values shared by the CLI definition.

pub const APP_NAME: &str = "mini-handlebars";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
pub const APP_AUTHOR: &str = "mini-handlebars contributors";
pub const APP_DESCRIPTION: &str =
    "Render templates with {{variables}}, {{#if}} conditionals and {{#each}} loops";

pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const LOG_LEVELS: &[&str] = &["error", "warn", "info", "debug", "trace"];

/// Variables file loaded by default when `--env-file` is not given.
pub const DEFAULT_ENV_FILE: &str = ".env";
