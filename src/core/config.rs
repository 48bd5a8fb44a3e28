// core/config.rs

//! # Configuration Module
//!
//! Loads context files and assembles the full render context. Sources are
//! applied in order, later ones overriding earlier ones:
//! 1. the JSON or YAML context file (`--context`),
//! 2. the `.env` file (`--env-file`),
//! 3. `-e KEY=VALUE` overrides.

use std::fs;
use std::path::{Path, PathBuf};

use log::debug;

use mini_handlebars::template::{Context, ContextError, FILE_EXTENSION};

use crate::core::env::load_env_vars;
use crate::error::AppError;

/// Format of a context file, chosen by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextFormat {
    Json,
    Yaml,
}

impl ContextFormat {
    /// `.json` is parsed as JSON; everything else as YAML, which also accepts
    /// most JSON documents.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => ContextFormat::Json,
            _ => ContextFormat::Yaml,
        }
    }
}

/// Reads and parses a context file.
pub fn load_context_file(path: &Path) -> Result<Context, AppError> {
    let source = fs::read_to_string(path)?;
    let format = ContextFormat::from_path(path);
    debug!("Loading {:?} context from {:?}", format, path);

    let parsed: Result<Context, ContextError> = match format {
        ContextFormat::Json => Context::from_json_str(&source),
        ContextFormat::Yaml => Context::from_yaml_str(&source),
    };

    parsed.map_err(|source| AppError::Context {
        path: path.to_path_buf(),
        source,
    })
}

/// Sources a render context is assembled from.
#[derive(Debug, Default)]
pub struct ContextSources<'a> {
    pub context_file: Option<&'a Path>,
    pub env_file: Option<&'a Path>,
    pub overrides: &'a [String],
}

/// Builds the full render context from all configured sources.
pub fn build_context(sources: &ContextSources<'_>) -> Result<Context, AppError> {
    let mut context = match sources.context_file {
        Some(path) => load_context_file(path)?,
        None => Context::new(),
    };

    let env_file = sources
        .env_file
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(crate::app::DEFAULT_ENV_FILE));
    let variables = load_env_vars(&env_file, sources.overrides);
    context.merge(&Context::from(variables));

    debug!("Render context has {} variables", context.len());
    Ok(context)
}

/// Resolves a template argument to a file path.
///
/// A path without an extension that does not exist gets the engine's default
/// template extension appended when that file exists.
pub fn resolve_template_path(path: &Path) -> PathBuf {
    if path.exists() || path.extension().is_some() {
        return path.to_path_buf();
    }

    let with_extension = path.with_extension(FILE_EXTENSION);
    if with_extension.exists() {
        debug!("Using template {:?}", with_extension);
        with_extension
    } else {
        path.to_path_buf()
    }
}
