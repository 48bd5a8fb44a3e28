// template/mod.rs

//! # Template Module
//!
//! The directive-resolution engine: a lexer that extracts `{{ ... }}` tags,
//! a block matcher that pairs `#if`/`#each` openings with their closers, a
//! parser that lays out the node arena and the engine that walks it.
//!
//! ```
//! use mini_handlebars::template::{render, Context};
//!
//! let context = Context::new().with("visible", true).with("a", "hi");
//! let html = render("{{#if visible}}<p>{{a}}</p>{{/if}}", &context);
//! assert_eq!(html, "<p>hi</p>");
//! ```

pub mod context;
pub mod engine;
pub mod lexer;
pub mod matcher;
pub mod parser;

use std::path::PathBuf;

pub use context::{Collection, Context, ContextError};
pub use engine::{render, RenderOptions, TemplateEngine};

/// Extension of template files handled by the engine.
pub const FILE_EXTENSION: &str = "html";

/// Errors surfaced by the file adapter. Rendering a string never fails.
#[derive(thiserror::Error, Debug)]
pub enum TemplateError {
    #[error("Failed to read template {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Type alias for template operation results
pub type TemplateResult<T> = std::result::Result<T, TemplateError>;
