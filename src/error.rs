// error.rs

//! # Error Handling Module
//!
//! Defines the `AppError` enum reported by the command-line front end. Template
//! rendering itself never fails; errors come from reading templates, loading
//! contexts and writing output.

use std::error::Error;
use std::fmt;
use std::path::PathBuf;

use mini_handlebars::template::{ContextError, TemplateError};

// ============================
// Application Error Definitions
// ============================

/// Represents errors that may occur within the application.
#[derive(Debug)]
pub enum AppError {
    /// The template file could not be read.
    Template(TemplateError),

    /// A context file could not be read or parsed.
    Context { path: PathBuf, source: ContextError },

    /// Wrapper for standard I/O errors (reading context files, writing output).
    IoError(std::io::Error),
}

// ============================
// Display Trait Implementation
// ============================

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Template(err) => write!(f, "{}", err),
            Self::Context { path, source } => {
                write!(f, "Failed to load context from {:?}: {}", path, source)
            }
            Self::IoError(err) => write!(f, "IO error: {}", err),
        }
    }
}

// ============================
// Error Trait Implementation
// ============================

impl Error for AppError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Template(err) => Some(err),
            Self::Context { source, .. } => Some(source),
            Self::IoError(err) => Some(err),
        }
    }
}

// ============================
// Conversions
// ============================

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::IoError(error)
    }
}

impl From<TemplateError> for AppError {
    fn from(error: TemplateError) -> Self {
        Self::Template(error)
    }
}
