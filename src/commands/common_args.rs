// commands/common_args.rs

//! # Common Command Arguments
//!
//! Argument constructors shared by the subcommands.

use std::path::PathBuf;

use clap::{value_parser, Arg, ArgAction, ArgMatches};

use crate::core::config::ContextSources;

// Positional arguments
/// Path of the template to process
pub fn template() -> Arg {
    Arg::new("template")
        .required(true)
        .value_parser(value_parser!(PathBuf))
        .help("Path to the template file (`.html` is appended when omitted)")
}

// Optional arguments
/// JSON or YAML file holding the render context
pub fn context_file() -> Arg {
    Arg::new("context")
        .short('c')
        .long("context")
        .value_parser(value_parser!(PathBuf))
        .help("JSON or YAML file with the render context")
}

/// File of KEY=VALUE variables merged into the context
pub fn env_file() -> Arg {
    Arg::new("env-file")
        .long("env-file")
        .value_parser(value_parser!(PathBuf))
        .help("Variables file merged into the context [default: .env]")
}

/// Individual KEY=VALUE context overrides
pub fn env_var() -> Arg {
    Arg::new("env")
        .short('e')
        .long("env")
        .help("Set a context variable (format: KEY=VALUE)")
        .action(ArgAction::Append)
}

/// Destination file for rendered output
pub fn output() -> Arg {
    Arg::new("output")
        .short('o')
        .long("output")
        .value_parser(value_parser!(PathBuf))
        .help("Write the rendered output to a file instead of stdout")
}

/// Owned values of the context-related arguments.
#[derive(Debug, Default)]
pub struct ContextArgs {
    pub context_file: Option<PathBuf>,
    pub env_file: Option<PathBuf>,
    pub overrides: Vec<String>,
}

impl ContextArgs {
    pub fn from_matches(matches: &ArgMatches) -> Self {
        Self {
            context_file: matches.get_one::<PathBuf>("context").cloned(),
            env_file: matches.get_one::<PathBuf>("env-file").cloned(),
            overrides: matches
                .get_many::<String>("env")
                .map(|values| values.cloned().collect())
                .unwrap_or_default(),
        }
    }

    pub fn sources(&self) -> ContextSources<'_> {
        ContextSources {
            context_file: self.context_file.as_deref(),
            env_file: self.env_file.as_deref(),
            overrides: &self.overrides,
        }
    }
}
