// commands/inspect.rs

//! # Inspect Command Module
//!
//! Lists the directives extracted from a template, in source order, and
//! reports block tags that will not pair up when rendering.
//!
//! ## Example Usage
//! ```bash
//! ./mini-handlebars inspect templates/index.html
//! ```

use std::fs;
use std::path::PathBuf;

use clap::{ArgMatches, Command};

use mini_handlebars::template::lexer::{extract_directives, tokenize, DirectiveKind};
use mini_handlebars::template::parser::{parse, Node};
use mini_handlebars::TemplateError;

use crate::commands::common_args;
use crate::core::config::resolve_template_path;
use crate::error::AppError;
use crate::{print_error, print_info, print_success};

/// Defines the `inspect` command for the CLI application.
pub fn command() -> Command {
    Command::new("inspect")
        .about("List the directives found in a template")
        .arg(common_args::template())
}

/// Executes the `inspect` command.
pub fn execute(matches: &ArgMatches) -> Result<(), AppError> {
    let path = matches
        .get_one::<PathBuf>("template")
        .map(|path| resolve_template_path(path))
        .unwrap_or_default();

    let source = fs::read_to_string(&path).map_err(|source| TemplateError::Read {
        path: path.clone(),
        source,
    })?;

    for (index, directive) in extract_directives(&source).iter().enumerate() {
        println!(
            "{:>4}  {:<10}  {:<16}  {}",
            index, directive.kind, directive.name, directive.raw
        );
    }

    let problems = unpaired_tags(&parse(&tokenize(&source)));
    if problems.is_empty() {
        print_success!("All block tags are paired");
    } else {
        print_info!("{} block tag(s) will be left unresolved:", problems.len());
        for raw in problems {
            print_error!("  {}", raw);
        }
    }

    Ok(())
}

/// Raw text of every opening without a closer and every closer without an
/// opening, in source order.
pub fn unpaired_tags(nodes: &[Node]) -> Vec<String> {
    nodes
        .iter()
        .filter_map(|node| match node {
            Node::Unmatched(directive) => Some(directive.raw.clone()),
            Node::Variable(directive)
                if matches!(directive.kind, DirectiveKind::IfClose | DirectiveKind::EachClose) =>
            {
                Some(directive.raw.clone())
            }
            _ => None,
        })
        .collect()
}
