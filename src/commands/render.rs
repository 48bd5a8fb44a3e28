// commands/render.rs

//! # Render Command Module
//!
//! Renders a template file with a context assembled from a context file,
//! a `.env` file and `-e` overrides.
//!
//! ## Example Usage
//! ```bash
//! ./mini-handlebars render templates/index.html --context data.yaml -e title=Home
//! ./mini-handlebars render templates/index -o public/index.html
//! ```

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use clap::{ArgMatches, Command};
use log::debug;

use mini_handlebars::TemplateEngine;

use crate::commands::common_args::{self, ContextArgs};
use crate::core::config::{build_context, resolve_template_path};
use crate::error::AppError;
use crate::print_success;

/// Defines the `render` command for the CLI application.
pub fn command() -> Command {
    Command::new("render")
        .about("Render a template with a context")
        .arg(common_args::template())
        .arg(common_args::context_file())
        .arg(common_args::env_file())
        .arg(common_args::env_var())
        .arg(common_args::output())
}

/// Executes the `render` command.
pub fn execute(matches: &ArgMatches) -> Result<(), AppError> {
    let template = matches
        .get_one::<PathBuf>("template")
        .map(|path| resolve_template_path(path))
        .unwrap_or_default();
    let output = matches.get_one::<PathBuf>("output");
    let context_args = ContextArgs::from_matches(matches);

    debug!("Template: {:?}", template);
    debug!("Context args: {:?}", context_args);

    let context = build_context(&context_args.sources())?;
    let rendered = TemplateEngine::new().render_file(&template, &context)?;

    match output {
        Some(path) => {
            fs::write(path, &rendered)?;
            print_success!("Rendered {:?} to {:?}", template, path);
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(rendered.as_bytes())?;
            stdout.flush()?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_to_output_file() {
        let dir = tempfile::tempdir().unwrap();
        let template = dir.path().join("page.html");
        fs::write(&template, "{{#each rows}}<td>{{v}}</td>{{/each}}{{title}}").unwrap();
        let context = dir.path().join("context.yaml");
        fs::write(&context, "rows:\n  - v: 1\n  - v: 2\n").unwrap();
        let out = dir.path().join("out.html");
        let env_file = dir.path().join("none.env");

        let matches = command()
            .try_get_matches_from([
                "render",
                dir.path().join("page").to_str().unwrap(),
                "--context",
                context.to_str().unwrap(),
                "--env-file",
                env_file.to_str().unwrap(),
                "-e",
                "title=T",
                "-o",
                out.to_str().unwrap(),
            ])
            .unwrap();

        execute(&matches).unwrap();
        assert_eq!(fs::read_to_string(&out).unwrap(), "<td>1</td><td>2</td>T");
    }

    #[test]
    fn test_missing_template_fails() {
        let dir = tempfile::tempdir().unwrap();
        let env_file = dir.path().join("none.env");
        let matches = command()
            .try_get_matches_from([
                "render",
                dir.path().join("absent.html").to_str().unwrap(),
                "--env-file",
                env_file.to_str().unwrap(),
            ])
            .unwrap();

        assert!(matches!(execute(&matches), Err(AppError::Template(_))));
    }
}
