// main.rs

//! # mini-handlebars - Main Entry Point
//!
//! Command-line front end for the template engine.
//!
//! ## Global Arguments
//!
//! - `--log-level` - The logging level (default: `info`). Possible values: `error`, `warn`, `info`, `debug`, `trace`.
//!
//! ## Example Usage
//! ```bash
//! ./mini-handlebars render page.html --context data.json
//! ./mini-handlebars --log-level debug inspect page.html
//! ```

mod app;
mod commands;
mod core;
mod error;
mod utils;

use std::process;

use clap::{Arg, ArgAction, Command};
use log::debug;

use crate::app::{APP_AUTHOR, APP_DESCRIPTION, APP_NAME, APP_VERSION, DEFAULT_LOG_LEVEL, LOG_LEVELS};
use crate::utils::logging::initialize_logger;

fn cli() -> Command {
    Command::new(APP_NAME)
        .version(APP_VERSION)
        .author(APP_AUTHOR)
        .about(APP_DESCRIPTION)
        // ====================
        // Global Flags
        // ====================
        .arg(
            Arg::new("log-level")
                .long("log-level")
                .help("Set the logging level")
                .global(true)
                .value_parser(clap::builder::PossibleValuesParser::new(LOG_LEVELS))
                .ignore_case(true)
                .default_value(DEFAULT_LOG_LEVEL)
                .action(ArgAction::Set),
        )
        .subcommand_required(true)
        .arg_required_else_help(true)
        // ====================
        // Subcommand Definitions
        // ====================
        .subcommand(commands::render::command())
        .subcommand(commands::inspect::command())
}

/// Main function that initializes the CLI and handles command execution.
fn main() {
    let matches = cli().get_matches();

    // ====================
    // Initialize Logger
    // ====================
    let log_level = matches
        .get_one::<String>("log-level")
        .map(String::as_str)
        .unwrap_or(DEFAULT_LOG_LEVEL);
    initialize_logger(log_level);

    debug!("Logger initialized with level: {}", log_level);

    // ====================
    // Command Execution
    // ====================
    let result = match matches.subcommand() {
        Some(("render", sub_matches)) => commands::render::execute(sub_matches),
        Some(("inspect", sub_matches)) => commands::inspect::execute(sub_matches),
        _ => {
            print_error!("Unknown command. Use --help for usage.");
            process::exit(1);
        }
    };

    if let Err(err) = result {
        print_error!("{}", err);
        process::exit(1);
    }
}
