// core/mod.rs

//! # Core Module
//!
//! Builds the render context from the sources the CLI accepts: JSON/YAML
//! context files, `.env` files and `KEY=VALUE` overrides.

pub mod config;
pub mod env;
