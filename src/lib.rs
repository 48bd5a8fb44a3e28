// lib.rs

//! # mini-handlebars
//!
//! A minimal logic-enabled text templating engine supporting `{{variable}}`
//! interpolation, `{{#if cond}}` conditionals and `{{#each items}}`
//! iteration over a key/value [`Context`].

pub mod template;

pub use template::{render, Context, RenderOptions, TemplateEngine, TemplateError};
