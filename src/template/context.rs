// template/context.rs

//! # Template Context Module
//!
//! Provides the key/value context a template is rendered against.
//!
//! Values are held as `serde_json::Value`, so a context can carry strings,
//! booleans, numbers and sequences of nested contexts (the collections that
//! `{{#each}}` blocks iterate over).

use std::collections::HashMap;

use serde_json::{Map, Value};
use thiserror::Error;

/// Error types that can occur while building a context from external data.
#[derive(Error, Debug)]
pub enum ContextError {
    /// The JSON document could not be parsed.
    #[error("Invalid JSON context: {0}")]
    Json(#[from] serde_json::Error),

    /// The YAML document could not be parsed.
    #[error("Invalid YAML context: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The document parsed but its top level is not a mapping.
    #[error("Context root must be a mapping, found {0}")]
    NotAMapping(String),
}

/// Type alias for context operation results
pub type ContextResult<T> = Result<T, ContextError>;

/// A context for template rendering.
#[derive(Default, Debug, Clone, PartialEq)]
pub struct Context {
    variables: HashMap<String, Value>,
}

impl Context {
    /// Creates a new empty context.
    pub fn new() -> Self {
        Self {
            variables: HashMap::new(),
        }
    }

    /// Adds a variable to the context, replacing any previous value.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.variables.insert(name.into(), value.into());
    }

    /// Builder-style variant of [`Context::insert`].
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    /// Gets a variable's value from the context.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.variables.get(name)
    }

    /// Checks if a variable exists in the context.
    pub fn contains(&self, name: &str) -> bool {
        self.variables.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    /// Merges another context into this one.
    ///
    /// Variables from `other` overwrite existing variables with the same name.
    pub fn merge(&mut self, other: &Context) {
        for (name, value) in &other.variables {
            self.variables.insert(name.clone(), value.clone());
        }
    }

    /// Parses a context from a JSON document whose root is an object.
    pub fn from_json_str(source: &str) -> ContextResult<Self> {
        let value: Value = serde_json::from_str(source)?;
        Self::from_value(value)
    }

    /// Parses a context from a YAML document whose root is a mapping.
    pub fn from_yaml_str(source: &str) -> ContextResult<Self> {
        let yaml: serde_yaml::Value = serde_yaml::from_str(source)?;
        let value = serde_json::to_value(yaml)?;
        Self::from_value(value)
    }

    fn from_value(value: Value) -> ContextResult<Self> {
        match value {
            Value::Object(map) => Ok(Self::from(map)),
            Value::Null => Ok(Self::new()),
            other => Err(ContextError::NotAMapping(kind_name(&other).to_string())),
        }
    }

    /// Whether a conditional on `name` passes.
    ///
    /// Only a present value whose string form is exactly `true` passes; the
    /// boolean `true` and the string `"true"` both qualify, everything else
    /// (including non-empty collections and non-zero numbers) does not.
    pub fn is_truthy(&self, name: &str) -> bool {
        self.get(name).is_some_and(|value| stringify(value) == "true")
    }

    /// Looks up `name` as an iteration collection.
    pub fn items(&self, name: &str) -> Collection {
        let Some(value) = self.get(name) else {
            return Collection::Missing;
        };
        let Value::Array(items) = value else {
            return Collection::Malformed;
        };

        items
            .iter()
            .map(|item| match item {
                Value::Object(map) => Some(Context::from(map.clone())),
                _ => None,
            })
            .collect::<Option<Vec<_>>>()
            .map_or(Collection::Malformed, Collection::Items)
    }
}

/// Result of looking up an `{{#each}}` collection.
#[derive(Debug, Clone, PartialEq)]
pub enum Collection {
    /// No value is bound to the name.
    Missing,
    /// A value is bound but it is not a sequence made only of mappings.
    Malformed,
    /// One child context per item, in sequence order.
    Items(Vec<Context>),
}

impl From<Map<String, Value>> for Context {
    fn from(map: Map<String, Value>) -> Self {
        Self {
            variables: map.into_iter().collect(),
        }
    }
}

impl From<HashMap<String, String>> for Context {
    fn from(map: HashMap<String, String>) -> Self {
        Self {
            variables: map
                .into_iter()
                .map(|(key, value)| (key, Value::String(value)))
                .collect(),
        }
    }
}

/// Converts a context value to the text substituted into the output.
///
/// Strings are inserted raw (no quoting or escaping), `null` becomes the empty
/// string and collections fall back to compact JSON.
pub fn stringify(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}

fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a sequence",
        Value::Object(_) => "a mapping",
    }
}
