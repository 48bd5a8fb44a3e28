// template/engine.rs

//! # Template Engine Module
//!
//! Renders templates against a [`Context`].
//!
//! Supported syntax:
//! - `{{name}}` substitutes the string form of `name`, or nothing when unset.
//! - `{{#if name}} ... {{/if}}` keeps its body only when `name` is `true`.
//! - `{{#each items}} ... {{/each}}` renders its body once per item of the
//!   sequence `items`, with the item as the context.
//!
//! Rendering never fails on template content. Blocks whose closing tag is
//! missing are left verbatim and unresolved names render as empty strings.
//! Only the file adapter ([`TemplateEngine::render_file`]) can fail.

use std::fs;
use std::path::Path;

use log::{debug, trace};
use serde::{Deserialize, Serialize};

use super::context::{stringify, Collection, Context};
use super::lexer::{tokenize, Directive};
use super::parser::{parse, Node};
use super::{TemplateError, TemplateResult};

/// Rendering options.
///
/// No options are recognized yet; the type exists so callers can pass and
/// deserialize options without breaking when some are added.
#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderOptions {}

/// A structure that renders templates.
#[derive(Default, Debug)]
pub struct TemplateEngine {
    options: RenderOptions,
}

impl TemplateEngine {
    /// Creates a new template engine.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a template engine with explicit options.
    pub fn with_options(options: RenderOptions) -> Self {
        Self { options }
    }

    /// Renders a template string using the provided context.
    pub fn render(&self, template: &str, context: &Context) -> String {
        render(template, context)
    }

    /// Reads a UTF-8 template file and renders it.
    ///
    /// # Errors
    /// Returns [`TemplateError::Read`] if the file cannot be read or is not
    /// valid UTF-8.
    pub fn render_file(&self, path: impl AsRef<Path>, context: &Context) -> TemplateResult<String> {
        self.render_file_with_options(path, context, &self.options)
    }

    /// Same as [`TemplateEngine::render_file`] with per-call options.
    pub fn render_file_with_options(
        &self,
        path: impl AsRef<Path>,
        context: &Context,
        options: &RenderOptions,
    ) -> TemplateResult<String> {
        let path = path.as_ref();
        debug!("Rendering template file {:?} with options {:?}", path, options);

        let source = fs::read_to_string(path).map_err(|source| TemplateError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(self.render(&source, context))
    }
}

/// Renders `template` with `context`.
///
/// The template is tokenized and parsed once, then the node arena is walked.
/// Each `{{#each}}` item renders the block body independently with the item
/// as its context, and item outputs are concatenated in sequence order.
pub fn render(template: &str, context: &Context) -> String {
    if template.is_empty() {
        return String::new();
    }

    let tokens = tokenize(template);
    debug!("Tokenized template into {} tokens", tokens.len());

    let nodes = parse(&tokens);
    render_nodes(&nodes, context, template.len())
}

/// A run of arena nodes still to be rendered.
#[derive(Debug, Clone, Copy)]
struct Frame {
    cursor: usize,
    end: usize,
    /// Index into the item contexts, `None` for the root context.
    scope: Option<usize>,
}

/// Walks the arena with an explicit stack of frames.
///
/// A block pushes a frame for its body (one per item for iterations, pushed
/// in reverse so the first item is rendered first) after moving the parent
/// frame past the block's closing tag.
fn render_nodes(nodes: &[Node], root: &Context, capacity: usize) -> String {
    let mut output = String::with_capacity(capacity);
    let mut scopes: Vec<Context> = Vec::new();
    let mut frames = vec![Frame {
        cursor: 0,
        end: nodes.len(),
        scope: None,
    }];

    while let Some(&Frame { cursor, end, scope }) = frames.last() {
        if cursor >= end {
            frames.pop();
            continue;
        }

        let node = &nodes[cursor];
        let next = match node {
            Node::Conditional { close, .. } | Node::Iteration { close, .. } => close + 1,
            _ => cursor + 1,
        };
        if let Some(top) = frames.last_mut() {
            top.cursor = next;
        }

        let context = scope.map_or(root, |index| &scopes[index]);
        match node {
            Node::Text(text) => output.push_str(text),
            Node::Variable(directive) | Node::Close(directive) => {
                substitute_variable(directive, context, &mut output)
            }
            Node::Unmatched(directive) => output.push_str(&directive.raw),
            Node::Conditional { open, close } => {
                if render_conditional(open, context) {
                    frames.push(Frame {
                        cursor: cursor + 1,
                        end: *close,
                        scope,
                    });
                }
            }
            Node::Iteration { open, close } => {
                let collection = context.items(&open.name);
                render_iteration(
                    open,
                    collection,
                    Frame {
                        cursor: cursor + 1,
                        end: *close,
                        scope,
                    },
                    &mut scopes,
                    &mut frames,
                    &mut output,
                );
            }
        }
    }

    output
}

/// Whether a conditional keeps its body. A false condition drops the whole
/// block, tags and body alike.
fn render_conditional(open: &Directive, context: &Context) -> bool {
    let visible = context.is_truthy(&open.name);
    trace!("Conditional [{}] is {}", open.name, visible);
    visible
}

/// Schedules the body of an iteration block.
///
/// A missing collection drops the block. A value that is not a sequence of
/// mappings leaves the opening tag in place, renders the body against the
/// enclosing context and resolves the closing tag like any other name.
fn render_iteration(
    open: &Directive,
    collection: Collection,
    body: Frame,
    scopes: &mut Vec<Context>,
    frames: &mut Vec<Frame>,
    output: &mut String,
) {
    match collection {
        Collection::Missing => {
            trace!("Collection [{}] is not set, dropping block", open.name);
        }
        Collection::Malformed => {
            debug!(
                "Collection [{}] is not a sequence of mappings, leaving its opening tag in place",
                open.name
            );
            output.push_str(&open.raw);
            // Extend the body frame over the `Close` node.
            frames.push(Frame {
                end: body.end + 1,
                ..body
            });
        }
        Collection::Items(items) => {
            trace!("Collection [{}] has {} items", open.name, items.len());
            let first = scopes.len();
            let count = items.len();
            scopes.extend(items);
            for scope in (first..first + count).rev() {
                frames.push(Frame {
                    scope: Some(scope),
                    ..body
                });
            }
        }
    }
}

fn substitute_variable(directive: &Directive, context: &Context, output: &mut String) {
    match context.get(&directive.name) {
        Some(value) => output.push_str(&stringify(value)),
        None => trace!("Variable [{}] is not set", directive.name),
    }
}

/// Unit tests for template engine functionality.
#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ctx(value: serde_json::Value) -> Context {
        match value {
            serde_json::Value::Object(map) => Context::from(map),
            other => panic!("Expected an object, got {}", other),
        }
    }

    #[test]
    fn test_empty_template() {
        assert_eq!(render("", &ctx(json!({"a": "b"}))), "");
    }

    #[test]
    fn test_template_without_directives() {
        let template = "<p>Nothing { to } see here</p>\n";
        assert_eq!(render(template, &ctx(json!({"p": "x"}))), template);
    }

    #[test]
    fn test_link_scenario() {
        let context = ctx(json!({"link": "https://x.com", "name": "X"}));
        assert_eq!(
            render(r#"<a href="{{link}}">{{name}}</a>"#, &context),
            r#"<a href="https://x.com">X</a>"#
        );
    }

    #[test]
    fn test_variable_substitution() {
        assert_eq!(render("{{k}}", &ctx(json!({"k": "v"}))), "v");
        assert_eq!(render("{{ k }}", &ctx(json!({"k": 7}))), "7");
        assert_eq!(render("<p>{{k}}</p>", &Context::new()), "<p></p>");
    }

    #[test]
    fn test_values_are_not_escaped() {
        let context = ctx(json!({"html": "<b>&</b>"}));
        assert_eq!(render("{{html}}", &context), "<b>&</b>");
    }

    #[test]
    fn test_substituted_values_are_not_rendered_again() {
        let context = ctx(json!({"a": "{{b}}", "b": "nope"}));
        assert_eq!(render("{{a}}", &context), "{{b}}");
    }

    #[test]
    fn test_conditional_truth_table() {
        let template = "{{#if k}}BODY{{/if}}";
        assert_eq!(render(template, &ctx(json!({"k": true}))), "BODY");
        assert_eq!(render(template, &ctx(json!({"k": "true"}))), "BODY");
        assert_eq!(render(template, &ctx(json!({"k": false}))), "");
        assert_eq!(render(template, &ctx(json!({"k": 1}))), "");
        assert_eq!(render(template, &ctx(json!({"k": "yes"}))), "");
        assert_eq!(render(template, &ctx(json!({"k": [{"a": 1}]}))), "");
        assert_eq!(render(template, &Context::new()), "");
    }

    #[test]
    fn test_visible_scenario() {
        let template = "{{#if visible}}<p>{{a}}</p>{{/if}}";
        assert_eq!(render(template, &ctx(json!({"visible": true, "a": "hi"}))), "<p>hi</p>");
        assert_eq!(render(template, &ctx(json!({"a": "hi"}))), "");
    }

    #[test]
    fn test_sibling_conditionals() {
        let template = "<div>{{#if visible}}<p>{{author}}</p>{{/if}}{{#if hidden}}<p>{{other}}</p>{{/if}}</div>";
        let context = ctx(json!({
            "visible": true,
            "author": "H. Murakami",
            "hidden": false,
            "other": "J.R.R. Tolkien"
        }));
        assert_eq!(render(template, &context), "<div><p>H. Murakami</p></div>");
    }

    #[test]
    fn test_nested_conditionals() {
        let template = "{{#if outer}}[{{a1}}{{#if yes}}({{a2}}){{/if}}{{#if no}}({{a3}}){{/if}}]{{/if}}";
        let context = ctx(json!({
            "outer": true,
            "yes": true,
            "no": false,
            "a1": "PS3",
            "a2": "X360",
            "a3": "XOne"
        }));
        assert_eq!(render(template, &context), "[PS3(X360)]");
    }

    #[test]
    fn test_outer_false_removes_inner_true() {
        let template = "a{{#if outer}}b{{#if inner}}c{{/if}}d{{/if}}e";
        let context = ctx(json!({"outer": false, "inner": true}));
        assert_eq!(render(template, &context), "ae");
    }

    #[test]
    fn test_unclosed_conditional_is_left_verbatim() {
        let template = "{{#if a}}{{#if b}}X{{/if}}";
        let context = ctx(json!({"a": true, "b": true}));
        assert_eq!(render(template, &context), "{{#if a}}X");
    }

    #[test]
    fn test_stray_closer_disappears() {
        assert_eq!(render("a{{/if}}b", &Context::new()), "ab");
    }

    #[test]
    fn test_iteration_with_nested_conditionals() {
        let template = "<ul>{{#each items}}{{#if display}}{{v}}{{/if}}{{/each}}</ul>";
        let context = ctx(json!({
            "items": [
                {"display": true, "v": "a"},
                {"display": false, "v": "b"},
                {"display": true, "v": "c"}
            ]
        }));
        assert_eq!(render(template, &context), "<ul>ac</ul>");
    }

    #[test]
    fn test_iteration_items_do_not_see_outer_context() {
        let template = "{{#each items}}[{{v}}{{title}}]{{/each}}{{title}}";
        let context = ctx(json!({"title": "T", "items": [{"v": 1}, {"v": 2}]}));
        assert_eq!(render(template, &context), "[1][2]T");
    }

    #[test]
    fn test_iteration_missing_collection_drops_block() {
        let template = "before{{#each items}}<li>literal {{v}}</li>{{/each}}after";
        assert_eq!(render(template, &Context::new()), "beforeafter");
    }

    #[test]
    fn test_iteration_empty_collection() {
        let template = "({{#each items}}x{{/each}})";
        assert_eq!(render(template, &ctx(json!({"items": []}))), "()");
    }

    #[test]
    fn test_iteration_malformed_collection_keeps_opening_tag() {
        let template = "{{#each items}}<{{v}}>{{/each}}";
        let context = ctx(json!({"items": "scalar", "v": "outer"}));
        assert_eq!(render(template, &context), "{{#each items}}<outer>");

        let context = ctx(json!({"items": [{"v": 1}, 2]}));
        assert_eq!(render(template, &context), "{{#each items}}<>");
    }

    #[test]
    fn test_iteration_malformed_collection_closer_resolves_as_name() {
        let template = "{{#each items}}x{{/each}}";
        let context = ctx(json!({"items": 3, "/each": "]"}));
        assert_eq!(render(template, &context), "{{#each items}}x]");
    }

    #[test]
    fn test_sequential_iterations() {
        let template = "{{#each a}}{{v}}{{/each}}|{{#each b}}{{v}}{{/each}}";
        let context = ctx(json!({"a": [{"v": 1}, {"v": 2}], "b": [{"v": 3}]}));
        assert_eq!(render(template, &context), "12|3");
    }

    #[test]
    fn test_nested_iteration_is_not_depth_matched() {
        // The inner opening pairs with the first closer, so the outer block
        // ends there and the inner opening has nothing left to close it.
        let template = "{{#each a}}{{#each b}}x{{/each}}y{{/each}}";
        let context = ctx(json!({"a": [{"b": [{}]}, {"b": [{}]}]}));
        assert_eq!(render(template, &context), "{{#each b}}x{{#each b}}xy");
    }

    #[test]
    fn test_iteration_inside_conditional() {
        let template = "{{#if show}}{{#each rows}}<{{n}}>{{/each}}{{/if}}";
        let context = ctx(json!({"show": true, "rows": [{"n": 1}, {"n": 2}]}));
        assert_eq!(render(template, &context), "<1><2>");
    }

    #[test]
    fn test_deeply_nested_conditionals() {
        let depth = 10_000;
        let template = format!("{}x{}", "{{#if a}}".repeat(depth), "{{/if}}".repeat(depth));

        assert_eq!(render(&template, &ctx(json!({"a": true}))), "x");
        assert_eq!(render(&template, &ctx(json!({"a": false}))), "");
    }

    #[test]
    fn test_deeply_nested_iterations_in_conditionals() {
        let depth = 5_000;
        let template = format!(
            "{}{{{{#each rows}}}}<{{{{v}}}}>{{{{/each}}}}{}",
            "{{#if a}}".repeat(depth),
            "{{/if}}".repeat(depth)
        );
        let context = ctx(json!({"a": true, "rows": [{"v": 1}, {"v": 2}]}));
        assert_eq!(render(&template, &context), "<1><2>");
    }

    #[test]
    fn test_render_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("page.html");
        fs::write(&path, "<h1>{{title}}</h1>").unwrap();

        let engine = TemplateEngine::new();
        let rendered = engine.render_file(&path, &ctx(json!({"title": "Hi"}))).unwrap();
        assert_eq!(rendered, "<h1>Hi</h1>");
    }

    #[test]
    fn test_render_file_missing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.html");

        let engine = TemplateEngine::new();
        match engine.render_file(&path, &Context::new()) {
            Err(TemplateError::Read { path: reported, .. }) => assert_eq!(reported, path),
            other => panic!("Expected Read error, got {:?}", other),
        }
    }

    #[test]
    fn test_render_file_invalid_utf8() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("binary.html");
        fs::write(&path, [0xff, 0xfe, 0x00]).unwrap();

        let engine = TemplateEngine::with_options(RenderOptions::default());
        let result = engine.render_file_with_options(&path, &Context::new(), &RenderOptions {});
        assert!(matches!(result, Err(TemplateError::Read { .. })));
    }

    #[test]
    fn test_options_accept_unknown_fields() {
        let options: RenderOptions = serde_json::from_str(r#"{"future": 1}"#).unwrap();
        assert_eq!(options, RenderOptions::default());
    }
}
