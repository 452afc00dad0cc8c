// SPDX-FileCopyrightText: 2026 Adminkit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! File templates rendered into a content panel.
//!
//! Supported tags:
//!
//! - `{{ user.name }}` looks up a dotted path in the data and HTML-escapes it
//! - `{{ body | safe }}` inserts the value unescaped
//! - `{{ template "footer" }}` includes another parsed file by its stem
//! - `{{ . }}` renders the whole data value
//!
//! The first file is the entry template. Failures never escape
//! [`render_template_files`]; they come back as a warning panel.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use adminkit_core::Panel;
use serde_json::Value;
use thiserror::Error;

/// Include nesting limit.
pub const MAX_INCLUDE_DEPTH: usize = 16;

const PRODUCTION_WARNING: &str = "An error occurred while rendering this page.";

#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("no template files given")]
    NoFiles,

    #[error("cannot read template {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{template}: unterminated tag at byte {offset}")]
    Unterminated { template: String, offset: usize },

    #[error("{template}: empty tag at byte {offset}")]
    EmptyTag { template: String, offset: usize },

    #[error("{template}: malformed tag `{tag}`")]
    Malformed { template: String, tag: String },

    #[error("{template}: no value for `{key}`")]
    MissingKey { template: String, key: String },

    #[error("{template}: unknown template `{name}`")]
    UnknownTemplate { template: String, name: String },

    #[error("template includes nested deeper than {}", MAX_INCLUDE_DEPTH)]
    TooDeep,
}

#[derive(Debug, Clone, PartialEq)]
enum Node {
    Text(String),
    Value { path: Vec<String>, raw: bool },
    Include(String),
}

/// A set of parsed templates with one entry point.
#[derive(Debug, Clone)]
pub struct FileTemplate {
    entry: String,
    templates: HashMap<String, Vec<Node>>,
}

impl FileTemplate {
    /// Reads and parses `files`; the first becomes the entry template.
    pub fn parse_files<P: AsRef<Path>>(files: &[P]) -> Result<Self, TemplateError> {
        let mut sources = Vec::with_capacity(files.len());
        for file in files {
            let path = file.as_ref();
            let source = std::fs::read_to_string(path).map_err(|source| TemplateError::Read {
                path: path.to_path_buf(),
                source,
            })?;
            sources.push((template_name(path), source));
        }
        Self::parse_sources(sources)
    }

    /// Parses a single in-memory template called `name`.
    pub fn parse_str(name: &str, source: &str) -> Result<Self, TemplateError> {
        Self::parse_sources(vec![(name.to_string(), source.to_string())])
    }

    fn parse_sources(sources: Vec<(String, String)>) -> Result<Self, TemplateError> {
        let entry = match sources.first() {
            Some((name, _)) => name.clone(),
            None => return Err(TemplateError::NoFiles),
        };
        let mut templates = HashMap::with_capacity(sources.len());
        for (name, source) in sources {
            let nodes = parse(&name, &source)?;
            templates.insert(name, nodes);
        }
        Ok(Self { entry, templates })
    }

    /// Name of the entry template.
    pub fn entry(&self) -> &str {
        &self.entry
    }

    /// Renders the entry template against `data`.
    pub fn execute(&self, data: &Value) -> Result<String, TemplateError> {
        let mut out = String::new();
        self.execute_into(&self.entry, data, 0, &mut out)?;
        Ok(out)
    }

    fn execute_into(
        &self,
        name: &str,
        data: &Value,
        depth: usize,
        out: &mut String,
    ) -> Result<(), TemplateError> {
        if depth > MAX_INCLUDE_DEPTH {
            return Err(TemplateError::TooDeep);
        }
        let nodes = self
            .templates
            .get(name)
            .ok_or_else(|| TemplateError::UnknownTemplate {
                template: self.entry.clone(),
                name: name.to_string(),
            })?;

        for node in nodes {
            match node {
                Node::Text(text) => out.push_str(text),
                Node::Value { path, raw } => {
                    let value = lookup(data, path).ok_or_else(|| TemplateError::MissingKey {
                        template: name.to_string(),
                        key: path.join("."),
                    })?;
                    let text = display(value);
                    if *raw {
                        out.push_str(&text);
                    } else {
                        out.push_str(&escape_html(&text));
                    }
                }
                Node::Include(include) => {
                    if !self.templates.contains_key(include) {
                        return Err(TemplateError::UnknownTemplate {
                            template: name.to_string(),
                            name: include.clone(),
                        });
                    }
                    self.execute_into(include, data, depth + 1, out)?;
                }
            }
        }
        Ok(())
    }
}

fn template_name(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn parse(name: &str, source: &str) -> Result<Vec<Node>, TemplateError> {
    let mut nodes = Vec::new();
    let mut rest = source;
    let mut offset = 0;

    while let Some(start) = rest.find("{{") {
        if start > 0 {
            nodes.push(Node::Text(rest[..start].to_string()));
        }
        let after_open = &rest[start + 2..];
        let end = after_open
            .find("}}")
            .ok_or_else(|| TemplateError::Unterminated {
                template: name.to_string(),
                offset: offset + start,
            })?;
        let tag = after_open[..end].trim();
        if tag.is_empty() {
            return Err(TemplateError::EmptyTag {
                template: name.to_string(),
                offset: offset + start,
            });
        }
        nodes.push(parse_tag(name, tag)?);

        let consumed = start + 2 + end + 2;
        offset += consumed;
        rest = &rest[consumed..];
    }
    if !rest.is_empty() {
        nodes.push(Node::Text(rest.to_string()));
    }
    Ok(nodes)
}

fn parse_tag(name: &str, tag: &str) -> Result<Node, TemplateError> {
    let malformed = || TemplateError::Malformed {
        template: name.to_string(),
        tag: tag.to_string(),
    };

    if let Some(arg) = tag.strip_prefix("template ") {
        let include = arg
            .trim()
            .strip_prefix('"')
            .and_then(|s| s.strip_suffix('"'))
            .filter(|s| !s.is_empty() && !s.contains('"'))
            .ok_or_else(malformed)?;
        return Ok(Node::Include(include.to_string()));
    }

    let (expr, raw) = match tag.split_once('|') {
        Some((expr, filter)) if filter.trim() == "safe" => (expr.trim(), true),
        Some(_) => return Err(malformed()),
        None => (tag, false),
    };
    let path = parse_path(expr).ok_or_else(malformed)?;
    Ok(Node::Value { path, raw })
}

/// `.` is the root; otherwise dotted segments with an optional leading dot.
fn parse_path(expr: &str) -> Option<Vec<String>> {
    if expr == "." {
        return Some(Vec::new());
    }
    let expr = expr.strip_prefix('.').unwrap_or(expr);
    let segments: Vec<String> = expr.split('.').map(str::to_string).collect();
    let valid = segments.iter().all(|s| {
        !s.is_empty()
            && s
                .chars()
                .all(|c| c.is_alphanumeric() || c == '_' || c == '-')
    });
    valid.then_some(segments)
}

fn lookup<'a>(data: &'a Value, path: &[String]) -> Option<&'a Value> {
    path.iter().try_fold(data, |value, segment| match value {
        Value::Object(map) => map.get(segment),
        Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    })
}

fn display(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}

/// Escapes the five HTML-significant characters.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&#34;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

/// A visible warning in place of page content.
///
/// In production the message is replaced by a generic notice.
pub fn warning_panel(message: &str, production: bool) -> Panel {
    let message = if production {
        PRODUCTION_WARNING
    } else {
        message
    };
    Panel::from_content(format!(
        "<div class=\"alert alert-warning\">\
         <h4><i class=\"icon fa fa-warning\"></i> Warning</h4>{}</div>",
        escape_html(message)
    ))
    .with_title("Warning")
}

/// Outcome of rendering template files: content or a warning to show instead.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderedPanel {
    Content(Panel),
    Warning(Panel),
}

impl RenderedPanel {
    pub fn is_warning(&self) -> bool {
        matches!(self, Self::Warning(_))
    }

    pub fn into_panel(self) -> Panel {
        match self {
            Self::Content(panel) | Self::Warning(panel) => panel,
        }
    }
}

/// Parses `files` and executes the entry template against `data`.
pub fn render_template_files<P: AsRef<Path>>(
    files: &[P],
    data: &Value,
    production: bool,
) -> RenderedPanel {
    match FileTemplate::parse_files(files).and_then(|t| t.execute(data)) {
        Ok(content) => RenderedPanel::Content(Panel::from_content(content)),
        Err(e) => {
            tracing::warn!(error = %e, "template rendering failed, showing warning panel");
            RenderedPanel::Warning(warning_panel(&e.to_string(), production))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn render(source: &str, data: Value) -> Result<String, TemplateError> {
        FileTemplate::parse_str("page", source)?.execute(&data)
    }

    #[test]
    fn substitutes_and_escapes() {
        let out = render(
            "<p>{{ user.name }}</p>{{ body | safe }}",
            json!({"user": {"name": "<Ann>"}, "body": "<b>hi</b>"}),
        )
        .unwrap();
        assert_eq!(out, "<p>&lt;Ann&gt;</p><b>hi</b>");
    }

    #[test]
    fn scalars_and_indexes() {
        let out = render(
            "{{ n }} {{ ok }} {{ .items.1 }} [{{ none }}]",
            json!({"n": 3, "ok": true, "items": ["a", "b"], "none": null}),
        )
        .unwrap();
        assert_eq!(out, "3 true b []");
    }

    #[test]
    fn parse_errors() {
        assert!(matches!(
            FileTemplate::parse_str("p", "a {{ b"),
            Err(TemplateError::Unterminated { offset: 2, .. })
        ));
        assert!(matches!(
            FileTemplate::parse_str("p", "{{  }}"),
            Err(TemplateError::EmptyTag { .. })
        ));
        assert!(matches!(
            FileTemplate::parse_str("p", "{{ a | upper }}"),
            Err(TemplateError::Malformed { .. })
        ));
        assert!(matches!(
            FileTemplate::parse_str("p", "{{ a..b }}"),
            Err(TemplateError::Malformed { .. })
        ));
        assert!(matches!(
            FileTemplate::parse_str("p", "{{ template footer }}"),
            Err(TemplateError::Malformed { .. })
        ));
        let none: [&str; 0] = [];
        assert!(matches!(
            FileTemplate::parse_files(&none),
            Err(TemplateError::NoFiles)
        ));
    }

    #[test]
    fn missing_key_fails_execution() {
        let err = render("{{ user.email }}", json!({"user": {}})).unwrap_err();
        assert!(matches!(err, TemplateError::MissingKey { ref key, .. } if key == "user.email"));
    }

    #[test]
    fn includes_by_stem() {
        let dir = tempfile::tempdir().unwrap();
        let main = dir.path().join("main.html");
        let footer = dir.path().join("footer.html");
        std::fs::write(&main, "<main>{{ title }}</main>{{ template \"footer\" }}").unwrap();
        std::fs::write(&footer, "<footer>{{ year }}</footer>").unwrap();

        let tmpl = FileTemplate::parse_files(&[&main, &footer]).unwrap();
        assert_eq!(tmpl.entry(), "main");
        let out = tmpl.execute(&json!({"title": "Home", "year": 2026})).unwrap();
        assert_eq!(out, "<main>Home</main><footer>2026</footer>");
    }

    #[test]
    fn unknown_and_recursive_includes() {
        let err = render("{{ template \"nope\" }}", json!({})).unwrap_err();
        assert!(matches!(err, TemplateError::UnknownTemplate { .. }));

        let err = render("x{{ template \"page\" }}", json!({})).unwrap_err();
        assert!(matches!(err, TemplateError::TooDeep));
    }

    #[test]
    fn warning_panel_redacts_in_production() {
        let dev = warning_panel("boom <script>", false);
        assert!(dev.content.contains("boom &lt;script&gt;"));

        let prod = warning_panel("boom", true);
        assert!(!prod.content.contains("boom"));
        assert!(prod.content.contains(PRODUCTION_WARNING));
    }

    #[test]
    fn render_files_falls_back_to_warning() {
        let rendered = render_template_files(&["/no/such/template.html"], &json!({}), false);
        assert!(rendered.is_warning());
        assert!(rendered.into_panel().content.contains("template.html"));

        let dir = tempfile::tempdir().unwrap();
        let page = dir.path().join("page.html");
        std::fs::write(&page, "Hello {{ name }}").unwrap();
        let rendered = render_template_files(&[&page], &json!({"name": "Ann"}), true);
        assert_eq!(rendered, RenderedPanel::Content(Panel::from_content("Hello Ann")));
    }
}
