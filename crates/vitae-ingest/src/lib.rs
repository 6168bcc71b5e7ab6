use std::path::Path;

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum IngestError {
    #[error("failed to read input: {0}")]
    Io(#[from] std::io::Error),
    #[error("input is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error(
        "unsupported input shape ({0}); expected {{\"pages\": [...]}}, a list of pages, a list of strings, or a string"
    )]
    UnsupportedShape(String),
}

/// Accepted top-level document shapes, tried in order.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawDocument {
    Paged { pages: Vec<RawPage> },
    Pages(Vec<RawPage>),
    Lines(Vec<RawLine>),
    Text(String),
}

/// One page. `text_lines` wins over `lines`, which wins over `text`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawPage {
    text: Option<String>,
    text_lines: Option<Vec<RawLine>>,
    lines: Option<Vec<RawLine>>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawLine {
    Text(String),
    Object { text: Option<String> },
    Other(Value),
}

impl RawLine {
    fn into_string(self) -> String {
        match self {
            RawLine::Text(s) => s,
            RawLine::Object { text } => text.unwrap_or_default(),
            RawLine::Other(Value::Null) => String::new(),
            RawLine::Other(v) => v.to_string(),
        }
    }
}

impl RawPage {
    fn into_lines(self) -> Vec<String> {
        let listed = self
            .text_lines
            .filter(|l| !l.is_empty())
            .or(self.lines.filter(|l| !l.is_empty()));
        match (listed, self.text) {
            (Some(lines), _) => lines.into_iter().map(RawLine::into_string).collect(),
            (None, Some(text)) => split_text(&text),
            (None, None) => Vec::new(),
        }
    }
}

fn split_text(text: &str) -> Vec<String> {
    text.lines().map(String::from).collect()
}

/// Flatten pages into one line sequence, one blank line between pages.
fn join_pages(pages: Vec<RawPage>) -> Vec<String> {
    let mut out = Vec::new();
    for (i, page) in pages.into_iter().enumerate() {
        if i > 0 {
            out.push(String::new());
        }
        out.extend(page.into_lines());
    }
    out
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "list with unsupported entries",
        Value::Object(map) if map.contains_key("pages") => "object whose \"pages\" is not a list of pages",
        Value::Object(_) => "object without \"pages\"",
    }
}

/// Convert an already-parsed JSON document into lines.
pub fn lines_from_value(value: Value) -> Result<Vec<String>, IngestError> {
    let shape = describe(&value);
    let doc: RawDocument =
        serde_json::from_value(value).map_err(|_| IngestError::UnsupportedShape(shape.into()))?;

    let lines = match doc {
        RawDocument::Paged { pages } | RawDocument::Pages(pages) => {
            tracing::debug!(pages = pages.len(), "loaded paged document");
            join_pages(pages)
        }
        RawDocument::Lines(lines) => lines.into_iter().map(RawLine::into_string).collect(),
        RawDocument::Text(text) => split_text(&text),
    };
    Ok(lines)
}

/// Parse a JSON document from a string into lines.
pub fn lines_from_str(json: &str) -> Result<Vec<String>, IngestError> {
    let value: Value = serde_json::from_str(json)?;
    lines_from_value(value)
}

/// Load a document as an ordered sequence of lines.
///
/// Dispatches on the file extension:
/// - `.txt` → plain text, one line per line
/// - anything else → JSON page export
pub fn load_lines(path: &Path) -> Result<Vec<String>, IngestError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    let content = std::fs::read_to_string(path)?;
    let lines = match ext.as_str() {
        "txt" => split_text(&content),
        _ => lines_from_str(&content)?,
    };

    tracing::debug!(path = %path.display(), lines = lines.len(), "input loaded");
    Ok(lines)
}
