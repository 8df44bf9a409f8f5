//! JSON document codec.
//!
//! Both settings documents are JSON objects preceded by a prose header made of
//! `//` comment lines.  Users may also leave their own comments while editing,
//! so the reader strips `//` line comments and `/* ... */` block comments
//! (outside string literals) before handing the text to `serde_json`.
//!
//! A [`ConfigDocument`] is a `serde_json::Map`.  The workspace enables the
//! `preserve_order` feature, so keys are written back in insertion order.

use serde_json::{Map, Value};
use thiserror::Error;

/// An ordered JSON object.
pub type ConfigDocument = Map<String, Value>;

/// Error type for document parsing and rendering.
#[derive(Debug, Error)]
pub enum DocumentError {
    /// The text (after comment stripping) is not valid JSON.
    #[error("document is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// The bytes are not valid UTF-8.
    #[error("document is not valid UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    /// The JSON root is something other than an object.
    #[error("document root is {0}, expected an object")]
    NotAnObject(&'static str),

    /// The document could not be serialized.
    #[error("failed to render document: {0}")]
    Render(#[source] serde_json::Error),
}

/// Parses raw file bytes into a document.
///
/// # Errors
///
/// Returns [`DocumentError::Utf8`] for invalid UTF-8, [`DocumentError::Parse`]
/// for malformed JSON and [`DocumentError::NotAnObject`] when the root is not
/// an object.
pub fn parse_document(bytes: &[u8]) -> Result<ConfigDocument, DocumentError> {
    let text = std::str::from_utf8(bytes)?;
    let stripped = strip_comments(text);
    match serde_json::from_str::<Value>(&stripped)? {
        Value::Object(map) => Ok(map),
        other => Err(DocumentError::NotAnObject(json_type_name(&other))),
    }
}

/// Renders `header` followed by the pretty-printed document.
///
/// # Errors
///
/// Returns [`DocumentError::Render`] if serialization fails.
pub fn render_document(header: &str, document: &ConfigDocument) -> Result<String, DocumentError> {
    let body = serde_json::to_string_pretty(document).map_err(DocumentError::Render)?;
    let mut out = String::with_capacity(header.len() + body.len() + 1);
    out.push_str(header);
    out.push_str(&body);
    out.push('\n');
    Ok(out)
}

/// Removes `//` and `/* */` comments that are not inside a string literal.
///
/// Newlines inside removed comments are kept so parse errors still report the
/// right line.
pub fn strip_comments(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();
    let mut in_string = false;

    while let Some(c) = chars.next() {
        if in_string {
            out.push(c);
            match c {
                '\\' => {
                    if let Some(escaped) = chars.next() {
                        out.push(escaped);
                    }
                }
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }

        match c {
            '"' => {
                in_string = true;
                out.push(c);
            }
            '/' if chars.peek() == Some(&'/') => {
                for next in chars.by_ref() {
                    if next == '\n' {
                        out.push('\n');
                        break;
                    }
                }
            }
            '/' if chars.peek() == Some(&'*') => {
                chars.next();
                let mut prev = '\0';
                for next in chars.by_ref() {
                    if next == '\n' {
                        out.push('\n');
                    }
                    if prev == '*' && next == '/' {
                        break;
                    }
                    prev = next;
                }
            }
            _ => out.push(c),
        }
    }

    out
}

/// Short name of a value's JSON type, for log messages.
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
