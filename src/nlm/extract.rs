//! Recovers JSON from noisy nlm output.
//!
//! The binary may print banner lines ("Created notebook: notebook/nb123")
//! before or around its JSON payload, so the whole text is not always a
//! valid document.

use serde_json::Value;

/// Outcome of [`extract`].
#[derive(Debug, Clone, PartialEq)]
pub enum Extracted {
    Json(Value),
    /// Nothing parsed; the raw text, untouched.
    Text(String),
}

impl Extracted {
    /// The JSON array items, or an empty list for anything else.
    pub fn into_list(self) -> Vec<Value> {
        match self {
            Extracted::Json(Value::Array(items)) => items,
            _ => Vec::new(),
        }
    }

    /// The parsed value, or the raw text as a JSON string.
    pub fn into_value(self) -> Value {
        match self {
            Extracted::Json(value) => value,
            Extracted::Text(text) => Value::String(text),
        }
    }

    pub fn is_json(&self) -> bool {
        matches!(self, Extracted::Json(_))
    }
}

/// Find the JSON payload in `raw`.
///
/// Lines are scanned from the last one backwards; the first line that starts
/// with `{` or `[` and parses wins. Failing that the whole trimmed text is
/// parsed as one document, and failing that the text is returned as is.
pub fn extract(raw: &str) -> Extracted {
    let trimmed = raw.trim();

    let from_lines = trimmed.lines().rev().find_map(|line| {
        let line = line.trim();
        if line.starts_with('{') || line.starts_with('[') {
            serde_json::from_str::<Value>(line).ok()
        } else {
            None
        }
    });

    if let Some(value) = from_lines {
        return Extracted::Json(value);
    }

    match serde_json::from_str::<Value>(trimmed) {
        Ok(value) => Extracted::Json(value),
        Err(_) => Extracted::Text(raw.to_string()),
    }
}
