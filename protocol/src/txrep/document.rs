//! Line-level reading and writing of the `key: value` text form.

use std::collections::HashMap;
use std::str::FromStr;

use super::TxrepError;
use crate::config::DEFAULT_XDR_DEPTH_LIMIT;

/// Keys nested deeper than this many segments are rejected on parse.
///
/// The leading name is one segment, and every `.field` and every `[index]`
/// adds one more, so `tx.operations[0].body` has four. Each level of XDR
/// nesting adds at most a tag and an index, and the innermost key may end
/// in one more suffix (`.type`, `.len`, `._present`). Any envelope that
/// decodes under the default XDR depth limit therefore writes keys within
/// this bound.
pub const MAX_KEY_DEPTH: usize = 2 * DEFAULT_XDR_DEPTH_LIMIT as usize + 2;

/// Joins a parent key and a field tag with a dot. Either side may be empty,
/// which is how envelope arms lay their fields out at the top level.
pub fn join_key(key: &str, tag: &str) -> String {
    match (key.is_empty(), tag.is_empty()) {
        (true, _) => tag.to_string(),
        (_, true) => key.to_string(),
        _ => format!("{key}.{tag}"),
    }
}

/// Key of the `index`-th element of the list at `key`.
pub fn index_key(key: &str, index: usize) -> String {
    format!("{key}[{index}]")
}

/// Segments in `key`, counted as [`MAX_KEY_DEPTH`] describes.
fn key_depth(key: &str) -> usize {
    1 + key.bytes().filter(|b| *b == b'.' || *b == b'[').count()
}

// ---------------------------------------------------------------------------
// Writer
// ---------------------------------------------------------------------------

/// Accumulates lines in emission order.
#[derive(Debug, Default, Clone)]
pub struct TxrepWriter {
    lines: Vec<String>,
}

impl TxrepWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, key: &str, value: impl AsRef<str>) {
        self.lines.push(format!("{key}: {}", value.as_ref()));
    }

    /// Pushes a string field as a JSON string literal.
    pub fn push_quoted(&mut self, key: &str, value: &str) {
        // serde_json only fails on non-string map keys; a &str never does.
        let quoted = serde_json::to_string(value).unwrap_or_else(|_| format!("{value:?}"));
        self.push(key, quoted);
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// The finished document, newline terminated.
    pub fn finish(self) -> String {
        let mut out = self.lines.join("\n");
        out.push('\n');
        out
    }
}

// ---------------------------------------------------------------------------
// Document
// ---------------------------------------------------------------------------

/// A parsed text form: a flat map from key to raw value.
///
/// Values are stored already unquoted. Anything after the value on a line is
/// treated as a comment and dropped, so `amount: 100000000 (10 XLM)` reads as
/// `100000000`.
#[derive(Debug, Default, Clone)]
pub struct TxrepDocument {
    values: HashMap<String, String>,
}

impl TxrepDocument {
    pub fn parse(text: &str) -> Result<Self, TxrepError> {
        let mut values = HashMap::new();
        for (index, raw_line) in text.lines().enumerate() {
            let line_no = index + 1;
            let line = raw_line.trim();
            if line.is_empty() {
                continue;
            }
            let (key, rest) = line.split_once(':').ok_or_else(|| TxrepError::MalformedLine {
                line: line_no,
                content: line.to_string(),
            })?;
            let key = key.trim();
            if key.is_empty() || key.contains(char::is_whitespace) {
                return Err(TxrepError::MalformedLine {
                    line: line_no,
                    content: line.to_string(),
                });
            }
            if key_depth(key) > MAX_KEY_DEPTH {
                return Err(TxrepError::KeyTooDeep {
                    line: line_no,
                    max: MAX_KEY_DEPTH,
                });
            }
            let value = parse_value(rest.trim()).ok_or_else(|| TxrepError::MalformedLine {
                line: line_no,
                content: line.to_string(),
            })?;
            if values.insert(key.to_string(), value).is_some() {
                return Err(TxrepError::DuplicateKey(key.to_string()));
            }
        }
        Ok(Self { values })
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// The raw value at `key`.
    pub fn get(&self, key: &str) -> Result<&str, TxrepError> {
        self.values
            .get(key)
            .map(String::as_str)
            .ok_or_else(|| TxrepError::MissingField(key.to_string()))
    }

    /// The value at `key` parsed with [`FromStr`].
    pub fn parse_value<T>(&self, key: &str) -> Result<T, TxrepError>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        let raw = self.get(key)?;
        raw.parse().map_err(|e: T::Err| TxrepError::InvalidValue {
            key: key.to_string(),
            reason: format!("`{raw}`: {e}"),
        })
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Extracts the value token from the text after the colon: a JSON string
/// literal, or the first whitespace-delimited token. `None` for an
/// unterminated string literal.
fn parse_value(rest: &str) -> Option<String> {
    if rest.starts_with('"') {
        let mut stream = serde_json::Deserializer::from_str(rest).into_iter::<String>();
        return stream.next().and_then(Result::ok);
    }
    Some(rest.split_whitespace().next().unwrap_or_default().to_string())
}
