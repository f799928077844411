//! Memo decoding.
//!
//! Memos carry application documents as free-form text. Producers escape the
//! JSON either once or twice, so decoding tries each known layering in order
//! and falls back to returning the memo verbatim.

use log::debug;
use serde::Serialize;
use serde_json::Value;

/// The payload recovered from a transaction memo.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Document {
    /// A JSON value parsed out of the memo
    Structured(Value),
    /// The memo could not be parsed; it is returned as-is with its transaction hash
    Fallback {
        raw_memo: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        hash: Option<String>,
    },
}

impl Document {
    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback { .. })
    }
}

type ParseStrategy = fn(&str) -> Result<Value, ParseFailure>;

/// Parse strategies, in the order they are attempted.
const STRATEGIES: [(&str, ParseStrategy); 2] = [
    ("direct", parse_direct),
    ("double-encoded", parse_double_encoded),
];

#[derive(Debug)]
enum ParseFailure {
    Json(serde_json::Error),
    /// Parsed to a bare JSON string, which is not a document
    NotStructured,
}

impl From<serde_json::Error> for ParseFailure {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}

/// Decodes a memo into a [`Document`]. Never fails.
pub fn decode(memo: &str, hash: Option<&str>) -> Document {
    for (name, strategy) in STRATEGIES {
        match strategy(memo) {
            Ok(value) => return Document::Structured(value),
            Err(failure) => debug!("Memo of {:?} is not {} JSON: {:?}", hash, name, failure),
        }
    }

    Document::Fallback {
        raw_memo: memo.to_string(),
        hash: hash.map(str::to_string),
    }
}

/// Removes newlines, tabs and carriage returns, then trims whitespace and
/// byte order marks.
fn clean(memo: &str) -> String {
    memo.replace(['\n', '\t', '\r'], "")
        .trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}')
        .to_string()
}

fn parse_structured(text: &str) -> Result<Value, ParseFailure> {
    match serde_json::from_str(text)? {
        Value::String(_) => Err(ParseFailure::NotStructured),
        value => Ok(value),
    }
}

fn parse_direct(memo: &str) -> Result<Value, ParseFailure> {
    parse_structured(&clean(memo))
}

/// The memo is a JSON string literal whose content is the document.
fn parse_double_encoded(memo: &str) -> Result<Value, ParseFailure> {
    let inner: String = serde_json::from_str(memo)?;
    parse_structured(&clean(&inner))
}
