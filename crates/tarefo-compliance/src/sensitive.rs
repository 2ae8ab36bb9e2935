//! Sensitive-data detection by marker substring scan.
//!
//! The payload is flattened to lowercase text (keys and values alike) and
//! each marker is tested for containment. This is deliberately crude: short
//! markers such as `id` match inside unrelated words.

use serde_json::Value;

use crate::error::{ComplianceError, Result};

/// Default sensitive-data markers, in scan order.
pub const DEFAULT_SENSITIVE_MARKERS: [&str; 12] = [
    "cpf",
    "rg",
    "id",
    "passport",
    "credit_card",
    "health",
    "religion",
    "political",
    "sexual_orientation",
    "biometric",
    "genetic",
    "location",
];

/// Default bound on payload nesting. Sits well above `serde_json`'s own
/// parse limit of 128, so any payload that parsed is scanned.
pub const DEFAULT_MAX_PAYLOAD_DEPTH: usize = 512;

// Separates flattened tokens so that a marker can never straddle two of them.
const TOKEN_SEPARATOR: char = '\u{1f}';

/// Outcome of a sensitive-data scan.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Detection {
    pub found: bool,
    /// Matched markers in marker order, without duplicates.
    pub types: Vec<String>,
}

impl Detection {
    fn none() -> Self {
        Self::default()
    }
}

/// Ordered, de-duplicated set of lowercase marker tokens.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SensitiveMarkerSet {
    markers: Vec<String>,
    max_depth: usize,
}

impl SensitiveMarkerSet {
    /// Build a marker set. Tokens are trimmed and lowercased; empty tokens
    /// are dropped and the first occurrence of a duplicate wins.
    pub fn new<I, S>(markers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut normalized: Vec<String> = Vec::new();
        for marker in markers {
            let token = marker.as_ref().trim().to_lowercase();
            if !token.is_empty() && !normalized.contains(&token) {
                normalized.push(token);
            }
        }
        Self {
            markers: normalized,
            max_depth: DEFAULT_MAX_PAYLOAD_DEPTH,
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn markers(&self) -> &[String] {
        &self.markers
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Scan `data` for markers. Never fails: a payload that cannot be
    /// inspected reports no sensitive data.
    pub fn detect(&self, data: &Value) -> Detection {
        self.try_detect(data).unwrap_or_else(|_| Detection::none())
    }

    /// Scan `data` for markers, failing if the payload nests deeper than
    /// the configured bound.
    pub fn try_detect(&self, data: &Value) -> Result<Detection> {
        let is_empty_mapping = match data {
            Value::Object(map) => map.is_empty(),
            _ => true,
        };
        if is_empty_mapping {
            return Ok(Detection::none());
        }

        let text = flatten_text(data, self.max_depth)?;
        let types: Vec<String> = self
            .markers
            .iter()
            .filter(|marker| text.contains(marker.as_str()))
            .cloned()
            .collect();

        Ok(Detection {
            found: !types.is_empty(),
            types,
        })
    }
}

impl Default for SensitiveMarkerSet {
    fn default() -> Self {
        Self::new(DEFAULT_SENSITIVE_MARKERS)
    }
}

/// Flatten a JSON value into lowercase text containing every key and
/// scalar, one token per separator-delimited slot.
pub fn flatten_text(value: &Value, max_depth: usize) -> Result<String> {
    let mut out = String::new();
    flatten_into(value, 0, max_depth, &mut out)?;
    Ok(out)
}

fn flatten_into(value: &Value, depth: usize, max_depth: usize, out: &mut String) -> Result<()> {
    if depth > max_depth {
        return Err(ComplianceError::malformed(format!(
            "payload nesting exceeds {} levels",
            max_depth
        )));
    }

    match value {
        Value::Null => push_token(out, "null"),
        Value::Bool(b) => push_token(out, if *b { "true" } else { "false" }),
        Value::Number(n) => push_token(out, &n.to_string()),
        Value::String(s) => push_token(out, &escaped(&s.to_lowercase())?),
        Value::Array(items) => {
            for item in items {
                flatten_into(item, depth + 1, max_depth, out)?;
            }
        }
        Value::Object(map) => {
            for (key, item) in map {
                push_token(out, &escaped(&key.to_lowercase())?);
                flatten_into(item, depth + 1, max_depth, out)?;
            }
        }
    }
    Ok(())
}

/// Render a string as it appears inside JSON text, so control characters
/// scan as their escapes (a backspace becomes `\b`).
fn escaped(s: &str) -> Result<String> {
    let quoted = serde_json::to_string(s)?;
    Ok(quoted[1..quoted.len() - 1].to_string())
}

fn push_token(out: &mut String, token: &str) {
    if !out.is_empty() {
        out.push(TOKEN_SEPARATOR);
    }
    out.push_str(token);
}
