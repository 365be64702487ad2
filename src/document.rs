//! EIP document parsing
//!
//! Decodes file content delivered by the repository client and splits the
//! YAML front matter from the markdown body:
//! - BOM stripping and line ending normalization (CRLF → LF)
//! - Documents without front matter yield empty metadata
//! - An opened but unclosed front matter block is an error

use crate::error::{Error, Result};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde_yaml::{Mapping, Value};

/// Front matter key holding the lifecycle status
pub const STATUS_KEY: &str = "status";
/// Front matter key holding the EIP number
pub const EIP_KEY: &str = "eip";
/// Front matter key holding the free-text author list
pub const AUTHOR_KEY: &str = "author";

/// Content of one document at one revision
#[derive(Debug, Clone, Default)]
pub struct DocumentRevision {
    /// Front matter key/value pairs
    pub metadata: Mapping,
    /// Markdown body after the front matter
    pub body: String,
}

impl DocumentRevision {
    /// Decode base64 file content (as returned by the contents API) and parse it
    pub fn from_base64(encoded: &str) -> Result<Self> {
        // The API wraps base64 at 60 columns
        let compact: String = encoded.chars().filter(|c| !c.is_whitespace()).collect();
        let bytes = STANDARD
            .decode(compact)
            .map_err(|e| Error::Document(format!("invalid base64 content: {e}")))?;
        let text = String::from_utf8(bytes)
            .map_err(|e| Error::Document(format!("content is not UTF-8: {e}")))?;
        Self::parse(&text)
    }

    /// Parse a document's text into front matter and body
    pub fn parse(content: &str) -> Result<Self> {
        let normalized = normalize_content(content);
        let Some((front_matter, body)) = split_front_matter(&normalized)? else {
            return Ok(Self {
                metadata: Mapping::new(),
                body: normalized,
            });
        };

        let metadata = match serde_yaml::from_str::<Value>(front_matter)
            .map_err(|e| Error::Document(format!("failed to parse YAML front matter: {e}")))?
        {
            Value::Mapping(map) => map,
            Value::Null => Mapping::new(),
            other => {
                return Err(Error::Document(format!(
                    "front matter is not a mapping: {}",
                    render_value(&other)
                )));
            }
        };

        Ok(Self {
            metadata,
            body: body.to_string(),
        })
    }

    /// Raw metadata value for `key`
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.metadata.get(key)
    }

    /// The `status` field, if it is a string
    pub fn status(&self) -> Option<&str> {
        self.get(STATUS_KEY).and_then(Value::as_str)
    }

    /// The `eip` field, if it is a non-negative integer
    ///
    /// Quoted numbers do not count: a header of `eip: "100"` is treated as
    /// not matching EIP 100.
    pub fn eip(&self) -> Option<u64> {
        self.get(EIP_KEY).and_then(Value::as_u64)
    }

    /// The `author` field, if it is a string
    pub fn author(&self) -> Option<&str> {
        self.get(AUTHOR_KEY).and_then(Value::as_str)
    }

    /// Human-readable rendering of a field for rejection messages
    pub fn display_field(&self, key: &str) -> String {
        self.get(key)
            .map_or_else(|| "(missing)".to_string(), render_value)
    }
}

fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "(missing)".to_string(),
        other => serde_yaml::to_string(other)
            .map(|s| s.trim().to_string())
            .unwrap_or_else(|_| format!("{other:?}")),
    }
}

/// Strip a UTF-8 BOM and normalize line endings to LF
fn normalize_content(content: &str) -> String {
    let s = content.strip_prefix('\u{FEFF}').unwrap_or(content);
    s.replace("\r\n", "\n").replace('\r', "\n")
}

/// Split `---` delimited front matter from the body
///
/// Returns `None` when the document does not open with a delimiter line.
fn split_front_matter(content: &str) -> Result<Option<(&str, &str)>> {
    let Some(rest) = content.strip_prefix("---\n") else {
        return Ok(None);
    };

    // Closing delimiter may be the very next line (empty front matter)
    if let Some(body) = rest.strip_prefix("---")
        && (body.is_empty() || body.starts_with('\n'))
    {
        return Ok(Some(("", body.strip_prefix('\n').unwrap_or(body))));
    }

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if offset > 0 && line.trim_end() == "---" {
            let front_matter = &rest[..offset];
            let body = &rest[offset + line.len()..];
            return Ok(Some((front_matter, body)));
        }
        offset += line.len();
    }

    Err(Error::Document(
        "front matter is not closed by a `---` line".to_string(),
    ))
}
