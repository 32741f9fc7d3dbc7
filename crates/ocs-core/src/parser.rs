//! Load game payloads (JSON or TOML) and parse formulas written as text.

use std::io::Read;
use std::path::Path;

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::consts::{ATTR_BIT, OP_BIT};
use crate::types::{LoadError, Operator};

/// Parse a payload from a JSON string.
pub fn parse_json<T: DeserializeOwned>(content: &str) -> Result<T, LoadError> {
    serde_json::from_str(content).map_err(|e| LoadError::Parse(e.to_string()))
}

/// Parse a payload from a TOML string.
pub fn parse_toml<T: DeserializeOwned>(content: &str) -> Result<T, LoadError> {
    toml::from_str(content).map_err(|e| LoadError::Parse(e.to_string()))
}

/// Read a file, or stdin when `path` is `-`.
pub fn read_source(path: &Path) -> Result<String, LoadError> {
    if path.as_os_str() == "-" {
        let mut content = String::new();
        std::io::stdin().read_to_string(&mut content)?;
        return Ok(content);
    }
    Ok(std::fs::read_to_string(path)?)
}

/// Load a payload from a file path (auto-detect TOML vs JSON by extension).
pub fn load<T: DeserializeOwned>(path: &Path) -> Result<T, LoadError> {
    let content = read_source(path)?;
    debug!(path = %path.display(), bytes = content.len(), "loaded payload");
    match path.extension().and_then(|e| e.to_str()) {
        Some("toml") => parse_toml(&content),
        Some("json") => parse_json(&content),
        _ => {
            // Try JSON first, then TOML
            parse_json(&content).or_else(|_| parse_toml(&content))
        }
    }
}

/// Parse a formula written as text into raw tagged integers.
///
/// Tokens are separated by whitespace or commas; surrounding brackets are
/// ignored. Accepted tokens:
/// - a raw integer, used as is (`8196`);
/// - an operator symbol (`+ - / * < >=`);
/// - `attr[N]` or `@N` for an attribute reference;
/// - `op[N]` for an operator by code, including unknown codes.
pub fn parse_formula(text: &str) -> Result<Vec<u32>, LoadError> {
    let trimmed = text.trim();
    let inner = trimmed
        .strip_prefix('[')
        .and_then(|s| s.strip_suffix(']'))
        .unwrap_or(trimmed);
    inner
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|t| !t.is_empty())
        .map(parse_token)
        .collect()
}

fn parse_token(token: &str) -> Result<u32, LoadError> {
    if let Some(op) = Operator::from_symbol(token) {
        return Ok(OP_BIT | op.code());
    }
    if let Some(index) = token
        .strip_prefix("attr[")
        .and_then(|s| s.strip_suffix(']'))
        .or_else(|| token.strip_prefix('@'))
    {
        return Ok(ATTR_BIT | parse_payload(token, index)?);
    }
    if let Some(code) = token.strip_prefix("op[").and_then(|s| s.strip_suffix(']')) {
        return Ok(OP_BIT | parse_payload(token, code)?);
    }
    token.parse::<u32>().map_err(|e| LoadError::InvalidToken {
        token: token.to_string(),
        reason: e.to_string(),
    })
}

fn parse_payload(token: &str, digits: &str) -> Result<u32, LoadError> {
    let value = digits.parse::<u32>().map_err(|e| LoadError::InvalidToken {
        token: token.to_string(),
        reason: e.to_string(),
    })?;
    if value >= ATTR_BIT {
        return Err(LoadError::InvalidToken {
            token: token.to_string(),
            reason: format!("payload must be below {ATTR_BIT}"),
        });
    }
    Ok(value)
}
