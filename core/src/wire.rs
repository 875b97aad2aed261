//! Lenient scalar decoding for XML attributes.
//!
//! The API writes booleans in several spellings and sometimes sends empty
//! attributes where a number is expected. Empty values decode to the type's
//! default, matching what an absent attribute yields.

use std::fmt::Display;
use std::str::FromStr;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer};

pub(crate) fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim() {
        "" => Some(false),
        "1" | "t" | "T" | "true" | "True" | "TRUE" => Some(true),
        "0" | "f" | "F" | "false" | "False" | "FALSE" => Some(false),
        _ => None,
    }
}

pub(crate) fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_flag(&raw).ok_or_else(|| D::Error::custom(format!("invalid boolean: {raw:?}")))
}

/// Like `flag`, but an empty value decodes to `None` so callers can tell
/// "not reported" from an explicit `false`. Pair with `default` for the
/// absent case.
pub(crate) fn optional_flag<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    if raw.trim().is_empty() {
        return Ok(None);
    }
    parse_flag(&raw)
        .map(Some)
        .ok_or_else(|| D::Error::custom(format!("invalid boolean: {raw:?}")))
}

pub(crate) fn number<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr + Default,
    T::Err: Display,
{
    let raw = String::deserialize(deserializer)?;
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(T::default());
    }
    raw.parse()
        .map_err(|e| D::Error::custom(format!("invalid number {raw:?}: {e}")))
}
