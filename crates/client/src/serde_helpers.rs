//! Serde helpers for splunkd's inconsistent JSON typing.
//!
//! Responsibilities:
//! - Provide deserializers that accept either JSON numbers or strings for numeric fields.
//! - Decode `"0"`/`"1"` style flags into booleans.
//! - Keep parsing behavior centralized so model definitions stay readable and consistent.
//!
//! Explicitly does NOT handle:
//! - Validating higher-level semantics (ranges, required/optional business rules).
//! - Normalizing units or performing domain conversions.
//!
//! Invariants / assumptions:
//! - splunkd may return numeric fields as `"123"` strings or as `123` numbers depending on endpoint/version.
//! - Flags arrive as `"1"`, `1`, `true` or their negatives.

use serde::Deserialize;
use serde::de::Error as _;

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum StringOrNumber {
    String(String),
    U64(u64),
    I64(i64),
    F64(f64),
    Bool(bool),
}

impl StringOrNumber {
    fn into_f64<E: serde::de::Error>(self) -> Result<f64, E> {
        match self {
            StringOrNumber::String(s) => s.trim().parse::<f64>().map_err(E::custom),
            StringOrNumber::U64(v) => Ok(v as f64),
            StringOrNumber::I64(v) => Ok(v as f64),
            StringOrNumber::F64(v) => Ok(v),
            StringOrNumber::Bool(_) => Err(E::custom("expected a number, found a boolean")),
        }
    }

    fn into_u64<E: serde::de::Error>(self) -> Result<u64, E> {
        match self {
            StringOrNumber::String(s) => {
                let s = s.trim();
                s.parse::<u64>()
                    .or_else(|_| s.parse::<f64>().map(|f| f.max(0.0) as u64))
                    .map_err(E::custom)
            }
            StringOrNumber::U64(v) => Ok(v),
            StringOrNumber::I64(v) => u64::try_from(v).map_err(E::custom),
            StringOrNumber::F64(v) => Ok(v.max(0.0) as u64),
            StringOrNumber::Bool(_) => Err(E::custom("expected a number, found a boolean")),
        }
    }

    fn into_string(self) -> String {
        match self {
            StringOrNumber::String(s) => s,
            StringOrNumber::U64(v) => v.to_string(),
            StringOrNumber::I64(v) => v.to_string(),
            StringOrNumber::F64(v) => v.to_string(),
            StringOrNumber::Bool(v) => v.to_string(),
        }
    }

    fn into_flag<E: serde::de::Error>(self) -> Result<bool, E> {
        match self {
            StringOrNumber::Bool(v) => Ok(v),
            StringOrNumber::U64(v) => Ok(v != 0),
            StringOrNumber::I64(v) => Ok(v != 0),
            StringOrNumber::F64(v) => Ok(v != 0.0),
            StringOrNumber::String(s) => match s.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "t" => Ok(true),
                "0" | "false" | "no" | "f" | "" => Ok(false),
                other => Err(E::custom(format!("invalid flag value '{other}'"))),
            },
        }
    }
}

pub fn u64_from_string_or_number<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    StringOrNumber::deserialize(deserializer)?.into_u64()
}

pub fn opt_u64_from_string_or_number<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Option::<StringOrNumber>::deserialize(deserializer)?
        .map(StringOrNumber::into_u64)
        .transpose()
}

pub fn f64_from_string_or_number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    StringOrNumber::deserialize(deserializer)?.into_f64()
}

pub fn opt_f64_from_string_or_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Option::<StringOrNumber>::deserialize(deserializer)?
        .map(StringOrNumber::into_f64)
        .transpose()
}

pub fn string_from_number_or_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(StringOrNumber::deserialize(deserializer)?.into_string())
}

pub fn opt_string_from_number_or_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<StringOrNumber>::deserialize(deserializer)?.map(StringOrNumber::into_string))
}

/// `"1"`/`1`/`true` style flag. A JSON null decodes as `false`.
pub fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: serde::Deserializer<'de>,
{
    match Option::<StringOrNumber>::deserialize(deserializer)? {
        Some(value) => value.into_flag(),
        None => Ok(false),
    }
}

/// Render a loosely typed JSON field as text: strings verbatim, numbers and
/// booleans via `to_string`, anything else (including absence) as empty.
pub fn value_text(value: &serde_json::Value, key: &str) -> String {
    match value.get(key) {
        Some(serde_json::Value::String(s)) => s.clone(),
        Some(serde_json::Value::Number(n)) => n.to_string(),
        Some(serde_json::Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    }
}

/// Numeric JSON field that may be encoded as a string.
pub fn value_f64(value: &serde_json::Value, key: &str) -> Option<f64> {
    match value.get(key)? {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
