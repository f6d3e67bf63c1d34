//! Normalizers for loosely typed header, form and credential input.
//!
//! # Design
//! Callers hand in a `serde_json::Value` so the same entry points accept a
//! mapping, a list of `[key, value]` pairs or a list of curl-style
//! `"key: value"` / `"key=value"` strings. Headers and form fields share one
//! algorithm parameterized by the separator.

use std::sync::LazyLock;

use indexmap::IndexMap;
use regex::Regex;
use serde_json::Value;

use crate::error::CurlError;

/// Normalized headers or form fields. Keys keep the caller's casing; a
/// repeated key keeps the last value.
pub type Fields = IndexMap<String, String>;

/// Separator between name and value in a curl-style header string.
pub const HEADER_SEPARATOR: &str = ": ";

/// Separator between name and value in a curl-style form string.
pub const FORM_SEPARATOR: &str = "=";

static CREDENTIALS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.*):(.*)").expect("credentials pattern is valid"));

/// Convert any header-compatible value into `Fields`.
pub fn normalize_headers(headers: &Value) -> Result<Fields, CurlError> {
    normalize_header_and_form(headers, HEADER_SEPARATOR)
}

/// Convert any form-compatible value into `Fields`.
pub fn normalize_forms(forms: &Value) -> Result<Fields, CurlError> {
    normalize_header_and_form(forms, FORM_SEPARATOR)
}

/// Shared normalizer for headers and form fields.
///
/// Strings are split on the first occurrence of `separator`, so
/// `"a=b=c"` becomes `a` → `b=c`. A string without the separator is
/// rejected.
pub fn normalize_header_and_form(value: &Value, separator: &str) -> Result<Fields, CurlError> {
    match value {
        Value::Object(map) => {
            let mut fields = Fields::with_capacity(map.len());
            for (key, val) in map {
                fields.insert(key.clone(), expect_str(val)?.to_string());
            }
            Ok(fields)
        }
        Value::Array(items) => {
            let mut fields = Fields::with_capacity(items.len());
            for item in items {
                let (key, val) = split_entry(item, separator)?;
                fields.insert(key, val);
            }
            Ok(fields)
        }
        other => Err(CurlError::incompatible(format!(
            "must be mapping or iterable, got {}",
            type_name(other)
        ))),
    }
}

fn split_entry(item: &Value, separator: &str) -> Result<(String, String), CurlError> {
    match item {
        Value::String(entry) => match entry.split_once(separator) {
            Some((key, val)) => Ok((key.to_string(), val.to_string())),
            None => Err(CurlError::incompatible(format!(
                "malformed entry {entry:?}, expected `key{separator}value`"
            ))),
        },
        Value::Array(pair) if pair.len() == 2 => {
            let key = expect_str(&pair[0])?;
            let val = expect_str(&pair[1])?;
            Ok((key.to_string(), val.to_string()))
        }
        other => Err(CurlError::incompatible(format!(
            "element must be a string or a pair, got {}",
            type_name(other)
        ))),
    }
}

/// Convert a `[login, password]` pair or a `"login:password"` string into a
/// credentials tuple.
///
/// With several colons the login takes everything up to the last one:
/// `"a:b:c"` yields `("a:b", "c")`.
pub fn normalize_auth(auth: &Value) -> Result<(String, String), CurlError> {
    match auth {
        Value::Array(pair) => {
            if pair.len() != 2 {
                return Err(CurlError::incompatible(format!(
                    "credentials must be a pair of login and password, got {} elements",
                    pair.len()
                )));
            }
            let login = expect_str(&pair[0])?;
            let password = expect_str(&pair[1])?;
            Ok((login.to_string(), password.to_string()))
        }
        Value::String(raw) => {
            let caps = CREDENTIALS_RE.captures(raw).ok_or_else(|| {
                CurlError::incompatible("credentials are invalid, expected `LOGIN:PASSWORD`")
            })?;
            Ok((caps[1].to_string(), caps[2].to_string()))
        }
        other => Err(CurlError::incompatible(format!(
            "credentials must be a pair or a string, got {}",
            type_name(other)
        ))),
    }
}

fn expect_str(value: &Value) -> Result<&str, CurlError> {
    value
        .as_str()
        .ok_or_else(|| CurlError::incompatible(format!("expected string, got {}", type_name(value))))
}

pub(crate) fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
