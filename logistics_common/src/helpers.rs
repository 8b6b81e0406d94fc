use std::{fmt::Display, str::FromStr};

use thiserror::Error;

#[derive(Debug, Clone, Error)]
#[error("{var} is not a valid value: {value}. {reason}")]
pub struct EnvParseError {
    pub var: String,
    pub value: String,
    pub reason: String,
}

/// Parse a boolean flag from a string value, or return the given default value otherwise.
pub fn parse_boolean_flag(value: Option<String>, default: bool) -> bool {
    let value = match value {
        Some(v) => v,
        None => return default,
    };
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => true,
        "0" | "false" | "no" | "off" => false,
        _ => default,
    }
}

/// Parse a numeric environment value. `Ok(None)` means the variable is not set.
pub fn parse_env_number<T>(var: &str, value: Option<String>) -> Result<Option<T>, EnvParseError>
where
    T: FromStr,
    T::Err: Display,
{
    match value {
        None => Ok(None),
        Some(v) => v.trim().parse::<T>().map(Some).map_err(|e| EnvParseError {
            var: var.to_string(),
            value: v,
            reason: e.to_string(),
        }),
    }
}

/// Joins the non-empty, trimmed parts with `", "`.
pub fn join_non_empty<'a, I>(parts: I) -> String
where I: IntoIterator<Item = Option<&'a str>> {
    parts
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect::<Vec<&str>>()
        .join(", ")
}
