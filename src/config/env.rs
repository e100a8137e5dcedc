use anyhow::{anyhow, Result};
use std::fmt::Display;
use std::str::FromStr;

/// Reads `key` through `lookup` and parses it. Unset or blank values give `default`;
/// a value that does not parse is an error rather than silently replaced.
pub(crate) fn parse_var<L, T>(lookup: &L, key: &str, default: T) -> Result<T>
where
    L: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: Display,
{
    match lookup(key).filter(|value| !value.trim().is_empty()) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|err| anyhow!("Invalid {} '{}': {}", key, value, err)),
        None => Ok(default),
    }
}

pub(crate) fn string_var<L>(lookup: &L, key: &str, default: &str) -> String
where
    L: Fn(&str) -> Option<String>,
{
    lookup(key)
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

#[cfg(test)]
pub(crate) fn map_lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: std::collections::HashMap<String, String> = pairs
        .iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect();
    move |key| vars.get(key).cloned()
}
