/// Utility Functions for Environment Access and Timestamps
///
/// Configuration comes exclusively from environment variables. These helpers
/// keep the lookup and fallback rules in one place.

use chrono::{SecondsFormat, Utc};
use std::str::FromStr;

/// Get environment variable value with a default fallback.
///
/// # Example
/// ```ignore
/// let host = get_env_var("HOST", "0.0.0.0");
/// ```
pub fn get_env_var(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Parse an environment variable, falling back to `default` when the
/// variable is unset or does not parse.
///
/// Unparseable values are logged so a typo in deployment config is visible.
pub fn get_env_parsed<T>(key: &str, default: T) -> T
where
    T: FromStr + std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => parse_or_default(key, &raw, default),
        Err(_) => default,
    }
}

/// Read a boolean flag. Accepts `1/0`, `true/false`, `yes/no`, `on/off`.
pub fn get_env_flag(key: &str, default: bool) -> bool {
    match std::env::var(key) {
        Ok(raw) => parse_flag(&raw).unwrap_or_else(|| {
            tracing::warn!(key, value = %raw, default, "ignoring invalid boolean flag");
            default
        }),
        Err(_) => default,
    }
}

fn parse_or_default<T>(key: &str, raw: &str, default: T) -> T
where
    T: FromStr + std::fmt::Display,
{
    raw.trim().parse::<T>().unwrap_or_else(|_| {
        tracing::warn!(key, value = %raw, %default, "ignoring invalid value");
        default
    })
}

pub(crate) fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Current UTC time as ISO-8601 with millisecond precision,
/// e.g. `2024-11-05T12:00:00.000Z`.
pub fn iso_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_accept_common_spellings() {
        assert_eq!(parse_flag("true"), Some(true));
        assert_eq!(parse_flag(" ON "), Some(true));
        assert_eq!(parse_flag("0"), Some(false));
        assert_eq!(parse_flag("No"), Some(false));
        assert_eq!(parse_flag("maybe"), None);
    }

    #[test]
    fn parse_falls_back_on_garbage() {
        assert_eq!(parse_or_default::<u16>("PORT", "8080", 3000), 8080);
        assert_eq!(parse_or_default::<u16>("PORT", "eighty", 3000), 3000);
        assert_eq!(parse_or_default::<u16>("PORT", "70000", 3000), 3000);
    }

    #[test]
    fn unset_variable_uses_default() {
        assert_eq!(
            get_env_var("HELLO_GPT_APP_SURELY_UNSET", "fallback"),
            "fallback"
        );
        assert_eq!(get_env_parsed("HELLO_GPT_APP_SURELY_UNSET", 7u32), 7);
        assert!(get_env_flag("HELLO_GPT_APP_SURELY_UNSET", true));
    }

    #[test]
    fn timestamp_is_utc_millis() {
        let ts = iso_timestamp();
        assert!(ts.ends_with('Z'));
        // YYYY-MM-DDTHH:MM:SS.mmmZ
        assert_eq!(ts.len(), 24);
        assert!(chrono::DateTime::parse_from_rfc3339(&ts).is_ok());
    }
}
