//! Process settings from environment variables.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;

/// Error returned when a setting is present but unusable.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {name}: {value:?}")]
pub struct SettingsError {
    name: &'static str,
    value: String,
}

/// Everything the server reads from its environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Rasp API key; empty means every API call will be rejected.
    pub api_key: String,
    pub bind_addr: SocketAddr,
    pub directory_cache_path: PathBuf,
    /// Country whose stations enter the directory.
    pub country: String,
    /// Longest message the chat transport accepts.
    pub max_message_length: usize,
    /// Longest route label that fits on a button.
    pub button_label_limit: usize,
}

impl Settings {
    /// Read settings from the process environment.
    pub fn from_env() -> Result<Self, SettingsError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read settings through `lookup`, falling back to defaults for unset
    /// variables.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, SettingsError> {
        let text = |name: &str, default: &str| lookup(name).unwrap_or_else(|| default.to_string());

        Ok(Self {
            api_key: text("RASP_API_KEY", ""),
            bind_addr: parse(&lookup, "BIND_ADDR", "127.0.0.1:3000")?,
            directory_cache_path: PathBuf::from(text("DIRECTORY_CACHE_PATH", "points_cache.json")),
            country: text("RASP_COUNTRY", "Россия"),
            max_message_length: parse(&lookup, "MAX_MESSAGE_LENGTH", "4096")?,
            button_label_limit: parse(&lookup, "BUTTON_LABEL_LIMIT", "38")?,
        })
    }
}

fn parse<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
    default: &str,
) -> Result<T, SettingsError> {
    let value = lookup(name).unwrap_or_else(|| default.to_string());
    value
        .trim()
        .parse()
        .map_err(|_| SettingsError { name, value })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn settings(vars: &[(&str, &str)]) -> Result<Settings, SettingsError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Settings::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn defaults() {
        let s = settings(&[]).unwrap();
        assert_eq!(s.api_key, "");
        assert_eq!(s.bind_addr, "127.0.0.1:3000".parse().unwrap());
        assert_eq!(s.directory_cache_path, PathBuf::from("points_cache.json"));
        assert_eq!(s.country, "Россия");
        assert_eq!(s.max_message_length, 4096);
        assert_eq!(s.button_label_limit, 38);
    }

    #[test]
    fn overrides() {
        let s = settings(&[
            ("RASP_API_KEY", "secret"),
            ("BIND_ADDR", "0.0.0.0:8080"),
            ("MAX_MESSAGE_LENGTH", " 2000 "),
            ("RASP_COUNTRY", "Беларусь"),
        ])
        .unwrap();
        assert_eq!(s.api_key, "secret");
        assert_eq!(s.bind_addr.port(), 8080);
        assert_eq!(s.max_message_length, 2000);
        assert_eq!(s.country, "Беларусь");
    }

    #[test]
    fn invalid_number() {
        let err = settings(&[("BUTTON_LABEL_LIMIT", "wide")]).unwrap_err();
        assert_eq!(err.to_string(), "invalid BUTTON_LABEL_LIMIT: \"wide\"");
    }

    #[test]
    fn invalid_address() {
        assert!(settings(&[("BIND_ADDR", "localhost")]).is_err());
    }
}
