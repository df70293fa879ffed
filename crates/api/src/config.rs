//! Application configuration loaded from environment variables.

use std::path::PathBuf;

use domain::{RejectPolicy, StoreConfig};
use thiserror::Error;

/// A configuration variable holds a value that cannot be used.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid value for {var}: {message}")]
pub struct ConfigError {
    pub var: &'static str,
    pub message: String,
}

/// Server configuration with sensible defaults.
///
/// Reads from environment variables:
/// - `HOST` — bind address (default: `"127.0.0.1"`)
/// - `PORT` — listen port (default: `3000`)
/// - `RUST_LOG` — tracing filter directive (default: `"info"`)
/// - `EMS_DATA_DIR` — directory for the JSON documents (default: in-memory)
/// - `EMS_REJECT_POLICY` — `unconditional`, `pending-only` or `restore-inventory`
/// - `EMS_ALLOW_CREDITS` — accept negative deductions (default: `false`)
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub log_level: String,
    pub data_dir: Option<PathBuf>,
    pub reject_policy: RejectPolicy,
    pub allow_credits: bool,
}

impl Config {
    /// Loads configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Loads configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let port = match var("PORT") {
            Some(p) => p.trim().parse::<u16>().map_err(|e| ConfigError {
                var: "PORT",
                message: format!("{e}"),
            })?,
            None => defaults.port,
        };

        let reject_policy = match var("EMS_REJECT_POLICY") {
            Some(p) => p.parse::<RejectPolicy>().map_err(|message| ConfigError {
                var: "EMS_REJECT_POLICY",
                message,
            })?,
            None => defaults.reject_policy,
        };

        let allow_credits = match var("EMS_ALLOW_CREDITS") {
            Some(v) => parse_bool(&v).ok_or_else(|| ConfigError {
                var: "EMS_ALLOW_CREDITS",
                message: format!("expected true or false, got {v}"),
            })?,
            None => defaults.allow_credits,
        };

        Ok(Self {
            host: var("HOST").unwrap_or(defaults.host),
            port,
            log_level: var("RUST_LOG").unwrap_or(defaults.log_level),
            data_dir: var("EMS_DATA_DIR").map(PathBuf::from),
            reject_policy,
            allow_credits,
        })
    }

    /// Returns the `"host:port"` bind address string.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Returns the domain store configuration.
    pub fn store_config(&self) -> StoreConfig {
        StoreConfig::default()
            .with_reject_policy(self.reject_policy)
            .with_allow_credits(self.allow_credits)
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            log_level: "info".to_string(),
            data_dir: None,
            reject_policy: RejectPolicy::default(),
            allow_credits: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn from_pairs(pairs: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_default_values() {
        let config = Config::default();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 3000);
        assert_eq!(config.log_level, "info");
        assert!(config.data_dir.is_none());
        assert_eq!(config.reject_policy, RejectPolicy::Unconditional);
        assert!(!config.allow_credits);
    }

    #[test]
    fn test_empty_environment_gives_defaults() {
        let config = from_pairs(&[]).unwrap();
        assert_eq!(config.addr(), "127.0.0.1:3000");
    }

    #[test]
    fn test_reads_all_variables() {
        let config = from_pairs(&[
            ("HOST", "0.0.0.0"),
            ("PORT", "8080"),
            ("RUST_LOG", "debug"),
            ("EMS_DATA_DIR", "/var/lib/ems"),
            ("EMS_REJECT_POLICY", "restore-inventory"),
            ("EMS_ALLOW_CREDITS", "yes"),
        ])
        .unwrap();

        assert_eq!(config.addr(), "0.0.0.0:8080");
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.data_dir, Some(PathBuf::from("/var/lib/ems")));

        let store = config.store_config();
        assert_eq!(store.reject_policy, RejectPolicy::RestoreInventory);
        assert!(store.allow_credits);
    }

    #[test]
    fn test_invalid_values_are_errors() {
        assert_eq!(from_pairs(&[("PORT", "http")]).unwrap_err().var, "PORT");
        assert_eq!(
            from_pairs(&[("EMS_REJECT_POLICY", "maybe")])
                .unwrap_err()
                .var,
            "EMS_REJECT_POLICY"
        );
        assert_eq!(
            from_pairs(&[("EMS_ALLOW_CREDITS", "perhaps")])
                .unwrap_err()
                .var,
            "EMS_ALLOW_CREDITS"
        );
    }

    #[test]
    fn test_blank_values_use_defaults() {
        let config = from_pairs(&[("PORT", " "), ("EMS_DATA_DIR", "")]).unwrap();
        assert_eq!(config.port, 3000);
        assert!(config.data_dir.is_none());
    }
}
