//! Application configuration with layered loading.
//!
//! Configuration is loaded in this order (later overrides earlier):
//!
//! 1. **Compiled defaults**: Hardcoded in struct `Default` implementations
//! 2. **Config file**: TOML file specified by `WAYPOINT_CONFIG` env var
//! 3. **Environment variables**: `WAYPOINT__*` env vars override specific fields
//!
//! # Example
//!
//! ```toml
//! [[chains]]
//! name = "ethereum"
//! rpc_urls = [
//!     "https://eth.llamarpc.com",
//!     "https://rpc.ankr.com/eth",
//! ]
//! algorithm = "fastest"
//!
//! [[chains]]
//! name = "polygon"
//! rpc_urls = ["https://polygon-rpc.com"]
//! algorithm = "round-robin"
//!
//! [logging]
//! level = "debug"
//! ```

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub use config::ConfigError;

/// Endpoint configuration for a single chain.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChainConfig {
    /// Chain identifier used to look this entry up (e.g., "ethereum").
    pub name: String,

    /// Candidate RPC URLs in priority order. Order matters for the
    /// failover algorithm and for round-robin rotation.
    pub rpc_urls: Vec<String>,

    /// Selection algorithm: `"fastest"`, `"round-robin"`, or `"failover"`.
    /// Unrecognized values fall back to fastest. Defaults to `"fastest"`.
    #[serde(default = "default_algorithm")]
    pub algorithm: String,

    /// JSON-RPC method used to read the chain height, for chains that do
    /// not speak `eth_blockNumber`.
    #[serde(default)]
    pub height_method: Option<String>,
}

fn default_algorithm() -> String {
    "fastest".to_string()
}

/// Application logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (e.g., "trace", "debug", "info", "warn", "error"). Defaults to `"info"`.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info".to_string() }
    }
}

/// Root application configuration.
///
/// Loaded from a TOML file with environment variable overrides under the
/// `WAYPOINT_` prefix using `__` as a separator.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    /// Per-chain endpoint configuration.
    #[serde(default)]
    pub chains: Vec<ChainConfig>,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Settings {
    /// Loads configuration from a TOML file with environment variable overrides.
    ///
    /// A missing file is not an error; defaults and environment variables
    /// still apply. Use `__` as a separator for nested fields
    /// (e.g., `WAYPOINT__LOGGING__LEVEL=debug`).
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be parsed or deserialized.
    pub fn from_file<P: AsRef<Path>>(config_path: P) -> Result<Self, ConfigError> {
        let config = Config::builder()
            .set_default("logging.level", "info")?
            .add_source(File::with_name(&config_path.as_ref().to_string_lossy()).required(false))
            .add_source(Environment::with_prefix("WAYPOINT").separator("__"))
            .build()?;

        config.try_deserialize()
    }

    /// Loads configuration from `config/waypoint.toml` with fallback to defaults.
    ///
    /// The config file path can be overridden with the `WAYPOINT_CONFIG`
    /// environment variable.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the configuration cannot be loaded or parsed.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = std::env::var("WAYPOINT_CONFIG")
            .unwrap_or_else(|_| "config/waypoint.toml".to_string());
        Self::from_file(&config_path)
    }

    /// Looks up a chain entry by name.
    #[must_use]
    pub fn chain(&self, name: &str) -> Option<&ChainConfig> {
        self.chains.iter().find(|c| c.name == name)
    }

    /// Validates the configuration for correctness and consistency.
    ///
    /// # Errors
    ///
    /// Returns a descriptive error string if a chain has an empty name,
    /// a duplicate name, no RPC URLs, or a URL that is not HTTP(S).
    pub fn validate(&self) -> Result<(), String> {
        for chain in &self.chains {
            if chain.name.is_empty() {
                return Err("Chain entry with empty name".to_string());
            }
            if chain.rpc_urls.is_empty() {
                return Err(format!("No RPC URLs configured for chain: {}", chain.name));
            }
            for url in &chain.rpc_urls {
                if !(url.starts_with("http://") || url.starts_with("https://")) {
                    return Err(format!("Invalid RPC URL for chain {}: {url}", chain.name));
                }
            }
        }

        for (i, chain) in self.chains.iter().enumerate() {
            if self.chains[..i].iter().any(|c| c.name == chain.name) {
                return Err(format!("Duplicate chain name: {}", chain.name));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain(name: &str, urls: &[&str]) -> ChainConfig {
        ChainConfig {
            name: name.to_string(),
            rpc_urls: urls.iter().map(|u| (*u).to_string()).collect(),
            algorithm: default_algorithm(),
            height_method: None,
        }
    }

    #[test]
    fn test_settings_defaults() {
        let settings = Settings::default();
        assert!(settings.chains.is_empty());
        assert_eq!(settings.logging.level, "info");
    }

    #[test]
    fn test_validation_rejects_bad_chains() {
        let mut settings = Settings::default();
        settings.chains.push(chain("ethereum", &["https://eth.example.com"]));
        assert!(settings.validate().is_ok());

        settings.chains.push(chain("broken", &[]));
        assert!(settings.validate().is_err());

        settings.chains[1] = chain("broken", &["ftp://nope"]);
        assert!(settings.validate().is_err());

        // Scheme must be exactly http or https, not just the prefix.
        settings.chains[1] = chain("broken", &["httpx://sneaky.example.com"]);
        assert!(settings.validate().is_err());

        settings.chains[1] = chain("plain", &["http://insecure.example.com"]);
        assert!(settings.validate().is_ok());

        settings.chains[1] = chain("ethereum", &["https://other.example.com"]);
        assert!(settings.validate().is_err(), "duplicate names must be rejected");
    }

    #[test]
    fn test_chain_lookup() {
        let mut settings = Settings::default();
        settings.chains.push(chain("ethereum", &["https://eth.example.com"]));

        assert!(settings.chain("ethereum").is_some());
        assert!(settings.chain("solana").is_none());
    }

    #[test]
    fn test_toml_deserialization() {
        let toml_content = r#"
[[chains]]
name = "ethereum"
rpc_urls = ["https://a.example.com", "https://b.example.com"]
algorithm = "round-robin"

[logging]
level = "debug"
"#;

        let settings: Settings = toml::from_str(toml_content).unwrap();
        assert_eq!(settings.chains.len(), 1);
        assert_eq!(settings.chains[0].name, "ethereum");
        assert_eq!(settings.chains[0].rpc_urls.len(), 2);
        assert_eq!(settings.chains[0].algorithm, "round-robin");
        assert!(settings.chains[0].height_method.is_none());
        assert_eq!(settings.logging.level, "debug");
    }

    #[test]
    fn test_toml_algorithm_defaults_to_fastest() {
        let toml_content = r#"
[[chains]]
name = "polygon"
rpc_urls = ["https://polygon.example.com"]
"#;

        let settings: Settings = toml::from_str(toml_content).unwrap();
        assert_eq!(settings.chains[0].algorithm, "fastest");
    }
}
