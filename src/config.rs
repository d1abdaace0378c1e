//! Configuration file structures for the telesweep library.
//!
//! The configuration is a YAML file with a single `telegram` section holding the
//! application credentials obtained from the API provider. Values can be
//! overridden with `TELESWEEP_`-prefixed environment variables (`__` separates
//! sections from keys).
//!
//! # Configuration File Format
//!
//! ```yaml
//! telegram:
//!   # Numeric application identifier, kept as a string and validated later
//!   api_id: "111999"
//!
//!   # Application secret issued together with the identifier
//!   api_hash: "456999aabbcc"
//! ```
//!
//! Both values are deliberately stored as strings: the original credential store
//! behind this layer is an opaque key-value collaborator, so parsing and
//! validation happen in [`crate::telegram::Credentials`], before any network
//! call is made.

use figment::{
    Figment,
    providers::{Env, Format, Yaml},
};
use mockall::automock;
use serde::Deserialize;

/// Environment variable prefix for configuration overrides.
const ENV_PREFIX: &str = "TELESWEEP_";

/// Root configuration structure.
///
/// # Examples
///
/// ```no_run
/// use telesweep::config::Config;
///
/// let config = Config::load("config.yaml").unwrap();
/// ```
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Telegram application credentials
    #[serde(default)]
    pub telegram: Telegram,
}

/// Telegram application credential section.
///
/// # YAML Section
///
/// ```yaml
/// telegram:
///   api_id: "111999"
///   api_hash: "456999aabbcc"
/// ```
#[derive(Debug, Default, Deserialize)]
pub struct Telegram {
    /// Application identifier as issued by the API provider.
    ///
    /// Must contain a decimal integer. Kept as a string here; validated when an
    /// operation starts.
    #[serde(default)]
    pub api_id: Option<String>,

    /// Application secret issued together with the identifier.
    #[serde(default)]
    pub api_hash: Option<String>,
}

impl Config {
    /// Load the configuration from a YAML file with environment overrides.
    ///
    /// Environment variables take precedence over the file, e.g.
    /// `TELESWEEP_TELEGRAM__API_ID` overrides `telegram.api_id`. A missing file
    /// is not an error by itself; the resulting configuration simply has no
    /// credentials and operations will fail with a configuration error.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the YAML configuration file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be parsed.
    pub fn load(path: &str) -> Result<Config, figment::Error> {
        Figment::new()
            .merge(Yaml::file(path))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
    }
}

/// Capability trait supplying the application credentials.
///
/// The original settings store behind this layer is a platform key-value
/// collaborator owned by the UI; this trait is the injected replacement for it.
/// Values are raw strings, `None` when the key is absent.
#[automock]
pub trait SettingsProvider {
    /// Raw application identifier, if configured.
    fn app_id(&self) -> Option<String>;
    /// Raw application secret, if configured.
    fn app_secret(&self) -> Option<String>;
}

impl SettingsProvider for Config {
    fn app_id(&self) -> Option<String> {
        self.telegram.api_id.clone()
    }

    fn app_secret(&self) -> Option<String> {
        self.telegram.api_hash.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::fs;
    use tempfile::TempDir;

    fn write_config(dir: &TempDir, content: &str) -> String {
        let path = dir.path().join("config.yaml");
        fs::write(&path, content).unwrap();
        path.to_str().unwrap().to_owned()
    }

    #[test]
    #[serial]
    fn test_load_full_config() {
        let dir = TempDir::new().unwrap();
        let path = write_config(
            &dir,
            "telegram:\n  api_id: \"111999\"\n  api_hash: \"456999\"\n",
        );

        let config = Config::load(&path).unwrap();
        assert_eq!(config.telegram.api_id, Some("111999".to_owned()));
        assert_eq!(config.telegram.api_hash, Some("456999".to_owned()));
    }

    #[test]
    #[serial]
    fn test_load_missing_file_yields_empty_config() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nonexistent.yaml");

        let config = Config::load(path.to_str().unwrap()).unwrap();
        assert_eq!(config.telegram.api_id, None);
        assert_eq!(config.telegram.api_hash, None);
    }

    #[test]
    #[serial]
    fn test_load_partial_config() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "telegram:\n  api_id: \"111999\"\n");

        let config = Config::load(&path).unwrap();
        assert_eq!(config.telegram.api_id, Some("111999".to_owned()));
        assert_eq!(config.telegram.api_hash, None);
    }

    #[test]
    #[serial]
    fn test_env_overrides_file() {
        let dir = TempDir::new().unwrap();
        let path = write_config(
            &dir,
            "telegram:\n  api_id: \"111999\"\n  api_hash: \"from-file\"\n",
        );

        unsafe { std::env::set_var("TELESWEEP_TELEGRAM__API_HASH", "from-env") };
        let config = Config::load(&path).unwrap();
        unsafe { std::env::remove_var("TELESWEEP_TELEGRAM__API_HASH") };

        assert_eq!(config.telegram.api_id, Some("111999".to_owned()));
        assert_eq!(config.telegram.api_hash, Some("from-env".to_owned()));
    }

    #[test]
    #[serial]
    fn test_settings_provider_impl() {
        let config = Config {
            telegram: Telegram {
                api_id: Some("111999".to_owned()),
                api_hash: Some("456999".to_owned()),
            },
        };

        assert_eq!(config.app_id(), Some("111999".to_owned()));
        assert_eq!(config.app_secret(), Some("456999".to_owned()));
    }
}
