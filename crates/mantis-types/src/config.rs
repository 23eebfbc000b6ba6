//! Configuration for a Mantis bot instance.
//!
//! [`BotConfig`] is loaded from `mantis.toml` with `MANTIS_*` environment
//! variables applied on top (env wins). All fields have defaults so the
//! bot starts from an empty config.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::ids::Jid;
use crate::MantisError;

/// Connection settings for the WhatsApp gateway the bot talks to.
///
/// The gateway owns the actual WhatsApp protocol session; Mantis only
/// exchanges JSON with it over HTTP.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GatewayConfig {
    /// Base URL of the gateway API.
    pub api_url: String,
    /// Bearer token for gateway requests.
    pub auth_token: String,
    /// Long-poll timeout for the inbound event feed, in seconds.
    #[serde(default = "default_poll_timeout")]
    pub poll_timeout_secs: u64,
}

fn default_poll_timeout() -> u64 {
    20
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            api_url: "http://127.0.0.1:3000".to_string(),
            auth_token: String::new(),
            poll_timeout_secs: default_poll_timeout(),
        }
    }
}

/// Top-level configuration for a Mantis bot instance.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct BotConfig {
    /// Leading character sequence that marks a chat message as a command.
    pub prefix: String,
    /// Phone numbers (or full jids) allowed to use owner-only commands.
    pub owner_numbers: Vec<String>,
    /// Optional HTTPS URL of an opaque session-credentials blob to
    /// download when no local session exists.
    pub session_url: Option<String>,
    /// Directory holding the session credentials file.
    pub session_dir: PathBuf,
    /// Listen address for the health endpoint.
    pub health_listen: String,
    /// Gateway connection settings.
    pub gateway: GatewayConfig,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            prefix: ".".to_string(),
            owner_numbers: Vec::new(),
            session_url: None,
            session_dir: PathBuf::from("session"),
            health_listen: "0.0.0.0:8000".to_string(),
            gateway: GatewayConfig::default(),
        }
    }
}

impl BotConfig {
    /// Parse a configuration from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, MantisError> {
        toml::from_str(content).map_err(|e| MantisError::ConfigError(e.to_string()))
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml(&self) -> Result<String, MantisError> {
        toml::to_string_pretty(self).map_err(|e| MantisError::ConfigError(e.to_string()))
    }

    /// Load the effective configuration: defaults, then the optional
    /// config file, then `MANTIS_*` environment variables.
    pub fn load(path: Option<&Path>) -> Result<Self, MantisError> {
        let mut config = match path {
            Some(p) => {
                let content = std::fs::read_to_string(p).map_err(|e| {
                    MantisError::ConfigError(format!("failed to read {}: {e}", p.display()))
                })?;
                Self::from_toml(&content)?
            }
            None => Self::default(),
        };
        config.apply_env_overrides();
        Ok(config)
    }

    /// Apply `MANTIS_*` environment variable overrides in place.
    ///
    /// `MANTIS_OWNER_NUMBER` accepts a comma-separated list.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(v) = std::env::var("MANTIS_PREFIX") {
            self.prefix = v;
        }
        if let Ok(v) = std::env::var("MANTIS_OWNER_NUMBER") {
            self.owner_numbers = v
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect();
        }
        if let Ok(v) = std::env::var("MANTIS_SESSION_URL") {
            self.session_url = if v.is_empty() { None } else { Some(v) };
        }
        if let Ok(v) = std::env::var("MANTIS_SESSION_DIR") {
            self.session_dir = PathBuf::from(v);
        }
        if let Ok(v) = std::env::var("MANTIS_HEALTH_LISTEN") {
            self.health_listen = v;
        }
        if let Ok(v) = std::env::var("MANTIS_GATEWAY_URL") {
            self.gateway.api_url = v;
        }
        if let Ok(v) = std::env::var("MANTIS_GATEWAY_TOKEN") {
            self.gateway.auth_token = v;
        }
    }

    /// Whether the given bare phone number belongs to a configured owner.
    ///
    /// Owner entries may be bare numbers or full jids; both compare by
    /// their bare user part.
    pub fn is_owner(&self, bare_number: &str) -> bool {
        self.owner_numbers
            .iter()
            .any(|o| Jid::new(o.as_str()).bare() == bare_number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Environment variables are process-global state, so tests that set
    /// `MANTIS_*` vars or call [`BotConfig::load`] (which reads them)
    /// must not run concurrently.
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    const ENV_VARS: &[&str] = &[
        "MANTIS_PREFIX",
        "MANTIS_OWNER_NUMBER",
        "MANTIS_SESSION_URL",
        "MANTIS_SESSION_DIR",
        "MANTIS_HEALTH_LISTEN",
        "MANTIS_GATEWAY_URL",
        "MANTIS_GATEWAY_TOKEN",
    ];

    fn clear_mantis_env_vars() {
        for var in ENV_VARS {
            std::env::remove_var(var);
        }
    }

    #[test]
    fn defaults() {
        let config = BotConfig::default();
        assert_eq!(config.prefix, ".");
        assert!(config.owner_numbers.is_empty());
        assert_eq!(config.health_listen, "0.0.0.0:8000");
        assert_eq!(config.gateway.poll_timeout_secs, 20);
    }

    #[test]
    fn toml_roundtrip() {
        let config = BotConfig {
            prefix: "!".into(),
            owner_numbers: vec!["49170000000".into()],
            session_url: Some("https://blob.example/abc".into()),
            session_dir: PathBuf::from("/var/lib/mantis"),
            health_listen: "127.0.0.1:9000".into(),
            gateway: GatewayConfig {
                api_url: "http://gateway:3000".into(),
                auth_token: "secret".into(),
                poll_timeout_secs: 5,
            },
        };
        let toml_str = config.to_toml().unwrap();
        let back = BotConfig::from_toml(&toml_str).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let config = BotConfig::from_toml("prefix = \"!\"").unwrap();
        assert_eq!(config.prefix, "!");
        assert_eq!(config.session_dir, PathBuf::from("session"));
    }

    #[test]
    fn invalid_toml_is_config_error() {
        let err = BotConfig::from_toml("prefix = [").unwrap_err();
        assert!(matches!(err, MantisError::ConfigError(_)));
    }

    #[test]
    fn load_missing_file_is_error() {
        let err = BotConfig::load(Some(Path::new("/nonexistent/mantis.toml"))).unwrap_err();
        assert!(matches!(err, MantisError::ConfigError(_)));
    }

    #[test]
    fn load_reads_file() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_mantis_env_vars();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mantis.toml");
        std::fs::write(&path, "prefix = \"#\"\nowner_numbers = [\"111\"]\n").unwrap();
        let config = BotConfig::load(Some(&path)).unwrap();
        assert_eq!(config.prefix, "#");
        assert_eq!(config.owner_numbers, vec!["111".to_string()]);
    }

    #[test]
    fn owner_check_accepts_bare_number_and_jid() {
        let config = BotConfig {
            owner_numbers: vec!["49170000000".into(), "111@s.whatsapp.net".into()],
            ..Default::default()
        };
        assert!(config.is_owner("49170000000"));
        assert!(config.is_owner("111"));
        assert!(!config.is_owner("222"));
    }

    #[test]
    fn env_overrides_win() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_mantis_env_vars();
        std::env::set_var("MANTIS_PREFIX", "!");
        std::env::set_var("MANTIS_OWNER_NUMBER", "111, 222");
        let mut config = BotConfig::default();
        config.apply_env_overrides();
        clear_mantis_env_vars();

        assert_eq!(config.prefix, "!");
        assert_eq!(config.owner_numbers, vec!["111".to_string(), "222".to_string()]);
    }
}
