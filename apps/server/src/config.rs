use std::{env, fmt, fs, io, path, time::Duration};

use actix_web::http::{Uri, header::HeaderValue};
use reqdash::RelayConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    ReadFailed { path: path::PathBuf, source: io::Error },
    #[error("Failed to write config {path}: {source}")]
    WriteFailed { path: path::PathBuf, source: io::Error },
    #[error("Failed to parse config: {0}")]
    ParseFailed(#[from] toml::de::Error),
    #[error("Failed to serialize config: {0}")]
    SerializeFailed(#[from] toml::ser::Error),
    #[error("No config path available: set XDG_CONFIG_HOME or HOME")]
    ConfigPathUnavailable,
    #[error("Invalid CORS origin `{0}`, expected an origin like https://app.example")]
    InvalidOrigin(String),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: Server,
    pub relay: Relay,
    pub cors: Cors,
    pub store: Store,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Server {
    pub bind: String,
    pub port: u16,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Relay {
    /// Deadline for one outbound call, in seconds
    pub timeout_secs: u64,
    pub max_redirects: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Cors {
    /// Accept any origin with a wildcard; `allowed_origins` is ignored
    pub allow_any_origin: bool,
    pub allowed_origins: Vec<String>,
    pub max_age_secs: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Store {
    /// JSON file for saved requests; in-memory when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<path::PathBuf>,
}

impl Default for Server {
    fn default() -> Self {
        Self { bind: "127.0.0.1".into(), port: 8787 }
    }
}

impl Default for Relay {
    fn default() -> Self {
        Self { timeout_secs: 30, max_redirects: 10, user_agent: None }
    }
}

impl Default for Cors {
    fn default() -> Self {
        Self { allow_any_origin: true, allowed_origins: Vec::new(), max_age_secs: 3600 }
    }
}

/// Used to ensure we are actually reading a toml file
fn normalize_toml_path(path: &path::Path) -> path::PathBuf {
    let mut path = path.to_path_buf();
    if path.extension().map(|ext| ext != "toml").unwrap_or(true) {
        path.set_extension("toml");
    }
    path
}

/// Get default config path ($XDG_CONFIG_HOME/reqdash/config.toml or
/// $HOME/.config/...)
fn default_config_path() -> Result<path::PathBuf, ConfigError> {
    let path = if let Ok(config_home) = env::var("XDG_CONFIG_HOME") {
        path::PathBuf::from(config_home)
    } else if let Some(home_dir) = env::home_dir() {
        home_dir.join(".config")
    } else {
        return Err(ConfigError::ConfigPathUnavailable);
    };

    Ok(path.join("reqdash/config.toml"))
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let write_indented = |level: usize| {
            move |f: &mut fmt::Formatter<'_>, label: &str, value: &dyn fmt::Display| {
                writeln!(f, "  {:indent$}{}: {}", "", label, value, indent = level * 2)
            }
        };
        let write_title_indented = |level: usize| {
            move |f: &mut fmt::Formatter<'_>, label: &str| {
                writeln!(f, "{:indent$}{}", "", label, indent = level * 2)
            }
        };

        let write_title_1 = write_title_indented(1);
        let write_1 = write_indented(1);

        writeln!(f, "Current Configuration:")?;
        write_title_1(f, "Server")?;
        write_1(f, "Bind Address", &self.server.bind)?;
        write_1(f, "Port", &self.server.port)?;

        write_title_1(f, "Relay")?;
        write_1(f, "Timeout (s)", &self.relay.timeout_secs)?;
        write_1(f, "Max Redirects", &self.relay.max_redirects)?;
        write_1(f, "User Agent", &self.relay.user_agent.as_deref().unwrap_or("(client default)"))?;

        write_title_1(f, "CORS")?;
        if self.cors.allow_any_origin {
            write_1(f, "Origins", &"*")?;
        } else {
            write_1(f, "Origins", &self.cors.allowed_origins.join(", "))?;
        }
        write_1(f, "Max Age (s)", &self.cors.max_age_secs)?;

        write_title_1(f, "Store")?;
        match &self.store.path {
            Some(path) => write_1(f, "Path", &path.display())?,
            None => write_1(f, "Path", &"(in memory)")?,
        }

        Ok(())
    }
}

impl Config {
    /// Generate Config structure from file
    ///
    /// Creates a default config in ~/.config/reqdash/config.toml
    ///  or the specified path, with the extension .toml if one does not exist
    pub fn from_config(
        optional_path: Option<impl AsRef<path::Path>>,
    ) -> Result<Self, ConfigError> {
        let config_path: path::PathBuf = if let Some(path) = optional_path {
            normalize_toml_path(path.as_ref())
        } else {
            default_config_path()?
        };

        if config_path.exists() {
            let raw_string = fs::read_to_string(&config_path)
                .map_err(|source| ConfigError::ReadFailed { path: config_path.clone(), source })?;
            let config: Self = toml::from_str(raw_string.as_str())?;
            config.validate()?;
            Ok(config)
        } else {
            let config = Self::default();
            config.write_config(&config_path)?;
            Ok(config)
        }
    }

    /// Reject values that would only fail once a worker builds the app
    pub fn validate(&self) -> Result<(), ConfigError> {
        for origin in &self.cors.allowed_origins {
            let valid = origin != "*"
                && Uri::try_from(origin.as_str()).is_ok()
                && HeaderValue::from_str(origin).is_ok();
            if !valid {
                return Err(ConfigError::InvalidOrigin(origin.clone()));
            }
        }
        Ok(())
    }

    /// Serialize and write a config to a file
    pub fn write_config(&self, path: &path::Path) -> Result<(), ConfigError> {
        let config_str: String = toml::to_string_pretty(self)?;
        let write_failed =
            |source: io::Error| ConfigError::WriteFailed { path: path.to_path_buf(), source };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(write_failed)?;
        }

        fs::write(path, config_str).map_err(write_failed)
    }

    /// Apply command line overrides
    pub fn with_overrides(mut self, bind: Option<String>, port: Option<u16>) -> Self {
        if let Some(bind) = bind {
            self.server.bind = bind;
        }
        if let Some(port) = port {
            self.server.port = port;
        }
        self
    }

    pub fn relay_config(&self) -> RelayConfig {
        let config = RelayConfig::default()
            .with_timeout(Duration::from_secs(self.relay.timeout_secs))
            .with_max_redirects(self.relay.max_redirects);

        match &self.relay.user_agent {
            Some(user_agent) => config.with_user_agent(user_agent.as_str()),
            None => config,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_writes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/config");

        let config = Config::from_config(Some(&path)).unwrap();
        assert_eq!(config, Config::default());
        assert!(dir.path().join("nested/config.toml").exists());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            concat!(
                "[relay]\ntimeout_secs = 5\n\n",
                "[cors]\nallow_any_origin = false\nallowed_origins = [\"http://localhost:5173\"]\n",
            ),
        )
        .unwrap();

        let config = Config::from_config(Some(&path)).unwrap();
        assert_eq!(config.server, Server::default());
        assert_eq!(config.relay.timeout_secs, 5);
        assert_eq!(config.relay.max_redirects, 10);
        assert!(!config.cors.allow_any_origin);
        assert_eq!(config.cors.allowed_origins, vec!["http://localhost:5173".to_string()]);
        assert_eq!(config.relay_config().timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_invalid_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[server]\nport = \"not a port\"\n").unwrap();

        assert!(matches!(Config::from_config(Some(&path)), Err(ConfigError::ParseFailed(_))));
    }

    #[test]
    fn test_invalid_origins_fail() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        for origin in ["*", "http://bad origin", ""] {
            fs::write(&path, format!("[cors]\nallowed_origins = [{origin:?}]\n")).unwrap();
            assert!(
                matches!(Config::from_config(Some(&path)), Err(ConfigError::InvalidOrigin(_))),
                "origin {origin:?} should be rejected"
            );
        }

        fs::write(&path, "[cors]\nallowed_origins = [\"http://localhost:5173\"]\n").unwrap();
        assert!(Config::from_config(Some(&path)).is_ok());
    }

    #[test]
    fn test_overrides() {
        let config = Config::default().with_overrides(Some("0.0.0.0".into()), None);
        assert_eq!(config.server.bind, "0.0.0.0");
        assert_eq!(config.server.port, 8787);
    }

    #[test]
    fn test_display_lists_sections() {
        let rendered = Config::default().to_string();
        assert!(rendered.contains("Server"));
        assert!(rendered.contains("Origins: *"));
        assert!(rendered.contains("(in memory)"));
    }
}
