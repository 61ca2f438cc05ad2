//! Client configuration.
//!
//! # Responsibility
//! - Deserialize logging and router settings from JSON.
//! - Validate redirect targets before a route table is built from them.
//!
//! # Invariants
//! - Every field has a default, so `{}` is a valid configuration.
//! - A loaded configuration always has absolute route paths and
//!   `max_redirects >= 1`.

use crate::logging::default_log_level;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

const DEFAULT_LANDING_PATH: &str = "/account";
const DEFAULT_MAX_REDIRECTS: usize = 8;

/// Redirect targets used by the route table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RouterConfig {
    /// Target when a guard finds no authenticated session.
    pub login_path: String,
    /// Target when the session lacks the route's role.
    pub unauthorized_path: String,
    /// Target when no route matches.
    pub fallback_path: String,
    pub max_redirects: usize,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            login_path: DEFAULT_LANDING_PATH.to_string(),
            unauthorized_path: DEFAULT_LANDING_PATH.to_string(),
            fallback_path: DEFAULT_LANDING_PATH.to_string(),
            max_redirects: DEFAULT_MAX_REDIRECTS,
        }
    }
}

impl RouterConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("login_path", &self.login_path),
            ("unauthorized_path", &self.unauthorized_path),
            ("fallback_path", &self.fallback_path),
        ] {
            if !value.trim().starts_with('/') {
                return Err(ConfigError::InvalidPath {
                    field,
                    value: value.clone(),
                });
            }
        }
        if self.max_redirects == 0 {
            return Err(ConfigError::InvalidMaxRedirects);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClientConfig {
    pub log_level: Option<String>,
    /// When set, logs go to rolling files in this directory.
    pub log_dir: Option<PathBuf>,
    pub router: RouterConfig,
}

impl ClientConfig {
    /// Reads and validates a JSON configuration file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    /// Parses and validates JSON configuration text.
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text).map_err(ConfigError::Parse)?;
        config.router.validate()?;
        Ok(config)
    }

    /// Configured level, or the build-mode default.
    pub fn effective_log_level(&self) -> &str {
        self.log_level
            .as_deref()
            .map(str::trim)
            .filter(|level| !level.is_empty())
            .unwrap_or(default_log_level())
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse(serde_json::Error),
    InvalidPath {
        field: &'static str,
        value: String,
    },
    InvalidMaxRedirects,
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read config `{}`: {source}", path.display())
            }
            Self::Parse(err) => write!(f, "invalid config JSON: {err}"),
            Self::InvalidPath { field, value } => {
                write!(f, "router.{field} must start with `/`, got `{value}`")
            }
            Self::InvalidMaxRedirects => write!(f, "router.max_redirects must be at least 1"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse(err) => Some(err),
            Self::InvalidPath { .. } | Self::InvalidMaxRedirects => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ClientConfig, ConfigError, RouterConfig};
    use crate::logging::default_log_level;

    #[test]
    fn empty_object_uses_defaults() {
        let config = ClientConfig::from_json_str("{}").expect("empty config");
        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.router.login_path, "/account");
        assert_eq!(config.router.max_redirects, 8);
        assert_eq!(config.effective_log_level(), default_log_level());
    }

    #[test]
    fn partial_router_section_keeps_other_defaults() {
        let config = ClientConfig::from_json_str(
            r#"{"log_level":"warn","router":{"unauthorized_path":"/forbidden"}}"#,
        )
        .expect("partial config");
        assert_eq!(config.effective_log_level(), "warn");
        assert_eq!(config.router.unauthorized_path, "/forbidden");
        assert_eq!(config.router.fallback_path, "/account");
    }

    #[test]
    fn rejects_relative_paths_and_zero_hops() {
        let err = ClientConfig::from_json_str(r#"{"router":{"login_path":"login"}}"#)
            .expect_err("relative login path must fail");
        assert!(matches!(
            err,
            ConfigError::InvalidPath {
                field: "login_path",
                ..
            }
        ));

        let zero = RouterConfig {
            max_redirects: 0,
            ..RouterConfig::default()
        };
        assert!(matches!(
            zero.validate(),
            Err(ConfigError::InvalidMaxRedirects)
        ));
    }

    #[test]
    fn rejects_unknown_fields() {
        let err = ClientConfig::from_json_str(r#"{"routes":{}}"#).expect_err("unknown field");
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
