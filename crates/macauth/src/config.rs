//! Configuration for the HTTP adapters and the command-line tool.
//!
//! All configuration is driven by environment variables.

use tracing::warn;

/// Default authorization scheme preceding the attribute list.
pub const DEFAULT_SCHEME: &str = "Hawk";

/// Configuration shared by the request adapters.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthConfig {
    /// Scheme written before the attribute list in the `Authorization` header.
    pub scheme: String,
    /// Port assumed when neither the URI, the host header nor the URI scheme names one.
    pub default_port: u16,
    /// Path to a JSON list of credentials.
    pub credentials_file: Option<String>,
    /// Log level.
    pub log_level: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            scheme: DEFAULT_SCHEME.to_owned(),
            default_port: 80,
            credentials_file: None,
            log_level: "info".to_owned(),
        }
    }
}

impl AuthConfig {
    /// Load configuration from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration from an arbitrary variable source.
    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(v) = lookup("MACAUTH_SCHEME") {
            config.scheme = v;
        }
        if let Some(v) = lookup("MACAUTH_DEFAULT_PORT") {
            match v.parse() {
                Ok(port) => config.default_port = port,
                Err(e) => warn!(value = %v, error = %e, "ignoring invalid MACAUTH_DEFAULT_PORT"),
            }
        }
        if let Some(v) = lookup("MACAUTH_CREDENTIALS_FILE") {
            config.credentials_file = Some(v);
        }
        if let Some(v) = lookup("LOG_LEVEL") {
            config.log_level = v;
        }

        config
    }
}
