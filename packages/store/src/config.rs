//! # Console configuration: `admin.toml`
//!
//! Defines the TOML file that ships with the web binary
//! (filename: [`AdminConfig::filename`] = `"admin.toml"`). It tells the console
//! where the authentication API lives and which choices the user form offers.
//!
//! ## Structure
//!
//! ```toml
//! [api]
//! base_url = "/api"                                   # absolute, or relative to the page origin
//! endpoint = "/development/mandown_authentication"
//!
//! [users]
//! companies = ["company a", "company b", "company c"]
//! initial_password = "..."                            # optional, see below
//! ```
//!
//! ## Types
//!
//! | Struct | Purpose |
//! |--------|---------|
//! | [`AdminConfig`] | Top-level config with TOML (de)serialisation and endpoint resolution. |
//! | [`ApiConfig`] | Where the single multiplexed endpoint lives. |
//! | [`UsersConfig`] | Company choices and the initial password given to new accounts. |
//!
//! All structs derive `Default` so a missing or empty file is equivalent to the
//! default configuration. `initial_password` has no default: when it is unset
//! the console refuses to create accounts rather than inventing a password.

use serde::{Deserialize, Serialize};

/// Errors raised while loading or resolving the configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid admin.toml: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("API base URL `{0}` is relative and no page origin is available")]
    RelativeWithoutOrigin(String),
}

/// Top-level configuration stored in `admin.toml`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AdminConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub users: UsersConfig,
}

/// Location of the authentication API.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Absolute URL (`https://host/stage`) or a path resolved against the page origin.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Path of the multiplexed endpoint below `base_url`.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
}

fn default_base_url() -> String {
    "/api".to_string()
}

fn default_endpoint() -> String {
    "/development/mandown_authentication".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            endpoint: default_endpoint(),
        }
    }
}

/// Choices and defaults for newly created accounts.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UsersConfig {
    /// Company values offered by the user form, stored lower-case.
    #[serde(default = "default_companies")]
    pub companies: Vec<String>,
    /// Password assigned to every account created from the console.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial_password: Option<String>,
}

fn default_companies() -> Vec<String> {
    vec![
        "company a".to_string(),
        "company b".to_string(),
        "company c".to_string(),
    ]
}

impl Default for UsersConfig {
    fn default() -> Self {
        Self {
            companies: default_companies(),
            initial_password: None,
        }
    }
}

impl AdminConfig {
    /// The well-known filename for the config file.
    pub fn filename() -> &'static str {
        "admin.toml"
    }

    /// Parse from TOML string.
    pub fn from_toml(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Serialize to TOML string.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Builder method to replace the API base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.api.base_url = base_url.into();
        self
    }

    /// The configured initial password, ignoring blank values.
    pub fn initial_password(&self) -> Option<&str> {
        self.users
            .initial_password
            .as_deref()
            .filter(|p| !p.trim().is_empty())
    }

    /// Full URL of the API endpoint.
    ///
    /// A relative `base_url` (starting with `/` or empty) is joined onto
    /// `origin`, e.g. `window.location.origin` in the browser.
    pub fn endpoint_url(&self, origin: Option<&str>) -> Result<String, ConfigError> {
        let base = self.api.base_url.trim().trim_end_matches('/');
        let endpoint = self.api.endpoint.trim();
        let endpoint = if endpoint.is_empty() || endpoint.starts_with('/') {
            endpoint.to_string()
        } else {
            format!("/{endpoint}")
        };

        let absolute = base.starts_with("http://") || base.starts_with("https://");
        if absolute {
            return Ok(format!("{base}{endpoint}"));
        }

        match origin {
            Some(origin) => Ok(format!(
                "{}{base}{endpoint}",
                origin.trim_end_matches('/')
            )),
            None => Err(ConfigError::RelativeWithoutOrigin(self.api.base_url.clone())),
        }
    }
}
