//! Profile configuration.
//!
//! A profile says where the registry lives and how to authenticate. It is
//! merged from serde defaults, an optional YAML file and `OCIR_`-prefixed
//! environment variables (`OCIR_AUTH__TOKEN`, `OCIR_REGISTRY__REGION`, ...),
//! later sources winning.

use crate::auth::Credentials;
use crate::error::{OcirError, Result};
use config::{Config as ConfigRs, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[cfg(test)]
mod tests;

/// Version segment of the Artifacts API paths.
pub const API_VERSION: &str = "20160918";

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Config {
    #[serde(default)]
    pub registry: RegistrySettings,
    #[serde(default)]
    pub auth: AuthSettings,
    #[serde(default)]
    pub network: Network,
}

impl Config {
    /// Parses a `Config` from a YAML string.
    ///
    /// This function is primarily used for testing.
    pub fn from_yaml_str(s: &str) -> Result<Self> {
        let builder = ConfigRs::builder().add_source(File::from_str(s, FileFormat::Yaml));
        Self::from_builder(builder)
    }

    /// Loads a `Config` from an optional profile file, then applies
    /// environment overrides from the process environment.
    ///
    /// A path that is given must exist.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with_env(path, None)
    }

    /// Like [`Config::load`], but reads environment overrides from `env`
    /// instead of the process environment when it is `Some`.
    pub fn load_with_env(
        path: Option<&Path>,
        env: Option<config::Map<String, String>>,
    ) -> Result<Self> {
        let mut builder = ConfigRs::builder();

        if let Some(p) = path {
            let name = p.to_string_lossy();
            if !p.exists() {
                return Err(OcirError::config(
                    "Profile file does not exist".to_string(),
                    Some(name.to_string()),
                ));
            }
            builder = builder.add_source(File::new(&name, FileFormat::Yaml).required(true));
        }

        builder = builder.add_source(
            Environment::with_prefix("OCIR")
                .prefix_separator("_")
                .separator("__")
                .source(env),
        );

        Self::from_builder(builder)
    }

    /// Creates a `Config` from a `config::ConfigBuilder`.
    fn from_builder(builder: config::ConfigBuilder<config::builder::DefaultState>) -> Result<Self> {
        builder
            .build()
            .and_then(|cfg| cfg.try_deserialize())
            .map_err(|e| {
                OcirError::config_with_source(
                    "Failed to deserialize configuration",
                    None::<&str>,
                    e,
                )
            })
    }

    /// Returns the Artifacts API base URL.
    ///
    /// An explicit `registry.endpoint` wins; otherwise the URL is derived from
    /// `registry.region`.
    ///
    /// # Examples
    ///
    /// ```
    /// use libocir::Config;
    ///
    /// let config = Config::from_yaml_str("registry:\n  region: eu-frankfurt-1\n").unwrap();
    /// assert_eq!(
    ///     config.endpoint().unwrap(),
    ///     "https://artifacts.eu-frankfurt-1.oci.oraclecloud.com/20160918"
    /// );
    /// ```
    pub fn endpoint(&self) -> Result<String> {
        if let Some(endpoint) = non_blank(self.registry.endpoint.as_deref()) {
            return Ok(endpoint.to_string());
        }

        match non_blank(self.registry.region.as_deref()) {
            Some(region) => Ok(format!(
                "https://artifacts.{}.oci.oraclecloud.com/{}",
                region, API_VERSION
            )),
            None => Err(OcirError::config(
                "Missing registry location: set registry.region or registry.endpoint",
                None,
            )),
        }
    }

    /// Returns the credentials configured in the `auth` section.
    pub fn credentials(&self) -> Result<Credentials> {
        Credentials::from_parts(
            self.auth.token.as_deref(),
            self.auth.username.as_deref(),
            self.auth.password.as_deref(),
        )
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Where the registry lives.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct RegistrySettings {
    /// Region identifier, e.g. `eu-frankfurt-1`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,

    /// Full API base URL, overriding `region`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
}

/// Authentication settings.
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct AuthSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl std::fmt::Debug for AuthSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let redact = |v: &Option<String>| v.as_ref().map(|_| "<redacted>");
        f.debug_struct("AuthSettings")
            .field("token", &redact(&self.token))
            .field("username", &self.username)
            .field("password", &redact(&self.password))
            .finish()
    }
}

/// Network settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Network {
    /// Request timeout in seconds.
    #[serde(default = "default_network_timeout")]
    pub timeout: u64,
}

impl Default for Network {
    fn default() -> Self {
        Self {
            timeout: default_network_timeout(),
        }
    }
}

fn default_network_timeout() -> u64 {
    30
}
