//! Client configuration.
//!
//! Settings can be built in code, deserialized from any serde source the
//! caller already uses, or read from `BIOQUERY_*` environment variables.

use std::time::Duration;

use serde::Deserialize;

use crate::error::ApiError;
use crate::omim::OmimHost;
use crate::uniprot::DEFAULT_UNIPROT_HOST;

pub const ENV_OMIM_HOST: &str = "BIOQUERY_OMIM_HOST";
pub const ENV_OMIM_API_KEY: &str = "BIOQUERY_OMIM_API_KEY";
pub const ENV_UNIPROT_HOST: &str = "BIOQUERY_UNIPROT_HOST";
pub const ENV_CONTACT: &str = "BIOQUERY_CONTACT";
pub const ENV_TIMEOUT_SECS: &str = "BIOQUERY_TIMEOUT_SECS";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// OMIM API host; `us`, `eu` or a full base URL.
    pub omim_host: OmimHost,
    /// Sent as `apiKey` unless the caller passes one explicitly.
    pub omim_api_key: Option<String>,
    pub uniprot_host: String,
    /// E-mail or other contact appended to the UniProt `User-Agent`.
    pub contact: Option<String>,
    pub timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            omim_host: OmimHost::Us,
            omim_api_key: None,
            uniprot_host: DEFAULT_UNIPROT_HOST.to_string(),
            contact: None,
            timeout_secs: 30,
        }
    }
}

impl ClientConfig {
    /// Defaults overridden by any `BIOQUERY_*` variables that are set.
    pub fn from_env() -> Result<Self, ApiError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, ApiError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(host) = lookup(ENV_OMIM_HOST).filter(|h| !h.trim().is_empty()) {
            config.omim_host = OmimHost::from(host);
        }
        if let Some(key) = lookup(ENV_OMIM_API_KEY).filter(|k| !k.is_empty()) {
            config.omim_api_key = Some(key);
        }
        if let Some(host) = lookup(ENV_UNIPROT_HOST).filter(|h| !h.trim().is_empty()) {
            config.uniprot_host = host;
        }
        if let Some(contact) = lookup(ENV_CONTACT).filter(|c| !c.is_empty()) {
            config.contact = Some(contact);
        }
        if let Some(secs) = lookup(ENV_TIMEOUT_SECS) {
            config.timeout_secs = secs
                .trim()
                .parse()
                .map_err(|_| ApiError::Config(format!("{ENV_TIMEOUT_SECS} must be a whole number of seconds, got '{secs}'")))?;
        }
        Ok(config)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> =
            vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_point_at_public_hosts() {
        let config = ClientConfig::default();
        assert_eq!(config.omim_host, OmimHost::Us);
        assert_eq!(config.uniprot_host, "http://www.uniprot.org");
        assert_eq!(config.timeout(), Duration::from_secs(30));
        assert!(config.omim_api_key.is_none());
    }

    #[test]
    fn env_overrides_defaults() {
        let config = ClientConfig::from_lookup(lookup(&[
            (ENV_OMIM_HOST, "eu"),
            (ENV_OMIM_API_KEY, "secret"),
            (ENV_CONTACT, "me@example.org"),
            (ENV_TIMEOUT_SECS, "5"),
        ]))
        .unwrap();
        assert_eq!(config.omim_host, OmimHost::Europe);
        assert_eq!(config.omim_api_key.as_deref(), Some("secret"));
        assert_eq!(config.contact.as_deref(), Some("me@example.org"));
        assert_eq!(config.timeout_secs, 5);
    }

    #[test]
    fn empty_api_key_is_ignored() {
        let config = ClientConfig::from_lookup(lookup(&[(ENV_OMIM_API_KEY, "")])).unwrap();
        assert!(config.omim_api_key.is_none());
    }

    #[test]
    fn empty_hosts_keep_defaults() {
        let config = ClientConfig::from_lookup(lookup(&[
            (ENV_OMIM_HOST, ""),
            (ENV_UNIPROT_HOST, " "),
        ]))
        .unwrap();
        assert_eq!(config.omim_host, OmimHost::Us);
        assert_eq!(config.uniprot_host, DEFAULT_UNIPROT_HOST);
    }

    #[test]
    fn bad_timeout_is_a_config_error() {
        let err = ClientConfig::from_lookup(lookup(&[(ENV_TIMEOUT_SECS, "soon")])).unwrap_err();
        assert!(matches!(err, ApiError::Config(_)));
    }

    #[test]
    fn deserializes_with_partial_fields() {
        let config: ClientConfig = serde_json::from_str(
            r#"{"omim_host":"http://localhost:9000","omim_api_key":"k"}"#,
        )
        .unwrap();
        assert_eq!(config.omim_host, OmimHost::Custom("http://localhost:9000".to_string()));
        assert_eq!(config.timeout_secs, 30);
    }
}
