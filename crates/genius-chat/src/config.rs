use std::time::Duration;

/// Default completion endpoint path, relative to the dashboard origin.
pub const DEFAULT_ENDPOINT: &str = "/api/code";

const DEFAULT_BASE_URL: &str = "http://127.0.0.1:3000";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} must be a whole number of seconds, got '{value}'")]
    InvalidTimeout { var: &'static str, value: String },
}

// ---------------------------------------------------------------------------
// ClientConfig
// ---------------------------------------------------------------------------

/// Where and how the completion endpoint is called.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub endpoint: String,
    /// `None` waits for the reply indefinitely.
    pub request_timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            request_timeout: Some(DEFAULT_TIMEOUT),
        }
    }
}

impl ClientConfig {
    /// Configuration for code running inside the dashboard page, where the
    /// endpoint is resolved against the page origin.
    pub fn same_origin() -> Self {
        Self {
            base_url: String::new(),
            ..Self::default()
        }
    }

    /// Reads `GENIUS_BASE_URL`, `GENIUS_ENDPOINT` and `GENIUS_TIMEOUT_SECS`,
    /// falling back to the defaults for unset variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(base_url) = lookup("GENIUS_BASE_URL") {
            config.base_url = base_url;
        }
        if let Some(endpoint) = lookup("GENIUS_ENDPOINT") {
            config.endpoint = endpoint;
        }
        if let Some(value) = lookup("GENIUS_TIMEOUT_SECS") {
            let secs: u64 = value.trim().parse().map_err(|_| ConfigError::InvalidTimeout {
                var: "GENIUS_TIMEOUT_SECS",
                value: value.clone(),
            })?;
            config = config.with_timeout_secs(secs);
        }

        Ok(config)
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// `0` disables the timeout.
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.request_timeout = (secs > 0).then(|| Duration::from_secs(secs));
        self
    }

    /// Full URL of the completion endpoint.
    pub fn url(&self) -> String {
        let base = self.base_url.trim_end_matches('/');
        if self.endpoint.starts_with('/') {
            format!("{}{}", base, self.endpoint)
        } else {
            format!("{}/{}", base, self.endpoint)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_point_at_local_dashboard() {
        let config = ClientConfig::default();
        assert_eq!(config.url(), "http://127.0.0.1:3000/api/code");
        assert_eq!(config.request_timeout, Some(Duration::from_secs(60)));
    }

    #[test]
    fn same_origin_url_is_relative() {
        assert_eq!(ClientConfig::same_origin().url(), "/api/code");
    }

    #[test]
    fn url_joins_slashes_once() {
        let config = ClientConfig::default()
            .with_base_url("https://genius.example/")
            .with_endpoint("v1/code");
        assert_eq!(config.url(), "https://genius.example/v1/code");
    }

    #[test]
    fn env_overrides_defaults() {
        let config = ClientConfig::from_lookup(lookup(&[
            ("GENIUS_BASE_URL", "http://10.0.0.2:8080"),
            ("GENIUS_TIMEOUT_SECS", "0"),
        ]))
        .unwrap();
        assert_eq!(config.url(), "http://10.0.0.2:8080/api/code");
        assert_eq!(config.request_timeout, None);
    }

    #[test]
    fn bad_timeout_is_reported() {
        let err = ClientConfig::from_lookup(lookup(&[("GENIUS_TIMEOUT_SECS", "soon")]))
            .unwrap_err();
        assert!(err.to_string().contains("soon"));
    }
}
