use serde::Deserialize;

/// Top-level application configuration, deserialized from `config.toml`
/// plus `JOURNAL__`-prefixed environment overrides.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub api: ApiConfig,
}

/// Connection settings for the hosted journal backend.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the backend, e.g. "https://api.example.com".
    pub base_url: String,

    /// Bearer token for the API. Usually supplied through the environment
    /// (`JOURNAL__API__API_KEY`) rather than committed to the file.
    #[serde(default)]
    pub api_key: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    30
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeout_defaults_when_omitted() {
        let api: ApiConfig = toml::from_str(
            r#"
            base_url = "https://api.example.com"
            "#,
        )
        .unwrap();
        assert_eq!(api.timeout_secs, 30);
        assert!(api.api_key.is_empty());
    }
}
