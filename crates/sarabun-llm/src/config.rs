//! Oracle configuration loaded from environment variables.

pub const GROQ_API_KEY_ENV: &str = "GROQ_API_KEY";
pub const SARABUN_MODEL_ENV: &str = "SARABUN_MODEL";
pub const SARABUN_BASE_URL_ENV: &str = "SARABUN_BASE_URL";
pub const SARABUN_TIMEOUT_SECS_ENV: &str = "SARABUN_TIMEOUT_SECS";

/// Default model; must be vision-capable for the receipt pipeline.
pub const DEFAULT_MODEL: &str = "meta-llama/llama-4-scout-17b-16e-instruct";
pub const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";
const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Connection settings for the extraction oracle.
#[derive(Debug, Clone)]
pub struct OracleConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    pub timeout_secs: u64,
}

impl OracleConfig {
    /// Build a config with defaults for everything but the credential.
    pub fn new(api_key: &str) -> Self {
        Self {
            api_key: api_key.to_string(),
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Load from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key = std::env::var(GROQ_API_KEY_ENV)
            .map_err(|_| ConfigError::MissingCredential)?;
        let mut config = Self::new(&api_key);
        if let Ok(model) = std::env::var(SARABUN_MODEL_ENV) {
            config.model = model;
        }
        if let Ok(base_url) = std::env::var(SARABUN_BASE_URL_ENV) {
            config.base_url = base_url;
        }
        if let Ok(raw) = std::env::var(SARABUN_TIMEOUT_SECS_ENV) {
            config.timeout_secs = raw
                .parse()
                .map_err(|_| ConfigError::Invalid(format!("bad timeout: {raw}")))?;
        }
        Ok(config)
    }

    pub fn with_model(mut self, model: &str) -> Self {
        self.model = model.to_string();
        self
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.to_string();
        self
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("no oracle credential configured. Set {GROQ_API_KEY_ENV}")]
    MissingCredential,
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_fill_everything_but_the_key() {
        let config = OracleConfig::new("test-key");
        assert_eq!(config.api_key, "test-key");
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout_secs, 60);
    }

    #[test]
    fn builders_override_defaults() {
        let config = OracleConfig::new("k")
            .with_model("llama-3.3-70b-versatile")
            .with_base_url("http://localhost:8080/v1");
        assert_eq!(config.model, "llama-3.3-70b-versatile");
        assert_eq!(config.base_url, "http://localhost:8080/v1");
    }
}
