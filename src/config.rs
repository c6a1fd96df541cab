//! Environment-driven configuration

use crate::error::Result;
use crate::types::{CheckConfig, LlmConfig};
use std::net::SocketAddr;
use std::time::Duration;

/// Default bind address for `name-forge serve`
pub const DEFAULT_ADDR: &str = "127.0.0.1:3000";

/// Full application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub llm: LlmConfig,
    pub check: CheckConfig,
    pub addr: SocketAddr,
}

impl AppConfig {
    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let provider = match var("NAME_FORGE_PROVIDER") {
            Some(provider) => provider.to_lowercase(),
            None if var("GEMINI_API_KEY").is_some() => "gemini".to_string(),
            None if var("OPENAI_API_KEY").is_some() => "openai".to_string(),
            None => "ollama".to_string(),
        };

        let temperature = match var("NAME_FORGE_TEMPERATURE") {
            Some(raw) => raw
                .parse::<f32>()
                .map_err(|_| crate::config_error!("NAME_FORGE_TEMPERATURE must be a number, got '{}'", raw))?,
            None => 0.7,
        };

        let llm = match provider.as_str() {
            "gemini" => LlmConfig {
                provider,
                model: var("GEMINI_MODEL").unwrap_or_else(|| "gemini-2.5-flash".to_string()),
                api_key: var("GEMINI_API_KEY").unwrap_or_default(),
                base_url: var("GEMINI_BASE_URL"),
                temperature,
            },
            "openai" => LlmConfig {
                provider,
                model: var("OPENAI_MODEL").unwrap_or_else(|| "gpt-4.1-mini".to_string()),
                api_key: var("OPENAI_API_KEY").unwrap_or_default(),
                base_url: var("OPENAI_BASE_URL"),
                temperature,
            },
            "ollama" => LlmConfig {
                provider,
                model: var("OLLAMA_MODEL").unwrap_or_else(|| "llama3.2".to_string()),
                api_key: String::new(),
                base_url: var("OLLAMA_BASE_URL"),
                temperature,
            },
            other => {
                return Err(crate::config_error!(
                    "Unsupported LLM provider: {}. Supported providers: {}",
                    other,
                    crate::llm::available_providers().join(", ")
                ))
            }
        };

        let delay_ms = match var("NAME_FORGE_CHECK_DELAY_MS") {
            Some(raw) => raw
                .parse::<u64>()
                .map_err(|_| crate::config_error!("NAME_FORGE_CHECK_DELAY_MS must be an integer, got '{}'", raw))?,
            None => 800,
        };

        let addr_raw = var("NAME_FORGE_ADDR").unwrap_or_else(|| DEFAULT_ADDR.to_string());
        let addr = addr_raw
            .parse::<SocketAddr>()
            .map_err(|_| crate::config_error!("NAME_FORGE_ADDR is not a socket address: '{}'", addr_raw))?;

        Ok(Self {
            llm,
            check: CheckConfig {
                delay: Duration::from_millis(delay_ms),
            },
            addr,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<AppConfig> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config.llm.provider, "ollama");
        assert_eq!(config.llm.model, "llama3.2");
        assert_eq!(config.check.delay, Duration::from_millis(800));
        assert_eq!(config.addr.to_string(), DEFAULT_ADDR);
    }

    #[test]
    fn test_provider_detected_from_keys() {
        let config = load(&[("GEMINI_API_KEY", "g-key"), ("OPENAI_API_KEY", "sk")]).unwrap();
        assert_eq!(config.llm.provider, "gemini");
        assert_eq!(config.llm.api_key, "g-key");
        assert_eq!(config.llm.model, "gemini-2.5-flash");

        let config = load(&[("OPENAI_API_KEY", "sk"), ("OPENAI_MODEL", "gpt-4o")]).unwrap();
        assert_eq!(config.llm.provider, "openai");
        assert_eq!(config.llm.model, "gpt-4o");
    }

    #[test]
    fn test_explicit_provider_wins() {
        let config = load(&[("NAME_FORGE_PROVIDER", "OpenAI"), ("GEMINI_API_KEY", "g-key")]).unwrap();
        assert_eq!(config.llm.provider, "openai");
        assert!(config.llm.api_key.is_empty());
    }

    #[test]
    fn test_overrides_and_errors() {
        let config = load(&[
            ("NAME_FORGE_CHECK_DELAY_MS", "0"),
            ("NAME_FORGE_ADDR", "0.0.0.0:8080"),
            ("NAME_FORGE_TEMPERATURE", "1.1"),
        ])
        .unwrap();
        assert!(config.check.delay.is_zero());
        assert_eq!(config.addr.port(), 8080);
        assert_eq!(config.llm.temperature, 1.1);

        assert!(load(&[("NAME_FORGE_PROVIDER", "eliza")]).is_err());
        assert!(load(&[("NAME_FORGE_CHECK_DELAY_MS", "soon")]).is_err());
        assert!(load(&[("NAME_FORGE_ADDR", "localhost")]).is_err());
    }
}
