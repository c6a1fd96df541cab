//! LLM (Large Language Model) integration module
//!
//! Turns a description and a tone into startup name candidates through a
//! structured-output generation service.

pub mod generator;
pub mod providers;

// Re-export main functionality
pub use generator::NameGenerator;
pub use providers::{build_name_prompt, parse_names, NamePrompt};

use crate::error::Result;
use crate::types::LlmConfig;
use async_trait::async_trait;

/// Core trait for all LLM providers
#[async_trait]
pub trait NameProvider: Send + Sync {
    /// Run the prompt and return the schema-validated name list
    async fn generate_names(&self, prompt: &NamePrompt) -> Result<Vec<String>>;

    /// Get provider name
    fn name(&self) -> &'static str;

    /// Get model name being used
    fn model(&self) -> &str;
}

/// Source of name candidates for a run.
///
/// Implemented in-process by [`NameGenerator`] and remotely by
/// [`crate::client::ApiClient`].
#[async_trait]
pub trait NameSource: Send + Sync {
    /// Generate names for a raw description and tone label
    async fn generate(&self, description: &str, tone: &str) -> Result<Vec<String>>;
}

/// Get available LLM providers
pub fn available_providers() -> Vec<&'static str> {
    vec!["gemini", "openai", "ollama"]
}

/// Create an LLM provider from configuration
pub fn create_provider(config: &LlmConfig) -> Result<Box<dyn NameProvider>> {
    match config.provider.as_str() {
        "gemini" => Ok(Box::new(providers::GeminiProvider::new(config)?)),
        "openai" => Ok(Box::new(providers::OpenAiProvider::new(config)?)),
        "ollama" => Ok(Box::new(providers::OllamaProvider::new(config)?)),
        _ => Err(crate::config_error!(
            "Unsupported LLM provider: {}. Supported providers: {}",
            config.provider,
            available_providers().join(", ")
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_provider_rejects_unknown() {
        let config = LlmConfig {
            provider: "eliza".to_string(),
            ..Default::default()
        };
        let err = create_provider(&config).err().unwrap();
        assert!(err.to_string().contains("Unsupported LLM provider: eliza"));
    }

    #[test]
    fn test_create_provider_requires_key() {
        let config = LlmConfig {
            provider: "gemini".to_string(),
            ..Default::default()
        };
        assert!(create_provider(&config).is_err());

        let config = LlmConfig {
            provider: "ollama".to_string(),
            model: "llama3.2".to_string(),
            ..Default::default()
        };
        let provider = create_provider(&config).unwrap();
        assert_eq!(provider.name(), "ollama");
        assert_eq!(provider.model(), "llama3.2");
    }
}
