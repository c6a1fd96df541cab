//! Ollama provider implementation
//!
//! Local models, constrained with Ollama's `format` schema support.

use crate::error::{NameForgeError, Result};
use crate::llm::NameProvider;
use crate::types::LlmConfig;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

use super::{names_schema, parse_names, status_error, NamePrompt};

/// Ollama provider implementation
pub struct OllamaProvider {
    client: Client,
    model: String,
    base_url: String,
    temperature: f32,
}

impl OllamaProvider {
    pub fn new(config: &LlmConfig) -> Result<Self> {
        // Local generation is slow on modest hardware
        let client = Client::builder()
            .timeout(Duration::from_secs(120))
            .build()
            .map_err(|e| NameForgeError::network(e.to_string(), None, None))?;

        Ok(Self {
            client,
            model: config.model.clone(),
            base_url: config.base_url.clone().unwrap_or_else(|| "http://localhost:11434".to_string()),
            temperature: config.temperature,
        })
    }
}

#[async_trait]
impl NameProvider for OllamaProvider {
    async fn generate_names(&self, prompt: &NamePrompt) -> Result<Vec<String>> {
        let request = OllamaRequest {
            model: self.model.clone(),
            messages: vec![
                OllamaMessage {
                    role: "system".to_string(),
                    content: prompt.system.clone(),
                },
                OllamaMessage {
                    role: "user".to_string(),
                    content: prompt.prompt.clone(),
                },
            ],
            stream: false,
            format: names_schema(),
            options: OllamaOptions {
                temperature: self.temperature,
            },
        };

        let url = format!("{}/api/chat", self.base_url.trim_end_matches('/'));
        let response = self.client.post(&url).json(&request).send().await.map_err(|e| {
            NameForgeError::network(
                format!("Failed to connect to Ollama: {}. Is Ollama running?", e),
                None,
                Some(url.clone()),
            )
        })?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let error_text = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());
            return Err(NameForgeError::network(
                status_error("Ollama", status, &error_text),
                Some(status),
                Some(url),
            ));
        }

        let ollama_response: OllamaResponse = response
            .json()
            .await
            .map_err(|e| NameForgeError::parse(e.to_string(), None))?;

        parse_names(&ollama_response.message.content)
    }

    fn name(&self) -> &'static str {
        "ollama"
    }

    fn model(&self) -> &str {
        &self.model
    }
}

// Ollama API structures
#[derive(Serialize)]
struct OllamaRequest {
    model: String,
    messages: Vec<OllamaMessage>,
    stream: bool,
    format: Value,
    options: OllamaOptions,
}

#[derive(Serialize)]
struct OllamaMessage {
    role: String,
    content: String,
}

#[derive(Serialize)]
struct OllamaOptions {
    temperature: f32,
}

#[derive(Deserialize)]
struct OllamaResponse {
    message: OllamaResponseMessage,
}

#[derive(Deserialize)]
struct OllamaResponseMessage {
    content: String,
}
