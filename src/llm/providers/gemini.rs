//! Google Gemini provider implementation
//!
//! Uses Gemini's native structured output (`responseSchema`).

use crate::error::{NameForgeError, Result};
use crate::llm::NameProvider;
use crate::types::{LlmConfig, MAX_SCHEMA_NAMES, MIN_SCHEMA_NAMES};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::time::Duration;

use super::{parse_names, status_error, NamePrompt};

/// Google Gemini provider implementation
pub struct GeminiProvider {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
    temperature: f32,
}

impl GeminiProvider {
    pub fn new(config: &LlmConfig) -> Result<Self> {
        if config.api_key.is_empty() {
            return Err(NameForgeError::config("Gemini API key is required"));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| NameForgeError::network(e.to_string(), None, None))?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            base_url: config
                .base_url
                .clone()
                .unwrap_or_else(|| "https://generativelanguage.googleapis.com/v1beta".to_string()),
            temperature: config.temperature,
        })
    }

    /// Response schema in Gemini's OpenAPI dialect
    fn response_schema() -> Value {
        json!({
            "type": "OBJECT",
            "properties": {
                "names": {
                    "type": "ARRAY",
                    "items": { "type": "STRING" },
                    "minItems": MIN_SCHEMA_NAMES,
                    "maxItems": MAX_SCHEMA_NAMES
                }
            },
            "required": ["names"]
        })
    }
}

#[async_trait]
impl NameProvider for GeminiProvider {
    async fn generate_names(&self, prompt: &NamePrompt) -> Result<Vec<String>> {
        let request = GeminiRequest {
            system_instruction: GeminiContent {
                parts: vec![GeminiPart {
                    text: prompt.system.clone(),
                }],
            },
            contents: vec![GeminiContent {
                parts: vec![GeminiPart {
                    text: prompt.prompt.clone(),
                }],
            }],
            generation_config: GeminiGenerationConfig {
                temperature: self.temperature,
                max_output_tokens: 1000,
                response_mime_type: "application/json",
                response_schema: Self::response_schema(),
            },
        };

        let url = format!("{}/models/{}:generateContent", self.base_url.trim_end_matches('/'), self.model);

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                NameForgeError::network(
                    format!("Failed to connect to Gemini API: {}", e),
                    None,
                    Some(url.clone()),
                )
            })?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let error_text = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());
            return Err(NameForgeError::network(
                status_error("Gemini", status, &error_text),
                Some(status),
                Some(url),
            ));
        }

        let gemini_response: GeminiResponse = response
            .json()
            .await
            .map_err(|e| NameForgeError::parse(e.to_string(), None))?;

        let content = gemini_response
            .candidates
            .first()
            .and_then(|c| c.content.parts.first())
            .map(|p| p.text.as_str())
            .ok_or_else(|| NameForgeError::parse("No candidates in Gemini response", None))?;

        parse_names(content)
    }

    fn name(&self) -> &'static str {
        "gemini"
    }

    fn model(&self) -> &str {
        &self.model
    }
}

// Gemini API structures
#[derive(Serialize)]
struct GeminiRequest {
    #[serde(rename = "systemInstruction")]
    system_instruction: GeminiContent,
    contents: Vec<GeminiContent>,
    #[serde(rename = "generationConfig")]
    generation_config: GeminiGenerationConfig,
}

#[derive(Serialize)]
struct GeminiContent {
    parts: Vec<GeminiPart>,
}

#[derive(Serialize)]
struct GeminiPart {
    text: String,
}

#[derive(Serialize)]
struct GeminiGenerationConfig {
    temperature: f32,
    #[serde(rename = "maxOutputTokens")]
    max_output_tokens: u32,
    #[serde(rename = "responseMimeType")]
    response_mime_type: &'static str,
    #[serde(rename = "responseSchema")]
    response_schema: Value,
}

#[derive(Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Deserialize)]
struct GeminiCandidate {
    content: GeminiResponseContent,
}

#[derive(Deserialize)]
struct GeminiResponseContent {
    parts: Vec<GeminiResponsePart>,
}

#[derive(Deserialize)]
struct GeminiResponsePart {
    text: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn provider_for(server: &MockServer) -> GeminiProvider {
        GeminiProvider::new(&LlmConfig {
            provider: "gemini".to_string(),
            model: "gemini-2.5-flash".to_string(),
            api_key: "test-key".to_string(),
            base_url: Some(server.uri()),
            temperature: 0.7,
        })
        .unwrap()
    }

    fn prompt() -> NamePrompt {
        NamePrompt {
            system: "system".to_string(),
            prompt: "Create 6 startup names".to_string(),
        }
    }

    #[tokio::test]
    async fn test_structured_generation() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/models/gemini-2.5-flash:generateContent"))
            .and(header("x-goog-api-key", "test-key"))
            .and(body_partial_json(json!({
                "systemInstruction": { "parts": [{ "text": "system" }] },
                "generationConfig": { "responseMimeType": "application/json" }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "candidates": [{
                    "content": { "parts": [{ "text": "{\"names\": [\"Stripe\", \"Nuvem\"]}" }] }
                }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let names = provider_for(&server).generate_names(&prompt()).await.unwrap();
        assert_eq!(names, vec!["Stripe", "Nuvem"]);
    }

    #[tokio::test]
    async fn test_rate_limit_is_an_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(429).set_body_string("quota"))
            .mount(&server)
            .await;

        let err = provider_for(&server).generate_names(&prompt()).await.unwrap_err();
        match err {
            NameForgeError::Network { status_code, message, .. } => {
                assert_eq!(status_code, Some(429));
                assert!(message.contains("Rate limit"));
            }
            other => panic!("expected network error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_empty_candidates_is_an_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "candidates": [] })))
            .mount(&server)
            .await;

        let err = provider_for(&server).generate_names(&prompt()).await.unwrap_err();
        assert!(matches!(err, NameForgeError::Parse { .. }));
    }

    #[test]
    fn test_requires_api_key() {
        assert!(GeminiProvider::new(&LlmConfig::default()).is_err());
    }
}
