//! Client for a running name-forge server
//!
//! Lets the orchestrator run against the HTTP endpoints instead of an
//! in-process generator and checker.

use crate::domain::AvailabilityCheck;
use crate::error::{NameForgeError, Result};
use crate::llm::NameSource;
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;

/// HTTP client for the generate and check endpoints
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

/// Display prefix of a server-side `MissingField` error
const MISSING_FIELDS_PREFIX: &str = "Missing required fields: ";

#[derive(Deserialize)]
struct ErrorPayload {
    error: Option<String>,
}

#[derive(Deserialize)]
struct NamesPayload {
    names: Option<Vec<String>>,
}

#[derive(Deserialize)]
struct AvailabilityPayload {
    available: bool,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(60))
            .user_agent(concat!("name-forge/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| NameForgeError::network(e.to_string(), None, None))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `POST /api/generate-names`
    pub async fn generate_names(&self, description: &str, tone: &str) -> Result<Vec<String>> {
        let url = format!("{}/api/generate-names", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(&json!({ "description": description, "tone": tone }))
            .send()
            .await?;

        if !response.status().is_success() {
            let (status, message) = error_message(response, "Failed to generate names").await;
            return Err(match (status, message.strip_prefix(MISSING_FIELDS_PREFIX)) {
                (400, Some(fields)) => NameForgeError::missing_field(fields),
                (400, None) => NameForgeError::invalid_request(message),
                _ => NameForgeError::generation_failed(message),
            });
        }

        let payload: NamesPayload = response
            .json()
            .await
            .map_err(|_| NameForgeError::generation_failed("Invalid response format from API"))?;

        payload
            .names
            .ok_or_else(|| NameForgeError::generation_failed("Invalid response format from API"))
    }

    /// `GET /api/check-domain?name=...`
    pub async fn check_domain(&self, name: &str) -> Result<bool> {
        let url = format!("{}/api/check-domain", self.base_url);
        let response = self.client.get(&url).query(&[("name", name)]).send().await?;

        if !response.status().is_success() {
            let (status, message) = error_message(response, "Failed to check domain availability").await;
            return Err(if status == 400 {
                NameForgeError::missing_parameter("name")
            } else {
                NameForgeError::check_failed(name, message)
            });
        }

        let payload: AvailabilityPayload = response.json().await.map_err(|e| {
            NameForgeError::check_failed(name, format!("Invalid response format from API: {}", e))
        })?;
        Ok(payload.available)
    }
}

/// Pull the `{error}` message out of a failed response
async fn error_message(response: Response, fallback: &str) -> (u16, String) {
    let status = response.status().as_u16();
    let message = response
        .json::<ErrorPayload>()
        .await
        .ok()
        .and_then(|p| p.error)
        .unwrap_or_else(|| fallback.to_string());
    (status, message)
}

#[async_trait]
impl NameSource for ApiClient {
    async fn generate(&self, description: &str, tone: &str) -> Result<Vec<String>> {
        self.generate_names(description, tone).await
    }
}

#[async_trait]
impl AvailabilityCheck for ApiClient {
    async fn check_availability(&self, name: &str) -> Result<bool> {
        self.check_domain(name).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_generate_names() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/generate-names"))
            .and(body_json(json!({ "description": "pet insurance", "tone": "playful" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "names": ["Pawsure", "Wagly"] })))
            .expect(1)
            .mount(&server)
            .await;

        let client = ApiClient::new(format!("{}/", server.uri())).unwrap();
        let names = client.generate_names("pet insurance", "playful").await.unwrap();
        assert_eq!(names, vec!["Pawsure", "Wagly"]);
    }

    #[tokio::test]
    async fn test_generate_error_payload() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_json(json!({ "error": "quota exceeded" })))
            .mount(&server)
            .await;

        let client = ApiClient::new(server.uri()).unwrap();
        let err = client.generate_names("pet insurance", "playful").await.unwrap_err();
        assert!(matches!(err, NameForgeError::GenerationFailed { ref message } if message == "quota exceeded"));
    }

    #[tokio::test]
    async fn test_generate_missing_fields_keeps_error_kind() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(400)
                    .set_body_json(json!({ "error": "Missing required fields: description and tone" })),
            )
            .mount(&server)
            .await;

        let client = ApiClient::new(server.uri()).unwrap();
        let err = client.generate_names("", "playful").await.unwrap_err();
        assert!(matches!(err, NameForgeError::MissingField { ref fields } if fields == "description and tone"));
        assert_eq!(err.to_string(), "Missing required fields: description and tone");
    }

    #[tokio::test]
    async fn test_generate_bad_request_without_missing_fields() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({ "error": "Failed to parse the request body as JSON" })))
            .mount(&server)
            .await;

        let client = ApiClient::new(server.uri()).unwrap();
        let err = client.generate_names("pet insurance", "playful").await.unwrap_err();
        assert!(matches!(err, NameForgeError::InvalidRequest { .. }));
    }

    #[tokio::test]
    async fn test_generate_invalid_shape() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "titles": ["Nope"] })))
            .mount(&server)
            .await;

        let client = ApiClient::new(server.uri()).unwrap();
        let err = client.generate_names("pet insurance", "playful").await.unwrap_err();
        assert_eq!(err.to_string(), "Invalid response format from API");
    }

    #[tokio::test]
    async fn test_check_domain() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/check-domain"))
            .and(query_param("name", "Grain Works"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "available": true })))
            .expect(1)
            .mount(&server)
            .await;

        let client = ApiClient::new(server.uri()).unwrap();
        assert!(client.check_domain("Grain Works").await.unwrap());
    }

    #[tokio::test]
    async fn test_check_domain_failure() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500).set_body_string("not json"))
            .mount(&server)
            .await;

        let client = ApiClient::new(server.uri()).unwrap();
        let err = client.check_domain("abcdef").await.unwrap_err();
        match err {
            NameForgeError::CheckFailed { name, message } => {
                assert_eq!(name, "abcdef");
                assert_eq!(message, "Failed to check domain availability");
            }
            other => panic!("expected CheckFailed, got {other:?}"),
        }
    }
}
