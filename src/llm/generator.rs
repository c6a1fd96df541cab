//! Name generator using LLM

use crate::error::{NameForgeError, Result};
use crate::llm::{build_name_prompt, create_provider, NameProvider, NameSource};
use crate::types::{GenerationRequest, LlmConfig, MetricsSnapshot, PerformanceMetrics, NAMES_PER_RUN};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Instant;

/// Generates startup names through a configured provider
#[derive(Clone)]
pub struct NameGenerator {
    provider: Arc<dyn NameProvider>,
    metrics: Arc<PerformanceMetrics>,
}

impl NameGenerator {
    /// Create a generator around an existing provider
    pub fn new(provider: Arc<dyn NameProvider>) -> Self {
        Self {
            provider,
            metrics: Arc::new(PerformanceMetrics::new()),
        }
    }

    /// Create a generator from LLM configuration
    pub fn from_config(config: &LlmConfig) -> Result<Self> {
        let provider = create_provider(config)?;
        Ok(Self::new(Arc::from(provider)))
    }

    /// Generate names for raw user input.
    ///
    /// Blank or missing fields fail with `MissingField` before the provider is
    /// contacted. Every provider failure is reported as `GenerationFailed`.
    pub async fn generate_names(&self, description: &str, tone: &str) -> Result<Vec<String>> {
        let request = GenerationRequest::from_input(Some(description), Some(tone))?;
        self.generate_for(&request).await
    }

    /// Generate names for a validated request
    pub async fn generate_for(&self, request: &GenerationRequest) -> Result<Vec<String>> {
        let start_time = Instant::now();
        self.metrics.increment_generation_calls();

        tracing::info!(
            provider = %self.provider.name(),
            model = %self.provider.model(),
            tone = %request.tone,
            tone_description = %request.tone.description(),
            "Generating names"
        );

        let prompt = build_name_prompt(request);
        let result = self.provider.generate_names(&prompt).await;

        match result {
            Ok(mut names) => {
                names.truncate(NAMES_PER_RUN);
                self.metrics.add_names_generated(names.len() as u64);
                tracing::info!(
                    provider = %self.provider.name(),
                    names_count = %names.len(),
                    duration_ms = %start_time.elapsed().as_millis(),
                    "Name generation completed"
                );
                Ok(names)
            }
            Err(e) => {
                self.metrics.increment_errors();
                tracing::warn!(
                    provider = %self.provider.name(),
                    error = %e,
                    duration_ms = %start_time.elapsed().as_millis(),
                    "Name generation failed"
                );
                Err(NameForgeError::generation_failed(e.to_string()))
            }
        }
    }

    /// Name of the provider in use
    pub fn provider_name(&self) -> &'static str {
        self.provider.name()
    }

    /// Get current metrics snapshot
    pub fn get_metrics_snapshot(&self) -> MetricsSnapshot {
        self.metrics.get_stats()
    }
}

#[async_trait]
impl NameSource for NameGenerator {
    async fn generate(&self, description: &str, tone: &str) -> Result<Vec<String>> {
        self.generate_names(description, tone).await
    }
}
