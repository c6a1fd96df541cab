//! Domain availability checker

use crate::domain::{heuristic, AvailabilityCheck};
use crate::error::{NameForgeError, Result};
use crate::types::{CheckConfig, MetricsSnapshot, PerformanceMetrics};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Instant;

/// Simulated availability checker with performance monitoring
pub struct DomainChecker {
    config: CheckConfig,
    metrics: Arc<PerformanceMetrics>,
}

impl DomainChecker {
    /// Create a new domain checker with default configuration
    pub fn new() -> Self {
        Self::with_config(CheckConfig::default())
    }

    /// Create a new domain checker with custom configuration
    pub fn with_config(config: CheckConfig) -> Self {
        Self {
            config,
            metrics: Arc::new(PerformanceMetrics::new()),
        }
    }

    /// Check a single name.
    ///
    /// A blank name is rejected before the artificial delay starts.
    pub async fn check_domain(&self, name: &str) -> Result<bool> {
        let normalized = heuristic::normalize(name);
        if normalized.is_empty() {
            return Err(NameForgeError::missing_parameter("name"));
        }

        let start_time = Instant::now();
        tracing::info!(name = %name, "Checking domain availability");

        if !self.config.delay.is_zero() {
            tokio::time::sleep(self.config.delay).await;
        }

        let available = heuristic::is_available(&normalized);
        let duration = start_time.elapsed();

        self.metrics.increment_domains_checked();
        self.metrics.add_check_time(duration.as_millis() as u64);

        tracing::info!(
            name = %name,
            available = available,
            duration_ms = %duration.as_millis(),
            "Domain check completed"
        );

        Ok(available)
    }

    /// Get checker configuration
    pub fn config(&self) -> &CheckConfig {
        &self.config
    }

    /// Get current metrics snapshot
    pub fn get_metrics_snapshot(&self) -> MetricsSnapshot {
        self.metrics.get_stats()
    }
}

impl Default for DomainChecker {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AvailabilityCheck for DomainChecker {
    async fn check_availability(&self, name: &str) -> Result<bool> {
        self.check_domain(name).await
    }
}
