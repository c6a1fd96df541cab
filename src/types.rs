//! Core types and structures for name-forge

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Number of names kept from a generation response
pub const NAMES_PER_RUN: usize = 6;

/// Bounds the generation schema puts on the `names` array
pub const MIN_SCHEMA_NAMES: usize = 1;
pub const MAX_SCHEMA_NAMES: usize = 10;

/// Naming tone selected by the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Creative,
    Luxury,
    Playful,
    #[serde(rename = "vcbait")]
    VcBait,
    Magical,
    Practical,
    Inclusive,
    #[default]
    Modern,
}

impl Tone {
    /// The selectable tones, in display order
    pub const ALL: [Tone; 7] = [
        Tone::Creative,
        Tone::Luxury,
        Tone::Playful,
        Tone::VcBait,
        Tone::Magical,
        Tone::Practical,
        Tone::Inclusive,
    ];

    /// Resolve a tone label. Unknown labels fall back to `Modern`.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "creative" => Tone::Creative,
            "luxury" => Tone::Luxury,
            "playful" => Tone::Playful,
            "vcbait" => Tone::VcBait,
            "magical" => Tone::Magical,
            "practical" => Tone::Practical,
            "inclusive" => Tone::Inclusive,
            _ => Tone::Modern,
        }
    }

    /// Wire label, as accepted by `from_label`
    pub fn label(&self) -> &'static str {
        match self {
            Tone::Creative => "creative",
            Tone::Luxury => "luxury",
            Tone::Playful => "playful",
            Tone::VcBait => "vcbait",
            Tone::Magical => "magical",
            Tone::Practical => "practical",
            Tone::Inclusive => "inclusive",
            Tone::Modern => "modern",
        }
    }

    /// Human-facing name for menus
    pub fn display_name(&self) -> &'static str {
        match self {
            Tone::Creative => "Creative",
            Tone::Luxury => "Luxury",
            Tone::Playful => "Playful",
            Tone::VcBait => "VC Bait",
            Tone::Magical => "Magical",
            Tone::Practical => "Practical",
            Tone::Inclusive => "Inclusive",
            Tone::Modern => "Modern",
        }
    }

    /// Natural-language description embedded in the generation prompt
    pub fn description(&self) -> &'static str {
        match self {
            Tone::Creative => "creative, innovative, and original",
            Tone::Luxury => "luxurious, high-end, and sophisticated",
            Tone::Playful => "fun, playful, and approachable",
            Tone::VcBait => "venture capital friendly, disruptive, and scalable",
            Tone::Magical => "magical, enchanting, and whimsical",
            Tone::Practical => "practical, straightforward, and functional",
            Tone::Inclusive => "inclusive, welcoming, and community-oriented",
            Tone::Modern => "modern, clean, and forward-looking",
        }
    }
}

impl std::fmt::Display for Tone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Domain check status of a single candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DomainStatus {
    #[default]
    Idle,
    Checking,
    Available,
    Unavailable,
}

impl DomainStatus {
    /// Status for a checker verdict
    pub fn from_verdict(available: bool) -> Self {
        if available {
            DomainStatus::Available
        } else {
            DomainStatus::Unavailable
        }
    }
}

impl std::fmt::Display for DomainStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DomainStatus::Idle => write!(f, "idle"),
            DomainStatus::Checking => write!(f, "checking"),
            DomainStatus::Available => write!(f, "available"),
            DomainStatus::Unavailable => write!(f, "unavailable"),
        }
    }
}

/// A generated name and its domain check status
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NameCandidate {
    pub name: String,
    pub domain_status: DomainStatus,
}

impl NameCandidate {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            domain_status: DomainStatus::Idle,
        }
    }
}

/// A validated generation request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub description: String,
    pub tone: Tone,
}

impl GenerationRequest {
    /// Build a request from raw user input.
    ///
    /// Both fields must be non-blank; the tone label is resolved with
    /// [`Tone::from_label`].
    pub fn from_input(description: Option<&str>, tone: Option<&str>) -> crate::Result<Self> {
        let description = description.map(str::trim).filter(|d| !d.is_empty());
        let tone = tone.map(str::trim).filter(|t| !t.is_empty());

        match (description, tone) {
            (Some(description), Some(tone)) => Ok(Self {
                description: description.to_string(),
                tone: Tone::from_label(tone),
            }),
            _ => Err(crate::NameForgeError::missing_field("description and tone")),
        }
    }
}

/// Configuration for domain checking
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckConfig {
    /// Artificial latency applied to every check
    pub delay: Duration,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            delay: Duration::from_millis(800),
        }
    }
}

/// LLM configuration
#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub provider: String,
    pub model: String,
    pub api_key: String,
    pub base_url: Option<String>,
    pub temperature: f32,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: "gemini".to_string(),
            model: "gemini-2.5-flash".to_string(),
            api_key: String::new(),
            base_url: None,
            temperature: 0.7,
        }
    }
}

/// Lock-free counters shared by the generator and the checker
#[derive(Debug, Default)]
pub struct PerformanceMetrics {
    generation_calls: AtomicU64,
    names_generated: AtomicU64,
    domains_checked: AtomicU64,
    total_check_time_ms: AtomicU64,
    errors_encountered: AtomicU64,
}

impl PerformanceMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment_generation_calls(&self) {
        self.generation_calls.fetch_add(1, Ordering::Relaxed);
    }

    pub fn add_names_generated(&self, count: u64) {
        self.names_generated.fetch_add(count, Ordering::Relaxed);
    }

    pub fn increment_domains_checked(&self) {
        self.domains_checked.fetch_add(1, Ordering::Relaxed);
    }

    pub fn add_check_time(&self, millis: u64) {
        self.total_check_time_ms.fetch_add(millis, Ordering::Relaxed);
    }

    pub fn increment_errors(&self) {
        self.errors_encountered.fetch_add(1, Ordering::Relaxed);
    }

    pub fn get_stats(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            generation_calls: self.generation_calls.load(Ordering::Relaxed),
            names_generated: self.names_generated.load(Ordering::Relaxed),
            domains_checked: self.domains_checked.load(Ordering::Relaxed),
            total_check_time_ms: self.total_check_time_ms.load(Ordering::Relaxed),
            errors_encountered: self.errors_encountered.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time copy of [`PerformanceMetrics`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    pub generation_calls: u64,
    pub names_generated: u64,
    pub domains_checked: u64,
    pub total_check_time_ms: u64,
    pub errors_encountered: u64,
}

impl MetricsSnapshot {
    pub fn avg_check_time_ms(&self) -> f64 {
        if self.domains_checked == 0 {
            0.0
        } else {
            self.total_check_time_ms as f64 / self.domains_checked as f64
        }
    }

    /// Sum of two snapshots, used to report generator and checker together
    pub fn merge(self, other: MetricsSnapshot) -> MetricsSnapshot {
        MetricsSnapshot {
            generation_calls: self.generation_calls + other.generation_calls,
            names_generated: self.names_generated + other.names_generated,
            domains_checked: self.domains_checked + other.domains_checked,
            total_check_time_ms: self.total_check_time_ms + other.total_check_time_ms,
            errors_encountered: self.errors_encountered + other.errors_encountered,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tone_known_labels() {
        for tone in Tone::ALL {
            assert_eq!(Tone::from_label(tone.label()), tone);
        }
        assert_eq!(Tone::from_label("  VCBait "), Tone::VcBait);
    }

    #[test]
    fn test_unknown_tone_falls_back_to_modern() {
        for label in ["", "modern", "edgy", "LUXURIOUS"] {
            let tone = Tone::from_label(label);
            assert_eq!(tone, Tone::Modern);
            assert_eq!(tone.description(), "modern, clean, and forward-looking");
        }
    }

    #[test]
    fn test_tone_serde_labels() {
        assert_eq!(serde_json::to_string(&Tone::VcBait).unwrap(), "\"vcbait\"");
        let tone: Tone = serde_json::from_str("\"magical\"").unwrap();
        assert_eq!(tone, Tone::Magical);
    }

    #[test]
    fn test_candidate_serializes_camel_case() {
        let candidate = NameCandidate::new("Nuvem");
        let json = serde_json::to_value(&candidate).unwrap();
        assert_eq!(json["name"], "Nuvem");
        assert_eq!(json["domainStatus"], "idle");
    }

    #[test]
    fn test_generation_request_requires_both_fields() {
        assert!(GenerationRequest::from_input(Some("coffee roaster"), Some("playful")).is_ok());

        for (description, tone) in [
            (None, Some("playful")),
            (Some("coffee roaster"), None),
            (Some("   "), Some("playful")),
            (Some("coffee roaster"), Some("")),
        ] {
            let err = GenerationRequest::from_input(description, tone).unwrap_err();
            assert!(matches!(err, crate::NameForgeError::MissingField { .. }));
        }
    }

    #[test]
    fn test_metrics_snapshot() {
        let metrics = PerformanceMetrics::new();
        metrics.increment_domains_checked();
        metrics.increment_domains_checked();
        metrics.add_check_time(300);
        metrics.add_check_time(500);

        let stats = metrics.get_stats();
        assert_eq!(stats.domains_checked, 2);
        assert_eq!(stats.avg_check_time_ms(), 400.0);
    }
}
