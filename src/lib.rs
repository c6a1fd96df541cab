//! Name Forge - AI-powered startup name generation
//!
//! Generates brandable startup names from a description and a tone, then
//! sweeps the candidates through a simulated domain availability check.

pub mod client;
pub mod config;
pub mod domain;
pub mod error;
pub mod llm;
pub mod orchestrator;
pub mod server;
pub mod types;

// Re-export commonly used types
pub use error::{NameForgeError, Result};
pub use types::{
    CheckConfig, DomainStatus, GenerationRequest, LlmConfig, MetricsSnapshot, NameCandidate,
    PerformanceMetrics, Tone,
};

// Re-export main functionality
pub use client::ApiClient;
pub use config::AppConfig;
pub use domain::DomainChecker;
pub use llm::NameGenerator;
pub use orchestrator::{Orchestrator, RunOutcome, SessionSnapshot};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize the library
pub fn init() -> Result<()> {
    // Load .env file if it exists
    dotenv::dotenv().ok();
    Ok(())
}
