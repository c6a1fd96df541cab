//! Domain availability checking module
//!
//! The verdicts come from a deterministic placeholder heuristic, not from a
//! registrar. See [`heuristic`] for the rules.

pub mod checker;
pub mod heuristic;

// Re-export main functionality
pub use checker::DomainChecker;
pub use heuristic::{is_available, normalize};

use crate::error::Result;
use async_trait::async_trait;

/// Anything that can answer "is `<name>.com` free?"
#[async_trait]
pub trait AvailabilityCheck: Send + Sync {
    /// Check whether a candidate name is available
    async fn check_availability(&self, name: &str) -> Result<bool>;
}

/// Registrar used for the out-of-band "search this name" link
pub const REGISTRAR_SEARCH_URL: &str = "https://www.godaddy.com/domainsearch/find";

/// Link that opens a registrar search for `<name>.com`
pub fn registrar_search_url(name: &str) -> String {
    format!("{}?domainToCheck={}.com", REGISTRAR_SEARCH_URL, normalize(name))
}
