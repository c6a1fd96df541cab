//! Session state and its transitions

use crate::types::{DomainStatus, NameCandidate, Tone};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Where the current run is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum RunPhase {
    #[default]
    Idle,
    Generating,
    Checking { index: usize },
    Done,
    Failed,
}

impl RunPhase {
    pub fn is_active(&self) -> bool {
        matches!(self, RunPhase::Generating | RunPhase::Checking { .. })
    }
}

/// Everything a presentation layer needs to render one session
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    /// Incremented by every run; writes from older runs are discarded
    pub run: u64,
    pub description: String,
    pub tone: Tone,
    pub is_generating: bool,
    pub phase: RunPhase,
    pub results: Vec<NameCandidate>,
    pub error: Option<String>,
    pub started_at: Option<DateTime<Utc>>,
    pub finished_at: Option<DateTime<Utc>>,
}

impl SessionSnapshot {
    /// Number of entries currently being checked
    pub fn checking_count(&self) -> usize {
        self.results
            .iter()
            .filter(|c| c.domain_status == DomainStatus::Checking)
            .count()
    }

    /// Number of entries reported available
    pub fn available_count(&self) -> usize {
        self.results
            .iter()
            .filter(|c| c.domain_status == DomainStatus::Available)
            .count()
    }

    pub(crate) fn begin_run(&mut self) -> u64 {
        self.run += 1;
        self.set_phase(RunPhase::Generating);
        self.results.clear();
        self.error = None;
        self.started_at = Some(Utc::now());
        self.finished_at = None;
        self.run
    }

    pub(crate) fn candidates_ready(&mut self, names: Vec<String>) {
        self.results = names.into_iter().map(NameCandidate::new).collect();
    }

    pub(crate) fn mark_checking(&mut self, index: usize) {
        if let Some(candidate) = self.results.get_mut(index) {
            candidate.domain_status = DomainStatus::Checking;
            self.set_phase(RunPhase::Checking { index });
        }
    }

    pub(crate) fn mark_verdict(&mut self, index: usize, status: DomainStatus) {
        if let Some(candidate) = self.results.get_mut(index) {
            candidate.domain_status = status;
        }
    }

    pub(crate) fn finish(&mut self) {
        self.set_phase(RunPhase::Done);
        self.finished_at = Some(Utc::now());
    }

    pub(crate) fn fail(&mut self, message: String) {
        self.results.clear();
        self.error = Some(message);
        self.set_phase(RunPhase::Failed);
        self.finished_at = Some(Utc::now());
    }

    fn set_phase(&mut self, phase: RunPhase) {
        self.phase = phase;
        self.is_generating = phase.is_active();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_begin_run_clears_previous_results() {
        let mut state = SessionSnapshot::default();
        state.begin_run();
        state.candidates_ready(vec!["Nuvem".to_string()]);
        state.fail("boom".to_string());

        let run = state.begin_run();
        assert_eq!(run, 2);
        assert!(state.results.is_empty());
        assert!(state.error.is_none());
        assert!(state.is_generating);
        assert_eq!(state.phase, RunPhase::Generating);
    }

    #[test]
    fn test_checking_sweep() {
        let mut state = SessionSnapshot::default();
        state.begin_run();
        state.candidates_ready(vec!["Stripe".to_string(), "Notion".to_string()]);

        state.mark_checking(0);
        assert_eq!(state.checking_count(), 1);
        assert_eq!(state.phase, RunPhase::Checking { index: 0 });

        state.mark_verdict(0, DomainStatus::Available);
        state.mark_checking(1);
        state.mark_verdict(1, DomainStatus::Idle);
        state.finish();

        assert_eq!(state.checking_count(), 0);
        assert_eq!(state.available_count(), 1);
        assert!(!state.is_generating);
        assert!(state.finished_at.is_some());
    }

    #[test]
    fn test_failure_empties_results() {
        let mut state = SessionSnapshot::default();
        state.begin_run();
        state.candidates_ready(vec!["Stripe".to_string()]);
        state.fail("quota".to_string());

        assert!(state.results.is_empty());
        assert_eq!(state.error.as_deref(), Some("quota"));
        assert_eq!(state.phase, RunPhase::Failed);
        assert!(!state.is_generating);
    }

    #[test]
    fn test_snapshot_wire_format() {
        let mut state = SessionSnapshot::default();
        state.begin_run();
        state.candidates_ready(vec!["Stripe".to_string()]);
        state.mark_checking(0);

        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["isGenerating"], true);
        assert_eq!(json["phase"]["state"], "checking");
        assert_eq!(json["phase"]["index"], 0);
        assert_eq!(json["results"][0]["domainStatus"], "checking");
        assert_eq!(json["tone"], "modern");
    }
}
