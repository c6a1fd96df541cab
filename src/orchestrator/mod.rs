//! Session orchestrator
//!
//! Owns one session's state and drives a run: generate names once, then
//! check each candidate strictly in list order. Every transition is
//! published on a `watch` channel for the presentation layer.
//!
//! Starting a run invalidates the previous one. Its cancellation token fires
//! and every state write is guarded by the run counter, so a superseded run
//! can never touch the new result list.

pub mod state;

pub use state::{RunPhase, SessionSnapshot};

use crate::domain::AvailabilityCheck;
use crate::error::NameForgeError;
use crate::llm::NameSource;
use crate::types::{DomainStatus, Tone};
use parking_lot::Mutex;
use std::sync::Arc;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

/// How a run ended
#[derive(Debug, Clone)]
pub enum RunOutcome {
    /// The description was blank; nothing happened
    Skipped,
    /// Every candidate went through the checker
    Completed { checked: usize, available: usize },
    /// Generation failed; the session shows the error
    Failed(NameForgeError),
    /// A newer run started before this one finished
    Superseded,
}

struct Inner {
    names: Arc<dyn NameSource>,
    checker: Arc<dyn AvailabilityCheck>,
    state: watch::Sender<SessionSnapshot>,
    active: Mutex<Option<CancellationToken>>,
}

/// One session's generate-then-check pipeline
#[derive(Clone)]
pub struct Orchestrator {
    inner: Arc<Inner>,
}

impl Orchestrator {
    pub fn new(names: Arc<dyn NameSource>, checker: Arc<dyn AvailabilityCheck>) -> Self {
        let (state, _) = watch::channel(SessionSnapshot::default());
        Self {
            inner: Arc::new(Inner {
                names,
                checker,
                state,
                active: Mutex::new(None),
            }),
        }
    }

    /// Observe every state change
    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.inner.state.subscribe()
    }

    /// Current state
    pub fn snapshot(&self) -> SessionSnapshot {
        self.inner.state.borrow().clone()
    }

    pub fn set_description(&self, description: impl Into<String>) {
        let description = description.into();
        self.inner.state.send_modify(|s| s.description = description);
    }

    pub fn set_tone(&self, tone: Tone) {
        self.inner.state.send_modify(|s| s.tone = tone);
    }

    /// Run the pipeline for the current description and tone.
    ///
    /// Re-triggering while a run is in flight cancels that run.
    pub async fn generate(&self) -> RunOutcome {
        match self.start() {
            Some(pending) => pending.drive().await,
            None => RunOutcome::Skipped,
        }
    }

    /// Alias for [`Orchestrator::generate`]; a full restart of the pipeline
    pub async fn regenerate(&self) -> RunOutcome {
        self.generate().await
    }

    /// Begin a run for the current description and tone without driving it.
    ///
    /// The session is already `Generating` when this returns and any previous
    /// run has been cancelled. Returns `None` for a blank description.
    pub fn start(&self) -> Option<PendingRun> {
        let (description, tone) = {
            let state = self.inner.state.borrow();
            (state.description.clone(), state.tone)
        };
        self.start_with(description, tone)
    }

    /// Set the inputs and begin a run in one state write, so concurrent
    /// callers never mix one request's description with another's tone.
    ///
    /// A blank description leaves the session untouched and returns `None`.
    pub fn start_with(&self, description: impl Into<String>, tone: Tone) -> Option<PendingRun> {
        let description = description.into();
        if description.trim().is_empty() {
            return None;
        }

        let token = CancellationToken::new();
        let run = {
            let mut active = self.inner.active.lock();
            if let Some(previous) = active.replace(token.clone()) {
                previous.cancel();
            }
            let mut run = 0;
            self.inner.state.send_modify(|s| {
                s.description = description.clone();
                s.tone = tone;
                run = s.begin_run();
            });
            run
        };

        tracing::info!(run = run, tone = %tone, "Starting name generation run");

        Some(PendingRun {
            orchestrator: self.clone(),
            run,
            token,
            description,
            tone,
        })
    }

    /// Whether a run is in flight
    pub fn is_generating(&self) -> bool {
        self.inner.state.borrow().is_generating
    }

    /// Apply a write only if `run` is still the current run
    fn update(&self, run: u64, apply: impl FnOnce(&mut SessionSnapshot)) -> bool {
        self.inner.state.send_if_modified(|s| {
            if s.run != run {
                return false;
            }
            apply(s);
            true
        })
    }
}

/// A started run, waiting to be driven
pub struct PendingRun {
    orchestrator: Orchestrator,
    run: u64,
    token: CancellationToken,
    description: String,
    tone: Tone,
}

impl PendingRun {
    /// Run number assigned to this run
    pub fn run(&self) -> u64 {
        self.run
    }

    /// Generate, then check each name in order
    pub async fn drive(self) -> RunOutcome {
        let PendingRun {
            orchestrator,
            run,
            token,
            description,
            tone,
        } = self;
        let inner = &orchestrator.inner;

        let generated = tokio::select! {
            _ = token.cancelled() => return RunOutcome::Superseded,
            result = inner.names.generate(&description, tone.label()) => result,
        };

        let names = match generated {
            Ok(names) => names,
            Err(e) => {
                tracing::warn!(run = run, error = %e, "Error generating names");
                return if orchestrator.update(run, |s| s.fail(e.to_string())) {
                    RunOutcome::Failed(e)
                } else {
                    RunOutcome::Superseded
                };
            }
        };

        if !orchestrator.update(run, |s| s.candidates_ready(names.clone())) {
            return RunOutcome::Superseded;
        }

        let mut available = 0;
        for (index, name) in names.iter().enumerate() {
            if !orchestrator.update(run, |s| s.mark_checking(index)) {
                return RunOutcome::Superseded;
            }

            let verdict = tokio::select! {
                _ = token.cancelled() => return RunOutcome::Superseded,
                result = inner.checker.check_availability(name) => result,
            };

            let status = match verdict {
                Ok(is_available) => DomainStatus::from_verdict(is_available),
                Err(e) => {
                    // Non-fatal: the entry goes back to idle and the sweep continues
                    tracing::warn!(run = run, name = %name, error = %e, "Error checking domain");
                    DomainStatus::Idle
                }
            };
            if status == DomainStatus::Available {
                available += 1;
            }

            if !orchestrator.update(run, |s| s.mark_verdict(index, status)) {
                return RunOutcome::Superseded;
            }
        }

        if !orchestrator.update(run, |s| s.finish()) {
            return RunOutcome::Superseded;
        }

        tracing::info!(run = run, checked = names.len(), available = available, "Run completed");
        RunOutcome::Completed {
            checked: names.len(),
            available,
        }
    }
}
