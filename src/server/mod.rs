//! HTTP API
//!
//! Routes:
//! - `POST /api/generate-names`
//! - `GET  /api/check-domain?name=...`
//! - `POST /api/sessions`, `GET /api/sessions/{id}`, `POST /api/sessions/{id}/generate`
//! - `GET  /health`

mod error;
mod handlers;
mod sessions;

pub use error::{ApiError, ErrorBody};
pub use handlers::{CheckDomainResponse, GenerateNamesBody, GenerateNamesResponse, SessionView};
pub use sessions::SessionStore;

use crate::domain::DomainChecker;
use crate::error::Result;
use crate::llm::NameGenerator;
use axum::routing::{get, post};
use axum::Router;
use std::future::Future;
use std::ops::Deref;
use std::sync::Arc;
use std::time::Instant;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

/// Shared state behind every handler
pub struct AppStateInner {
    pub generator: Arc<NameGenerator>,
    pub checker: Arc<DomainChecker>,
    pub sessions: SessionStore,
    started_at: Instant,
}

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

impl AppState {
    pub fn new(generator: NameGenerator, checker: DomainChecker) -> Self {
        let generator = Arc::new(generator);
        let checker = Arc::new(checker);
        let sessions = SessionStore::new(generator.clone(), checker.clone());

        Self {
            inner: Arc::new(AppStateInner {
                generator,
                checker,
                sessions,
                started_at: Instant::now(),
            }),
        }
    }

    /// Seconds since the state was built
    pub fn uptime_secs(&self) -> u64 {
        self.inner.started_at.elapsed().as_secs()
    }
}

impl Deref for AppState {
    type Target = AppStateInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

/// Build the application router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/generate-names", post(handlers::generate_names))
        .route("/api/check-domain", get(handlers::check_domain))
        .route("/api/sessions", post(handlers::create_session))
        .route("/api/sessions/{id}", get(handlers::get_session))
        .route("/api/sessions/{id}/generate", post(handlers::generate_in_session))
        .route("/health", get(handlers::health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve on an already bound listener until `shutdown` resolves
pub async fn serve<F>(listener: TcpListener, state: AppState, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let address = listener.local_addr()?;
    tracing::info!(address = %address, provider = %state.generator.provider_name(), "Server listening");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown)
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Resolves on Ctrl+C
pub async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
