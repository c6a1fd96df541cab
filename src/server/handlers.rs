use super::{ApiError, AppState};
use crate::error::NameForgeError;
use crate::orchestrator::SessionSnapshot;
use crate::types::{GenerationRequest, MetricsSnapshot, Tone};
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Body of `POST /api/generate-names` and `POST /api/sessions/{id}/generate`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerateNamesBody {
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub tone: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateNamesResponse {
    pub names: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct CheckDomainParams {
    name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckDomainResponse {
    pub available: bool,
}

/// A session snapshot tagged with its id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionView {
    pub id: Uuid,
    #[serde(flatten)]
    pub session: SessionSnapshot,
}

#[derive(Debug, Serialize)]
pub(super) struct HealthResponse {
    status: &'static str,
    version: &'static str,
    uptime: u64,
    provider: &'static str,
    sessions: usize,
    metrics: MetricsSnapshot,
}

pub(super) async fn generate_names(
    State(state): State<AppState>,
    body: Result<Json<GenerateNamesBody>, JsonRejection>,
) -> Result<Json<GenerateNamesResponse>, ApiError> {
    let Json(body) = body.map_err(|e| NameForgeError::invalid_request(e.body_text()))?;

    let request = GenerationRequest::from_input(body.description.as_deref(), body.tone.as_deref())?;
    tracing::info!(
        description = %request.description,
        tone = %request.tone,
        "Processing generate-names request"
    );

    let names = state.generator.generate_for(&request).await?;
    Ok(Json(GenerateNamesResponse { names }))
}

pub(super) async fn check_domain(
    State(state): State<AppState>,
    params: Result<Query<CheckDomainParams>, QueryRejection>,
) -> Result<Json<CheckDomainResponse>, ApiError> {
    let Query(params) = params.map_err(|e| NameForgeError::invalid_request(e.body_text()))?;
    let name = params.name.unwrap_or_default();

    let available = state.checker.check_domain(&name).await?;
    Ok(Json(CheckDomainResponse { available }))
}

pub(super) async fn create_session(State(state): State<AppState>) -> impl IntoResponse {
    let (id, orchestrator) = state.sessions.create();
    (
        StatusCode::CREATED,
        Json(SessionView {
            id,
            session: orchestrator.snapshot(),
        }),
    )
}

pub(super) async fn get_session(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<SessionView>, ApiError> {
    let id = session_id(id)?;
    let orchestrator = state.sessions.get(&id)?;
    Ok(Json(SessionView {
        id,
        session: orchestrator.snapshot(),
    }))
}

/// Start a run in the background and return the `Generating` snapshot
pub(super) async fn generate_in_session(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
    body: Result<Json<GenerateNamesBody>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let id = session_id(id)?;
    let orchestrator = state.sessions.get(&id)?;
    let Json(body) = body.map_err(|e| NameForgeError::invalid_request(e.body_text()))?;

    // The session keeps its current tone when none is sent
    let tone = body
        .tone
        .as_deref()
        .map(Tone::from_label)
        .unwrap_or_else(|| orchestrator.snapshot().tone);
    let request = GenerationRequest::from_input(body.description.as_deref(), Some(tone.label()))?;

    let pending = orchestrator
        .start_with(request.description, request.tone)
        .ok_or_else(|| NameForgeError::missing_field("description"))?;
    tracing::info!(session = %id, run = pending.run(), "Session run started");
    tokio::spawn(pending.drive());

    Ok((
        StatusCode::ACCEPTED,
        Json(SessionView {
            id,
            session: orchestrator.snapshot(),
        }),
    ))
}

pub(super) async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let body = HealthResponse {
        status: "up",
        version: crate::VERSION,
        uptime: state.uptime_secs(),
        provider: state.generator.provider_name(),
        sessions: state.sessions.len(),
        metrics: state
            .generator
            .get_metrics_snapshot()
            .merge(state.checker.get_metrics_snapshot()),
    };

    (
        [
            (header::CACHE_CONTROL, "no-store, no-cache, must-revalidate"),
            (header::PRAGMA, "no-cache"),
        ],
        Json(body),
    )
}

fn session_id(id: Result<Path<Uuid>, PathRejection>) -> Result<Uuid, NameForgeError> {
    id.map(|Path(id)| id)
        .map_err(|_| NameForgeError::session_not_found("(malformed id)"))
}
