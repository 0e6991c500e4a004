//! REST API handlers for impact decomposition and operational endpoints.

use axum::extract::{Query, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use revlens_core::config::ReportConfig;
use revlens_core::types::{ImpactResult, SnapshotPair};
use revlens_engine::compute;
use revlens_reporting::{ExportFormat, ImpactReportBuilder};
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{error, warn};
use utoipa::{IntoParams, ToSchema};

/// Shared application state for REST handlers.
#[derive(Clone)]
pub struct AppState {
    pub report: ReportConfig,
    pub start_time: Instant,
}

/// Boundary check: the engine takes any real number, so the API rejects
/// the values that are not real numbers (NaN, ±infinity) up front.
fn check_finite(pair: &SnapshotPair) -> Result<(), (StatusCode, Json<ErrorResponse>)> {
    if let Err(e) = pair.validate() {
        warn!(error = %e, "Snapshot validation failed");
        metrics::counter!("api.validation_errors").increment(1);
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "invalid_snapshot".to_string(),
                message: e.to_string(),
            }),
        ));
    }
    Ok(())
}

/// POST /v1/impact — decompose a revenue change into factor impacts.
#[utoipa::path(
    post,
    path = "/v1/impact",
    tag = "Impact",
    request_body = SnapshotPair,
    responses(
        (status = 200, description = "Decomposition result", body = ImpactResult),
        (status = 400, description = "Snapshot contains a non-finite field", body = ErrorResponse),
    )
)]
pub async fn handle_impact(
    Json(pair): Json<SnapshotPair>,
) -> Result<Json<ImpactResult>, (StatusCode, Json<ErrorResponse>)> {
    check_finite(&pair)?;
    metrics::counter!("api.requests").increment(1);
    Ok(Json(compute(&pair.old, &pair.new)))
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ReportQuery {
    /// Output format: text, json, csv, or html. Defaults to text.
    pub format: Option<String>,
}

/// POST /v1/impact/report — decompose and render a full report.
#[utoipa::path(
    post,
    path = "/v1/impact/report",
    tag = "Impact",
    request_body = SnapshotPair,
    params(ReportQuery),
    responses(
        (status = 200, description = "Rendered report in the requested format"),
        (status = 400, description = "Non-finite field or unknown format", body = ErrorResponse),
    )
)]
pub async fn handle_report(
    State(state): State<AppState>,
    Query(query): Query<ReportQuery>,
    Json(pair): Json<SnapshotPair>,
) -> Result<Response, (StatusCode, Json<ErrorResponse>)> {
    check_finite(&pair)?;

    let format = match query.format.as_deref() {
        None => ExportFormat::Text,
        Some(raw) => raw.parse().map_err(|message: String| {
            warn!(format = raw, "Unknown report format requested");
            (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: "invalid_format".to_string(),
                    message,
                }),
            )
        })?,
    };

    let result = compute(&pair.old, &pair.new);
    let report = ImpactReportBuilder::from_config(&state.report).build(&result);
    let body = report.render(format).map_err(|e| {
        error!(error = %e, "Report rendering failed");
        metrics::counter!("api.errors").increment(1);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: "report_rendering_failed".to_string(),
                message: "Internal rendering error".to_string(),
            }),
        )
    })?;

    let content_type = match format {
        ExportFormat::Text => "text/plain; charset=utf-8",
        ExportFormat::Json => "application/json",
        ExportFormat::Csv => "text/csv",
        ExportFormat::Html => "text/html; charset=utf-8",
    };
    metrics::counter!("api.requests").increment(1);
    Ok(([(header::CONTENT_TYPE, content_type)], body).into_response())
}

/// GET /v1/impact/demo — decomposition of the built-in demo pair.
#[utoipa::path(
    get,
    path = "/v1/impact/demo",
    tag = "Impact",
    responses(
        (status = 200, description = "Decomposition of the demo snapshot pair", body = ImpactResult),
    )
)]
pub async fn handle_demo() -> Json<ImpactResult> {
    let pair = SnapshotPair::demo();
    Json(compute(&pair.old, &pair.new))
}

/// GET /health — Health check endpoint.
#[utoipa::path(
    get,
    path = "/health",
    tag = "Operations",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
    )
)]
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        uptime_secs: state.start_time.elapsed().as_secs(),
    })
}

/// GET /ready — Readiness probe for Kubernetes.
#[utoipa::path(
    get,
    path = "/ready",
    tag = "Operations",
    responses(
        (status = 200, description = "Service is ready to accept traffic"),
        (status = 503, description = "Service is still starting"),
    )
)]
pub async fn readiness(State(state): State<AppState>) -> StatusCode {
    if state.start_time.elapsed().as_secs() > 0 {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    }
}

/// GET /live — Liveness probe for Kubernetes.
#[utoipa::path(
    get,
    path = "/live",
    tag = "Operations",
    responses(
        (status = 200, description = "Process is alive"),
    )
)]
pub async fn liveness() -> StatusCode {
    StatusCode::OK
}

#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub uptime_secs: u64,
}
