//! Operational HTTP endpoints.
//!
//! - `/healthz`          : liveness
//! - `/metrics/{scope}`  : JSON snapshot of `server`, `runtime`, `rpc`, or `transport`

use std::time::{SystemTime, UNIX_EPOCH};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;

use shufflemetrics_core::error::{ClientCode, MetricsError, Result};
use shufflemetrics_core::Sample;

use crate::app_state::AppState;
use crate::registry::MetricsRegistry;

/// Response body of a scope snapshot.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsBody {
    /// Capture time, epoch milliseconds.
    pub time_stamp: u64,
    pub metrics: Vec<Sample>,
}

pub fn snapshot_body(registry: &MetricsRegistry, scope: &str) -> Result<MetricsBody> {
    let metrics = registry.snapshot_named(scope)?;
    let time_stamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
        .unwrap_or_default();
    Ok(MetricsBody { time_stamp, metrics })
}

pub async fn healthz() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

pub async fn metrics(State(state): State<AppState>, Path(scope): Path<String>) -> Response {
    match snapshot_body(&state.registry(), &scope) {
        Ok(body) => (StatusCode::OK, Json(body)).into_response(),
        Err(e) => error_response(&e),
    }
}

fn error_response(e: &MetricsError) -> Response {
    let code = e.client_code();
    let status = match code {
        ClientCode::NotFound => StatusCode::NOT_FOUND,
        ClientCode::BadRequest | ClientCode::UnsupportedVersion => StatusCode::BAD_REQUEST,
        ClientCode::Conflict => StatusCode::CONFLICT,
        ClientCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    };
    tracing::debug!(error = %e, status = status.as_u16(), "metrics request rejected");
    (status, Json(json!({ "code": code.as_str(), "msg": e.to_string() }))).into_response()
}
