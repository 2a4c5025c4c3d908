//! Prometheus metrics handler

use axum::{extract::State, http::header, response::IntoResponse};

use crate::{
    domain::orders::notifications::TransactionalEmails,
    infrastructure::http::{errors::ApiError, state::AppState},
};

/// Content type of the Prometheus text exposition format
pub const PROMETHEUS_CONTENT_TYPE: &str = "text/plain; version=0.0.4; charset=utf-8";

/// Dump the email send counters in Prometheus text format
#[utoipa::path(
    get,
    operation_id = "metrics",
    tag = "System",
    path = "/metrics",
    responses(
        (status = StatusCode::OK, description = "Prometheus text exposition", body = String, content_type = "text/plain"),
    )
)]
pub async fn handler<T: TransactionalEmails>(
    State(state): State<AppState<T>>,
) -> Result<impl IntoResponse, ApiError> {
    let body = state.metrics.render().map_err(anyhow::Error::from)?;

    Ok(([(header::CONTENT_TYPE, PROMETHEUS_CONTENT_TYPE)], body))
}
