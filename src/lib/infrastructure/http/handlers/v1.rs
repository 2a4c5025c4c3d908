//! Version 1 API routes

use axum::{
    routing::{get, post},
    Json, Router,
};
use utoipa::OpenApi;

use crate::{
    domain::orders::notifications::TransactionalEmails,
    infrastructure::http::{open_api::ApiDocs, state::AppState},
};

pub mod order_emails;
pub mod uptime;

/// Routes nested under `/api/v1`
pub fn router<T: TransactionalEmails>() -> Router<AppState<T>> {
    Router::new()
        .route("/openapi.json", get(Json(ApiDocs::openapi())))
        .route("/uptime", get(uptime::handler))
        .route("/orders/:order_id/emails", post(order_emails::handler))
}
