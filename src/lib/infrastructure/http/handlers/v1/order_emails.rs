//! Send order email handler

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    domain::{
        communication::email_addresses::EmailAddress,
        orders::{
            emails::{EmailKind, OrderEmail},
            notifications::TransactionalEmails,
        },
    },
    infrastructure::http::{
        errors::{ApiError, ErrorResponse},
        state::AppState,
    },
};

/// Send order email request body
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct SendOrderEmailBody {
    /// Which template to send
    #[schema(value_type = String, example = "order_paid")]
    kind: EmailKind,

    /// The customer's email address
    #[schema(example = "u@example.com")]
    email: String,

    /// Order total in minor currency units
    #[schema(example = 1234)]
    total_cents: Option<u64>,
}

/// Send order email response body
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SendOrderEmailResponse {
    #[schema(example = "o1")]
    order_id: String,

    #[schema(value_type = String, example = "order_paid")]
    kind: EmailKind,
}

/// Send a transactional email for an order.
///
/// Delivery failures are retried and counted, never reported here; the
/// request only fails when the body is invalid or the email cannot be rendered.
#[utoipa::path(
    post,
    operation_id = "send_order_email",
    tag = "Orders",
    path = "/api/v1/orders/{order_id}/emails",
    params(
        ("order_id" = String, Path, description = "The storefront order id", example = "o1"),
    ),
    request_body = SendOrderEmailBody,
    responses(
        (status = StatusCode::ACCEPTED, description = "Email handled", body = SendOrderEmailResponse),
        (status = StatusCode::UNPROCESSABLE_ENTITY, description = "Unprocessable entity", body = ErrorResponse, example = json!({ "error": "Please provide a valid email address" })),
        (status = StatusCode::INTERNAL_SERVER_ERROR, description = "Email could not be rendered", body = ErrorResponse),
    )
)]
pub async fn handler<T: TransactionalEmails>(
    State(state): State<AppState<T>>,
    Path(order_id): Path<String>,
    request: Result<Json<SendOrderEmailBody>, JsonRejection>,
) -> Result<(StatusCode, Json<SendOrderEmailResponse>), ApiError> {
    let Json(body) = request?;

    let email = OrderEmail::new(
        EmailAddress::new(&body.email)?,
        order_id.clone(),
        body.total_cents,
    );

    state.emails.send(body.kind, &email).await?;

    Ok((
        StatusCode::ACCEPTED,
        Json(SendOrderEmailResponse {
            order_id,
            kind: body.kind,
        }),
    ))
}
