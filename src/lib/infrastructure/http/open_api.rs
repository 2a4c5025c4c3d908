//! OpenAPI module

use utoipa::OpenApi;

use crate::infrastructure::http::{
    errors::ErrorResponse,
    handlers::{metrics, v1::*},
};

/// OpenAPI document for the HTTP surface
#[derive(Debug, OpenApi)]
#[openapi(
    info(title = "Storefront Mailer"),
    paths(order_emails::handler, uptime::handler, metrics::handler),
    components(schemas(
        order_emails::SendOrderEmailBody,
        order_emails::SendOrderEmailResponse,
        uptime::UptimeResponse,
        ErrorResponse,
    ))
)]
pub struct ApiDocs;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_paths() {
        let docs = ApiDocs::openapi();

        for path in ["/api/v1/orders/{order_id}/emails", "/api/v1/uptime", "/metrics"] {
            assert!(docs.paths.paths.contains_key(path), "missing {path}");
        }
    }
}
