//! HTTP handlers for the product access endpoints.
//!
//! These handlers connect Axum routes to the access gateway.

use std::sync::Arc;

use axum::extract::{Json, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::application::AccessGateway;
use crate::domain::catalog::AccessError;
use crate::domain::foundation::ProductId;

use super::dto::{ErrorResponse, ProductAccessRequest, UrlResponse};

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared state for the access endpoints.
#[derive(Clone)]
pub struct AccessAppState {
    pub gateway: Arc<AccessGateway>,
}

impl AccessAppState {
    pub fn new(gateway: Arc<AccessGateway>) -> Self {
        Self { gateway }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// POST /product/:slug - Product metadata, with the paid file if entitled
pub async fn get_product_access(
    State(state): State<AccessAppState>,
    Path(slug): Path<String>,
    body: Option<Json<ProductAccessRequest>>,
) -> Result<impl IntoResponse, AccessApiError> {
    let request = body.map(|Json(request)| request).unwrap_or_default();

    let view = state
        .gateway
        .get_product_access(&slug, request.auth_token.as_deref())
        .await?;

    Ok(Json(view))
}

/// POST /login/:slug - Autologin URL for the store, or the plain product page
pub async fn get_login_url(
    State(state): State<AccessAppState>,
    Path(slug): Path<String>,
    body: Option<Json<ProductAccessRequest>>,
) -> impl IntoResponse {
    let request = body.map(|Json(request)| request).unwrap_or_default();

    let url = state
        .gateway
        .get_login_url(&slug, request.auth_token.as_deref())
        .await;

    Json(UrlResponse { url })
}

/// GET /products/:id/link - Store page of a product by id
pub async fn get_product_link(
    State(state): State<AccessAppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AccessApiError> {
    let product_id: ProductId = id
        .parse()
        .map_err(|_| AccessError::id_not_found(&id))?;

    let url = state.gateway.get_product_link(product_id).await?;

    Ok(Json(UrlResponse { url }))
}

/// GET /health
pub async fn health() -> &'static str {
    "OK"
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error wrapper for converting access errors to HTTP responses.
#[derive(Debug)]
pub struct AccessApiError(AccessError);

impl From<AccessError> for AccessApiError {
    fn from(err: AccessError) -> Self {
        Self(err)
    }
}

impl IntoResponse for AccessApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match &self.0 {
            AccessError::NotFound(_) => StatusCode::NOT_FOUND,
            AccessError::InvalidRecord { .. } => StatusCode::NOT_ACCEPTABLE,
            AccessError::Upstream(_) => StatusCode::BAD_GATEWAY,
        };

        if status.is_server_error() {
            tracing::error!(error = %self.0, "product access failed upstream");
        }

        let body = ErrorResponse::new(self.0.error_code(), self.0.to_string());
        (status, Json(body)).into_response()
    }
}
