use crate::types::Context;
use axum::extract::{Extension, FromRequestParts};
use axum::http::{request::Parts, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::{async_trait, Json, RequestPartsExt};
use serde_json::json;
use std::sync::Arc;

/// Guard for operator-only endpoints (refund, manual sweep). The caller must
/// present the shared admin token in an `x-admin-token` header.
pub struct AdminAuth;

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "error": "Unauthorized" })),
    )
        .into_response()
}

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for AdminAuth {
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Extension(ctx) = parts
            .extract::<Extension<Arc<Context>>>()
            .await
            .map_err(|_| unauthorized())?;

        let provided = parts
            .headers
            .get("x-admin-token")
            .and_then(|value| value.to_str().ok());

        match provided {
            Some(token) if token == ctx.admin.token => Ok(AdminAuth),
            _ => Err(unauthorized()),
        }
    }
}
