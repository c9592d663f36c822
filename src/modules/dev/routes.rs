use crate::{modules::auth::service::otp, types::Context};
use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, Router},
    Json,
};
use serde_json::json;
use std::sync::Arc;

fn sid_shape(sid: &str) -> serde_json::Value {
    json!({ "prefix": sid.chars().take(8).collect::<String>(), "len": sid.len() })
}

/// Echo the shape (never the value) of the configured Twilio identifiers.
/// Account and service sids should both be 34 chars; mismatches usually mean
/// the deploy is not reading the env vars you think it is.
async fn whoami(State(ctx): State<Arc<Context>>) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(json!({
            "environment": ctx.app.environment.as_str(),
            "using": {
                "account_sid": sid_shape(&ctx.twilio.account_sid),
                "verify_service_sid": sid_shape(&ctx.twilio.verify_service_sid),
                "auth_token_len": ctx.twilio.auth_token.len(),
            },
            "note": "Lengths should be AC=34, VA=34."
        })),
    )
}

/// List the Verify services these credentials can actually see, and whether
/// the configured one is among them. A missing target means the service
/// belongs to a different Twilio project.
async fn verify_services(State(ctx): State<Arc<Context>>) -> impl IntoResponse {
    match otp::list_services(&ctx.twilio).await {
        Ok(services) => {
            let has_target = services
                .iter()
                .any(|service| service.sid == ctx.twilio.verify_service_sid);
            let visible = services
                .iter()
                .map(|service| json!({ "sid": service.sid, "name": service.friendly_name }))
                .collect::<Vec<_>>();

            (
                StatusCode::OK,
                Json(json!({
                    "target_sid": ctx.twilio.verify_service_sid,
                    "has_target": has_target,
                    "visible_services": visible
                })),
            )
                .into_response()
        }
        Err(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": "Twilio call failed" })),
        )
            .into_response(),
    }
}

pub fn get_router() -> Router<Arc<Context>> {
    Router::new()
        .route("/whoami", get(whoami))
        .route("/verify-services", get(verify_services))
}
