use super::types::{request, response};
use crate::{modules::identity::model::VerificationSession, types::Context, utils::stripe};
use std::sync::Arc;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    let params = [
        ("type", "document"),
        ("options[document][allowed_types][0]", "driving_license"),
        ("options[document][allowed_types][1]", "passport"),
        ("options[document][allowed_types][2]", "id_card"),
        ("options[document][require_matching_selfie]", "true"),
        ("options[document][require_live_capture]", "true"),
        ("metadata[userId]", payload.user_id.as_str()),
        ("metadata[email]", payload.email.as_str()),
        ("metadata[app]", "getsuited"),
        ("return_url", ctx.stripe.identity_return_url.as_str()),
    ]
    .map(|(key, value)| (key.to_string(), value.to_string()));

    stripe::post_form::<VerificationSession>(
        &ctx.stripe,
        "/identity/verification_sessions",
        &params,
        None,
    )
    .await
    .map(response::Success::SessionCreated)
    .map_err(|_| response::Error::FailedToCreateSession)
}
