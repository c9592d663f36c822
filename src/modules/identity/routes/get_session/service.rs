use super::types::{request, response};
use crate::{modules::identity::model::VerificationSession, types::Context, utils::stripe};
use std::sync::Arc;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    let id = payload.id.trim();
    if id.is_empty() {
        return Err(response::Error::MissingId);
    }
    if !id.starts_with("vs_") {
        return Err(response::Error::InvalidIdFormat(id.to_string()));
    }

    let path = format!("/identity/verification_sessions/{}", id);
    stripe::get::<VerificationSession>(&ctx.stripe, &path)
        .await
        .map(response::Success::Session)
        .map_err(|err| {
            if err.is_resource_missing() {
                response::Error::NotFound
            } else {
                response::Error::FailedToRetrieveSession
            }
        })
}
