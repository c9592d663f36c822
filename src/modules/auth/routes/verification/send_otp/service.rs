use super::types::{request, response};
use crate::{modules::auth::service::otp, types::Context};
use std::sync::Arc;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    let phone = payload.phone.trim();
    if phone.is_empty() {
        return Err(response::Error::MissingPhone);
    }

    otp::start_verification(&ctx.twilio, phone)
        .await
        .map(|verification| response::Success::VerificationStarted(verification.status))
        .map_err(|err| match err {
            otp::Error::Rejected { status, body } => response::Error::Rejected { status, body },
            otp::Error::RequestFailed => response::Error::FailedToStartVerification,
        })
}
