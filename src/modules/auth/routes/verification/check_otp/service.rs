use super::types::{request, response};
use crate::{modules::auth::service::otp, types::Context, utils::phone};
use std::sync::Arc;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    // iOS webviews send the number under `to`, older app revisions under
    // `phone`.
    let raw_to = payload
        .to
        .or(payload.phone)
        .map(|to| to.trim().to_string())
        .unwrap_or_default();
    let code = payload.code.trim().to_string();

    if raw_to.is_empty() || code.is_empty() {
        return Err(response::Error::MissingRecipientOrCode);
    }

    let to = phone::normalize_us_phone(&raw_to)
        .ok_or(response::Error::UnusablePhone(raw_to))?;

    otp::check_verification(&ctx.twilio, &to, &code)
        .await
        .map(|verification| response::Success::Checked {
            valid: verification.status == "approved",
            status: verification.status,
        })
        .map_err(|err| match err {
            otp::Error::Rejected { status, body } => response::Error::Rejected { status, body },
            otp::Error::RequestFailed => response::Error::FailedToCheckVerification,
        })
}
