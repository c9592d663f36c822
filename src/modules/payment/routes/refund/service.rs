use super::types::{request, response};
use crate::{
    modules::payment::{
        model::{PaymentIntent, Refund},
        utils,
    },
    types::Context,
    utils::stripe,
};
use std::sync::Arc;

/// Refund a Stripe Connect destination charge. The transfer to the lister is
/// always reversed; whether the platform fee goes back too is the caller's
/// policy choice.
pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    let payment_intent_id = payload.payment_intent_id.trim();
    if payment_intent_id.is_empty() {
        return Err(response::Error::MissingPaymentIntentId);
    }

    let path = format!("/payment_intents/{}", payment_intent_id);
    let intent = stripe::get::<PaymentIntent>(&ctx.stripe, &path)
        .await
        .map_err(|_| response::Error::FailedToRetrievePaymentIntent)?;

    if intent.status != "succeeded" {
        return Err(response::Error::PaymentIntentNotSucceeded(intent.status));
    }

    tracing::debug!("Refunding payment intent {}", intent.id);

    let already_refunded = intent.refunded_cents();
    let max_refundable = utils::max_refundable(intent.received_cents(), already_refunded);
    if max_refundable <= 0 {
        return Err(response::Error::NothingToRefund);
    }

    let amount = utils::resolve_refund_amount(payload.amount, max_refundable).map_err(|err| {
        match err {
            utils::AmountError::NotPositive => response::Error::InvalidAmount,
            utils::AmountError::ExceedsMaxRefundable(max) => {
                response::Error::AmountExceedsMaxRefundable(max)
            }
        }
    })?;

    let return_platform_fee = payload
        .platform_fee_policy
        .as_deref()
        .map(|policy| policy.eq_ignore_ascii_case("return"))
        .unwrap_or(false);
    let policy_label = if return_platform_fee { "return" } else { "keep" };
    let reason = payload
        .reason
        .unwrap_or_else(|| "requested_by_customer".to_string());

    let params = [
        ("payment_intent", payment_intent_id.to_string()),
        ("amount", amount.to_string()),
        ("reason", reason),
        ("reverse_transfer", "true".to_string()),
        ("refund_application_fee", return_platform_fee.to_string()),
        ("metadata[app]", "GetSuited".to_string()),
        ("metadata[platform_fee_policy]", policy_label.to_string()),
    ]
    .map(|(key, value)| (key.to_string(), value));

    let refund = stripe::post_form::<Refund>(
        &ctx.stripe,
        "/refunds",
        &params,
        payload.idempotency_key.as_deref(),
    )
    .await
    .map_err(|_| response::Error::FailedToCreateRefund)?;

    Ok(response::Success::Refunded {
        payment_intent_id: payment_intent_id.to_string(),
        platform_fee_policy: policy_label,
        max_refundable_cents: max_refundable,
        amount_already_refunded_cents: already_refunded + refund.amount,
        refund,
    })
}
