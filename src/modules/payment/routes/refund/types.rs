pub mod request {
    use serde::Deserialize;

    #[derive(Deserialize)]
    pub struct Payload {
        #[serde(default)]
        pub payment_intent_id: String,
        /// Cents; omit to refund everything remaining.
        #[serde(default)]
        pub amount: Option<i64>,
        /// "keep" (default) or "return".
        #[serde(default)]
        pub platform_fee_policy: Option<String>,
        #[serde(default)]
        pub reason: Option<String>,
        #[serde(default)]
        pub idempotency_key: Option<String>,
    }
}

pub mod response {
    use crate::modules::payment::model::Refund;
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::json;

    pub enum Success {
        Refunded {
            refund: Refund,
            payment_intent_id: String,
            platform_fee_policy: &'static str,
            max_refundable_cents: i64,
            amount_already_refunded_cents: i64,
        },
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::Refunded {
                    refund,
                    payment_intent_id,
                    platform_fee_policy,
                    max_refundable_cents,
                    amount_already_refunded_cents,
                } => (
                    StatusCode::OK,
                    Json(json!({
                        "ok": true,
                        "refund_id": refund.id,
                        "status": refund.status,
                        "amount": refund.amount,
                        "payment_intent_id": payment_intent_id,
                        "platform_fee_policy": platform_fee_policy,
                        "max_refundable_cents": max_refundable_cents,
                        "amount_already_refunded_cents": amount_already_refunded_cents
                    })),
                )
                    .into_response(),
            }
        }
    }

    pub enum Error {
        MissingPaymentIntentId,
        FailedToRetrievePaymentIntent,
        PaymentIntentNotSucceeded(String),
        NothingToRefund,
        InvalidAmount,
        AmountExceedsMaxRefundable(i64),
        FailedToCreateRefund,
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::MissingPaymentIntentId => (
                    StatusCode::BAD_REQUEST,
                    Json(json!({ "ok": false, "error": "payment_intent_id required" })),
                )
                    .into_response(),
                Self::FailedToRetrievePaymentIntent => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "ok": false, "error": "Failed to retrieve payment intent" })),
                )
                    .into_response(),
                Self::PaymentIntentNotSucceeded(status) => (
                    StatusCode::BAD_REQUEST,
                    Json(json!({
                        "ok": false,
                        "error": format!("PaymentIntent not succeeded (status={})", status)
                    })),
                )
                    .into_response(),
                Self::NothingToRefund => (
                    StatusCode::BAD_REQUEST,
                    Json(json!({ "ok": false, "error": "Nothing left to refund" })),
                )
                    .into_response(),
                Self::InvalidAmount => (
                    StatusCode::BAD_REQUEST,
                    Json(json!({
                        "ok": false,
                        "error": "amount must be a positive integer (cents)"
                    })),
                )
                    .into_response(),
                Self::AmountExceedsMaxRefundable(max) => (
                    StatusCode::BAD_REQUEST,
                    Json(json!({
                        "ok": false,
                        "error": format!("amount exceeds max refundable ({} cents)", max)
                    })),
                )
                    .into_response(),
                Self::FailedToCreateRefund => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "ok": false, "error": "Failed to create refund" })),
                )
                    .into_response(),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}
