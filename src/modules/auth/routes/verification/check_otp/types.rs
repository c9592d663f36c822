pub mod request {
    use serde::Deserialize;

    #[derive(Deserialize)]
    pub struct Payload {
        #[serde(default)]
        pub to: Option<String>,
        #[serde(default)]
        pub phone: Option<String>,
        #[serde(default)]
        pub code: String,
    }
}

pub mod response {
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::json;

    pub enum Success {
        Checked { status: String, valid: bool },
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::Checked { status, valid } => (
                    StatusCode::OK,
                    Json(json!({ "status": status, "valid": valid })),
                )
                    .into_response(),
            }
        }
    }

    pub enum Error {
        MissingRecipientOrCode,
        UnusablePhone(String),
        FailedToCheckVerification,
        Rejected { status: u16, body: serde_json::Value },
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::MissingRecipientOrCode => (
                    StatusCode::BAD_REQUEST,
                    Json(json!({ "error": "Missing to/phone or code" })),
                )
                    .into_response(),
                Self::UnusablePhone(received) => (
                    StatusCode::BAD_REQUEST,
                    Json(json!({ "error": "Unusable phone number", "received": received })),
                )
                    .into_response(),
                Self::FailedToCheckVerification => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Failed to check verification" })),
                )
                    .into_response(),
                Self::Rejected { status, body } => (
                    StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY),
                    Json(json!({
                        "error": body,
                        "hint": "If you see 20404, confirm the Verify service sid exists in the same Twilio project as the account sid/auth token."
                    })),
                )
                    .into_response(),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}
