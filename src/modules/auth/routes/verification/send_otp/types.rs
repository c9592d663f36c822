pub mod request {
    use serde::Deserialize;

    #[derive(Deserialize)]
    pub struct Payload {
        #[serde(default)]
        pub phone: String,
    }
}

pub mod response {
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::json;

    pub enum Success {
        VerificationStarted(String),
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::VerificationStarted(status) => {
                    (StatusCode::OK, Json(json!({ "status": status }))).into_response()
                }
            }
        }
    }

    pub enum Error {
        MissingPhone,
        FailedToStartVerification,
        Rejected { status: u16, body: serde_json::Value },
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::MissingPhone => (
                    StatusCode::BAD_REQUEST,
                    Json(json!({ "error": "Missing phone" })),
                )
                    .into_response(),
                Self::FailedToStartVerification => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Failed to start verification" })),
                )
                    .into_response(),
                Self::Rejected { status, body } => (
                    StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY),
                    Json(json!({ "error": body })),
                )
                    .into_response(),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}
