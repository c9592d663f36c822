pub mod request {
    use serde::Deserialize;

    #[derive(Deserialize)]
    pub struct Payload {
        #[serde(default)]
        pub id: String,
    }
}

pub mod response {
    use crate::modules::identity::model::VerificationSession;
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::json;

    pub enum Success {
        Session(VerificationSession),
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::Session(session) => {
                    let last_error = session.last_error_label();
                    (
                        StatusCode::OK,
                        Json(json!({
                            "id": session.id,
                            "status": session.status,
                            "last_error": last_error
                        })),
                    )
                        .into_response()
                }
            }
        }
    }

    pub enum Error {
        MissingId,
        InvalidIdFormat(String),
        NotFound,
        FailedToRetrieveSession,
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::MissingId => (
                    StatusCode::BAD_REQUEST,
                    Json(json!({ "error": "missing_id" })),
                )
                    .into_response(),
                Self::InvalidIdFormat(received) => (
                    StatusCode::BAD_REQUEST,
                    Json(json!({ "error": "invalid_id_format", "received": received })),
                )
                    .into_response(),
                Self::NotFound => (
                    StatusCode::NOT_FOUND,
                    Json(json!({ "error": "not_found" })),
                )
                    .into_response(),
                Self::FailedToRetrieveSession => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "server_error" })),
                )
                    .into_response(),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}
