pub mod request {
    use serde::Deserialize;

    /// Optional hints forwarded into session metadata so a completed
    /// verification can be matched back to the app user.
    #[derive(Deserialize)]
    pub struct Payload {
        #[serde(default, rename = "userId", alias = "user_id")]
        pub user_id: String,
        #[serde(default)]
        pub email: String,
    }
}

pub mod response {
    use crate::modules::identity::model::VerificationSession;
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::json;

    pub enum Success {
        SessionCreated(VerificationSession),
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::SessionCreated(session) => (
                    StatusCode::OK,
                    Json(json!({
                        "id": session.id,
                        "status": session.status,
                        "url": session.url
                    })),
                )
                    .into_response(),
            }
        }
    }

    pub enum Error {
        FailedToCreateSession,
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::FailedToCreateSession => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Failed to create verification session" })),
                )
                    .into_response(),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}
