pub mod request {
    use chrono::NaiveDate;
    use serde::Deserialize;

    /// Optional target day for backfill/test runs; defaults to today (UTC).
    #[derive(Deserialize)]
    pub struct Query {
        pub date: Option<NaiveDate>,
    }
}

pub mod response {
    use crate::modules::reminder::service::SweepSummary;
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::json;

    pub enum Success {
        SweepCompleted(SweepSummary),
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::SweepCompleted(summary) => (
                    StatusCode::OK,
                    Json(json!({
                        "ok": true,
                        "date": summary.date,
                        "pickup_reminders_sent": summary.pickup_reminders_sent,
                        "return_reminders_sent": summary.return_reminders_sent
                    })),
                )
                    .into_response(),
            }
        }
    }

    pub enum Error {
        OrdersFetchFailed,
        UsersFetchFailed,
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::OrdersFetchFailed => (
                    StatusCode::BAD_GATEWAY,
                    Json(json!({ "error": "Failed to fetch orders" })),
                )
                    .into_response(),
                Self::UsersFetchFailed => (
                    StatusCode::BAD_GATEWAY,
                    Json(json!({ "error": "Failed to fetch users" })),
                )
                    .into_response(),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}
