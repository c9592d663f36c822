pub mod request {
    use serde::Deserialize;

    /// Suit attributes as mapped by the no-code client. The pretty-label
    /// aliases match the collection's display names.
    #[derive(Deserialize, Default)]
    pub struct Payload {
        #[serde(default, rename = "suitBrand", alias = "Suit Brand")]
        pub suit_brand: Option<String>,
        #[serde(default, rename = "suitColor", alias = "Suit Color")]
        pub suit_color: Option<String>,
        #[serde(default, rename = "occasion", alias = "Occasion")]
        pub occasion: Option<String>,
        #[serde(default, rename = "condition", alias = "Condition")]
        pub condition: Option<String>,
        #[serde(default, rename = "standOut", alias = "StandOut")]
        pub stand_out: Option<String>,
        #[serde(default, rename = "alterations", alias = "Alterations")]
        pub alterations: Option<String>,
        #[serde(default, rename = "jacketFit", alias = "JacketFit")]
        pub jacket_fit: Option<String>,
        #[serde(default, rename = "jacketLength", alias = "Jacket Length")]
        pub jacket_length: Option<String>,
        #[serde(default, rename = "chestSize", alias = "Chest Size")]
        pub chest_size: Option<String>,
        #[serde(default, rename = "pantsFit", alias = "PantsFit")]
        pub pants_fit: Option<String>,
        #[serde(default, rename = "waist", alias = "Waist")]
        pub waist: Option<String>,
        #[serde(default, rename = "inseam", alias = "Inseam")]
        pub inseam: Option<String>,
        #[serde(
            default,
            rename = "rentalPricePerDay",
            alias = "Rental Price (per day)"
        )]
        pub rental_price_per_day: Option<f64>,
    }
}

pub mod response {
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::json;

    pub enum Success {
        Generated(String),
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::Generated(notes) => (
                    StatusCode::OK,
                    Json(json!({ "ok": true, "full_suit_notes": notes })),
                )
                    .into_response(),
            }
        }
    }

    pub enum Error {
        GenerationFailed,
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                // The no-code client can only map a 200 body, so failures are
                // reported in-band.
                Self::GenerationFailed => (
                    StatusCode::OK,
                    Json(json!({ "ok": false, "error": "Failed to generate notes" })),
                )
                    .into_response(),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}
