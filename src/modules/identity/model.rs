use serde::Deserialize;

/// Subset of a Stripe Identity verification session this service exposes.
/// `url` is only present while the session still requires input.
#[derive(Deserialize, Debug, Clone)]
pub struct VerificationSession {
    pub id: String,
    pub status: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub last_error: Option<LastError>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct LastError {
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
}

impl VerificationSession {
    /// Human-facing failure string, preferring the verbose reason.
    pub fn last_error_label(&self) -> Option<String> {
        self.last_error
            .as_ref()
            .and_then(|err| err.reason.clone().or_else(|| err.code.clone()))
    }
}
