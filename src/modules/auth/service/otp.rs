use crate::types::TwilioContext;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;

#[derive(Debug, Clone)]
pub enum Error {
    RequestFailed,
    /// The verification service rejected the call; the vendor status code
    /// and body are passed back so misconfiguration (e.g. a Verify service
    /// owned by a different project) stays diagnosable from the client side.
    Rejected {
        status: u16,
        body: serde_json::Value,
    },
}

#[derive(Deserialize, Debug)]
pub struct Verification {
    pub status: String,
}

#[derive(Deserialize, Debug, Clone)]
pub struct VerifyService {
    pub sid: String,
    pub friendly_name: String,
}

#[derive(Deserialize)]
struct ServiceListing {
    services: Vec<VerifyService>,
}

/// Ask Twilio Verify to text a one-time code to `to`.
pub async fn start_verification(twilio: &TwilioContext, to: &str) -> Result<Verification, Error> {
    let url = format!(
        "{}/Services/{}/Verifications",
        twilio.verify_api_endpoint, twilio.verify_service_sid
    );
    post_form(twilio, &url, &[("To", to), ("Channel", "sms")]).await
}

/// Check a code the user typed back. `status == "approved"` means valid.
pub async fn check_verification(
    twilio: &TwilioContext,
    to: &str,
    code: &str,
) -> Result<Verification, Error> {
    let url = format!(
        "{}/Services/{}/VerificationCheck",
        twilio.verify_api_endpoint, twilio.verify_service_sid
    );
    post_form(twilio, &url, &[("To", to), ("Code", code)]).await
}

/// List the Verify services visible to the configured credentials. Used by
/// the diagnostics route to detect project mismatches.
pub async fn list_services(twilio: &TwilioContext) -> Result<Vec<VerifyService>, Error> {
    let url = format!("{}/Services?PageSize=50", twilio.verify_api_endpoint);

    let res = reqwest::Client::new()
        .get(&url)
        .basic_auth(&twilio.account_sid, Some(&twilio.auth_token))
        .send()
        .await
        .map_err(|err| {
            tracing::error!("Failed to list verify services: {}", err);
            Error::RequestFailed
        })?;

    parse_response::<ServiceListing>(res).await.map(|listing| listing.services)
}

async fn post_form<T: DeserializeOwned>(
    twilio: &TwilioContext,
    url: &str,
    params: &[(&str, &str)],
) -> Result<T, Error> {
    let res = reqwest::Client::new()
        .post(url)
        .basic_auth(&twilio.account_sid, Some(&twilio.auth_token))
        .form(params)
        .send()
        .await
        .map_err(|err| {
            tracing::error!("Verify request failed: {}", err);
            Error::RequestFailed
        })?;

    parse_response(res).await
}

async fn parse_response<T: DeserializeOwned>(res: reqwest::Response) -> Result<T, Error> {
    let status = res.status();
    let body = res
        .json::<serde_json::Value>()
        .await
        .unwrap_or_else(|_| json!({}));

    if !status.is_success() {
        tracing::error!("Verify call rejected: {} - {}", status, body);
        return Err(Error::Rejected {
            status: status.as_u16(),
            body,
        });
    }

    serde_json::from_value(body).map_err(|err| {
        tracing::error!("Failed to deserialize verify response: {}", err);
        Error::RequestFailed
    })
}
