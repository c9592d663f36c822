use crate::types::StripeContext;
use serde::de::DeserializeOwned;
use serde::Deserialize;

/// Status and message of a rejected call are logged where they happen; only
/// the error code drives behavior upstream.
#[derive(Debug, Clone)]
pub enum Error {
    RequestFailed,
    Api { code: Option<String> },
}

impl Error {
    pub fn is_resource_missing(&self) -> bool {
        matches!(self, Self::Api { code: Some(code) } if code == "resource_missing")
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Deserialize)]
struct ErrorDetail {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

pub async fn get<T: DeserializeOwned>(ctx: &StripeContext, path: &str) -> Result<T, Error> {
    let res = reqwest::Client::new()
        .get(format!("{}{}", ctx.api_endpoint, path))
        .bearer_auth(&ctx.secret_key)
        .send()
        .await
        .map_err(|err| {
            tracing::error!("Stripe GET {} failed: {}", path, err);
            Error::RequestFailed
        })?;

    read_response(res, path).await
}

pub async fn post_form<T: DeserializeOwned>(
    ctx: &StripeContext,
    path: &str,
    params: &[(String, String)],
    idempotency_key: Option<&str>,
) -> Result<T, Error> {
    let mut req = reqwest::Client::new()
        .post(format!("{}{}", ctx.api_endpoint, path))
        .bearer_auth(&ctx.secret_key)
        .form(params);

    if let Some(key) = idempotency_key {
        req = req.header("Idempotency-Key", key);
    }

    let res = req.send().await.map_err(|err| {
        tracing::error!("Stripe POST {} failed: {}", path, err);
        Error::RequestFailed
    })?;

    read_response(res, path).await
}

async fn read_response<T: DeserializeOwned>(
    res: reqwest::Response,
    path: &str,
) -> Result<T, Error> {
    let status = res.status();

    if !status.is_success() {
        let (code, message) = match res.json::<ErrorBody>().await {
            Ok(body) => (body.error.code, body.error.message),
            Err(_) => (None, None),
        };
        tracing::error!(
            "Stripe {} returned {}: code={:?} message={:?}",
            path,
            status,
            code,
            message
        );
        return Err(Error::Api { code });
    }

    res.json::<T>().await.map_err(|err| {
        tracing::error!("Failed to deserialize Stripe {} response: {}", path, err);
        Error::RequestFailed
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_the_resource_missing_code_reads_as_missing() {
        let missing = Error::Api {
            code: Some("resource_missing".to_string()),
        };
        assert!(missing.is_resource_missing());

        let other = Error::Api {
            code: Some("card_declined".to_string()),
        };
        assert!(!other.is_resource_missing());

        assert!(!Error::Api { code: None }.is_resource_missing());
        assert!(!Error::RequestFailed.is_resource_missing());
    }
}
