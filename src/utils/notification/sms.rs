use crate::types::TwilioContext;
use async_trait::async_trait;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    NotSent,
}

pub type Result<T> = std::result::Result<T, Error>;

/// Outbound SMS boundary. One attempt per call; retry policy belongs to the
/// caller.
#[async_trait]
pub trait SmsSender: Send + Sync {
    async fn send(&self, to: &str, body: &str) -> Result<()>;
}

pub struct TwilioSms {
    ctx: TwilioContext,
    http: reqwest::Client,
}

impl TwilioSms {
    pub fn new(ctx: TwilioContext) -> Self {
        Self {
            ctx,
            http: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl SmsSender for TwilioSms {
    async fn send(&self, to: &str, body: &str) -> Result<()> {
        let url = format!(
            "{}/Accounts/{}/Messages.json",
            self.ctx.api_endpoint, self.ctx.account_sid
        );

        let mut form = vec![("To", to.to_string()), ("Body", body.to_string())];
        if let Some(sid) = &self.ctx.messaging_service_sid {
            form.push(("MessagingServiceSid", sid.clone()));
        } else if let Some(from) = &self.ctx.from_number {
            form.push(("From", from.clone()));
        } else {
            tracing::error!("No messaging service sid or from number configured");
            return Err(Error::NotSent);
        }

        let res = self
            .http
            .post(&url)
            .basic_auth(&self.ctx.account_sid, Some(&self.ctx.auth_token))
            .form(&form)
            .send()
            .await
            .map_err(|err| {
                tracing::error!("Failed to send sms: {}", err);
                Error::NotSent
            })?;

        if !res.status().is_success() {
            let status = res.status();
            let text = res.text().await.unwrap_or_default();
            tracing::error!("Sms rejected: {} - {}", status, text);
            return Err(Error::NotSent);
        }

        tracing::debug!("Sms sent to {}", to);
        Ok(())
    }
}
