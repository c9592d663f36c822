use chrono::{DateTime, Utc};
use core::time::Duration;
use futures::StreamExt;
use serde::{Deserialize, Serialize};
use std::env;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

#[derive(Clone)]
pub enum AppEnvironment {
    Production,
    Development,
}

impl AppEnvironment {
    pub fn from(raw_environment: String) -> Self {
        match raw_environment.as_ref() {
            "production" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Production => "production",
            Self::Development => "development",
        }
    }
}

#[derive(Clone)]
pub struct AppContext {
    pub host: String,
    pub environment: AppEnvironment,
    pub port: u32,
    pub url: String,
}

#[derive(Clone)]
pub struct AdaloContext {
    pub api_endpoint: String,
    pub app_id: String,
    pub api_key: String,
    pub orders_collection_id: String,
    pub users_collection_id: String,
}

impl AdaloContext {
    pub fn collection_url(&self, collection_id: &str) -> String {
        format!(
            "{}/apps/{}/collections/{}",
            self.api_endpoint, self.app_id, collection_id
        )
    }
}

#[derive(Clone)]
pub struct TwilioContext {
    pub api_endpoint: String,
    pub verify_api_endpoint: String,
    pub account_sid: String,
    pub auth_token: String,
    pub verify_service_sid: String,
    pub messaging_service_sid: Option<String>,
    pub from_number: Option<String>,
}

#[derive(Clone)]
pub struct StripeContext {
    pub api_endpoint: String,
    pub secret_key: String,
    pub identity_return_url: String,
}

#[derive(Clone)]
pub struct OpenAiContext {
    pub api_endpoint: String,
    pub api_key: String,
    pub model: String,
}

#[derive(Clone)]
pub struct AdminContext {
    pub token: String,
}

#[derive(Clone)]
pub struct Context {
    pub app: AppContext,
    pub adalo: AdaloContext,
    pub twilio: TwilioContext,
    pub stripe: StripeContext,
    pub openai: OpenAiContext,
    pub admin: AdminContext,
}

#[derive(Clone)]
pub struct AppConfig {
    pub host: String,
    pub environment: AppEnvironment,
    pub port: u32,
    pub url: String,
}

#[derive(Clone)]
pub struct AdaloConfig {
    pub api_endpoint: String,
    pub app_id: String,
    pub api_key: String,
    pub orders_collection_id: String,
    pub users_collection_id: String,
}

#[derive(Clone)]
pub struct TwilioConfig {
    pub api_endpoint: String,
    pub verify_api_endpoint: String,
    pub account_sid: String,
    pub auth_token: String,
    pub verify_service_sid: String,
    pub messaging_service_sid: Option<String>,
    pub from_number: Option<String>,
}

#[derive(Clone)]
pub struct StripeConfig {
    pub api_endpoint: String,
    pub secret_key: String,
    pub identity_return_url: String,
}

#[derive(Clone)]
pub struct OpenAiConfig {
    pub api_endpoint: String,
    pub api_key: String,
    pub model: String,
}

#[derive(Clone)]
pub struct AdminConfig {
    pub token: String,
}

#[derive(Clone)]
pub struct Config {
    pub app: AppConfig,
    pub adalo: AdaloConfig,
    pub twilio: TwilioConfig,
    pub stripe: StripeConfig,
    pub openai: OpenAiConfig,
    pub admin: AdminConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Job(DateTime<Utc>);

impl apalis::prelude::Job for Job {
    const NAME: &'static str = "apalis::Job";
}

impl From<DateTime<Utc>> for Job {
    fn from(t: DateTime<Utc>) -> Self {
        Self(t)
    }
}

#[derive(Clone)]
pub struct JobStorage {
    controller: apalis::prelude::Controller,
    inner: apalis::prelude::MemoryWrapper<Job>,
    storage: Vec<Job>,
}

impl JobStorage {
    pub fn new() -> Self {
        Self {
            controller: apalis::prelude::Controller::new(),
            inner: apalis::prelude::MemoryWrapper::<Job>::new(),
            storage: vec![],
        }
    }
}

impl apalis::prelude::Backend<apalis::prelude::Request<Job>> for JobStorage {
    type Stream = apalis::prelude::BackendStream<
        apalis::prelude::RequestStream<apalis::prelude::Request<Job>>,
    >;

    type Layer = tower::ServiceBuilder<tower::layer::util::Identity>;

    fn common_layer(&self, _worker: apalis::prelude::WorkerId) -> Self::Layer {
        tower::ServiceBuilder::new()
    }

    fn poll(self, _worker: apalis::prelude::WorkerId) -> apalis::prelude::Poller<Self::Stream> {
        let stream = self
            .inner
            .map(|r| Ok(Some(apalis::prelude::Request::new(r))))
            .boxed();
        apalis::prelude::Poller::new(
            apalis::prelude::BackendStream::new(stream, self.controller),
            async {},
        )
    }
}

impl apalis::prelude::Storage for JobStorage {
    type Job = Job;

    type Error = apalis::prelude::Error;

    type Identifier = usize;

    async fn push(&mut self, job: Self::Job) -> Result<Self::Identifier, Self::Error> {
        tracing::debug!("Job pushed to storage");
        self.storage.push(job);
        Ok(self.storage.len())
    }

    async fn schedule(
        &mut self,
        _job: Self::Job,
        _on: i64,
    ) -> Result<Self::Identifier, Self::Error> {
        tracing::debug!("Job pushed into the schedule set");
        todo!()
    }

    async fn len(&self) -> Result<i64, Self::Error> {
        tracing::debug!("Returning number of pending jobs");
        Ok(self.storage.len() as i64)
    }

    async fn fetch_by_id(
        &self,
        job_id: &Self::Identifier,
    ) -> Result<Option<apalis::prelude::Request<Self::Job>>, Self::Error> {
        tracing::debug!("Fetching job by id: {}", job_id);
        todo!()
    }

    async fn update(&self, _job: apalis::prelude::Request<Self::Job>) -> Result<(), Self::Error> {
        tracing::debug!("Updating job details");
        todo!()
    }

    async fn reschedule(
        &mut self,
        _job: apalis::prelude::Request<Self::Job>,
        _wait: Duration,
    ) -> Result<(), Self::Error> {
        tracing::debug!("Rescheduling job");
        todo!()
    }

    async fn is_empty(&self) -> Result<bool, Self::Error> {
        tracing::debug!("Determining whether there's still any job in the storage");
        todo!()
    }

    async fn vacuum(&self) -> Result<usize, Self::Error> {
        tracing::debug!("Vacuuming queue");
        todo!()
    }
}

pub struct SchedulableJob {
    pub schedule: apalis::cron::Schedule,
    pub job: Arc<
        dyn Fn() -> Pin<Box<dyn Future<Output = Result<(), apalis::prelude::Error>> + Send>>
            + Send
            + Sync,
    >,
}

impl Default for Config {
    fn default() -> Self {
        let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let environment = env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());
        let port = env::var("PORT")
            .unwrap_or_else(|_| "8000".to_string())
            .parse::<u32>()
            .expect("Invalid PORT number");
        let url = env::var("URL").unwrap_or_else(|_| format!("http://{}:{}", host, port));

        let adalo_api_endpoint = env::var("ADALO_API_ENDPOINT")
            .unwrap_or_else(|_| "https://api.adalo.com/v0".to_string());
        let adalo_app_id = env::var("ADALO_APP_ID").expect("ADALO_APP_ID not set");
        let adalo_api_key = env::var("ADALO_API_KEY").expect("ADALO_API_KEY not set");
        let adalo_orders_collection_id =
            env::var("ADALO_ORDERS_COLLECTION_ID").expect("ADALO_ORDERS_COLLECTION_ID not set");
        let adalo_users_collection_id =
            env::var("ADALO_USERS_COLLECTION_ID").expect("ADALO_USERS_COLLECTION_ID not set");

        let twilio_api_endpoint = env::var("TWILIO_API_ENDPOINT")
            .unwrap_or_else(|_| "https://api.twilio.com/2010-04-01".to_string());
        let twilio_verify_api_endpoint = env::var("TWILIO_VERIFY_API_ENDPOINT")
            .unwrap_or_else(|_| "https://verify.twilio.com/v2".to_string());
        let twilio_account_sid =
            env::var("TWILIO_ACCOUNT_SID").expect("TWILIO_ACCOUNT_SID not set");
        let twilio_auth_token = env::var("TWILIO_AUTH_TOKEN").expect("TWILIO_AUTH_TOKEN not set");
        let twilio_verify_service_sid =
            env::var("TWILIO_VERIFY_SERVICE_SID").expect("TWILIO_VERIFY_SERVICE_SID not set");
        let twilio_messaging_service_sid = env::var("TWILIO_MESSAGING_SERVICE_SID").ok();
        let twilio_from_number = env::var("TWILIO_FROM_NUMBER").ok();
        if twilio_messaging_service_sid.is_none() && twilio_from_number.is_none() {
            panic!("No TWILIO_MESSAGING_SERVICE_SID or TWILIO_FROM_NUMBER set");
        }

        let stripe_api_endpoint = env::var("STRIPE_API_ENDPOINT")
            .unwrap_or_else(|_| "https://api.stripe.com/v1".to_string());
        let stripe_secret_key = env::var("STRIPE_SECRET_KEY").expect("STRIPE_SECRET_KEY not set");
        let identity_return_url = env::var("IDENTITY_RETURN_URL")
            .unwrap_or_else(|_| "https://gsidentityverification.netlify.app/verified".to_string());

        let openai_api_endpoint = env::var("OPENAI_API_ENDPOINT")
            .unwrap_or_else(|_| "https://api.openai.com/v1".to_string());
        let openai_api_key = env::var("OPENAI_API_KEY").expect("OPENAI_API_KEY not set");
        let openai_model = env::var("OPENAI_MODEL").unwrap_or_else(|_| "gpt-4.1-mini".to_string());

        let admin_token = env::var("ADMIN_TOKEN").expect("ADMIN_TOKEN not set");

        return Self {
            app: AppConfig {
                host,
                environment: AppEnvironment::from(environment),
                port,
                url,
            },
            adalo: AdaloConfig {
                api_endpoint: adalo_api_endpoint,
                app_id: adalo_app_id,
                api_key: adalo_api_key,
                orders_collection_id: adalo_orders_collection_id,
                users_collection_id: adalo_users_collection_id,
            },
            twilio: TwilioConfig {
                api_endpoint: twilio_api_endpoint,
                verify_api_endpoint: twilio_verify_api_endpoint,
                account_sid: twilio_account_sid,
                auth_token: twilio_auth_token,
                verify_service_sid: twilio_verify_service_sid,
                messaging_service_sid: twilio_messaging_service_sid,
                from_number: twilio_from_number,
            },
            stripe: StripeConfig {
                api_endpoint: stripe_api_endpoint,
                secret_key: stripe_secret_key,
                identity_return_url,
            },
            openai: OpenAiConfig {
                api_endpoint: openai_api_endpoint,
                api_key: openai_api_key,
                model: openai_model,
            },
            admin: AdminConfig { token: admin_token },
        };
    }
}

pub trait ToContext {
    fn to_context(self) -> Context;
}

impl ToContext for Config {
    fn to_context(self) -> Context {
        Context {
            app: AppContext {
                host: self.app.host,
                environment: self.app.environment,
                port: self.app.port,
                url: self.app.url,
            },
            adalo: AdaloContext {
                api_endpoint: self.adalo.api_endpoint,
                app_id: self.adalo.app_id,
                api_key: self.adalo.api_key,
                orders_collection_id: self.adalo.orders_collection_id,
                users_collection_id: self.adalo.users_collection_id,
            },
            twilio: TwilioContext {
                api_endpoint: self.twilio.api_endpoint,
                verify_api_endpoint: self.twilio.verify_api_endpoint,
                account_sid: self.twilio.account_sid,
                auth_token: self.twilio.auth_token,
                verify_service_sid: self.twilio.verify_service_sid,
                messaging_service_sid: self.twilio.messaging_service_sid,
                from_number: self.twilio.from_number,
            },
            stripe: StripeContext {
                api_endpoint: self.stripe.api_endpoint,
                secret_key: self.stripe.secret_key,
                identity_return_url: self.stripe.identity_return_url,
            },
            openai: OpenAiContext {
                api_endpoint: self.openai.api_endpoint,
                api_key: self.openai.api_key,
                model: self.openai.model,
            },
            admin: AdminContext {
                token: self.admin.token,
            },
        }
    }
}
