use super::types::{request, response};
use crate::{
    modules::reminder::service as sweep,
    repository::adalo::AdaloStore,
    types::Context,
    utils::notification::sms::TwilioSms,
};
use std::sync::Arc;

pub async fn service(ctx: Arc<Context>, query: request::Query) -> response::Response {
    let store = AdaloStore::new(ctx.adalo.clone());
    let sms = TwilioSms::new(ctx.twilio.clone());

    sweep::run_sweep(&store, &sms, query.date)
        .await
        .map(response::Success::SweepCompleted)
        .map_err(|err| match err {
            sweep::Error::OrdersFetchFailed => response::Error::OrdersFetchFailed,
            sweep::Error::UsersFetchFailed => response::Error::UsersFetchFailed,
        })
}
