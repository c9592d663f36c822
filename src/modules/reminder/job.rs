use super::service;
use crate::repository::adalo::AdaloStore;
use crate::types::{Context, SchedulableJob};
use crate::utils::notification::sms::TwilioSms;
use std::pin::Pin;
use std::str::FromStr;
use std::sync::Arc;

async fn send_reminders_job(ctx: Arc<Context>) -> Result<(), apalis::prelude::Error> {
    tracing::info!("Running daily reminder sweep");

    let store = AdaloStore::new(ctx.adalo.clone());
    let sms = TwilioSms::new(ctx.twilio.clone());

    match service::run_sweep(&store, &sms, None).await {
        Ok(summary) => tracing::info!(
            "Reminder sweep for {} finished: {} pickup, {} return",
            summary.date,
            summary.pickup_reminders_sent,
            summary.return_reminders_sent
        ),
        Err(err) => tracing::error!("Reminder sweep failed: {:?}", err),
    }

    Ok(())
}

fn setup_send_reminders_job(
    ctx: Arc<Context>,
) -> Arc<
    dyn Fn()
            -> Pin<Box<dyn std::future::Future<Output = Result<(), apalis::prelude::Error>> + Send>>
        + Send
        + Sync,
> {
    Arc::new(move || {
        let ctx = ctx.clone();
        Box::pin(async move { send_reminders_job(ctx).await })
    })
}

pub fn list(ctx: Arc<Context>) -> Vec<SchedulableJob> {
    vec![SchedulableJob {
        // 13:00 UTC, once a day.
        schedule: apalis::cron::Schedule::from_str("0 0 13 * * *")
            .expect("Couldn't create schedule!"),
        job: setup_send_reminders_job(ctx),
    }]
}
