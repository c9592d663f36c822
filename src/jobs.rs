use crate::types::SchedulableJob;
use std::sync::Arc;

use apalis::cron::CronStream;
use apalis::prelude::*;
use apalis::utils::TokioExecutor;

use crate::{modules, types};

pub fn monitor(ctx: Arc<types::Context>) -> apalis::prelude::Monitor<TokioExecutor> {
    let all_jobs: Vec<SchedulableJob> = modules::reminder::job::list(ctx);

    let storage = types::JobStorage::new();
    let mut monitor = apalis::prelude::Monitor::<TokioExecutor>::new();

    for job in all_jobs {
        let job_clone = job.job.clone();
        let worker = WorkerBuilder::new("crate::modules::reminder::job::send_reminders")
            .with_storage(storage.clone())
            .stream(CronStream::new(job.schedule).into_stream())
            .build_fn(move |_j: types::Job| {
                let job_clone = job_clone.clone();
                async move { job_clone().await }
            });
        monitor = monitor.register_with_count(1, worker);
    }

    monitor
}
