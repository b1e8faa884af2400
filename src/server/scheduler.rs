//! In-process cron scheduler for the periodic EDI update.

use tokio_cron_scheduler::{Job, JobScheduler};

use crate::server::{error::Error, model::app::EdiState, service::edi::EdiService};

pub struct Scheduler {
    edi: EdiState,
    sched: JobScheduler,
}

impl Scheduler {
    /// Creates a new instance of [`Scheduler`].
    ///
    /// # Returns
    /// - `Ok(Scheduler)` - Scheduler ready for jobs to be registered
    /// - `Err(Error::SchedulerError)` - Failed to initialize the underlying job scheduler
    pub async fn new(edi: EdiState) -> Result<Self, Error> {
        let sched = JobScheduler::new().await?;

        Ok(Self { edi, sched })
    }

    /// Registers the EDI update job on `cron_expression` and starts the scheduler.
    ///
    /// Each run invokes the same routine as the HTTP trigger, without the API key check, and
    /// logs the outcome. Failed runs are not retried before the next tick.
    ///
    /// # Arguments
    /// - `cron_expression` - Six-field cron expression including seconds
    ///
    /// # Returns
    /// - `Ok(())` - Job registered and scheduler started
    /// - `Err(Error::SchedulerError)` - Invalid cron expression or the scheduler failed to start
    pub async fn start(&self, cron_expression: &str) -> Result<(), Error> {
        let edi = self.edi.clone();

        self.sched
            .add(Job::new_async(cron_expression, move |_, _| {
                let edi = edi.clone();

                Box::pin(async move {
                    match EdiService::new(&edi).run_update().await {
                        Ok(result) => tracing::info!(
                            fields = result.payload.len(),
                            "Scheduled EDI update completed"
                        ),
                        Err(e) => tracing::error!("Scheduled EDI update failed: {}", e),
                    }
                })
            })?)
            .await?;

        self.sched.start().await?;

        tracing::info!(cron = %cron_expression, "Scheduled EDI update job");

        Ok(())
    }

    pub async fn shutdown(&mut self) -> Result<(), Error> {
        self.sched.shutdown().await?;

        Ok(())
    }
}
