use crate::{execution::RecordExecutionSentUseCase, shared::usecase::execute};
use pillbox_domain::Reminder;
use pillbox_infra::PillboxContext;
use tokio::{
    sync::watch,
    task::JoinHandle,
    time::{interval, timeout},
};
use tracing::{error, info, warn};

/// Outcome of a single pass over the due `Reminder`s
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TickReport {
    pub due: usize,
    pub delivered: usize,
    pub failed: usize,
}

/// Handle to the running send reminders job
pub struct ReminderJobHandle {
    stop: watch::Sender<bool>,
    handle: JoinHandle<()>,
}

impl ReminderJobHandle {
    /// Stops the job. A tick that is in progress is allowed to finish first.
    pub async fn stop(self) {
        let _ = self.stop.send(true);
        if let Err(e) = self.handle.await {
            error!("Send reminders job did not shut down cleanly: {:?}", e);
        }
    }
}

pub fn start_send_reminders_job(ctx: PillboxContext) -> ReminderJobHandle {
    let (stop_tx, mut stop_rx) = watch::channel(false);

    let handle = actix_web::rt::spawn(async move {
        let mut tick_interval = interval(ctx.config.reminders_tick_interval);
        info!(
            "Send reminders job started, ticking every {:?}",
            ctx.config.reminders_tick_interval
        );
        loop {
            tokio::select! {
                _ = tick_interval.tick() => {
                    let report = send_due_reminders(&ctx).await;
                    if report.due > 0 {
                        info!(
                            "Processed {} due reminders, {} delivered and {} failed",
                            report.due, report.delivered, report.failed
                        );
                    }
                }
                changed = stop_rx.changed() => {
                    if changed.is_err() || *stop_rx.borrow() {
                        break;
                    }
                }
            }
        }
        info!("Send reminders job stopped");
    });

    ReminderJobHandle {
        stop: stop_tx,
        handle,
    }
}

/// Delivers every due `Reminder` once and reschedules the delivered ones.
/// `Reminder`s that could not be delivered stay due and are retried on the
/// next tick.
pub async fn send_due_reminders(ctx: &PillboxContext) -> TickReport {
    let now = ctx.sys.get_timestamp_millis();
    let reminders = match ctx.repos.reminders.find_due(now).await {
        Ok(reminders) => reminders,
        Err(e) => {
            error!("Unable to find due reminders: {:?}", e);
            return TickReport::default();
        }
    };

    let mut report = TickReport {
        due: reminders.len(),
        ..Default::default()
    };
    for reminder in &reminders {
        if send_reminder(ctx, reminder).await {
            report.delivered += 1;
        } else {
            report.failed += 1;
        }
    }

    report
}

async fn send_reminder(ctx: &PillboxContext, reminder: &Reminder) -> bool {
    let usecase = RecordExecutionSentUseCase {
        reminder_id: reminder.id.clone(),
        user_id: reminder.user_id.clone(),
    };
    // Never deliver without a ledger entry to respond to
    let execution = match execute(usecase, ctx).await {
        Ok(execution) => execution,
        Err(_) => return false,
    };

    match timeout(
        ctx.config.delivery_timeout,
        ctx.gateway.send(reminder, &execution.id),
    )
    .await
    {
        Ok(Ok(())) => {}
        Ok(Err(e)) => {
            error!("Unable to deliver reminder: {}. Error: {:?}", reminder.id, e);
            return false;
        }
        Err(_) => {
            error!(
                "Delivery of reminder: {} timed out after {:?}",
                reminder.id, ctx.config.delivery_timeout
            );
            return false;
        }
    }

    let next_send_at = reminder.compute_next_send_at(ctx.sys.get_timestamp_millis());
    if let Err(e) = ctx
        .repos
        .reminders
        .update_next_send_at(&reminder.id, next_send_at)
        .await
    {
        warn!(
            "Reminder: {} was delivered but its next send time could not be stored. Error: {:?}",
            reminder.id, e
        );
    }
    if let Err(e) = ctx
        .repos
        .reminders
        .update_last_sent_at(&reminder.id, ctx.sys.get_timestamp_millis())
        .await
    {
        warn!(
            "Reminder: {} was delivered but its last send time could not be stored. Error: {:?}",
            reminder.id, e
        );
    }

    true
}
