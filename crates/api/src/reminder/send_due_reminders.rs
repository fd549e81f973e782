use crate::shared::usecase::UseCase;
use nuntius_scheduler_domain::{phone_digits, render_message, Completion, Reminder};
use nuntius_scheduler_infra::NuntiusContext;
use std::time::Duration;
use tracing::{error, info, warn};

/// Runs every active reminder whose send time has come and records the
/// outcome. This is what the reminders job does on every tick.
#[derive(Debug)]
pub struct SendDueRemindersUseCase;

#[derive(Debug, Default, PartialEq, Eq)]
pub struct DueRemindersSummary {
    pub executed: usize,
    pub sent: usize,
    pub failed: usize,
}

#[derive(Debug)]
pub enum UseCaseError {
    StorageError,
}

#[async_trait::async_trait(?Send)]
impl UseCase for SendDueRemindersUseCase {
    type Response = DueRemindersSummary;

    type Error = UseCaseError;

    const NAME: &'static str = "SendDueReminders";

    async fn execute(&mut self, ctx: &NuntiusContext) -> Result<Self::Response, Self::Error> {
        let now = ctx.sys.get_timestamp_millis();
        let reminders = ctx.repos.reminders.find_all().await.map_err(|e| {
            error!("Unable to load the reminders, retrying on the next tick. Error message: {:?}", e);
            UseCaseError::StorageError
        })?;

        let mut due: Vec<Reminder> = reminders.into_iter().filter(|r| r.is_due(now)).collect();
        let mut summary = DueRemindersSummary::default();
        if due.is_empty() {
            return Ok(summary);
        }
        info!("Found {} due reminders", due.len());

        for reminder in due.iter_mut() {
            let (sent, failed) = send_to_recipients(reminder, ctx).await;
            let completed_at = ctx.sys.get_timestamp_millis();
            let completion = reminder.finish_execution(sent, failed, completed_at);
            info!(
                "Reminder: {} ({}) finished with {} sent and {} failed, {:?}",
                reminder.id, reminder.kind, sent, failed, completion
            );
            if completion == Completion::Recurring {
                info!(
                    "Reminder: {} is paused until it is activated again",
                    reminder.id
                );
            }
            summary.executed += 1;
            summary.sent += sent;
            summary.failed += failed;
        }

        ctx.repos.reminders.save_many(&due).await.map_err(|e| {
            error!("Unable to store the executed reminders. Error message: {:?}", e);
            UseCaseError::StorageError
        })?;

        Ok(summary)
    }
}

/// Sends the reminder to its recipients one after another. Returns the
/// number of successful and failed sends.
async fn send_to_recipients(reminder: &Reminder, ctx: &NuntiusContext) -> (usize, usize) {
    let delay = Duration::from_millis(ctx.config.send_delay_millis);
    let reason_tag = reminder.kind.reason_tag();
    let mut sent = 0;
    let mut failed = 0;

    for recipient in &reminder.recipients {
        let number = phone_digits(recipient.phone().unwrap_or_default());
        let delivered = if number.is_empty() {
            warn!(
                "Recipient: {:?} of reminder: {} has no phone number",
                recipient.name(),
                reminder.id
            );
            false
        } else {
            let text = render_message(&reminder.message, recipient);
            ctx.services
                .messaging
                .send_text(&reminder.instance_name, &number, &text)
                .await
        };

        if delivered {
            sent += 1;
            ctx.services
                .sheet_sync
                .sync_row(recipient, &reason_tag, ctx.sys.get_timestamp_millis())
                .await;
        } else {
            failed += 1;
        }

        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }

    (sent, failed)
}
