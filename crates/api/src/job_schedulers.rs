use crate::{reminder::send_due_reminders::SendDueRemindersUseCase, shared::usecase::execute};
use nuntius_scheduler_infra::NuntiusContext;
use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    time::Duration,
};
use tokio::time::{interval, MissedTickBehavior};
use tracing::{info, warn};

/// Held while a tick of the reminders job is running
struct TickGuard(Arc<AtomicBool>);

impl TickGuard {
    fn acquire(in_flight: &Arc<AtomicBool>) -> Option<Self> {
        in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(in_flight.clone()))
    }
}

impl Drop for TickGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Sends the due reminders every poll interval, starting right away. A tick
/// that fires while the previous one is still sending is skipped.
pub fn start_send_reminders_job(ctx: NuntiusContext) {
    actix_web::rt::spawn(async move {
        let period = Duration::from_secs(ctx.config.poll_interval_secs.max(1));
        info!("Checking for due reminders every {:?}", period);

        let in_flight = Arc::new(AtomicBool::new(false));
        let mut ticks = interval(period);
        ticks.set_missed_tick_behavior(MissedTickBehavior::Skip);
        loop {
            ticks.tick().await;

            let guard = match TickGuard::acquire(&in_flight) {
                Some(guard) => guard,
                None => {
                    warn!("The previous due reminders tick is still running, skipping this one");
                    continue;
                }
            };
            let context = ctx.clone();
            actix_web::rt::spawn(async move {
                let _guard = guard;
                let _ = execute(SendDueRemindersUseCase, &context).await;
            });
        }
    });
}
