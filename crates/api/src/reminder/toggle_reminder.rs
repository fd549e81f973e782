use crate::{
    error::NuntiusError,
    shared::{
        auth::{protect_route, Owner},
        usecase::{execute, UseCase},
    },
};
use actix_web::{web, HttpResponse};
use nuntius_scheduler_api_structs::toggle_reminder::*;
use nuntius_scheduler_domain::{Reminder, ID};
use nuntius_scheduler_infra::NuntiusContext;
use tracing::info;

pub async fn toggle_reminder_controller(
    http_req: actix_web::HttpRequest,
    path: web::Path<PathParams>,
    ctx: web::Data<NuntiusContext>,
) -> Result<HttpResponse, NuntiusError> {
    let owner = protect_route(&http_req, &ctx)?;

    let usecase = ToggleReminderUseCase {
        owner,
        reminder_id: path.reminder_id.clone(),
    };

    execute(usecase, &ctx)
        .await
        .map(|reminder| HttpResponse::Ok().json(APIResponse::new(reminder)))
        .map_err(NuntiusError::from)
}

/// Pauses an active reminder or resumes a paused one
#[derive(Debug)]
pub struct ToggleReminderUseCase {
    pub owner: Owner,
    pub reminder_id: ID,
}

#[derive(Debug)]
pub enum UseCaseError {
    NotFound(ID),
    Forbidden(ID),
    StorageError,
}

impl From<UseCaseError> for NuntiusError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(id) => {
                Self::NotFound(format!("The reminder with id: {}, was not found.", id))
            }
            UseCaseError::Forbidden(id) => {
                Self::Forbidden(format!("The reminder with id: {}, belongs to another owner.", id))
            }
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for ToggleReminderUseCase {
    type Response = Reminder;

    type Error = UseCaseError;

    const NAME: &'static str = "ToggleReminder";

    async fn execute(&mut self, ctx: &NuntiusContext) -> Result<Self::Response, Self::Error> {
        let mut reminder = match ctx.repos.reminders.find(&self.reminder_id).await {
            Ok(Some(reminder)) => reminder,
            Ok(None) => return Err(UseCaseError::NotFound(self.reminder_id.clone())),
            Err(_) => return Err(UseCaseError::StorageError),
        };
        if !self.owner.can_access(&reminder.owner_id) {
            return Err(UseCaseError::Forbidden(self.reminder_id.clone()));
        }

        reminder.toggle(ctx.sys.get_timestamp_millis(), &ctx.config.timezone);
        info!(
            "Reminder: {} is now {}",
            reminder.id,
            if reminder.active { "active" } else { "paused" }
        );

        ctx.repos
            .reminders
            .save(&reminder)
            .await
            .map(|_| reminder)
            .map_err(|_| UseCaseError::StorageError)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use nuntius_scheduler_domain::{Recipient, ReminderKind};
    use nuntius_scheduler_infra::ManualClock;
    use std::sync::Arc;

    // Monday 2026-10-19 09:00 in Bogota
    const NOW: i64 = 1_792_418_400_000;
    const DAY: i64 = 24 * 60 * 60 * 1000;

    async fn setup(kind: ReminderKind, next_send_at: Option<i64>) -> (NuntiusContext, Reminder) {
        let mut ctx = NuntiusContext::create_inmemory();
        ctx.sys = Arc::new(ManualClock::new(NOW));
        ctx.config.timezone = chrono_tz::America::Bogota;

        let mut reminder = Reminder::new(
            "user-1".into(),
            kind,
            "ventas".into(),
            "Hola".into(),
            vec![Recipient::new("Ana", "3001234567")],
            NOW - 30 * DAY,
        );
        reminder.send_weekday = Some("lunes".into());
        reminder.send_time = Some("10:00".into());
        reminder.active = false;
        reminder.next_send_at = next_send_at;
        ctx.repos.reminders.insert(&reminder).await.unwrap();
        (ctx, reminder)
    }

    fn owner(id: &str) -> Owner {
        Owner {
            id: id.into(),
            is_admin: false,
        }
    }

    #[actix_web::test]
    async fn resuming_stale_weekly_reminder_reschedules_it() {
        let (ctx, reminder) = setup(ReminderKind::Weekly, Some(NOW - 7 * DAY)).await;

        let mut usecase = ToggleReminderUseCase {
            owner: owner("user-1"),
            reminder_id: reminder.id.clone(),
        };
        let toggled = usecase.execute(&ctx).await.unwrap();
        assert!(toggled.active);
        // Monday 10:00 in Bogota is still ahead
        assert_eq!(toggled.next_send_at, Some(NOW + 60 * 60 * 1000));
        assert_eq!(
            ctx.repos.reminders.find(&reminder.id).await.unwrap(),
            Some(toggled)
        );

        let paused = usecase.execute(&ctx).await.unwrap();
        assert!(!paused.active);
        assert_eq!(paused.next_send_at, Some(NOW + 60 * 60 * 1000));
    }

    #[actix_web::test]
    async fn resuming_other_kinds_keeps_schedule() {
        let (ctx, reminder) = setup(ReminderKind::Review, Some(NOW - DAY)).await;

        let toggled = ToggleReminderUseCase {
            owner: owner("user-1"),
            reminder_id: reminder.id.clone(),
        }
        .execute(&ctx)
        .await
        .unwrap();
        assert!(toggled.active);
        assert_eq!(toggled.next_send_at, Some(NOW - DAY));
    }

    #[actix_web::test]
    async fn rejects_foreign_and_unknown_reminders() {
        let (ctx, reminder) = setup(ReminderKind::Weekly, None).await;

        let res = ToggleReminderUseCase {
            owner: owner("user-2"),
            reminder_id: reminder.id.clone(),
        }
        .execute(&ctx)
        .await;
        assert!(matches!(res, Err(UseCaseError::Forbidden(_))));

        let res = ToggleReminderUseCase {
            owner: owner("user-1"),
            reminder_id: ID::from("rec_unknown"),
        }
        .execute(&ctx)
        .await;
        assert!(matches!(res, Err(UseCaseError::NotFound(_))));

        assert!(!ctx.repos.reminders.find(&reminder.id).await.unwrap().unwrap().active);
    }
}
