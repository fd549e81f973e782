use crate::{
    error::NuntiusError,
    shared::{
        auth::{protect_route, Owner},
        usecase::{execute, UseCase},
    },
};
use actix_web::{web, HttpResponse};
use nuntius_scheduler_api_structs::create_reminder::*;
use nuntius_scheduler_domain::{
    parse_weekday, InvalidScheduleError, Recipient, Reminder, ReminderKind, TimeOfDay,
};
use nuntius_scheduler_infra::NuntiusContext;
use serde_json::Value;

pub async fn create_reminder_controller(
    http_req: actix_web::HttpRequest,
    body: web::Json<RequestBody>,
    ctx: web::Data<NuntiusContext>,
) -> Result<HttpResponse, NuntiusError> {
    let owner = protect_route(&http_req, &ctx)?;
    let body = body.0;

    let usecase = CreateReminderUseCase {
        owner,
        kind: body.kind,
        instance_name: body.instance_name,
        message: body.message,
        recipient_selection_mode: body.recipient_selection_mode,
        recipients: body.recipients,
        lead_days: body.lead_days,
        send_weekday: body.send_weekday,
        send_time: body.send_time,
        send_at: body.send_at,
    };

    execute(usecase, &ctx)
        .await
        .map(|reminder| HttpResponse::Created().json(APIResponse::new(reminder)))
        .map_err(NuntiusError::from)
}

#[derive(Debug)]
pub struct CreateReminderUseCase {
    pub owner: Owner,
    pub kind: Option<String>,
    pub instance_name: Option<String>,
    pub message: Option<String>,
    pub recipient_selection_mode: Option<Value>,
    pub recipients: Vec<Recipient>,
    pub lead_days: Option<i64>,
    pub send_weekday: Option<String>,
    pub send_time: Option<String>,
    pub send_at: Option<i64>,
}

#[derive(Debug)]
pub enum UseCaseError {
    MissingField(&'static str),
    InvalidKind(String),
    InvalidSchedule(InvalidScheduleError),
    StorageError,
}

impl From<UseCaseError> for NuntiusError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::MissingField(field) => {
                Self::BadClientData(format!("The field: {} is required.", field))
            }
            UseCaseError::InvalidKind(kind) => Self::BadClientData(format!(
                "Invalid reminder kind: {}. It should be one of: prueba, semanal, mensual, revision, aniversario, cumpleanos.",
                kind
            )),
            UseCaseError::InvalidSchedule(e) => Self::BadClientData(e.to_string()),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

fn required(value: &Option<String>, field: &'static str) -> Result<String, UseCaseError> {
    match value.as_deref().map(str::trim) {
        Some(value) if !value.is_empty() => Ok(value.to_string()),
        _ => Err(UseCaseError::MissingField(field)),
    }
}

// Blank optional fields are treated as not given
fn optional(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(String::from)
}

#[async_trait::async_trait(?Send)]
impl UseCase for CreateReminderUseCase {
    type Response = Reminder;

    type Error = UseCaseError;

    const NAME: &'static str = "CreateReminder";

    async fn execute(&mut self, ctx: &NuntiusContext) -> Result<Self::Response, Self::Error> {
        let kind = required(&self.kind, "kind")?;
        let kind: ReminderKind = kind.parse().map_err(|_| UseCaseError::InvalidKind(kind))?;
        let instance_name = required(&self.instance_name, "instanceName")?;
        // Templates are used verbatim, surrounding whitespace included
        required(&self.message, "message")?;
        let message = self.message.clone().unwrap_or_default();

        let send_weekday = optional(&self.send_weekday);
        if let Some(weekday) = &send_weekday {
            parse_weekday(weekday).map_err(UseCaseError::InvalidSchedule)?;
        }
        let send_time = optional(&self.send_time);
        if let Some(time) = &send_time {
            time.parse::<TimeOfDay>()
                .map_err(UseCaseError::InvalidSchedule)?;
        }

        let now = ctx.sys.get_timestamp_millis();
        let mut reminder = Reminder::new(
            self.owner.id.clone(),
            kind,
            instance_name,
            message,
            std::mem::take(&mut self.recipients),
            now,
        );
        reminder.recipient_selection_mode = self.recipient_selection_mode.take();
        reminder.lead_days = self.lead_days.unwrap_or_default();
        reminder.send_weekday = send_weekday;
        reminder.send_time = send_time;
        reminder.next_send_at = reminder.compute_next_send(self.send_at, now, &ctx.config.timezone);

        ctx.repos
            .reminders
            .insert(&reminder)
            .await
            .map(|_| reminder)
            .map_err(|_| UseCaseError::StorageError)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use nuntius_scheduler_infra::ManualClock;
    use std::sync::Arc;

    // Monday 2026-10-19 09:00 in Bogota
    const NOW: i64 = 1_792_418_400_000;
    const DAY: i64 = 24 * 60 * 60 * 1000;

    fn setup() -> NuntiusContext {
        let mut ctx = NuntiusContext::create_inmemory();
        ctx.sys = Arc::new(ManualClock::new(NOW));
        ctx.config.timezone = chrono_tz::America::Bogota;
        ctx
    }

    fn usecase(kind: &str) -> CreateReminderUseCase {
        CreateReminderUseCase {
            owner: Owner {
                id: "user-1".into(),
                is_admin: false,
            },
            kind: Some(kind.into()),
            instance_name: Some("ventas".into()),
            message: Some("Hola {nombre}".into()),
            recipient_selection_mode: None,
            recipients: vec![
                Recipient::new("Ana", "3001234567"),
                Recipient::new("Luis", "3109998877"),
            ],
            lead_days: None,
            send_weekday: None,
            send_time: None,
            send_at: None,
        }
    }

    #[actix_web::test]
    async fn creates_one_time_reminder() {
        let ctx = setup();
        let mut usecase = usecase("prueba");
        usecase.send_at = Some(NOW + 1000);

        let reminder = usecase.execute(&ctx).await.unwrap();
        assert_eq!(reminder.kind, ReminderKind::OneTime);
        assert_eq!(reminder.owner_id, "user-1");
        assert_eq!(reminder.next_send_at, Some(NOW + 1000));
        assert_eq!(reminder.total_recipients, 2);
        assert!(reminder.active);
        assert!(reminder.id.as_str().starts_with("rec_"));
        assert_eq!(
            ctx.repos.reminders.find(&reminder.id).await.unwrap(),
            Some(reminder)
        );
    }

    #[actix_web::test]
    async fn schedules_weekly_reminder() {
        let ctx = setup();
        let mut usecase = usecase("semanal");
        usecase.send_weekday = Some("Miércoles".into());
        usecase.send_time = Some("09:00".into());

        let reminder = usecase.execute(&ctx).await.unwrap();
        assert_eq!(reminder.next_send_at, Some(NOW + 2 * DAY));
    }

    #[actix_web::test]
    async fn birthday_reminders_go_out_tomorrow_morning() {
        let ctx = setup();
        let reminder = usecase("cumpleanos").execute(&ctx).await.unwrap();
        assert_eq!(reminder.next_send_at, Some(NOW + DAY));
    }

    #[actix_web::test]
    async fn rejects_malformed_definitions() {
        let ctx = setup();

        let mut missing_message = usecase("prueba");
        missing_message.message = Some("  ".into());
        assert!(matches!(
            missing_message.execute(&ctx).await,
            Err(UseCaseError::MissingField("message"))
        ));

        let mut missing_kind = usecase("prueba");
        missing_kind.kind = None;
        assert!(matches!(
            missing_kind.execute(&ctx).await,
            Err(UseCaseError::MissingField("kind"))
        ));

        assert!(matches!(
            usecase("diario").execute(&ctx).await,
            Err(UseCaseError::InvalidKind(_))
        ));

        let mut bad_time = usecase("mensual");
        bad_time.send_time = Some("25:00".into());
        assert!(matches!(
            bad_time.execute(&ctx).await,
            Err(UseCaseError::InvalidSchedule(InvalidScheduleError::TimeOfDay(_)))
        ));

        let mut bad_day = usecase("semanal");
        bad_day.send_weekday = Some("someday".into());
        bad_day.send_time = Some("09:00".into());
        assert!(matches!(
            bad_day.execute(&ctx).await,
            Err(UseCaseError::InvalidSchedule(InvalidScheduleError::Weekday(_)))
        ));

        assert!(ctx.repos.reminders.find_all().await.unwrap().is_empty());
    }
}
