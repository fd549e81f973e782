use crate::{
    error::NuntiusError,
    shared::{
        auth::{protect_route, Owner},
        usecase::{execute, UseCase},
    },
};
use actix_web::{web, HttpResponse};
use nuntius_scheduler_api_structs::delete_reminder::*;
use nuntius_scheduler_domain::{Reminder, ID};
use nuntius_scheduler_infra::NuntiusContext;

pub async fn delete_reminder_controller(
    http_req: actix_web::HttpRequest,
    path: web::Path<PathParams>,
    ctx: web::Data<NuntiusContext>,
) -> Result<HttpResponse, NuntiusError> {
    let owner = protect_route(&http_req, &ctx)?;

    let usecase = DeleteReminderUseCase {
        owner,
        reminder_id: path.reminder_id.clone(),
    };

    execute(usecase, &ctx)
        .await
        .map(|reminder| HttpResponse::Ok().json(APIResponse::new(reminder)))
        .map_err(NuntiusError::from)
}

#[derive(Debug)]
pub struct DeleteReminderUseCase {
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
impl UseCase for DeleteReminderUseCase {
    type Response = Reminder;

    type Error = UseCaseError;

    const NAME: &'static str = "DeleteReminder";

    async fn execute(&mut self, ctx: &NuntiusContext) -> Result<Self::Response, Self::Error> {
        match ctx.repos.reminders.find(&self.reminder_id).await {
            Ok(Some(reminder)) if self.owner.can_access(&reminder.owner_id) => ctx
                .repos
                .reminders
                .delete(&reminder.id)
                .await
                .map_err(|_| UseCaseError::StorageError)?
                .ok_or_else(|| UseCaseError::NotFound(self.reminder_id.clone())),
            Ok(Some(_)) => Err(UseCaseError::Forbidden(self.reminder_id.clone())),
            Ok(None) => Err(UseCaseError::NotFound(self.reminder_id.clone())),
            Err(_) => Err(UseCaseError::StorageError),
        }
    }
}
