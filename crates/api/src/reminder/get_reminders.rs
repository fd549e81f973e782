use crate::{
    error::NuntiusError,
    shared::{
        auth::{protect_route, Owner},
        usecase::{execute, UseCase},
    },
};
use actix_web::{web, HttpResponse};
use nuntius_scheduler_api_structs::get_reminders::*;
use nuntius_scheduler_domain::Reminder;
use nuntius_scheduler_infra::NuntiusContext;

pub async fn get_reminders_controller(
    http_req: actix_web::HttpRequest,
    ctx: web::Data<NuntiusContext>,
) -> Result<HttpResponse, NuntiusError> {
    let owner = protect_route(&http_req, &ctx)?;

    let usecase = GetRemindersUseCase { owner };

    execute(usecase, &ctx)
        .await
        .map(|reminders| HttpResponse::Ok().json(APIResponse::new(reminders)))
        .map_err(NuntiusError::from)
}

/// Reminders of the owner, or of everybody for admins
#[derive(Debug)]
pub struct GetRemindersUseCase {
    pub owner: Owner,
}

#[derive(Debug)]
pub enum UseCaseError {
    StorageError,
}

impl From<UseCaseError> for NuntiusError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetRemindersUseCase {
    type Response = Vec<Reminder>;

    type Error = UseCaseError;

    const NAME: &'static str = "GetReminders";

    async fn execute(&mut self, ctx: &NuntiusContext) -> Result<Self::Response, Self::Error> {
        let res = if self.owner.is_admin {
            ctx.repos.reminders.find_all().await
        } else {
            ctx.repos.reminders.find_by_owner(&self.owner.id).await
        };
        res.map_err(|_| UseCaseError::StorageError)
    }
}
