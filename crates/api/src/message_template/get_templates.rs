use crate::{
    error::NuntiusError,
    shared::{
        auth::{protect_route, Owner},
        usecase::{execute, UseCase},
    },
};
use actix_web::{web, HttpResponse};
use nuntius_scheduler_api_structs::get_templates::*;
use nuntius_scheduler_domain::MessageTemplate;
use nuntius_scheduler_infra::NuntiusContext;

pub async fn get_templates_controller(
    http_req: actix_web::HttpRequest,
    ctx: web::Data<NuntiusContext>,
) -> Result<HttpResponse, NuntiusError> {
    let owner = protect_route(&http_req, &ctx)?;

    let usecase = GetTemplatesUseCase { owner };

    execute(usecase, &ctx)
        .await
        .map(|templates| HttpResponse::Ok().json(APIResponse::new(templates)))
        .map_err(NuntiusError::from)
}

#[derive(Debug)]
pub struct GetTemplatesUseCase {
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
impl UseCase for GetTemplatesUseCase {
    type Response = Vec<MessageTemplate>;

    type Error = UseCaseError;

    const NAME: &'static str = "GetTemplates";

    async fn execute(&mut self, ctx: &NuntiusContext) -> Result<Self::Response, Self::Error> {
        let res = if self.owner.is_admin {
            ctx.repos.templates.find_all().await
        } else {
            ctx.repos.templates.find_by_owner(&self.owner.id).await
        };
        res.map_err(|_| UseCaseError::StorageError)
    }
}
