use crate::{
    error::NuntiusError,
    shared::{
        auth::{protect_route, Owner},
        usecase::{execute, UseCase},
    },
};
use actix_web::{web, HttpResponse};
use nuntius_scheduler_api_structs::delete_template::*;
use nuntius_scheduler_domain::{MessageTemplate, ID};
use nuntius_scheduler_infra::NuntiusContext;

pub async fn delete_template_controller(
    http_req: actix_web::HttpRequest,
    path: web::Path<PathParams>,
    ctx: web::Data<NuntiusContext>,
) -> Result<HttpResponse, NuntiusError> {
    let owner = protect_route(&http_req, &ctx)?;

    let usecase = DeleteTemplateUseCase {
        owner,
        template_id: path.template_id.clone(),
    };

    execute(usecase, &ctx)
        .await
        .map(|template| HttpResponse::Ok().json(APIResponse::new(template)))
        .map_err(NuntiusError::from)
}

#[derive(Debug)]
pub struct DeleteTemplateUseCase {
    pub owner: Owner,
    pub template_id: ID,
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
                Self::NotFound(format!("The template with id: {}, was not found.", id))
            }
            UseCaseError::Forbidden(id) => {
                Self::Forbidden(format!("The template with id: {}, belongs to another owner.", id))
            }
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for DeleteTemplateUseCase {
    type Response = MessageTemplate;

    type Error = UseCaseError;

    const NAME: &'static str = "DeleteTemplate";

    async fn execute(&mut self, ctx: &NuntiusContext) -> Result<Self::Response, Self::Error> {
        match ctx.repos.templates.find(&self.template_id).await {
            Ok(Some(template)) if self.owner.can_access(&template.owner_id) => ctx
                .repos
                .templates
                .delete(&template.id)
                .await
                .map_err(|_| UseCaseError::StorageError)?
                .ok_or_else(|| UseCaseError::NotFound(self.template_id.clone())),
            Ok(Some(_)) => Err(UseCaseError::Forbidden(self.template_id.clone())),
            Ok(None) => Err(UseCaseError::NotFound(self.template_id.clone())),
            Err(_) => Err(UseCaseError::StorageError),
        }
    }
}
