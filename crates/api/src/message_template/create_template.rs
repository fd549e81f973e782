use crate::{
    error::NuntiusError,
    shared::{
        auth::{protect_route, Owner},
        usecase::{execute, UseCase},
    },
};
use actix_web::{web, HttpResponse};
use nuntius_scheduler_api_structs::create_template::*;
use nuntius_scheduler_domain::MessageTemplate;
use nuntius_scheduler_infra::NuntiusContext;

pub async fn create_template_controller(
    http_req: actix_web::HttpRequest,
    body: web::Json<RequestBody>,
    ctx: web::Data<NuntiusContext>,
) -> Result<HttpResponse, NuntiusError> {
    let owner = protect_route(&http_req, &ctx)?;
    let body = body.0;

    let usecase = CreateTemplateUseCase {
        owner,
        name: body.name,
        message: body.message,
    };

    execute(usecase, &ctx)
        .await
        .map(|template| HttpResponse::Created().json(APIResponse::new(template)))
        .map_err(NuntiusError::from)
}

#[derive(Debug)]
pub struct CreateTemplateUseCase {
    pub owner: Owner,
    pub name: String,
    pub message: String,
}

#[derive(Debug)]
pub enum UseCaseError {
    MissingField(&'static str),
    StorageError,
}

impl From<UseCaseError> for NuntiusError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::MissingField(field) => {
                Self::BadClientData(format!("The field: {} is required.", field))
            }
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for CreateTemplateUseCase {
    type Response = MessageTemplate;

    type Error = UseCaseError;

    const NAME: &'static str = "CreateTemplate";

    async fn execute(&mut self, ctx: &NuntiusContext) -> Result<Self::Response, Self::Error> {
        if self.name.trim().is_empty() {
            return Err(UseCaseError::MissingField("name"));
        }
        if self.message.trim().is_empty() {
            return Err(UseCaseError::MissingField("message"));
        }

        let template = MessageTemplate::new(
            self.owner.id.clone(),
            self.name.trim().to_string(),
            std::mem::take(&mut self.message),
            ctx.sys.get_timestamp_millis(),
        );

        ctx.repos
            .templates
            .insert(&template)
            .await
            .map(|_| template)
            .map_err(|_| UseCaseError::StorageError)
    }
}
