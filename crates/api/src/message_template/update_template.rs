use crate::{
    error::NuntiusError,
    shared::{
        auth::{protect_route, Owner},
        usecase::{execute, UseCase},
    },
};
use actix_web::{web, HttpResponse};
use nuntius_scheduler_api_structs::update_template::*;
use nuntius_scheduler_domain::{MessageTemplate, ID};
use nuntius_scheduler_infra::NuntiusContext;

pub async fn update_template_controller(
    http_req: actix_web::HttpRequest,
    path: web::Path<PathParams>,
    body: web::Json<RequestBody>,
    ctx: web::Data<NuntiusContext>,
) -> Result<HttpResponse, NuntiusError> {
    let owner = protect_route(&http_req, &ctx)?;
    let body = body.0;

    let usecase = UpdateTemplateUseCase {
        owner,
        template_id: path.template_id.clone(),
        name: body.name,
        message: body.message,
    };

    execute(usecase, &ctx)
        .await
        .map(|template| HttpResponse::Ok().json(APIResponse::new(template)))
        .map_err(NuntiusError::from)
}

#[derive(Debug)]
pub struct UpdateTemplateUseCase {
    pub owner: Owner,
    pub template_id: ID,
    pub name: Option<String>,
    pub message: Option<String>,
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
impl UseCase for UpdateTemplateUseCase {
    type Response = MessageTemplate;

    type Error = UseCaseError;

    const NAME: &'static str = "UpdateTemplate";

    async fn execute(&mut self, ctx: &NuntiusContext) -> Result<Self::Response, Self::Error> {
        let mut template = match ctx.repos.templates.find(&self.template_id).await {
            Ok(Some(template)) => template,
            Ok(None) => return Err(UseCaseError::NotFound(self.template_id.clone())),
            Err(_) => return Err(UseCaseError::StorageError),
        };
        if !self.owner.can_access(&template.owner_id) {
            return Err(UseCaseError::Forbidden(self.template_id.clone()));
        }

        template.update(self.name.take(), self.message.take());

        ctx.repos
            .templates
            .save(&template)
            .await
            .map(|_| template)
            .map_err(|_| UseCaseError::StorageError)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn owner(id: &str) -> Owner {
        Owner {
            id: id.into(),
            is_admin: false,
        }
    }

    #[actix_web::test]
    async fn updates_own_template() {
        let ctx = NuntiusContext::create_inmemory();
        let template = MessageTemplate::new("user-1".into(), "Cobro".into(), "Hola".into(), 0);
        ctx.repos.templates.insert(&template).await.unwrap();

        let updated = UpdateTemplateUseCase {
            owner: owner("user-1"),
            template_id: template.id.clone(),
            name: None,
            message: Some("Hola {nombre}, debes {monto}".into()),
        }
        .execute(&ctx)
        .await
        .unwrap();
        assert_eq!(updated.name, "Cobro");
        assert_eq!(updated.message, "Hola {nombre}, debes {monto}");
        assert_eq!(
            ctx.repos.templates.find(&template.id).await.unwrap(),
            Some(updated)
        );
    }

    #[actix_web::test]
    async fn admin_can_update_any_template() {
        let ctx = NuntiusContext::create_inmemory();
        let template = MessageTemplate::new("user-1".into(), "Cobro".into(), "Hola".into(), 0);
        ctx.repos.templates.insert(&template).await.unwrap();

        let res = UpdateTemplateUseCase {
            owner: owner("user-2"),
            template_id: template.id.clone(),
            name: Some("Robado".into()),
            message: None,
        }
        .execute(&ctx)
        .await;
        assert!(matches!(res, Err(UseCaseError::Forbidden(_))));

        let updated = UpdateTemplateUseCase {
            owner: Owner {
                id: "admin".into(),
                is_admin: true,
            },
            template_id: template.id.clone(),
            name: Some("Cobro mensual".into()),
            message: None,
        }
        .execute(&ctx)
        .await
        .unwrap();
        assert_eq!(updated.name, "Cobro mensual");
        assert_eq!(updated.owner_id, "user-1");
    }
}
