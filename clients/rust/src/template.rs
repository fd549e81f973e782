use crate::base::{APIResponse, BaseClient};
use nuntius_scheduler_api_structs::*;
use nuntius_scheduler_domain::ID;
use reqwest::StatusCode;
use std::sync::Arc;

#[derive(Clone)]
pub struct TemplateClient {
    base: Arc<BaseClient>,
}

pub struct UpdateTemplateInput {
    pub template_id: ID,
    pub name: Option<String>,
    pub message: Option<String>,
}

impl TemplateClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    pub async fn create<T: Into<String>>(
        &self,
        name: T,
        message: T,
    ) -> APIResponse<create_template::APIResponse> {
        let body = create_template::RequestBody {
            name: name.into(),
            message: message.into(),
        };
        self.base
            .post(body, "templates".into(), StatusCode::CREATED)
            .await
    }

    pub async fn get_all(&self) -> APIResponse<get_templates::APIResponse> {
        self.base.get("templates".into(), StatusCode::OK).await
    }

    pub async fn update(
        &self,
        input: UpdateTemplateInput,
    ) -> APIResponse<update_template::APIResponse> {
        let body = update_template::RequestBody {
            name: input.name,
            message: input.message,
        };
        self.base
            .put(
                body,
                format!("templates/{}", input.template_id),
                StatusCode::OK,
            )
            .await
    }

    pub async fn delete(&self, template_id: &ID) -> APIResponse<delete_template::APIResponse> {
        self.base
            .delete(format!("templates/{}", template_id), StatusCode::OK)
            .await
    }
}
