use crate::dtos::MessageTemplateDTO;
use nuntius_scheduler_domain::{MessageTemplate, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageTemplateResponse {
    pub template: MessageTemplateDTO,
}

impl MessageTemplateResponse {
    pub fn new(template: MessageTemplate) -> Self {
        Self {
            template: MessageTemplateDTO::new(template),
        }
    }
}

pub mod create_template {
    use super::*;

    #[derive(Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub name: String,
        pub message: String,
    }

    pub type APIResponse = MessageTemplateResponse;
}

pub mod get_templates {
    use super::*;

    #[derive(Deserialize, Serialize)]
    pub struct APIResponse {
        pub templates: Vec<MessageTemplateDTO>,
    }

    impl APIResponse {
        pub fn new(templates: Vec<MessageTemplate>) -> Self {
            Self {
                templates: templates
                    .into_iter()
                    .map(MessageTemplateDTO::new)
                    .collect(),
            }
        }
    }
}

pub mod update_template {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub template_id: ID,
    }

    #[derive(Serialize, Deserialize, Default)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        #[serde(default)]
        pub name: Option<String>,
        #[serde(default)]
        pub message: Option<String>,
    }

    pub type APIResponse = MessageTemplateResponse;
}

pub mod delete_template {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub template_id: ID,
    }

    pub type APIResponse = MessageTemplateResponse;
}
