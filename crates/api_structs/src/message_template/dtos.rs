use nuntius_scheduler_domain::{MessageTemplate, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MessageTemplateDTO {
    pub id: ID,
    pub owner_id: String,
    pub name: String,
    pub message: String,
    pub created_at: i64,
}

impl MessageTemplateDTO {
    pub fn new(template: MessageTemplate) -> Self {
        Self {
            id: template.id,
            owner_id: template.owner_id,
            name: template.name,
            message: template.message,
            created_at: template.created_at,
        }
    }
}
