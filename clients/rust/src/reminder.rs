use crate::base::{APIResponse, BaseClient};
use nuntius_scheduler_api_structs::*;
use nuntius_scheduler_domain::{Recipient, ID};
use reqwest::StatusCode;
use serde_json::Value;
use std::sync::Arc;

#[derive(Clone)]
pub struct ReminderClient {
    base: Arc<BaseClient>,
}

#[derive(Default)]
pub struct CreateReminderInput {
    pub kind: String,
    pub instance_name: String,
    pub message: String,
    pub recipient_selection_mode: Option<Value>,
    pub recipients: Vec<Recipient>,
    pub lead_days: Option<i64>,
    pub send_weekday: Option<String>,
    pub send_time: Option<String>,
    pub send_at: Option<i64>,
}

impl ReminderClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    pub async fn create(
        &self,
        input: CreateReminderInput,
    ) -> APIResponse<create_reminder::APIResponse> {
        let body = create_reminder::RequestBody {
            kind: Some(input.kind),
            instance_name: Some(input.instance_name),
            message: Some(input.message),
            recipient_selection_mode: input.recipient_selection_mode,
            recipients: input.recipients,
            lead_days: input.lead_days,
            send_weekday: input.send_weekday,
            send_time: input.send_time,
            send_at: input.send_at,
        };
        self.base
            .post(body, "reminders".into(), StatusCode::CREATED)
            .await
    }

    pub async fn get_all(&self) -> APIResponse<get_reminders::APIResponse> {
        self.base.get("reminders".into(), StatusCode::OK).await
    }

    pub async fn get(&self, reminder_id: &ID) -> APIResponse<get_reminder::APIResponse> {
        self.base
            .get(format!("reminders/{}", reminder_id), StatusCode::OK)
            .await
    }

    pub async fn toggle(&self, reminder_id: &ID) -> APIResponse<toggle_reminder::APIResponse> {
        self.base
            .patch(format!("reminders/{}/toggle", reminder_id), StatusCode::OK)
            .await
    }

    pub async fn delete(&self, reminder_id: &ID) -> APIResponse<delete_reminder::APIResponse> {
        self.base
            .delete(format!("reminders/{}", reminder_id), StatusCode::OK)
            .await
    }
}
