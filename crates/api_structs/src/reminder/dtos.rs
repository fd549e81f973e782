use nuntius_scheduler_domain::{ExecutionRecord, Recipient, Reminder, ReminderKind, ID};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReminderDTO {
    pub id: ID,
    pub owner_id: String,
    pub kind: ReminderKind,
    pub instance_name: String,
    pub message: String,
    pub recipient_selection_mode: Option<Value>,
    pub recipients: Vec<Recipient>,
    pub lead_days: i64,
    pub send_weekday: Option<String>,
    pub send_time: Option<String>,
    pub active: bool,
    pub created_at: i64,
    pub next_send_at: Option<i64>,
    pub last_send_at: Option<i64>,
    pub total_recipients: usize,
    pub history: Vec<ExecutionRecordDTO>,
}

impl ReminderDTO {
    pub fn new(reminder: Reminder) -> Self {
        Self {
            id: reminder.id,
            owner_id: reminder.owner_id,
            kind: reminder.kind,
            instance_name: reminder.instance_name,
            message: reminder.message,
            recipient_selection_mode: reminder.recipient_selection_mode,
            recipients: reminder.recipients,
            lead_days: reminder.lead_days,
            send_weekday: reminder.send_weekday,
            send_time: reminder.send_time,
            active: reminder.active,
            created_at: reminder.created_at,
            next_send_at: reminder.next_send_at,
            last_send_at: reminder.last_send_at,
            total_recipients: reminder.total_recipients,
            history: reminder
                .history
                .into_iter()
                .map(ExecutionRecordDTO::new)
                .collect(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionRecordDTO {
    pub at: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recorded_as: Option<String>,
    pub sent_count: usize,
    pub failed_count: usize,
    pub total_recipients: usize,
}

impl ExecutionRecordDTO {
    pub fn new(record: ExecutionRecord) -> Self {
        Self {
            at: record.at,
            recorded_as: record.recorded_as,
            sent_count: record.sent_count,
            failed_count: record.failed_count,
            total_recipients: record.total_recipients,
        }
    }
}
