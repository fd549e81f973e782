use crate::shared::entity::{Entity, ID};

/// A reusable message body a tenant can pick when creating a `Reminder`
#[derive(Debug, Clone, PartialEq)]
pub struct MessageTemplate {
    pub id: ID,
    pub owner_id: String,
    pub name: String,
    pub message: String,
    pub created_at: i64,
}

impl MessageTemplate {
    pub fn new(owner_id: String, name: String, message: String, created_at: i64) -> Self {
        Self {
            id: ID::generate("plt"),
            owner_id,
            name,
            message,
            created_at,
        }
    }

    /// Applies a partial update, absent or blank values keep the current ones
    pub fn update(&mut self, name: Option<String>, message: Option<String>) {
        if let Some(name) = name.filter(|n| !n.trim().is_empty()) {
            self.name = name;
        }
        if let Some(message) = message.filter(|m| !m.trim().is_empty()) {
            self.message = message;
        }
    }
}

impl Entity for MessageTemplate {
    fn id(&self) -> &ID {
        &self.id
    }
}
