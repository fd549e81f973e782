use super::IMessageTemplateRepo;
use crate::repos::shared::inmemory_repo::*;
use nuntius_scheduler_domain::{MessageTemplate, ID};
use std::sync::Mutex;

pub struct InMemoryMessageTemplateRepo {
    templates: Mutex<Vec<MessageTemplate>>,
}

impl InMemoryMessageTemplateRepo {
    pub fn new() -> Self {
        Self {
            templates: Mutex::new(Vec::new()),
        }
    }
}

impl Default for InMemoryMessageTemplateRepo {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl IMessageTemplateRepo for InMemoryMessageTemplateRepo {
    async fn insert(&self, template: &MessageTemplate) -> anyhow::Result<()> {
        insert(template, &self.templates);
        Ok(())
    }

    async fn save(&self, template: &MessageTemplate) -> anyhow::Result<()> {
        save(template, &self.templates);
        Ok(())
    }

    async fn find(&self, template_id: &ID) -> anyhow::Result<Option<MessageTemplate>> {
        Ok(find(template_id, &self.templates))
    }

    async fn find_all(&self) -> anyhow::Result<Vec<MessageTemplate>> {
        Ok(find_by(&self.templates, |_| true))
    }

    async fn find_by_owner(&self, owner_id: &str) -> anyhow::Result<Vec<MessageTemplate>> {
        Ok(find_by(&self.templates, |t| t.owner_id == owner_id))
    }

    async fn delete(&self, template_id: &ID) -> anyhow::Result<Option<MessageTemplate>> {
        Ok(delete(template_id, &self.templates))
    }
}
