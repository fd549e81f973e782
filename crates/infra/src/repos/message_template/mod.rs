mod file;
mod inmemory;

pub use file::FileMessageTemplateRepo;
pub use inmemory::InMemoryMessageTemplateRepo;
use nuntius_scheduler_domain::{MessageTemplate, ID};

#[async_trait::async_trait]
pub trait IMessageTemplateRepo: Send + Sync {
    async fn insert(&self, template: &MessageTemplate) -> anyhow::Result<()>;
    async fn save(&self, template: &MessageTemplate) -> anyhow::Result<()>;
    async fn find(&self, template_id: &ID) -> anyhow::Result<Option<MessageTemplate>>;
    async fn find_all(&self) -> anyhow::Result<Vec<MessageTemplate>>;
    async fn find_by_owner(&self, owner_id: &str) -> anyhow::Result<Vec<MessageTemplate>>;
    async fn delete(&self, template_id: &ID) -> anyhow::Result<Option<MessageTemplate>>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    async fn crud(repo: Arc<dyn IMessageTemplateRepo>) {
        let mut t1 = MessageTemplate::new("owner1".into(), "Cobro".into(), "Hola".into(), 1);
        let t2 = MessageTemplate::new("owner2".into(), "Saludo".into(), "Hola".into(), 2);
        repo.insert(&t1).await.unwrap();
        repo.insert(&t2).await.unwrap();

        assert_eq!(repo.find(&t1.id).await.unwrap(), Some(t1.clone()));
        assert_eq!(repo.find_all().await.unwrap().len(), 2);
        assert_eq!(repo.find_by_owner("owner2").await.unwrap(), vec![t2.clone()]);

        t1.update(Some("Cobro mensual".into()), None);
        repo.save(&t1).await.unwrap();
        assert_eq!(
            repo.find(&t1.id).await.unwrap().unwrap().name,
            "Cobro mensual"
        );

        assert_eq!(repo.delete(&t2.id).await.unwrap(), Some(t2.clone()));
        assert!(repo.find(&t2.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn inmemory_repo() {
        crud(Arc::new(InMemoryMessageTemplateRepo::new())).await;
    }

    #[tokio::test]
    async fn file_repo() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plantillas.json");
        crud(Arc::new(FileMessageTemplateRepo::new(&path, chrono_tz::UTC))).await;

        let raw: serde_json::Value =
            serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();
        let stored = &raw["plantillas"][0];
        assert_eq!(stored["nombre"], "Cobro mensual");
        assert_eq!(stored["ownerId"], "owner1");
        assert_eq!(stored["fechaCreacion"], "1970-01-01T00:00:00.001Z");
    }
}
