mod file;
mod inmemory;

pub use file::FileReminderRepo;
pub use inmemory::InMemoryReminderRepo;
use nuntius_scheduler_domain::{Reminder, ID};

#[async_trait::async_trait]
pub trait IReminderRepo: Send + Sync {
    async fn insert(&self, reminder: &Reminder) -> anyhow::Result<()>;
    async fn save(&self, reminder: &Reminder) -> anyhow::Result<()>;
    /// Saves every given reminder with a single write to the store.
    /// Reminders deleted in the meantime stay deleted.
    async fn save_many(&self, reminders: &[Reminder]) -> anyhow::Result<()>;
    async fn find(&self, reminder_id: &ID) -> anyhow::Result<Option<Reminder>>;
    async fn find_all(&self) -> anyhow::Result<Vec<Reminder>>;
    async fn find_by_owner(&self, owner_id: &str) -> anyhow::Result<Vec<Reminder>>;
    async fn delete(&self, reminder_id: &ID) -> anyhow::Result<Option<Reminder>>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use nuntius_scheduler_domain::{Recipient, ReminderKind};
    use std::sync::Arc;

    fn reminder(owner: &str) -> Reminder {
        let mut reminder = Reminder::new(
            owner.into(),
            ReminderKind::Weekly,
            "ventas".into(),
            "Hola {nombre}".into(),
            vec![Recipient::new("Ana", "3001234567")],
            1_792_418_400_000,
        );
        reminder.send_weekday = Some("lunes".into());
        reminder.send_time = Some("09:00".into());
        reminder.next_send_at = Some(1_792_418_400_000);
        reminder
    }

    async fn create_and_delete(repo: Arc<dyn IReminderRepo>) {
        let r1 = reminder("owner1");
        let r2 = reminder("owner2");

        // Insert
        repo.insert(&r1).await.expect("To insert reminder");
        repo.insert(&r2).await.expect("To insert reminder");

        // Different find methods
        let res = repo.find(&r1.id).await.unwrap().unwrap();
        assert_eq!(res, r1);
        assert_eq!(repo.find_all().await.unwrap().len(), 2);
        let res = repo.find_by_owner("owner2").await.unwrap();
        assert_eq!(res, vec![r2.clone()]);

        // Delete
        let res = repo.delete(&r1.id).await.unwrap();
        assert_eq!(res, Some(r1.clone()));
        assert!(repo.find(&r1.id).await.unwrap().is_none());
        assert!(repo.delete(&r1.id).await.unwrap().is_none());
    }

    async fn update(repo: Arc<dyn IReminderRepo>) {
        let mut r1 = reminder("owner1");
        let mut r2 = reminder("owner1");
        let deleted = reminder("owner1");
        repo.insert(&r1).await.unwrap();
        repo.insert(&r2).await.unwrap();

        r1.toggle(1_792_418_400_000, &chrono_tz::America::Bogota);
        repo.save(&r1).await.unwrap();
        assert!(!repo.find(&r1.id).await.unwrap().unwrap().active);

        r1.finish_execution(1, 0, 1_792_418_400_000);
        r2.finish_execution(0, 1, 1_792_418_400_000);
        repo.save_many(&[r1.clone(), r2.clone(), deleted.clone()])
            .await
            .unwrap();

        let stored = repo.find_all().await.unwrap();
        assert_eq!(stored, vec![r1, r2]);
        assert!(repo.find(&deleted.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn inmemory_repo() {
        create_and_delete(Arc::new(InMemoryReminderRepo::new())).await;
        update(Arc::new(InMemoryReminderRepo::new())).await;
    }

    #[tokio::test]
    async fn file_repo() {
        let dir = tempfile::tempdir().unwrap();
        let tz = chrono_tz::America::Bogota;
        create_and_delete(Arc::new(FileReminderRepo::new(dir.path().join("a.json"), tz))).await;
        update(Arc::new(FileReminderRepo::new(dir.path().join("b.json"), tz))).await;
    }
}
