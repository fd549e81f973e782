use super::IReminderRepo;
use crate::repos::shared::inmemory_repo::*;
use nuntius_scheduler_domain::{Reminder, ID};
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Mutex,
};

pub struct InMemoryReminderRepo {
    reminders: Mutex<Vec<Reminder>>,
    writes: AtomicUsize,
}

impl InMemoryReminderRepo {
    pub fn new() -> Self {
        Self {
            reminders: Mutex::new(Vec::new()),
            writes: AtomicUsize::new(0),
        }
    }

    /// Number of times the store has been written to
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    fn count_write(&self) {
        self.writes.fetch_add(1, Ordering::SeqCst);
    }
}

impl Default for InMemoryReminderRepo {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl IReminderRepo for InMemoryReminderRepo {
    async fn insert(&self, reminder: &Reminder) -> anyhow::Result<()> {
        self.count_write();
        insert(reminder, &self.reminders);
        Ok(())
    }

    async fn save(&self, reminder: &Reminder) -> anyhow::Result<()> {
        self.count_write();
        save(reminder, &self.reminders);
        Ok(())
    }

    async fn save_many(&self, reminders: &[Reminder]) -> anyhow::Result<()> {
        self.count_write();
        save_many(reminders, &self.reminders);
        Ok(())
    }

    async fn find(&self, reminder_id: &ID) -> anyhow::Result<Option<Reminder>> {
        Ok(find(reminder_id, &self.reminders))
    }

    async fn find_all(&self) -> anyhow::Result<Vec<Reminder>> {
        Ok(find_by(&self.reminders, |_| true))
    }

    async fn find_by_owner(&self, owner_id: &str) -> anyhow::Result<Vec<Reminder>> {
        Ok(find_by(&self.reminders, |r| r.owner_id == owner_id))
    }

    async fn delete(&self, reminder_id: &ID) -> anyhow::Result<Option<Reminder>> {
        self.count_write();
        Ok(delete(reminder_id, &self.reminders))
    }
}
