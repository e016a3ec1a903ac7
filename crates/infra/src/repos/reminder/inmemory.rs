use super::IReminderRepo;
use crate::repos::{shared::inmemory_repo::*, user::InMemoryUserRepo};
use pillbox_domain::{Reminder, ID};
use std::sync::Arc;

pub struct InMemoryReminderRepo {
    reminders: std::sync::Mutex<Vec<Reminder>>,
    users: Arc<InMemoryUserRepo>,
}

impl InMemoryReminderRepo {
    pub fn new(users: Arc<InMemoryUserRepo>) -> Self {
        Self {
            reminders: std::sync::Mutex::new(vec![]),
            users,
        }
    }
}

#[async_trait::async_trait]
impl IReminderRepo for InMemoryReminderRepo {
    async fn insert(&self, reminder: &Reminder) -> anyhow::Result<()> {
        insert(reminder, &self.reminders);
        Ok(())
    }

    async fn save(&self, reminder: &Reminder) -> anyhow::Result<()> {
        save(reminder, &self.reminders);
        Ok(())
    }

    async fn find(&self, reminder_id: &ID) -> Option<Reminder> {
        find(reminder_id, &self.reminders)
    }

    async fn find_by_user(&self, user_id: &ID) -> anyhow::Result<Vec<Reminder>> {
        Ok(find_by(&self.reminders, |r| r.user_id == *user_id))
    }

    async fn find_active_by_user(&self, user_id: &ID) -> anyhow::Result<Vec<Reminder>> {
        Ok(find_by(&self.reminders, |r| {
            r.user_id == *user_id && r.is_active
        }))
    }

    async fn find_due(&self, now: i64) -> anyhow::Result<Vec<Reminder>> {
        let mut due = find_by(&self.reminders, |r| {
            r.is_active && r.is_due(now) && self.users.is_active(&r.user_id)
        });
        // Stable so that reminders with the same schedule keep insertion order
        due.sort_by_key(|r| (r.next_send_at.is_none(), r.next_send_at));
        Ok(due)
    }

    async fn update_next_send_at(&self, reminder_id: &ID, next_send_at: i64) -> anyhow::Result<()> {
        if !update_one(reminder_id, &self.reminders, |r| {
            r.next_send_at = Some(next_send_at)
        }) {
            anyhow::bail!("Reminder: {} not found", reminder_id);
        }
        Ok(())
    }

    async fn update_last_sent_at(&self, reminder_id: &ID, last_sent_at: i64) -> anyhow::Result<()> {
        if !update_one(reminder_id, &self.reminders, |r| {
            r.last_sent_at = Some(last_sent_at)
        }) {
            anyhow::bail!("Reminder: {} not found", reminder_id);
        }
        Ok(())
    }

    async fn delete(&self, reminder_id: &ID) -> Option<Reminder> {
        delete(reminder_id, &self.reminders)
    }
}
