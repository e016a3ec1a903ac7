use pillbox_domain::{Recurrence, Reminder, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ReminderDTO {
    pub id: ID,
    pub user_id: ID,
    pub title: String,
    pub comment: Option<String>,
    pub image_url: Option<String>,
    pub recurrence: Recurrence,
    pub is_active: bool,
    pub last_sent_at: Option<i64>,
    pub next_send_at: Option<i64>,
    pub created: i64,
    pub updated: i64,
}

impl ReminderDTO {
    pub fn new(reminder: Reminder) -> Self {
        Self {
            id: reminder.id,
            user_id: reminder.user_id,
            title: reminder.title,
            comment: reminder.comment,
            image_url: reminder.image_url,
            recurrence: reminder.recurrence,
            is_active: reminder.is_active,
            last_sent_at: reminder.last_sent_at,
            next_send_at: reminder.next_send_at,
            created: reminder.created,
            updated: reminder.updated,
        }
    }
}
