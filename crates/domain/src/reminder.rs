use crate::{
    shared::entity::{Entity, ID},
    Recurrence,
};
use serde::{Deserialize, Serialize};

/// A `Reminder` is a recurring notification rule defined by a `User`,
/// e.g. "take the blood pressure pills every day at 09:00".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reminder {
    pub id: ID,
    /// The `User` that owns this `Reminder` and receives the notifications
    pub user_id: ID,
    pub title: String,
    pub comment: Option<String>,
    pub image_url: Option<String>,
    pub recurrence: Recurrence,
    /// Inactive reminders are never considered due
    pub is_active: bool,
    /// The timestamp of the last successful delivery
    pub last_sent_at: Option<i64>,
    /// The timestamp at which this `Reminder` is due next.
    /// Only `None` before it has been computed the first time.
    pub next_send_at: Option<i64>,
    pub created: i64,
    pub updated: i64,
}

impl Reminder {
    pub fn new(user_id: ID, title: String, recurrence: Recurrence, now_ts: i64) -> Self {
        let next_send_at = recurrence.next_timestamp_millis(now_ts);
        Self {
            id: Default::default(),
            user_id,
            title,
            comment: None,
            image_url: None,
            recurrence,
            is_active: true,
            last_sent_at: None,
            next_send_at: Some(next_send_at),
            created: now_ts,
            updated: now_ts,
        }
    }

    /// The next time this `Reminder` should fire if it fired at `now_ts`
    pub fn compute_next_send_at(&self, now_ts: i64) -> i64 {
        self.recurrence.next_timestamp_millis(now_ts)
    }

    /// Replaces the recurrence and eagerly reschedules the `Reminder`
    pub fn set_recurrence(&mut self, recurrence: Recurrence, now_ts: i64) {
        self.recurrence = recurrence;
        self.next_send_at = Some(self.compute_next_send_at(now_ts));
    }

    pub fn is_due(&self, now_ts: i64) -> bool {
        match self.next_send_at {
            Some(next_send_at) => next_send_at <= now_ts,
            None => true,
        }
    }
}

impl Entity for Reminder {
    fn id(&self) -> &ID {
        &self.id
    }
}
