use crate::shared::entity::{Entity, ID};
use serde::{Deserialize, Serialize};

/// The owner of `Reminder`s. Profile data lives with the messaging client,
/// the scheduler only needs to know whether the `User` still wants
/// to receive notifications.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: ID,
    pub is_active: bool,
    pub created: i64,
    pub updated: i64,
}

impl User {
    pub fn new(now_ts: i64) -> Self {
        Self {
            id: Default::default(),
            is_active: true,
            created: now_ts,
            updated: now_ts,
        }
    }
}

impl Entity for User {
    fn id(&self) -> &ID {
        &self.id
    }
}
