use pillbox_domain::{ExecutionStatus, ReminderExecution, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ReminderExecutionDTO {
    pub id: ID,
    pub reminder_id: ID,
    pub user_id: ID,
    pub status: ExecutionStatus,
    pub sent_at: i64,
    pub confirmed_at: Option<i64>,
    pub created: i64,
}

impl ReminderExecutionDTO {
    pub fn new(execution: ReminderExecution) -> Self {
        Self {
            id: execution.id,
            reminder_id: execution.reminder_id,
            user_id: execution.user_id,
            status: execution.status,
            sent_at: execution.sent_at,
            confirmed_at: execution.confirmed_at,
            created: execution.created,
        }
    }
}
