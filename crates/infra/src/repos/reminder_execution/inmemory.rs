use super::IReminderExecutionRepo;
use crate::repos::shared::inmemory_repo::*;
use pillbox_domain::{ExecutionScope, ExecutionStatistics, ExecutionStatus, ReminderExecution, ID};

pub struct InMemoryReminderExecutionRepo {
    executions: std::sync::Mutex<Vec<ReminderExecution>>,
}

impl InMemoryReminderExecutionRepo {
    pub fn new() -> Self {
        Self {
            executions: std::sync::Mutex::new(vec![]),
        }
    }

    fn find_latest(&self, scope: ExecutionScope, limit: i64) -> Vec<ReminderExecution> {
        let mut executions = find_by(&self.executions, |e| scope.contains(e));
        executions.sort_by(|e1, e2| e2.sent_at.cmp(&e1.sent_at));
        executions.truncate(limit.max(0) as usize);
        executions
    }
}

#[async_trait::async_trait]
impl IReminderExecutionRepo for InMemoryReminderExecutionRepo {
    async fn insert(&self, execution: &ReminderExecution) -> anyhow::Result<()> {
        insert(execution, &self.executions);
        Ok(())
    }

    async fn find(&self, execution_id: &ID) -> Option<ReminderExecution> {
        find(execution_id, &self.executions)
    }

    async fn update_status(
        &self,
        execution_id: &ID,
        status: ExecutionStatus,
        confirmed_at: Option<i64>,
    ) -> anyhow::Result<bool> {
        Ok(update_one(execution_id, &self.executions, |e| {
            e.status = status;
            e.confirmed_at = confirmed_at;
        }))
    }

    async fn find_by_reminder(
        &self,
        reminder_id: &ID,
        limit: i64,
    ) -> anyhow::Result<Vec<ReminderExecution>> {
        Ok(self.find_latest(ExecutionScope::Reminder(reminder_id.clone()), limit))
    }

    async fn find_by_user(
        &self,
        user_id: &ID,
        limit: i64,
    ) -> anyhow::Result<Vec<ReminderExecution>> {
        Ok(self.find_latest(ExecutionScope::User(user_id.clone()), limit))
    }

    async fn get_statistics(
        &self,
        scope: &ExecutionScope,
        from: i64,
        to: i64,
    ) -> anyhow::Result<ExecutionStatistics> {
        let executions = find_by(&self.executions, |e| {
            scope.contains(e) && e.sent_at >= from && e.sent_at <= to
        });
        Ok(ExecutionStatistics::from_executions(&executions))
    }
}
