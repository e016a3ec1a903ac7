mod inmemory;
mod postgres;

pub use inmemory::InMemoryReminderExecutionRepo;
use pillbox_domain::{ExecutionScope, ExecutionStatistics, ExecutionStatus, ReminderExecution, ID};
pub use postgres::PostgresReminderExecutionRepo;

#[async_trait::async_trait]
pub trait IReminderExecutionRepo: Send + Sync {
    async fn insert(&self, execution: &ReminderExecution) -> anyhow::Result<()>;
    async fn find(&self, execution_id: &ID) -> Option<ReminderExecution>;
    /// Overwrites the status and returns whether the `ReminderExecution` existed
    async fn update_status(
        &self,
        execution_id: &ID,
        status: ExecutionStatus,
        confirmed_at: Option<i64>,
    ) -> anyhow::Result<bool>;
    /// The latest executions first
    async fn find_by_reminder(
        &self,
        reminder_id: &ID,
        limit: i64,
    ) -> anyhow::Result<Vec<ReminderExecution>>;
    /// The latest executions first
    async fn find_by_user(&self, user_id: &ID, limit: i64)
        -> anyhow::Result<Vec<ReminderExecution>>;
    /// Aggregates the executions sent within `from` and `to`, both inclusive
    async fn get_statistics(
        &self,
        scope: &ExecutionScope,
        from: i64,
        to: i64,
    ) -> anyhow::Result<ExecutionStatistics>;
}

#[cfg(test)]
mod tests {
    use crate::setup_inmemory_context;
    use pillbox_domain::{ExecutionScope, ExecutionStatus, ReminderExecution, ID};

    #[tokio::test]
    async fn updates_status_of_existing_executions() {
        let ctx = setup_inmemory_context();
        let execution = ReminderExecution::new(ID::default(), ID::default(), 100);
        ctx.repos
            .reminder_executions
            .insert(&execution)
            .await
            .expect("To insert execution");

        let updated = ctx
            .repos
            .reminder_executions
            .update_status(&execution.id, ExecutionStatus::Confirmed, Some(200))
            .await
            .expect("To update status");
        assert!(updated);
        let found = ctx
            .repos
            .reminder_executions
            .find(&execution.id)
            .await
            .expect("To find execution");
        assert_eq!(found.status, ExecutionStatus::Confirmed);
        assert_eq!(found.confirmed_at, Some(200));
        assert_eq!(found.sent_at, 100);

        let updated = ctx
            .repos
            .reminder_executions
            .update_status(&ID::default(), ExecutionStatus::Skipped, None)
            .await
            .expect("To update status");
        assert!(!updated);
    }

    #[tokio::test]
    async fn finds_latest_executions_first() {
        let ctx = setup_inmemory_context();
        let user_id = ID::default();
        let reminder_id = ID::default();
        let other_reminder_id = ID::default();
        for sent_at in vec![300, 100, 200] {
            let execution = ReminderExecution::new(reminder_id.clone(), user_id.clone(), sent_at);
            ctx.repos
                .reminder_executions
                .insert(&execution)
                .await
                .expect("To insert execution");
        }
        let execution = ReminderExecution::new(other_reminder_id.clone(), user_id.clone(), 400);
        ctx.repos
            .reminder_executions
            .insert(&execution)
            .await
            .expect("To insert execution");

        let by_reminder = ctx
            .repos
            .reminder_executions
            .find_by_reminder(&reminder_id, 2)
            .await
            .expect("To find executions");
        let sent_at = by_reminder.iter().map(|e| e.sent_at).collect::<Vec<_>>();
        assert_eq!(sent_at, vec![300, 200]);

        let by_user = ctx
            .repos
            .reminder_executions
            .find_by_user(&user_id, 50)
            .await
            .expect("To find executions");
        let sent_at = by_user.iter().map(|e| e.sent_at).collect::<Vec<_>>();
        assert_eq!(sent_at, vec![400, 300, 200, 100]);
    }

    #[tokio::test]
    async fn aggregates_statistics_within_timespan() {
        let ctx = setup_inmemory_context();
        let user_id = ID::default();
        let reminder_id = ID::default();
        let statuses = vec![
            (100, ExecutionStatus::Confirmed),
            (200, ExecutionStatus::Skipped),
            (300, ExecutionStatus::Sent),
            (400, ExecutionStatus::Sent),
            (500, ExecutionStatus::Confirmed),
        ];
        for (sent_at, status) in statuses {
            let execution = ReminderExecution::new(reminder_id.clone(), user_id.clone(), sent_at);
            ctx.repos
                .reminder_executions
                .insert(&execution)
                .await
                .expect("To insert execution");
            ctx.repos
                .reminder_executions
                .update_status(&execution.id, status, None)
                .await
                .expect("To update status");
        }

        let stats = ctx
            .repos
            .reminder_executions
            .get_statistics(&ExecutionScope::User(user_id.clone()), 100, 400)
            .await
            .expect("To get statistics");
        assert_eq!(stats.total_sent, 2);
        assert_eq!(stats.total_confirmed, 1);
        assert_eq!(stats.total_skipped, 1);
        assert!((stats.confirmation_rate - 50.0).abs() < f64::EPSILON);

        let stats = ctx
            .repos
            .reminder_executions
            .get_statistics(&ExecutionScope::Reminder(ID::default()), 0, 1000)
            .await
            .expect("To get statistics");
        assert_eq!(stats.total_sent, 0);
        assert_eq!(stats.confirmation_rate, 0.0);
    }
}
