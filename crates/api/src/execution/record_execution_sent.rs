use crate::shared::usecase::UseCase;
use pillbox_domain::{ReminderExecution, ID};
use pillbox_infra::PillboxContext;

/// Records that a `Reminder` is about to be delivered. Every call creates
/// a new `ReminderExecution`, also when delivering the same `Reminder` again.
#[derive(Debug)]
pub struct RecordExecutionSentUseCase {
    pub reminder_id: ID,
    pub user_id: ID,
}

#[derive(Debug)]
pub enum UseCaseError {
    StorageError,
}

#[async_trait::async_trait(?Send)]
impl UseCase for RecordExecutionSentUseCase {
    type Response = ReminderExecution;
    type Error = UseCaseError;

    const NAME: &'static str = "RecordExecutionSent";

    async fn execute(&mut self, ctx: &PillboxContext) -> Result<Self::Response, Self::Error> {
        let execution = ReminderExecution::new(
            self.reminder_id.clone(),
            self.user_id.clone(),
            ctx.sys.get_timestamp_millis(),
        );

        ctx.repos
            .reminder_executions
            .insert(&execution)
            .await
            .map(|_| execution)
            .map_err(|_| UseCaseError::StorageError)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use pillbox_domain::ExecutionStatus;
    use pillbox_infra::{setup_inmemory_context, FixedSys};
    use std::sync::Arc;

    #[actix_web::main]
    #[test]
    async fn records_distinct_executions() {
        let mut ctx = setup_inmemory_context();
        ctx.sys = Arc::new(FixedSys::new(500));
        let reminder_id = ID::default();
        let user_id = ID::default();

        let mut executions = Vec::new();
        for _ in 0..2 {
            let mut usecase = RecordExecutionSentUseCase {
                reminder_id: reminder_id.clone(),
                user_id: user_id.clone(),
            };
            executions.push(usecase.execute(&ctx).await.unwrap());
        }

        assert_ne!(executions[0].id, executions[1].id);
        for execution in executions {
            assert_eq!(execution.status, ExecutionStatus::Sent);
            assert_eq!(execution.sent_at, 500);
            assert_eq!(execution.confirmed_at, None);
            assert!(ctx
                .repos
                .reminder_executions
                .find(&execution.id)
                .await
                .is_some());
        }
    }
}
