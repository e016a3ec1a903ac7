use crate::{
    error::PillboxError,
    shared::usecase::{execute, UseCase},
};
use actix_web::{web, HttpResponse};
use pillbox_api_structs::{get_reminder_executions, get_user_executions, ReminderExecutionsResponse};
use pillbox_domain::{ExecutionScope, ReminderExecution};
use pillbox_infra::PillboxContext;

pub const DEFAULT_HISTORY_LIMIT: i64 = 50;
pub const MAX_HISTORY_LIMIT: i64 = 500;

pub async fn get_reminder_executions_controller(
    path_params: web::Path<get_reminder_executions::PathParams>,
    query_params: web::Query<get_reminder_executions::QueryParams>,
    ctx: web::Data<PillboxContext>,
) -> Result<HttpResponse, PillboxError> {
    let usecase = GetExecutionHistoryUseCase {
        scope: ExecutionScope::Reminder(path_params.reminder_id.clone()),
        limit: query_params.limit.unwrap_or(DEFAULT_HISTORY_LIMIT),
    };
    respond(usecase, &ctx).await
}

pub async fn get_user_executions_controller(
    path_params: web::Path<get_user_executions::PathParams>,
    query_params: web::Query<get_user_executions::QueryParams>,
    ctx: web::Data<PillboxContext>,
) -> Result<HttpResponse, PillboxError> {
    let usecase = GetExecutionHistoryUseCase {
        scope: ExecutionScope::User(path_params.user_id.clone()),
        limit: query_params.limit.unwrap_or(DEFAULT_HISTORY_LIMIT),
    };
    respond(usecase, &ctx).await
}

async fn respond(
    usecase: GetExecutionHistoryUseCase,
    ctx: &PillboxContext,
) -> Result<HttpResponse, PillboxError> {
    execute(usecase, ctx)
        .await
        .map(|executions| HttpResponse::Ok().json(ReminderExecutionsResponse::new(executions)))
        .map_err(PillboxError::from)
}

/// The latest executions first
#[derive(Debug)]
pub struct GetExecutionHistoryUseCase {
    pub scope: ExecutionScope,
    pub limit: i64,
}

impl GetExecutionHistoryUseCase {
    fn effective_limit(&self) -> i64 {
        if self.limit <= 0 {
            DEFAULT_HISTORY_LIMIT
        } else {
            self.limit.min(MAX_HISTORY_LIMIT)
        }
    }
}

#[derive(Debug)]
pub enum UseCaseError {
    StorageError,
}

impl From<UseCaseError> for PillboxError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetExecutionHistoryUseCase {
    type Response = Vec<ReminderExecution>;
    type Error = UseCaseError;

    const NAME: &'static str = "GetExecutionHistory";

    async fn execute(&mut self, ctx: &PillboxContext) -> Result<Self::Response, Self::Error> {
        let limit = self.effective_limit();
        let executions = match &self.scope {
            ExecutionScope::Reminder(reminder_id) => {
                ctx.repos
                    .reminder_executions
                    .find_by_reminder(reminder_id, limit)
                    .await
            }
            ExecutionScope::User(user_id) => {
                ctx.repos
                    .reminder_executions
                    .find_by_user(user_id, limit)
                    .await
            }
        };
        executions.map_err(|_| UseCaseError::StorageError)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use pillbox_domain::ID;
    use pillbox_infra::setup_inmemory_context;

    #[test]
    fn clamps_limit() {
        let limit = |limit| {
            GetExecutionHistoryUseCase {
                scope: ExecutionScope::User(ID::default()),
                limit,
            }
            .effective_limit()
        };
        assert_eq!(limit(0), DEFAULT_HISTORY_LIMIT);
        assert_eq!(limit(-1), DEFAULT_HISTORY_LIMIT);
        assert_eq!(limit(10), 10);
        assert_eq!(limit(10_000), MAX_HISTORY_LIMIT);
    }

    #[actix_web::main]
    #[test]
    async fn returns_latest_executions_of_reminder() {
        let ctx = setup_inmemory_context();
        let reminder_id = ID::default();
        let user_id = ID::default();
        for sent_at in 0..60 {
            let execution = ReminderExecution::new(reminder_id.clone(), user_id.clone(), sent_at);
            ctx.repos
                .reminder_executions
                .insert(&execution)
                .await
                .unwrap();
        }

        let mut usecase = GetExecutionHistoryUseCase {
            scope: ExecutionScope::Reminder(reminder_id.clone()),
            limit: 0,
        };
        let executions = usecase.execute(&ctx).await.unwrap();
        assert_eq!(executions.len(), 50);
        assert_eq!(executions[0].sent_at, 59);
        assert_eq!(executions[49].sent_at, 10);

        let mut usecase = GetExecutionHistoryUseCase {
            scope: ExecutionScope::User(user_id),
            limit: 3,
        };
        let sent_at = usecase
            .execute(&ctx)
            .await
            .unwrap()
            .into_iter()
            .map(|e| e.sent_at)
            .collect::<Vec<_>>();
        assert_eq!(sent_at, vec![59, 58, 57]);
    }
}
