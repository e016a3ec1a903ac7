use crate::error::PillboxError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use pillbox_api_structs::respond_to_execution::*;
use pillbox_domain::{ExecutionCallback, ExecutionResponse, ReminderExecution, ID};
use pillbox_infra::PillboxContext;
use tracing::warn;

pub async fn respond_to_execution_controller(
    body: web::Json<RequestBody>,
    ctx: web::Data<PillboxContext>,
) -> Result<HttpResponse, PillboxError> {
    let callback = body.callback_data.parse::<ExecutionCallback>().map_err(|e| {
        warn!("Received invalid callback data: {:?}", e);
        PillboxError::BadClientData(e.to_string())
    })?;

    // Only the execution id is needed, the reminder id is informational
    let usecase = RecordExecutionResponseUseCase {
        execution_id: callback.execution_id,
        response: callback.response,
    };

    execute(usecase, &ctx)
        .await
        .map(|execution| HttpResponse::Ok().json(APIResponse::new(execution)))
        .map_err(PillboxError::from)
}

/// Stores the answer of the `User` to a delivered `Reminder`.
/// The latest answer always wins, also over an earlier confirm or skip.
#[derive(Debug)]
pub struct RecordExecutionResponseUseCase {
    pub execution_id: ID,
    pub response: ExecutionResponse,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    NotFound(ID),
    StorageError,
}

impl From<UseCaseError> for PillboxError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(id) => {
                Self::NotFound(format!("An execution with id: {}, was not found.", id))
            }
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for RecordExecutionResponseUseCase {
    type Response = ReminderExecution;
    type Error = UseCaseError;

    const NAME: &'static str = "RecordExecutionResponse";

    async fn execute(&mut self, ctx: &PillboxContext) -> Result<Self::Response, Self::Error> {
        let mut execution = match ctx.repos.reminder_executions.find(&self.execution_id).await {
            Some(execution) => execution,
            None => return Err(UseCaseError::NotFound(self.execution_id.clone())),
        };
        execution.respond(self.response, ctx.sys.get_timestamp_millis());

        let updated = ctx
            .repos
            .reminder_executions
            .update_status(&execution.id, execution.status, execution.confirmed_at)
            .await
            .map_err(|_| UseCaseError::StorageError)?;
        if !updated {
            return Err(UseCaseError::NotFound(self.execution_id.clone()));
        }

        Ok(execution)
    }
}
