use crate::{
    error::PillboxError,
    shared::usecase::{execute, UseCase},
};
use actix_web::{web, HttpResponse};
use pillbox_api_structs::{
    get_reminder_execution_statistics, get_user_execution_statistics,
    ExecutionStatisticsResponse,
};
use pillbox_domain::{ExecutionScope, ExecutionStatistics};
use pillbox_infra::PillboxContext;

pub async fn get_reminder_execution_statistics_controller(
    path_params: web::Path<get_reminder_execution_statistics::PathParams>,
    query_params: web::Query<get_reminder_execution_statistics::QueryParams>,
    ctx: web::Data<PillboxContext>,
) -> Result<HttpResponse, PillboxError> {
    let usecase = GetExecutionStatisticsUseCase {
        scope: ExecutionScope::Reminder(path_params.reminder_id.clone()),
        from: query_params.from,
        to: query_params.to,
    };
    respond(usecase, &ctx).await
}

pub async fn get_user_execution_statistics_controller(
    path_params: web::Path<get_user_execution_statistics::PathParams>,
    query_params: web::Query<get_user_execution_statistics::QueryParams>,
    ctx: web::Data<PillboxContext>,
) -> Result<HttpResponse, PillboxError> {
    let usecase = GetExecutionStatisticsUseCase {
        scope: ExecutionScope::User(path_params.user_id.clone()),
        from: query_params.from,
        to: query_params.to,
    };
    respond(usecase, &ctx).await
}

async fn respond(
    usecase: GetExecutionStatisticsUseCase,
    ctx: &PillboxContext,
) -> Result<HttpResponse, PillboxError> {
    execute(usecase, ctx)
        .await
        .map(|statistics| HttpResponse::Ok().json(ExecutionStatisticsResponse { statistics }))
        .map_err(PillboxError::from)
}

/// Aggregates the executions sent between `from` and `to`, both inclusive
#[derive(Debug)]
pub struct GetExecutionStatisticsUseCase {
    pub scope: ExecutionScope,
    pub from: i64,
    pub to: i64,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    InvalidTimespan(i64, i64),
    StorageError,
}

impl From<UseCaseError> for PillboxError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::InvalidTimespan(from, to) => Self::BadClientData(format!(
                "The timespan start: {} must not be after its end: {}",
                from, to
            )),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetExecutionStatisticsUseCase {
    type Response = ExecutionStatistics;
    type Error = UseCaseError;

    const NAME: &'static str = "GetExecutionStatistics";

    async fn execute(&mut self, ctx: &PillboxContext) -> Result<Self::Response, Self::Error> {
        if self.from > self.to {
            return Err(UseCaseError::InvalidTimespan(self.from, self.to));
        }

        ctx.repos
            .reminder_executions
            .get_statistics(&self.scope, self.from, self.to)
            .await
            .map_err(|_| UseCaseError::StorageError)
    }
}
