use crate::dtos::ReminderExecutionDTO;
use pillbox_domain::{ExecutionStatistics, ReminderExecution, ID};
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderExecutionsResponse {
    pub executions: Vec<ReminderExecutionDTO>,
}

impl ReminderExecutionsResponse {
    pub fn new(executions: Vec<ReminderExecution>) -> Self {
        Self {
            executions: executions
                .into_iter()
                .map(ReminderExecutionDTO::new)
                .collect(),
        }
    }
}

#[derive(Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionStatisticsResponse {
    pub statistics: ExecutionStatistics,
}

#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionHistoryQueryParams {
    #[serde(default)]
    pub limit: Option<i64>,
}

#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionStatisticsQueryParams {
    pub from: i64,
    pub to: i64,
}

pub mod respond_to_execution {
    use super::*;

    #[derive(Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        /// As attached to the actions of a delivered `Reminder`
        pub callback_data: String,
    }

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub execution: ReminderExecutionDTO,
    }

    impl APIResponse {
        pub fn new(execution: ReminderExecution) -> Self {
            Self {
                execution: ReminderExecutionDTO::new(execution),
            }
        }
    }
}

pub mod get_reminder_executions {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub reminder_id: ID,
    }

    pub type QueryParams = ExecutionHistoryQueryParams;

    pub type APIResponse = ReminderExecutionsResponse;
}

pub mod get_user_executions {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub user_id: ID,
    }

    pub type QueryParams = ExecutionHistoryQueryParams;

    pub type APIResponse = ReminderExecutionsResponse;
}

pub mod get_reminder_execution_statistics {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub reminder_id: ID,
    }

    pub type QueryParams = ExecutionStatisticsQueryParams;

    pub type APIResponse = ExecutionStatisticsResponse;
}

pub mod get_user_execution_statistics {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub user_id: ID,
    }

    pub type QueryParams = ExecutionStatisticsQueryParams;

    pub type APIResponse = ExecutionStatisticsResponse;
}
