use crate::shared::entity::{Entity, ID};
use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionStatus {
    Sent,
    Confirmed,
    Skipped,
}

impl ExecutionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sent => "sent",
            Self::Confirmed => "confirmed",
            Self::Skipped => "skipped",
        }
    }
}

impl Display for ExecutionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Error, Debug, PartialEq)]
#[error("Unknown execution status: {0}")]
pub struct InvalidExecutionStatusError(String);

impl FromStr for ExecutionStatus {
    type Err = InvalidExecutionStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sent" => Ok(Self::Sent),
            "confirmed" => Ok(Self::Confirmed),
            "skipped" => Ok(Self::Skipped),
            _ => Err(InvalidExecutionStatusError(s.to_string())),
        }
    }
}

/// The answer a `User` can give to a delivered `Reminder`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionResponse {
    Confirmed,
    Skipped,
}

impl ExecutionResponse {
    pub fn status(&self) -> ExecutionStatus {
        match self {
            Self::Confirmed => ExecutionStatus::Confirmed,
            Self::Skipped => ExecutionStatus::Skipped,
        }
    }

    /// The action name used in callback data
    pub fn action(&self) -> &'static str {
        match self {
            Self::Confirmed => "confirm",
            Self::Skipped => "skip",
        }
    }
}

/// One concrete firing of a `Reminder`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderExecution {
    pub id: ID,
    pub reminder_id: ID,
    /// Denormalized owner of the `Reminder`
    pub user_id: ID,
    pub status: ExecutionStatus,
    pub sent_at: i64,
    /// Only set when the `User` confirmed the `Reminder`
    pub confirmed_at: Option<i64>,
    pub created: i64,
}

impl ReminderExecution {
    pub fn new(reminder_id: ID, user_id: ID, now_ts: i64) -> Self {
        Self {
            id: Default::default(),
            reminder_id,
            user_id,
            status: ExecutionStatus::Sent,
            sent_at: now_ts,
            confirmed_at: None,
            created: now_ts,
        }
    }

    /// Overwrites the status with the given response. A previous response
    /// is not protected, the latest answer from the `User` wins.
    pub fn respond(&mut self, response: ExecutionResponse, now_ts: i64) {
        self.status = response.status();
        self.confirmed_at = match response {
            ExecutionResponse::Confirmed => Some(now_ts),
            ExecutionResponse::Skipped => None,
        };
    }
}

impl Entity for ReminderExecution {
    fn id(&self) -> &ID {
        &self.id
    }
}

/// The data attached to the confirm and skip actions of a delivered
/// `Reminder`, formatted as `<action>:<reminder_id>:<execution_id>`.
#[derive(Debug, Clone, PartialEq)]
pub struct ExecutionCallback {
    pub response: ExecutionResponse,
    pub reminder_id: ID,
    pub execution_id: ID,
}

impl ExecutionCallback {
    pub fn new(response: ExecutionResponse, reminder_id: ID, execution_id: ID) -> Self {
        Self {
            response,
            reminder_id,
            execution_id,
        }
    }
}

impl Display for ExecutionCallback {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:{}:{}",
            self.response.action(),
            self.reminder_id,
            self.execution_id
        )
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum InvalidCallbackDataError {
    #[error("Unknown callback action: {0}")]
    UnknownAction(String),
    #[error("Malformed callback data: {0}")]
    Malformed(String),
}

impl FromStr for ExecutionCallback {
    type Err = InvalidCallbackDataError;

    fn from_str(data: &str) -> Result<Self, Self::Err> {
        let malformed = || InvalidCallbackDataError::Malformed(data.to_string());

        let mut parts = data.split(':');
        let response = match parts.next() {
            Some("confirm") => ExecutionResponse::Confirmed,
            Some("skip") => ExecutionResponse::Skipped,
            Some(action) => return Err(InvalidCallbackDataError::UnknownAction(action.into())),
            None => return Err(malformed()),
        };
        let reminder_id = parts
            .next()
            .and_then(|id| id.parse::<ID>().ok())
            .ok_or_else(malformed)?;
        let execution_id = parts
            .next()
            .and_then(|id| id.parse::<ID>().ok())
            .ok_or_else(malformed)?;
        if parts.next().is_some() {
            return Err(malformed());
        }

        Ok(Self::new(response, reminder_id, execution_id))
    }
}

/// Where execution statistics or history are aggregated over
#[derive(Debug, Clone, PartialEq)]
pub enum ExecutionScope {
    User(ID),
    Reminder(ID),
}

impl ExecutionScope {
    pub fn contains(&self, execution: &ReminderExecution) -> bool {
        match self {
            Self::User(user_id) => execution.user_id == *user_id,
            Self::Reminder(reminder_id) => execution.reminder_id == *reminder_id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionStatistics {
    /// Executions still awaiting a response
    pub total_sent: i64,
    pub total_confirmed: i64,
    pub total_skipped: i64,
    /// `total_confirmed` as a percentage of `total_sent`, 0 when nothing is awaiting a response
    pub confirmation_rate: f64,
}

impl ExecutionStatistics {
    pub fn new(total_sent: i64, total_confirmed: i64, total_skipped: i64) -> Self {
        let confirmation_rate = if total_sent > 0 {
            total_confirmed as f64 / total_sent as f64 * 100.0
        } else {
            0.0
        };
        Self {
            total_sent,
            total_confirmed,
            total_skipped,
            confirmation_rate,
        }
    }

    pub fn from_executions<'a, I>(executions: I) -> Self
    where
        I: IntoIterator<Item = &'a ReminderExecution>,
    {
        let mut sent = 0;
        let mut confirmed = 0;
        let mut skipped = 0;
        for execution in executions {
            match execution.status {
                ExecutionStatus::Sent => sent += 1,
                ExecutionStatus::Confirmed => confirmed += 1,
                ExecutionStatus::Skipped => skipped += 1,
            }
        }
        Self::new(sent, confirmed, skipped)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parses_and_formats_callback_data() {
        let reminder_id = ID::default();
        let execution_id = ID::default();
        let callback =
            ExecutionCallback::new(ExecutionResponse::Skipped, reminder_id.clone(), execution_id.clone());
        let data = callback.to_string();
        assert_eq!(data, format!("skip:{}:{}", reminder_id, execution_id));
        assert_eq!(data.parse::<ExecutionCallback>(), Ok(callback));

        let confirm = format!("confirm:{}:{}", reminder_id, execution_id)
            .parse::<ExecutionCallback>()
            .expect("To parse callback data");
        assert_eq!(confirm.response, ExecutionResponse::Confirmed);
        assert_eq!(confirm.execution_id, execution_id);
    }

    #[test]
    fn rejects_invalid_callback_data() {
        let id = ID::default();
        assert_eq!(
            format!("snooze:{}:{}", id, id).parse::<ExecutionCallback>(),
            Err(InvalidCallbackDataError::UnknownAction("snooze".into()))
        );
        let invalid = vec![
            "".to_string(),
            "confirm".to_string(),
            format!("confirm:{}", id),
            format!("confirm:{}:123", id),
            format!("confirm:{}:{}:{}", id, id, id),
        ];
        for data in invalid {
            assert!(data.parse::<ExecutionCallback>().is_err(), "{}", data);
        }
    }

    #[test]
    fn responding_overwrites_status() {
        let mut execution = ReminderExecution::new(ID::default(), ID::default(), 100);
        assert_eq!(execution.status, ExecutionStatus::Sent);
        assert_eq!(execution.sent_at, 100);

        execution.respond(ExecutionResponse::Confirmed, 200);
        assert_eq!(execution.status, ExecutionStatus::Confirmed);
        assert_eq!(execution.confirmed_at, Some(200));

        execution.respond(ExecutionResponse::Skipped, 300);
        assert_eq!(execution.status, ExecutionStatus::Skipped);
        assert_eq!(execution.confirmed_at, None);
        assert_eq!(execution.sent_at, 100);
    }

    #[test]
    fn computes_confirmation_rate() {
        let stats = ExecutionStatistics::new(10, 8, 2);
        assert!((stats.confirmation_rate - 80.0).abs() < f64::EPSILON);

        let stats = ExecutionStatistics::new(0, 0, 0);
        assert_eq!(stats.confirmation_rate, 0.0);

        let reminder_id = ID::default();
        let user_id = ID::default();
        let mut executions = Vec::new();
        for i in 0..20 {
            let mut e = ReminderExecution::new(reminder_id.clone(), user_id.clone(), i);
            if i < 8 {
                e.respond(ExecutionResponse::Confirmed, i);
            } else if i < 10 {
                e.respond(ExecutionResponse::Skipped, i);
            }
            executions.push(e);
        }
        let stats = ExecutionStatistics::from_executions(&executions);
        assert_eq!(stats.total_sent, 10);
        assert_eq!(stats.total_confirmed, 8);
        assert_eq!(stats.total_skipped, 2);
        assert!((stats.confirmation_rate - 80.0).abs() < f64::EPSILON);

        let answered = executions
            .iter()
            .filter(|e| e.status != ExecutionStatus::Sent)
            .collect::<Vec<_>>();
        let stats = ExecutionStatistics::from_executions(answered);
        assert_eq!(stats.total_sent, 0);
        assert_eq!(stats.total_confirmed, 8);
        assert_eq!(stats.confirmation_rate, 0.0);
    }

    #[test]
    fn status_round_trips_through_str() {
        for status in vec![
            ExecutionStatus::Sent,
            ExecutionStatus::Confirmed,
            ExecutionStatus::Skipped,
        ] {
            assert_eq!(status.as_str().parse::<ExecutionStatus>(), Ok(status));
        }
        assert!("done".parse::<ExecutionStatus>().is_err());
    }
}
