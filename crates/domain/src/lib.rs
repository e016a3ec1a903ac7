mod execution;
mod reminder;
mod shared;
mod user;

pub use execution::{
    ExecutionCallback, ExecutionResponse, ExecutionScope, ExecutionStatistics, ExecutionStatus,
    InvalidCallbackDataError, InvalidExecutionStatusError, ReminderExecution,
};
pub use reminder::Reminder;
pub use shared::entity::{Entity, InvalidIDError, ID};
pub use shared::recurrence::{InvalidTimeOfDayError, Recurrence, TimeOfDay};
pub use user::User;
