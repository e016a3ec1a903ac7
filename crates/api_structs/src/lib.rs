mod execution;
mod reminder;
mod status;
mod user;

pub mod dtos {
    pub use crate::execution::dtos::*;
    pub use crate::reminder::dtos::*;
    pub use crate::user::dtos::*;
}

pub use crate::execution::api::*;
pub use crate::reminder::api::*;
pub use crate::status::api::*;
pub use crate::user::api::*;
