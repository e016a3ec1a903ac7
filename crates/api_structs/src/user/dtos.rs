use pillbox_domain::{User, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct UserDTO {
    pub id: ID,
    pub is_active: bool,
    pub created: i64,
    pub updated: i64,
}

impl UserDTO {
    pub fn new(user: User) -> Self {
        Self {
            id: user.id,
            is_active: user.is_active,
            created: user.created,
            updated: user.updated,
        }
    }
}
