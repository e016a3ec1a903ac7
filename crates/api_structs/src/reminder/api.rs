use crate::dtos::ReminderDTO;
use pillbox_domain::{Recurrence, Reminder, ID};
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderResponse {
    pub reminder: ReminderDTO,
}

impl ReminderResponse {
    pub fn new(reminder: Reminder) -> Self {
        Self {
            reminder: ReminderDTO::new(reminder),
        }
    }
}

pub mod create_reminder {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub user_id: ID,
    }

    #[derive(Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub title: String,
        #[serde(default)]
        pub comment: Option<String>,
        #[serde(default)]
        pub image_url: Option<String>,
        pub recurrence: Recurrence,
    }

    pub type APIResponse = ReminderResponse;
}

pub mod get_reminder {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub reminder_id: ID,
    }

    pub type APIResponse = ReminderResponse;
}

pub mod get_user_reminders {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub user_id: ID,
    }

    #[derive(Serialize, Deserialize, Debug)]
    #[serde(rename_all = "camelCase")]
    pub struct QueryParams {
        #[serde(default)]
        pub active_only: Option<bool>,
    }

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub reminders: Vec<ReminderDTO>,
    }

    impl APIResponse {
        pub fn new(reminders: Vec<Reminder>) -> Self {
            Self {
                reminders: reminders.into_iter().map(ReminderDTO::new).collect(),
            }
        }
    }
}

pub mod update_reminder {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub reminder_id: ID,
    }

    /// Only the given fields are changed
    #[derive(Serialize, Deserialize, Default)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        #[serde(default)]
        pub title: Option<String>,
        #[serde(default)]
        pub comment: Option<String>,
        #[serde(default)]
        pub image_url: Option<String>,
        #[serde(default)]
        pub recurrence: Option<Recurrence>,
        #[serde(default)]
        pub is_active: Option<bool>,
    }

    pub type APIResponse = ReminderResponse;
}

pub mod delete_reminder {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub reminder_id: ID,
    }

    pub type APIResponse = ReminderResponse;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_reminder_requests() {
        let body: create_reminder::RequestBody = serde_json::from_str(
            r#"{"title":"Blood pressure","recurrence":{"kind":"specific","timeOfDay":"09:00"}}"#,
        )
        .expect("To deserialize body");
        assert_eq!(body.title, "Blood pressure");
        assert!(body.comment.is_none());
        assert_eq!(body.recurrence.kind(), "specific");

        let invalid = serde_json::from_str::<create_reminder::RequestBody>(
            r#"{"title":"Blood pressure","recurrence":{"kind":"specific","timeOfDay":"9am"}}"#,
        );
        assert!(invalid.is_err());

        let body: update_reminder::RequestBody =
            serde_json::from_str(r#"{"isActive":false}"#).expect("To deserialize body");
        assert_eq!(body.is_active, Some(false));
        assert!(body.recurrence.is_none());
        assert!(body.title.is_none());
    }
}
