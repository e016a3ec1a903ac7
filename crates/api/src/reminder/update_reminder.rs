use crate::error::PillboxError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use pillbox_api_structs::update_reminder::*;
use pillbox_domain::{Recurrence, Reminder, ID};
use pillbox_infra::PillboxContext;

pub async fn update_reminder_controller(
    body: web::Json<RequestBody>,
    path: web::Path<PathParams>,
    ctx: web::Data<PillboxContext>,
) -> Result<HttpResponse, PillboxError> {
    let body = body.into_inner();
    let usecase = UpdateReminderUseCase {
        reminder_id: path.reminder_id.clone(),
        title: body.title,
        comment: body.comment,
        image_url: body.image_url,
        recurrence: body.recurrence,
        is_active: body.is_active,
    };

    execute(usecase, &ctx)
        .await
        .map(|reminder| HttpResponse::Ok().json(APIResponse::new(reminder)))
        .map_err(PillboxError::from)
}

/// Only the given fields are changed. A changed recurrence reschedules
/// the `Reminder` from the current time.
#[derive(Debug, Default)]
pub struct UpdateReminderUseCase {
    pub reminder_id: ID,
    pub title: Option<String>,
    pub comment: Option<String>,
    pub image_url: Option<String>,
    pub recurrence: Option<Recurrence>,
    pub is_active: Option<bool>,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    NotFound(ID),
    EmptyTitle,
    InvalidRecurrence(Recurrence),
    StorageError,
}

impl From<UseCaseError> for PillboxError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(id) => {
                Self::NotFound(format!("A reminder with id: {}, was not found.", id))
            }
            UseCaseError::EmptyTitle => Self::BadClientData("The title must not be empty".into()),
            UseCaseError::InvalidRecurrence(recurrence) => Self::BadClientData(format!(
                "Invalid recurrence: {:?}. A custom interval must be a positive number of hours",
                recurrence
            )),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for UpdateReminderUseCase {
    type Response = Reminder;
    type Error = UseCaseError;

    const NAME: &'static str = "UpdateReminder";

    async fn execute(&mut self, ctx: &PillboxContext) -> Result<Self::Response, Self::Error> {
        let mut reminder = match ctx.repos.reminders.find(&self.reminder_id).await {
            Some(reminder) => reminder,
            None => return Err(UseCaseError::NotFound(self.reminder_id.clone())),
        };
        let now = ctx.sys.get_timestamp_millis();

        if let Some(title) = &self.title {
            let title = title.trim();
            if title.is_empty() {
                return Err(UseCaseError::EmptyTitle);
            }
            reminder.title = title.to_string();
        }
        if let Some(recurrence) = self.recurrence.take() {
            if !recurrence.is_valid() {
                return Err(UseCaseError::InvalidRecurrence(recurrence));
            }
            if recurrence != reminder.recurrence {
                reminder.set_recurrence(recurrence, now);
            }
        }
        if let Some(comment) = self.comment.take() {
            reminder.comment = Some(comment);
        }
        if let Some(image_url) = self.image_url.take() {
            reminder.image_url = Some(image_url);
        }
        if let Some(is_active) = self.is_active {
            reminder.is_active = is_active;
        }
        reminder.updated = now;

        ctx.repos
            .reminders
            .save(&reminder)
            .await
            .map(|_| reminder)
            .map_err(|_| UseCaseError::StorageError)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use pillbox_domain::User;
    use pillbox_infra::{setup_inmemory_context, FixedSys};
    use std::sync::Arc;

    const NOW: i64 = 1613862000000;
    const HOUR: i64 = 1000 * 60 * 60;

    async fn setup() -> (PillboxContext, Arc<FixedSys>, Reminder) {
        let mut ctx = setup_inmemory_context();
        let sys = Arc::new(FixedSys::new(NOW));
        ctx.sys = sys.clone();
        let user = User::new(0);
        ctx.repos.users.insert(&user).await.unwrap();
        let reminder = Reminder::new(
            user.id.clone(),
            "Antibiotics".into(),
            Recurrence::Custom { interval_hours: 8 },
            NOW,
        );
        ctx.repos.reminders.insert(&reminder).await.unwrap();
        (ctx, sys, reminder)
    }

    #[actix_web::main]
    #[test]
    async fn changing_interval_reschedules() {
        let (ctx, sys, reminder) = setup().await;
        sys.advance_millis(HOUR);

        let mut usecase = UpdateReminderUseCase {
            reminder_id: reminder.id.clone(),
            recurrence: Some(Recurrence::Custom { interval_hours: 2 }),
            ..Default::default()
        };
        let updated = usecase.execute(&ctx).await.unwrap();
        assert_eq!(updated.next_send_at, Some(NOW + 3 * HOUR));
        assert_eq!(updated.title, reminder.title);
        assert_eq!(
            ctx.repos.reminders.find(&reminder.id).await.unwrap().next_send_at,
            Some(NOW + 3 * HOUR)
        );
    }

    #[actix_web::main]
    #[test]
    async fn unchanged_recurrence_keeps_schedule() {
        let (ctx, sys, reminder) = setup().await;
        sys.advance_millis(HOUR);

        let mut usecase = UpdateReminderUseCase {
            reminder_id: reminder.id.clone(),
            title: Some("Amoxicillin".into()),
            recurrence: Some(reminder.recurrence.clone()),
            is_active: Some(false),
            ..Default::default()
        };
        let updated = usecase.execute(&ctx).await.unwrap();
        assert_eq!(updated.next_send_at, reminder.next_send_at);
        assert_eq!(updated.title, "Amoxicillin");
        assert!(!updated.is_active);
        assert_eq!(updated.updated, NOW + HOUR);
    }

    #[actix_web::main]
    #[test]
    async fn rejects_invalid_updates() {
        let (ctx, _, reminder) = setup().await;

        let mut usecase = UpdateReminderUseCase {
            reminder_id: reminder.id.clone(),
            recurrence: Some(Recurrence::Custom { interval_hours: 0 }),
            ..Default::default()
        };
        assert_eq!(
            usecase.execute(&ctx).await,
            Err(UseCaseError::InvalidRecurrence(Recurrence::Custom {
                interval_hours: 0
            }))
        );

        let mut usecase = UpdateReminderUseCase {
            reminder_id: reminder.id.clone(),
            title: Some("".into()),
            ..Default::default()
        };
        assert_eq!(usecase.execute(&ctx).await, Err(UseCaseError::EmptyTitle));

        let mut usecase = UpdateReminderUseCase {
            reminder_id: ID::default(),
            ..Default::default()
        };
        assert!(matches!(
            usecase.execute(&ctx).await,
            Err(UseCaseError::NotFound(_))
        ));

        assert_eq!(ctx.repos.reminders.find(&reminder.id).await, Some(reminder));
    }
}
