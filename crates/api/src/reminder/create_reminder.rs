use crate::error::PillboxError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use pillbox_api_structs::create_reminder::*;
use pillbox_domain::{Recurrence, Reminder, ID};
use pillbox_infra::PillboxContext;

pub async fn create_reminder_controller(
    body: web::Json<RequestBody>,
    path: web::Path<PathParams>,
    ctx: web::Data<PillboxContext>,
) -> Result<HttpResponse, PillboxError> {
    let body = body.into_inner();
    let usecase = CreateReminderUseCase {
        user_id: path.user_id.clone(),
        title: body.title,
        comment: body.comment,
        image_url: body.image_url,
        recurrence: body.recurrence,
    };

    execute(usecase, &ctx)
        .await
        .map(|reminder| HttpResponse::Created().json(APIResponse::new(reminder)))
        .map_err(PillboxError::from)
}

#[derive(Debug)]
pub struct CreateReminderUseCase {
    pub user_id: ID,
    pub title: String,
    pub comment: Option<String>,
    pub image_url: Option<String>,
    pub recurrence: Recurrence,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    EmptyTitle,
    InvalidRecurrence(Recurrence),
    UserNotFound(ID),
    StorageError,
}

impl From<UseCaseError> for PillboxError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::EmptyTitle => Self::BadClientData("The title must not be empty".into()),
            UseCaseError::InvalidRecurrence(recurrence) => Self::BadClientData(format!(
                "Invalid recurrence: {:?}. A custom interval must be a positive number of hours",
                recurrence
            )),
            UseCaseError::UserNotFound(id) => {
                Self::NotFound(format!("A user with id: {}, was not found.", id))
            }
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for CreateReminderUseCase {
    type Response = Reminder;
    type Error = UseCaseError;

    const NAME: &'static str = "CreateReminder";

    async fn execute(&mut self, ctx: &PillboxContext) -> Result<Self::Response, Self::Error> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(UseCaseError::EmptyTitle);
        }
        if !self.recurrence.is_valid() {
            return Err(UseCaseError::InvalidRecurrence(self.recurrence.clone()));
        }
        if ctx.repos.users.find(&self.user_id).await.is_none() {
            return Err(UseCaseError::UserNotFound(self.user_id.clone()));
        }

        let mut reminder = Reminder::new(
            self.user_id.clone(),
            title.to_string(),
            self.recurrence.clone(),
            ctx.sys.get_timestamp_millis(),
        );
        reminder.comment = self.comment.take();
        reminder.image_url = self.image_url.take();

        ctx.repos
            .reminders
            .insert(&reminder)
            .await
            .map(|_| reminder)
            .map_err(|_| UseCaseError::StorageError)
    }
}
