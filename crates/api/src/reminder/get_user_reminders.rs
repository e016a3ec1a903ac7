use crate::{
    error::PillboxError,
    shared::usecase::{execute, UseCase},
};
use actix_web::{web, HttpResponse};
use pillbox_api_structs::get_user_reminders::*;
use pillbox_domain::{Reminder, ID};
use pillbox_infra::PillboxContext;

pub async fn get_user_reminders_controller(
    path_params: web::Path<PathParams>,
    query_params: web::Query<QueryParams>,
    ctx: web::Data<PillboxContext>,
) -> Result<HttpResponse, PillboxError> {
    let usecase = GetUserRemindersUseCase {
        user_id: path_params.user_id.clone(),
        active_only: query_params.active_only.unwrap_or(false),
    };
    execute(usecase, &ctx)
        .await
        .map(|reminders| HttpResponse::Ok().json(APIResponse::new(reminders)))
        .map_err(PillboxError::from)
}

#[derive(Debug)]
pub struct GetUserRemindersUseCase {
    pub user_id: ID,
    pub active_only: bool,
}

#[derive(Debug)]
pub enum UseCaseError {
    UserNotFound(ID),
    StorageError,
}

impl From<UseCaseError> for PillboxError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::UserNotFound(id) => {
                Self::NotFound(format!("A user with id: {}, was not found.", id))
            }
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetUserRemindersUseCase {
    type Response = Vec<Reminder>;
    type Error = UseCaseError;

    const NAME: &'static str = "GetUserReminders";

    async fn execute(&mut self, ctx: &PillboxContext) -> Result<Self::Response, Self::Error> {
        if ctx.repos.users.find(&self.user_id).await.is_none() {
            return Err(UseCaseError::UserNotFound(self.user_id.clone()));
        }

        let reminders = if self.active_only {
            ctx.repos.reminders.find_active_by_user(&self.user_id).await
        } else {
            ctx.repos.reminders.find_by_user(&self.user_id).await
        };
        reminders.map_err(|_| UseCaseError::StorageError)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use pillbox_domain::{Recurrence, User};
    use pillbox_infra::setup_inmemory_context;

    #[actix_web::main]
    #[test]
    async fn filters_inactive_reminders() {
        let ctx = setup_inmemory_context();
        let user = User::new(0);
        ctx.repos.users.insert(&user).await.unwrap();
        let active = Reminder::new(user.id.clone(), "Zinc".into(), Recurrence::Daily, 0);
        let mut inactive = Reminder::new(user.id.clone(), "Iron".into(), Recurrence::Daily, 0);
        inactive.is_active = false;
        ctx.repos.reminders.insert(&active).await.unwrap();
        ctx.repos.reminders.insert(&inactive).await.unwrap();

        let mut usecase = GetUserRemindersUseCase {
            user_id: user.id.clone(),
            active_only: false,
        };
        assert_eq!(usecase.execute(&ctx).await.unwrap().len(), 2);

        let mut usecase = GetUserRemindersUseCase {
            user_id: user.id.clone(),
            active_only: true,
        };
        let reminders = usecase.execute(&ctx).await.unwrap();
        assert_eq!(reminders.len(), 1);
        assert_eq!(reminders[0].id, active.id);
    }
}
