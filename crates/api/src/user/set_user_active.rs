use crate::error::PillboxError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use pillbox_api_structs::set_user_active::*;
use pillbox_domain::{User, ID};
use pillbox_infra::PillboxContext;

pub async fn set_user_active_controller(
    body: web::Json<RequestBody>,
    path: web::Path<PathParams>,
    ctx: web::Data<PillboxContext>,
) -> Result<HttpResponse, PillboxError> {
    let usecase = SetUserActiveUseCase {
        user_id: path.user_id.clone(),
        is_active: body.is_active,
    };

    execute(usecase, &ctx)
        .await
        .map(|user| HttpResponse::Ok().json(APIResponse::new(user)))
        .map_err(PillboxError::from)
}

/// Deactivated `User`s keep their `Reminder`s but receive no deliveries
#[derive(Debug)]
pub struct SetUserActiveUseCase {
    pub user_id: ID,
    pub is_active: bool,
}

#[derive(Debug)]
pub enum UseCaseError {
    StorageError,
    UserNotFound(ID),
}

impl From<UseCaseError> for PillboxError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::StorageError => Self::InternalError,
            UseCaseError::UserNotFound(id) => {
                Self::NotFound(format!("A user with id: {}, was not found.", id))
            }
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for SetUserActiveUseCase {
    type Response = User;
    type Error = UseCaseError;

    const NAME: &'static str = "SetUserActive";

    async fn execute(&mut self, ctx: &PillboxContext) -> Result<Self::Response, Self::Error> {
        let mut user = match ctx.repos.users.find(&self.user_id).await {
            Some(user) => user,
            None => return Err(UseCaseError::UserNotFound(self.user_id.clone())),
        };

        user.is_active = self.is_active;
        user.updated = ctx.sys.get_timestamp_millis();

        ctx.repos
            .users
            .save(&user)
            .await
            .map(|_| user)
            .map_err(|_| UseCaseError::StorageError)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use pillbox_infra::setup_inmemory_context;

    #[actix_web::main]
    #[test]
    async fn deactivates_and_activates_user() {
        let ctx = setup_inmemory_context();
        let user = User::new(0);
        ctx.repos.users.insert(&user).await.unwrap();

        let mut usecase = SetUserActiveUseCase {
            user_id: user.id.clone(),
            is_active: false,
        };
        let res = usecase.execute(&ctx).await.unwrap();
        assert!(!res.is_active);
        assert!(!ctx.repos.users.find(&user.id).await.unwrap().is_active);

        let mut usecase = SetUserActiveUseCase {
            user_id: user.id.clone(),
            is_active: true,
        };
        assert!(usecase.execute(&ctx).await.unwrap().is_active);
    }

    #[actix_web::main]
    #[test]
    async fn rejects_unknown_user() {
        let ctx = setup_inmemory_context();
        let mut usecase = SetUserActiveUseCase {
            user_id: ID::default(),
            is_active: false,
        };
        assert!(matches!(
            usecase.execute(&ctx).await,
            Err(UseCaseError::UserNotFound(_))
        ));
    }
}
