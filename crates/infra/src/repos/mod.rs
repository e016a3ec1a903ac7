mod reminder;
mod reminder_execution;
mod shared;
mod user;

use reminder::{InMemoryReminderRepo, PostgresReminderRepo};
use reminder_execution::{InMemoryReminderExecutionRepo, PostgresReminderExecutionRepo};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tracing::info;
use user::{InMemoryUserRepo, PostgresUserRepo};

pub use reminder::IReminderRepo;
pub use reminder_execution::IReminderExecutionRepo;
pub use user::IUserRepo;

#[derive(Clone)]
pub struct Repos {
    pub users: Arc<dyn IUserRepo>,
    pub reminders: Arc<dyn IReminderRepo>,
    pub reminder_executions: Arc<dyn IReminderExecutionRepo>,
}

impl Repos {
    pub async fn create_postgres(connection_string: &str) -> anyhow::Result<Self> {
        info!("DB CHECKING CONNECTION ...");
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(connection_string)
            .await?;
        info!("DB CHECKING CONNECTION ... [done]");

        info!("DB EXECUTING MIGRATION ...");
        sqlx::migrate!().run(&pool).await?;
        info!("DB EXECUTING MIGRATION ... [done]");

        Ok(Self {
            users: Arc::new(PostgresUserRepo::new(pool.clone())),
            reminders: Arc::new(PostgresReminderRepo::new(pool.clone())),
            reminder_executions: Arc::new(PostgresReminderExecutionRepo::new(pool)),
        })
    }

    pub fn create_inmemory() -> Self {
        let users = Arc::new(InMemoryUserRepo::new());
        Self {
            reminders: Arc::new(InMemoryReminderRepo::new(users.clone())),
            users,
            reminder_executions: Arc::new(InMemoryReminderExecutionRepo::new()),
        }
    }
}
