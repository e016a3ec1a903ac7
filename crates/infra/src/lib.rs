mod config;
mod repos;
mod services;
mod system;

pub use config::Config;
pub use repos::{IReminderExecutionRepo, IReminderRepo, IUserRepo, Repos};
pub use services::*;
use std::sync::Arc;
pub use system::{FixedSys, ISys, RealSys};
use tracing::info;

#[derive(Clone)]
pub struct PillboxContext {
    pub repos: Repos,
    pub config: Config,
    pub sys: Arc<dyn ISys>,
    pub gateway: Arc<dyn IDeliveryGateway>,
}

struct ContextParams {
    pub postgres_connection_string: Option<String>,
}

impl PillboxContext {
    async fn create(params: ContextParams) -> anyhow::Result<Self> {
        let repos = match params.postgres_connection_string {
            Some(connection_string) => Repos::create_postgres(&connection_string).await?,
            None => {
                info!("No DATABASE_URL was given, storing everything in memory");
                Repos::create_inmemory()
            }
        };
        Ok(Self::with_repos(repos, Config::new()))
    }

    fn with_repos(repos: Repos, config: Config) -> Self {
        let gateway = WebhookDeliveryGateway::new(
            config.delivery_webhook_url.clone(),
            config.delivery_webhook_key.clone(),
            config.delivery_timeout,
        );
        Self {
            repos,
            config,
            sys: Arc::new(RealSys {}),
            gateway: Arc::new(gateway),
        }
    }
}

/// Will setup the infrastructure context given the environment
pub async fn setup_context() -> anyhow::Result<PillboxContext> {
    PillboxContext::create(ContextParams {
        postgres_connection_string: get_psql_connection_string(),
    })
    .await
}

/// Context backed by the inmemory repositories, used when testing
pub fn setup_inmemory_context() -> PillboxContext {
    PillboxContext::with_repos(Repos::create_inmemory(), Config::new())
}

fn get_psql_connection_string() -> Option<String> {
    const PSQL_CONNECTION_STRING: &str = "DATABASE_URL";

    std::env::var(PSQL_CONNECTION_STRING)
        .ok()
        .filter(|connection_string| !connection_string.trim().is_empty())
}
