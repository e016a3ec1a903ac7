use pillbox_api::Application;
use pillbox_infra::{setup_inmemory_context, FixedSys, InMemoryDeliveryGateway};
use reqwest::{Client, Response};
use serde_json::Value;
use std::{sync::Arc, time::Duration};

pub const NOW: i64 = 1613862000000;
pub const HOUR: i64 = 1000 * 60 * 60;

pub struct TestApp {
    pub address: String,
    pub client: Client,
    pub sys: Arc<FixedSys>,
    pub gateway: Arc<InMemoryDeliveryGateway>,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("{}/api/v1{}", self.address, path)
    }

    pub async fn get(&self, path: &str) -> Response {
        self.client
            .get(&self.url(path))
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn post(&self, path: &str, body: Value) -> Response {
        self.client
            .post(&self.url(path))
            .json(&body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn put(&self, path: &str, body: Value) -> Response {
        self.client
            .put(&self.url(path))
            .json(&body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn delete(&self, path: &str) -> Response {
        self.client
            .delete(&self.url(path))
            .send()
            .await
            .expect("Failed to execute request.")
    }

    /// Gives the send reminders job time for a few ticks
    pub async fn wait_for_ticks(&self) {
        actix_web::rt::time::sleep(Duration::from_millis(150)).await;
    }
}

// Launch the application as a background task
pub async fn spawn_app() -> TestApp {
    let mut ctx = setup_inmemory_context();
    ctx.config.port = 0; // Random port
    ctx.config.reminders_tick_interval = Duration::from_millis(20);

    let sys = Arc::new(FixedSys::new(NOW));
    let gateway = Arc::new(InMemoryDeliveryGateway::new());
    ctx.sys = sys.clone();
    ctx.gateway = gateway.clone();

    let application = Application::new(ctx)
        .await
        .expect("Failed to build application.");

    let address = format!("http://localhost:{}", application.port());
    let _ = actix_web::rt::spawn(async move {
        application
            .start()
            .await
            .expect("Expected application to start");
    });

    TestApp {
        address,
        client: Client::new(),
        sys,
        gateway,
    }
}
