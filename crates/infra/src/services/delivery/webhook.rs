use super::IDeliveryGateway;
use pillbox_domain::{ExecutionCallback, ExecutionResponse, Reminder, ID};
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;
use tracing::warn;

pub const WEBHOOK_KEY_HEADER: &str = "pillbox-webhook-key";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ReminderPayload<'a> {
    id: &'a ID,
    title: &'a str,
    comment: Option<&'a str>,
    image_url: Option<&'a str>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ActionPayload {
    action: &'static str,
    callback_data: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DeliveryPayload<'a> {
    user_id: &'a ID,
    reminder: ReminderPayload<'a>,
    execution_id: &'a ID,
    actions: Vec<ActionPayload>,
}

impl<'a> DeliveryPayload<'a> {
    fn new(reminder: &'a Reminder, execution_id: &'a ID) -> Self {
        let actions = vec![ExecutionResponse::Confirmed, ExecutionResponse::Skipped]
            .into_iter()
            .map(|response| ActionPayload {
                action: response.action(),
                callback_data: ExecutionCallback::new(
                    response,
                    reminder.id.clone(),
                    execution_id.clone(),
                )
                .to_string(),
            })
            .collect();

        Self {
            user_id: &reminder.user_id,
            reminder: ReminderPayload {
                id: &reminder.id,
                title: &reminder.title,
                comment: reminder.comment.as_deref(),
                image_url: reminder.image_url.as_deref(),
            },
            execution_id,
            actions,
        }
    }
}

/// Posts delivered `Reminder`s to the messaging client's webhook
pub struct WebhookDeliveryGateway {
    client: Client,
    url: Option<String>,
    key: String,
}

impl WebhookDeliveryGateway {
    pub fn new(url: Option<String>, key: String, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|e| {
                warn!("Unable to configure the delivery client: {:?}", e);
                Client::new()
            });
        Self { client, url, key }
    }
}

#[async_trait::async_trait]
impl IDeliveryGateway for WebhookDeliveryGateway {
    async fn send(&self, reminder: &Reminder, execution_id: &ID) -> anyhow::Result<()> {
        let url = match &self.url {
            Some(url) => url,
            None => anyhow::bail!("No delivery webhook is configured"),
        };

        self.client
            .post(url)
            .header(WEBHOOK_KEY_HEADER, &self.key)
            .json(&DeliveryPayload::new(reminder, execution_id))
            .send()
            .await?
            .error_for_status()?;

        Ok(())
    }
}
