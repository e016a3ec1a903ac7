mod inmemory;
mod webhook;

pub use inmemory::{DeliveredReminder, InMemoryDeliveryGateway};
use pillbox_domain::{Reminder, ID};
pub use webhook::WebhookDeliveryGateway;

/// The messaging client that presents a `Reminder` to its `User`
/// together with the confirm and skip actions for the given execution.
#[async_trait::async_trait]
pub trait IDeliveryGateway: Send + Sync {
    async fn send(&self, reminder: &Reminder, execution_id: &ID) -> anyhow::Result<()>;
}
