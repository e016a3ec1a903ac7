mod delivery;

pub use delivery::{
    DeliveredReminder, IDeliveryGateway, InMemoryDeliveryGateway, WebhookDeliveryGateway,
};
