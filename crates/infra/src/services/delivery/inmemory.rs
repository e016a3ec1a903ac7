use super::IDeliveryGateway;
use pillbox_domain::{Reminder, ID};
use std::sync::Mutex;

#[derive(Debug, Clone, PartialEq)]
pub struct DeliveredReminder {
    pub reminder_id: ID,
    pub user_id: ID,
    pub execution_id: ID,
}

/// Records deliveries instead of sending them, used when testing
pub struct InMemoryDeliveryGateway {
    delivered: Mutex<Vec<DeliveredReminder>>,
    failing_reminders: Mutex<Vec<ID>>,
}

impl InMemoryDeliveryGateway {
    pub fn new() -> Self {
        Self {
            delivered: Mutex::new(vec![]),
            failing_reminders: Mutex::new(vec![]),
        }
    }

    /// Every delivery of the given `Reminder` fails from now on
    pub fn fail_for(&self, reminder_id: &ID) {
        self.failing_reminders
            .lock()
            .unwrap()
            .push(reminder_id.clone());
    }

    pub fn recover(&self) {
        self.failing_reminders.lock().unwrap().clear();
    }

    pub fn delivered(&self) -> Vec<DeliveredReminder> {
        self.delivered.lock().unwrap().clone()
    }
}

impl Default for InMemoryDeliveryGateway {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl IDeliveryGateway for InMemoryDeliveryGateway {
    async fn send(&self, reminder: &Reminder, execution_id: &ID) -> anyhow::Result<()> {
        if self.failing_reminders.lock().unwrap().contains(&reminder.id) {
            anyhow::bail!("Delivery of reminder: {} failed", reminder.id);
        }
        self.delivered.lock().unwrap().push(DeliveredReminder {
            reminder_id: reminder.id.clone(),
            user_id: reminder.user_id.clone(),
            execution_id: execution_id.clone(),
        });
        Ok(())
    }
}
