use pillbox_utils::create_random_secret;
use std::{str::FromStr, time::Duration};
use tracing::{info, warn};

#[derive(Debug, Clone)]
pub struct Config {
    /// Port for the application to run on
    pub port: usize,
    /// How often the scheduler looks for due `Reminder`s
    pub reminders_tick_interval: Duration,
    /// Upper bound for a single delivery to the messaging client.
    /// A delivery that takes longer counts as failed and is retried
    /// on the next tick.
    pub delivery_timeout: Duration,
    /// Where delivered `Reminder`s are posted to. Without it every
    /// delivery fails and the `Reminder`s stay due.
    pub delivery_webhook_url: Option<String>,
    /// Sent along with every delivery so that the receiver can verify
    /// that the request came from this server
    pub delivery_webhook_key: String,
}

impl Config {
    pub fn new() -> Self {
        let delivery_webhook_key = match std::env::var("DELIVERY_WEBHOOK_KEY") {
            Ok(key) => key,
            Err(_) => {
                info!("Did not find DELIVERY_WEBHOOK_KEY environment variable. Going to create one.");
                let key = create_random_secret(16);
                info!("Key for signing deliveries was generated and set to: {}", key);
                key
            }
        };
        let delivery_webhook_url = match std::env::var("DELIVERY_WEBHOOK_URL") {
            Ok(url) if !url.trim().is_empty() => Some(url),
            _ => {
                warn!("Did not find DELIVERY_WEBHOOK_URL environment variable. Reminders will not be delivered.");
                None
            }
        };
        let port = parse_env_or("PORT", 5000_usize, |_| true);
        let tick_secs = parse_env_or("REMINDERS_TICK_INTERVAL_SECS", 60_u64, |secs| *secs > 0);
        let timeout_secs = parse_env_or("DELIVERY_TIMEOUT_SECS", 10_u64, |secs| *secs > 0);

        Self {
            port,
            reminders_tick_interval: Duration::from_secs(tick_secs),
            delivery_timeout: Duration::from_secs(timeout_secs),
            delivery_webhook_url,
            delivery_webhook_key,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_env_or<T, F>(name: &str, default: T, is_valid: F) -> T
where
    T: FromStr + std::fmt::Display + Copy,
    F: Fn(&T) -> bool,
{
    let value = match std::env::var(name) {
        Ok(value) => value,
        Err(_) => return default,
    };
    match value.parse::<T>() {
        Ok(parsed) if is_valid(&parsed) => parsed,
        _ => {
            warn!(
                "The given {}: {} is not valid, falling back to the default: {}.",
                name, value, default
            );
            default
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn falls_back_on_invalid_values() {
        std::env::set_var("PILLBOX_TEST_NUMBER", "abc");
        assert_eq!(parse_env_or("PILLBOX_TEST_NUMBER", 7_u64, |_| true), 7);

        std::env::set_var("PILLBOX_TEST_NUMBER", "0");
        assert_eq!(parse_env_or("PILLBOX_TEST_NUMBER", 7_u64, |n| *n > 0), 7);

        std::env::set_var("PILLBOX_TEST_NUMBER", "30");
        assert_eq!(parse_env_or("PILLBOX_TEST_NUMBER", 7_u64, |n| *n > 0), 30);

        assert_eq!(parse_env_or("PILLBOX_TEST_MISSING", 3_usize, |_| true), 3);
    }
}
