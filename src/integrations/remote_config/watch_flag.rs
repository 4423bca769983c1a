// src/integrations/remote_config/watch_flag.rs
//
// In-process flag source, for embedding hosts that receive the flag through
// their own push channel, and for tests.

use async_trait::async_trait;
use tokio::sync::watch;

use super::{FlagSubscription, MaintenanceFlagSource};
use crate::error::AppResult;

pub struct WatchFlagSource {
    sender: watch::Sender<bool>,
}

impl WatchFlagSource {
    pub fn new(initial: bool) -> Self {
        let (sender, _) = watch::channel(initial);
        Self { sender }
    }

    /// Publish a new value; subscribers are woken only on an actual change
    pub fn set(&self, value: bool) {
        self.sender.send_if_modified(|current| {
            if *current == value {
                false
            } else {
                *current = value;
                true
            }
        });
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

#[async_trait]
impl MaintenanceFlagSource for WatchFlagSource {
    async fn fetch(&self) -> AppResult<bool> {
        Ok(*self.sender.borrow())
    }

    fn subscribe(&self, _last_known: bool) -> FlagSubscription {
        FlagSubscription::new(self.sender.subscribe(), None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fetch_reflects_latest_value() {
        let source = WatchFlagSource::new(false);
        assert!(!source.fetch().await.unwrap());

        source.set(true);
        assert!(source.fetch().await.unwrap());
    }

    #[tokio::test]
    async fn test_subscription_yields_changes_only() {
        let source = WatchFlagSource::new(false);
        let mut subscription = source.subscribe(false);

        source.set(false);
        source.set(true);

        assert_eq!(subscription.next_change().await, Some(true));
        assert!(subscription.current());
    }

    #[tokio::test]
    async fn test_dropping_subscription_unsubscribes() {
        let source = WatchFlagSource::new(false);
        let subscription = source.subscribe(false);
        assert_eq!(source.subscriber_count(), 1);

        subscription.unsubscribe();
        assert_eq!(source.subscriber_count(), 0);
    }
}
