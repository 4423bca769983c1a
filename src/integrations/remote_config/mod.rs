// src/integrations/remote_config/mod.rs
//
// Maintenance flag sources
//
// A source answers one-shot reads and hands out subscriptions that yield the
// flag's value each time it changes. Dropping a subscription unsubscribes.

pub mod http_flag;
pub mod watch_flag;

pub use http_flag::HttpFlagSource;
pub use watch_flag::WatchFlagSource;

use async_trait::async_trait;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::error::AppResult;

#[async_trait]
pub trait MaintenanceFlagSource: Send + Sync {
    /// Read the current value once
    async fn fetch(&self) -> AppResult<bool>;

    /// Start observing changes, starting from `last_known`
    fn subscribe(&self, last_known: bool) -> FlagSubscription;
}

/// Live view of a remote flag
///
/// Yields a value only when it differs from the previous one.
pub struct FlagSubscription {
    receiver: watch::Receiver<bool>,
    poller: Option<JoinHandle<()>>,
}

impl FlagSubscription {
    pub(crate) fn new(receiver: watch::Receiver<bool>, poller: Option<JoinHandle<()>>) -> Self {
        Self { receiver, poller }
    }

    /// Latest value seen by the subscription
    pub fn current(&self) -> bool {
        *self.receiver.borrow()
    }

    /// Wait for the next change; `None` once the source has gone away
    pub async fn next_change(&mut self) -> Option<bool> {
        self.receiver.changed().await.ok()?;
        let value = *self.receiver.borrow_and_update();
        Some(value)
    }

    /// Stop observing
    pub fn unsubscribe(mut self) {
        self.stop_poller();
    }

    fn stop_poller(&mut self) {
        if let Some(poller) = self.poller.take() {
            poller.abort();
        }
    }
}

impl Drop for FlagSubscription {
    fn drop(&mut self) {
        self.stop_poller();
    }
}
