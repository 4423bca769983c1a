// src/integrations/remote_config/http_flag.rs
//
// Maintenance flag read over HTTP.
//
// The endpoint returns a bare JSON boolean (Firebase Realtime Database REST
// shape, e.g. `https://<db>.firebaseio.com/maintenance.json`); `null` means
// the flag was never set and counts as false. Subscriptions poll the endpoint
// on a fixed interval and publish only when the value changes.

use async_trait::async_trait;
use reqwest::{header, Client};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

use super::{FlagSubscription, MaintenanceFlagSource};
use crate::config::MaintenanceConfig;
use crate::error::{AppError, AppResult};

pub struct HttpFlagSource {
    inner: Arc<FlagEndpoint>,
    poll_interval: Duration,
}

struct FlagEndpoint {
    url: String,
    http_client: Client,
}

impl FlagEndpoint {
    async fn read(&self) -> AppResult<bool> {
        let response = self
            .http_client
            .get(&self.url)
            .header(header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| AppError::Other(format!("Maintenance flag request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::Other(format!(
                "Maintenance flag endpoint returned status: {}",
                response.status()
            )));
        }

        let value: Option<bool> = response
            .json()
            .await
            .map_err(|e| AppError::Other(format!("Maintenance flag is not a boolean: {}", e)))?;

        Ok(value.unwrap_or(false))
    }
}

impl HttpFlagSource {
    pub fn new(url: impl Into<String>, poll_interval: Duration) -> AppResult<Self> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            inner: Arc::new(FlagEndpoint {
                url: url.into(),
                http_client,
            }),
            poll_interval,
        })
    }

    /// `None` when no flag URL is configured
    pub fn from_config(config: &MaintenanceConfig) -> AppResult<Option<Self>> {
        config
            .flag_url
            .as_ref()
            .map(|url| Self::new(url.clone(), config.poll_interval()))
            .transpose()
    }
}

#[async_trait]
impl MaintenanceFlagSource for HttpFlagSource {
    async fn fetch(&self) -> AppResult<bool> {
        self.inner.read().await
    }

    fn subscribe(&self, last_known: bool) -> FlagSubscription {
        let (sender, receiver) = watch::channel(last_known);
        let endpoint = Arc::clone(&self.inner);
        let interval = self.poll_interval;

        let poller = tokio::spawn(async move {
            loop {
                tokio::time::sleep(interval).await;

                if sender.is_closed() {
                    break;
                }

                match endpoint.read().await {
                    Ok(value) => {
                        sender.send_if_modified(|current| {
                            if *current == value {
                                false
                            } else {
                                log::info!("Maintenance flag changed to {}", value);
                                *current = value;
                                true
                            }
                        });
                    }
                    // Keep the last known value; the next tick tries again
                    Err(e) => log::warn!("Maintenance flag poll failed: {}", e),
                }
            }
        });

        FlagSubscription::new(receiver, Some(poller))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    #[tokio::test]
    async fn test_fetch_reads_boolean() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/maintenance.json");
                then.status(200).body("true");
            })
            .await;

        let source =
            HttpFlagSource::new(server.url("/maintenance.json"), Duration::from_secs(60)).unwrap();

        assert!(source.fetch().await.unwrap());
    }

    #[tokio::test]
    async fn test_null_flag_is_false() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/maintenance.json");
                then.status(200).body("null");
            })
            .await;

        let source =
            HttpFlagSource::new(server.url("/maintenance.json"), Duration::from_secs(60)).unwrap();

        assert!(!source.fetch().await.unwrap());
    }

    #[tokio::test]
    async fn test_non_boolean_is_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/maintenance.json");
                then.status(200).body("\"yes\"");
            })
            .await;

        let source =
            HttpFlagSource::new(server.url("/maintenance.json"), Duration::from_secs(60)).unwrap();

        assert!(source.fetch().await.is_err());
    }

    #[tokio::test]
    async fn test_subscription_polls_and_reports_change() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/maintenance.json");
                then.status(200).body("true");
            })
            .await;

        let source =
            HttpFlagSource::new(server.url("/maintenance.json"), Duration::from_millis(20))
                .unwrap();
        let mut subscription = source.subscribe(false);

        let change = tokio::time::timeout(Duration::from_secs(5), subscription.next_change())
            .await
            .expect("poller should report the new value");

        assert_eq!(change, Some(true));
    }

    #[test]
    fn test_from_config_without_url() {
        let config = MaintenanceConfig::default();
        assert!(HttpFlagSource::from_config(&config).unwrap().is_none());
    }
}
