use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;
use tracing::info;

use crate::application::{Notifier, ScanSummary};
use crate::domain::DomainError;

const DEFAULT_SENDER_NAME: &str = "LeakHound-Bot";

/// Posts a scan alert to a Slack incoming webhook.
pub struct SlackNotifier {
    client: reqwest::Client,
    webhook_url: String,
    channel: String,
    sender_name: String,
}

impl SlackNotifier {
    pub fn new(webhook_url: impl Into<String>, channel: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(Duration::from_secs(30))
                .build()
                .unwrap_or_default(),
            webhook_url: webhook_url.into(),
            channel: channel.into(),
            sender_name: DEFAULT_SENDER_NAME.to_string(),
        }
    }

    pub fn with_sender_name(mut self, sender_name: impl Into<String>) -> Self {
        self.sender_name = sender_name.into();
        self
    }
}

#[async_trait]
impl Notifier for SlackNotifier {
    async fn notify(&self, summary: &ScanSummary) -> Result<(), DomainError> {
        let text = format!(
            "Leak scan on {} found {} suspicious record(s).",
            chrono::Local::now().format("%Y-%m-%d"),
            summary.records_written
        );

        let payload = json!({
            "channel": self.channel,
            "username": self.sender_name,
            "text": text,
        });

        let response = self
            .client
            .post(&self.webhook_url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| DomainError::plugin(format!("Slack request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(DomainError::plugin(format!(
                "Slack returned {}",
                response.status()
            )));
        }

        info!("Slack alert: {:?}", text);
        Ok(())
    }
}
