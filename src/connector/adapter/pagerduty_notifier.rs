use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;
use tracing::info;

use crate::application::{Notifier, ScanSummary};
use crate::domain::DomainError;

const EVENTS_URL: &str = "https://events.pagerduty.com/generic/2010-04-15/create_event.json";

/// Triggers a PagerDuty incident for a scan that found something.
pub struct PagerdutyNotifier {
    client: reqwest::Client,
    api_key: String,
    service_key: String,
}

impl PagerdutyNotifier {
    pub fn new(api_key: impl Into<String>, service_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(Duration::from_secs(30))
                .build()
                .unwrap_or_default(),
            api_key: api_key.into(),
            service_key: service_key.into(),
        }
    }
}

#[async_trait]
impl Notifier for PagerdutyNotifier {
    async fn notify(&self, summary: &ScanSummary) -> Result<(), DomainError> {
        let description = format!(
            "Leak scan on {} found {} suspicious record(s).",
            chrono::Local::now().format("%Y-%m-%d"),
            summary.records_written
        );

        let payload = json!({
            "service_key": self.service_key,
            "incident_key": "leakhound/scan",
            "event_type": "trigger",
            "description": description,
            "client": "leakhound",
            "details": {
                "results_file": summary.results_path.display().to_string(),
            },
        });

        let response = self
            .client
            .post(EVENTS_URL)
            .header("Authorization", format!("Token token={}", self.api_key))
            .json(&payload)
            .send()
            .await
            .map_err(|e| DomainError::plugin(format!("PagerDuty request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(DomainError::plugin(format!(
                "PagerDuty returned {}",
                response.status()
            )));
        }

        info!("PagerDuty alert: {:?}", description);
        Ok(())
    }
}
