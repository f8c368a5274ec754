//! API Ninjas の historicalevents エンドポイントを叩く HistoricalEventSource

use crate::domain::historical_event::is_valid_month_day;
use crate::domain::HistoricalEvent;
use crate::ports::outbound::HistoricalEventSource;
use common::domain::Secret;
use common::error::Error;
use std::time::Duration;

pub const DEFAULT_EVENTS_BASE_URL: &str = "https://api.api-ninjas.com/v1/historicalevents";

/// `GET <base>?month=M&day=D` を `X-Api-Key` 付きで送る
pub struct NinjasEventSource {
    base_url: String,
    api_key: Secret,
    client: reqwest::blocking::Client,
}

impl NinjasEventSource {
    pub fn new(
        base_url: impl Into<String>,
        api_key: Secret,
        timeout: Duration,
    ) -> Result<Self, Error> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::http(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self {
            base_url: base_url.into(),
            api_key,
            client,
        })
    }
}

impl HistoricalEventSource for NinjasEventSource {
    fn events_on(&self, month: u32, day: u32) -> Result<Vec<HistoricalEvent>, Error> {
        if !is_valid_month_day(month, day) {
            return Err(Error::invalid_argument(format!(
                "invalid date: month={} day={}",
                month, day
            )));
        }
        tracing::debug!(month, day, "fetching historical events");

        let response = self
            .client
            .get(&self.base_url)
            .query(&[("month", month), ("day", day)])
            .header("X-Api-Key", self.api_key.expose())
            .send()
            .map_err(|e| Error::http(format!("Historical events request failed: {}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .map_err(|e| Error::http(format!("Failed to read historical events response: {}", e)))?;
        if !status.is_success() {
            return Err(Error::http(format!(
                "Historical events API error (HTTP {}): {}",
                status.as_u16(),
                body
            )));
        }

        serde_json::from_str::<Vec<HistoricalEvent>>(&body)
            .map_err(|e| Error::json(format!("Failed to decode historical events: {}", e)))
    }
}
