//! 日次ダイジェストを POST する WebhookSink
//!
//! 失敗（送信エラー・非 2xx）は指数バックオフで決まった回数だけ再送する。

use crate::domain::{A2AResponse, WebhookConfig};
use crate::ports::outbound::WebhookSink;
use common::domain::Secret;
use common::error::Error;
use std::time::Duration;

pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;
pub const DEFAULT_INITIAL_BACKOFF: Duration = Duration::from_secs(1);

pub struct HttpWebhook {
    url: String,
    token: Option<Secret>,
    client: reqwest::blocking::Client,
    max_attempts: u32,
    initial_backoff: Duration,
}

impl HttpWebhook {
    pub fn new(config: &WebhookConfig, timeout: Duration) -> Result<Self, Error> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::http(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self {
            url: config.url.clone(),
            token: config.token.clone(),
            client,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            initial_backoff: DEFAULT_INITIAL_BACKOFF,
        })
    }

    /// 再送回数と初回待ち時間を変える（2 回目以降は倍々）
    #[cfg(test)]
    pub fn with_retry(mut self, max_attempts: u32, initial_backoff: Duration) -> Self {
        self.max_attempts = max_attempts.max(1);
        self.initial_backoff = initial_backoff;
        self
    }

    fn post_once(&self, body: &str) -> Result<(), Error> {
        let mut request = self
            .client
            .post(&self.url)
            .header("Content-Type", "application/json")
            .body(body.to_string());
        if let Some(token) = &self.token {
            request = request.bearer_auth(token.expose());
        }
        let response = request
            .send()
            .map_err(|e| Error::http(format!("Webhook request failed: {}", e)))?;
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            let text = response.text().unwrap_or_default();
            Err(Error::http(format!(
                "Webhook returned HTTP {}: {}",
                status.as_u16(),
                text
            )))
        }
    }
}

impl WebhookSink for HttpWebhook {
    fn post(&self, payload: &A2AResponse) -> Result<(), Error> {
        let body = serde_json::to_string(payload)?;
        let mut backoff = self.initial_backoff;
        let mut attempt = 1;
        loop {
            match self.post_once(&body) {
                Ok(()) => {
                    tracing::info!(attempt, "webhook delivered");
                    return Ok(());
                }
                Err(e) if attempt < self.max_attempts => {
                    tracing::warn!(attempt, error = %e, "webhook delivery failed, retrying");
                    std::thread::sleep(backoff);
                    backoff *= 2;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}
