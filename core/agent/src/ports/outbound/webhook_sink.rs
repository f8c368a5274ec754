//! Webhook 投稿 Outbound ポート

use crate::domain::A2AResponse;
use common::error::Error;

/// 封筒を JSON で外部 URL に投稿する
pub trait WebhookSink: Send + Sync {
    fn post(&self, payload: &A2AResponse) -> Result<(), Error>;
}
