//! 日次ダイジェスト: 定型プロンプトで生成し Webhook に投稿する

use crate::domain::A2AResponse;
use crate::ports::inbound::RunDailyDigest;
use crate::ports::outbound::WebhookSink;
use crate::usecase::message_adapter::encode_reply;
use crate::usecase::prompts::DAILY_DIGEST_PROMPT;
use crate::usecase::tool_dispatch::ToolDispatch;
use common::error::Error;
use common::ports::outbound::IdGenerator;
use rand::Rng;
use serde_json::Value;
use std::sync::Arc;

/// 封筒 id の範囲（文字列にして送る）
const ENVELOPE_ID_RANGE: std::ops::RangeInclusive<u32> = 1..=20;

pub struct DailyDigestUseCase {
    dispatch: Arc<ToolDispatch>,
    ids: Arc<dyn IdGenerator>,
    /// None なら compose のみ可能
    webhook: Option<Arc<dyn WebhookSink>>,
}

impl DailyDigestUseCase {
    pub fn new(
        dispatch: Arc<ToolDispatch>,
        ids: Arc<dyn IdGenerator>,
        webhook: Option<Arc<dyn WebhookSink>>,
    ) -> Self {
        Self {
            dispatch,
            ids,
            webhook,
        }
    }

    pub fn has_webhook(&self) -> bool {
        self.webhook.is_some()
    }
}

impl RunDailyDigest for DailyDigestUseCase {
    fn compose(&self) -> Result<A2AResponse, Error> {
        let text = self.dispatch.generate(DAILY_DIGEST_PROMPT, &[])?;
        let envelope_id = rand::thread_rng().gen_range(ENVELOPE_ID_RANGE).to_string();
        tracing::debug!(%envelope_id, "daily digest composed");
        Ok(A2AResponse::success(
            Value::String(envelope_id),
            encode_reply(self.ids.as_ref(), text),
        ))
    }

    fn run(&self) -> Result<(), Error> {
        let webhook = self
            .webhook
            .as_ref()
            .ok_or_else(|| Error::env("WEBHOOK_URL is not set"))?;
        let envelope = self.compose()?;
        webhook.post(&envelope)
    }
}
