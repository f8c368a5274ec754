//! LLMドライバーの実装
//!
//! プロバイダに依存しない共通処理を提供します。

use crate::error::Error;
use crate::llm::provider::{LlmProvider, LlmResponse, Message};
use crate::tool::ToolDef;
use std::sync::Arc;

/// LLMドライバー
#[derive(Clone)]
pub struct LlmDriver {
    provider: Arc<dyn LlmProvider>,
}

impl LlmDriver {
    /// 新しいドライバーを作成
    pub fn new(provider: Arc<dyn LlmProvider>) -> Self {
        Self { provider }
    }

    /// 1 回生成する（テキストと関数呼び出しの両方を返す）
    ///
    /// # Arguments
    /// * `query` - ユーザークエリ（継続呼び出しでは空）
    /// * `system_instruction` - システム指示（オプション）
    /// * `history` - 会話履歴
    /// * `tools` - 関数宣言（オプション）
    pub fn generate(
        &self,
        query: &str,
        system_instruction: Option<&str>,
        history: &[Message],
        tools: Option<&[ToolDef]>,
    ) -> Result<LlmResponse, Error> {
        let payload = self
            .provider
            .make_request_payload(query, system_instruction, history, tools)?;
        let request_json = serde_json::to_string(&payload)
            .map_err(|e| Error::json(format!("Failed to serialize request: {}", e)))?;
        let response_json = self.provider.make_http_request(&request_json)?;
        self.provider.parse_response(&response_json)
    }

    /// LLMにクエリを送信してテキストだけを取得（ツールなし）
    pub fn query(
        &self,
        query: &str,
        system_instruction: Option<&str>,
        history: &[Message],
    ) -> Result<String, Error> {
        self.generate(query, system_instruction, history, None)?
            .text
            .ok_or_else(|| Error::json("No text in response"))
    }
}
