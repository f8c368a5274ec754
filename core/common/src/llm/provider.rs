//! LLMプロバイダのトレイト定義

use crate::error::Error;
use crate::tool::ToolDef;
use serde_json::Value;

/// LLMプロバイダのトレイト
///
/// 1 回の生成は「ペイロード生成 → HTTP → レスポンス解析」の 3 段階に分かれ、
/// テストでは HTTP だけ差し替えたり、トレイトごとスタブにしたりできる。
pub trait LlmProvider: Send + Sync {
    /// プロバイダ名を返す
    fn name(&self) -> &str;

    /// リクエストペイロードを生成
    ///
    /// # Arguments
    /// * `query` - ユーザークエリ（ツール実行後の継続呼び出しでは空文字）
    /// * `system_instruction` - システム指示（オプション）
    /// * `history` - 会話履歴（古い順）
    /// * `tools` - 関数宣言（オプション）
    fn make_request_payload(
        &self,
        query: &str,
        system_instruction: Option<&str>,
        history: &[Message],
        tools: Option<&[ToolDef]>,
    ) -> Result<Value, Error>;

    /// HTTPリクエストを実行してレスポンスJSON文字列を取得
    fn make_http_request(&self, request_json: &str) -> Result<String, Error>;

    /// レスポンスからテキストと関数呼び出しを取り出す
    fn parse_response(&self, response_json: &str) -> Result<LlmResponse, Error>;
}

/// ツール呼び出し1件（assistant が model に返す用）
#[derive(Debug, Clone, PartialEq)]
pub struct ToolCallSpec {
    pub id: String,
    pub name: String,
    pub args: Value,
    /// Gemini の thoughtSignature（継続呼び出しで送り返す必要がある）
    pub thought_signature: Option<String>,
}

/// メッセージ構造体（user / assistant / tool と tool_calls 対応）
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub role: String,
    pub content: String,
    /// assistant がツールを呼んだ場合
    pub tool_calls: Option<Vec<ToolCallSpec>>,
    /// role が "tool" のとき、どの call_id への返答か
    pub tool_call_id: Option<String>,
    /// role が "tool" のときの関数名（Gemini の functionResponse.name に必須）
    pub tool_name: Option<String>,
}

impl Message {
    pub fn new(role: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            content: content.into(),
            tool_calls: None,
            tool_call_id: None,
            tool_name: None,
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new("user", content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new("assistant", content)
    }

    /// ツール呼び出し付き assistant（content は空でも可）
    pub fn assistant_with_tool_calls(content: impl Into<String>, tool_calls: Vec<ToolCallSpec>) -> Self {
        Self {
            role: "assistant".to_string(),
            content: content.into(),
            tool_calls: Some(tool_calls),
            tool_call_id: None,
            tool_name: None,
        }
    }

    /// ツール結果（role = "tool"、content は JSON 文字列）
    pub fn tool_result(
        call_id: impl Into<String>,
        name: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            role: "tool".to_string(),
            content: content.into(),
            tool_calls: None,
            tool_call_id: Some(call_id.into()),
            tool_name: Some(name.into()),
        }
    }
}

/// 1 回の生成結果
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LlmResponse {
    /// テキスト part を連結したもの（無ければ None）
    pub text: Option<String>,
    pub tool_calls: Vec<ToolCallSpec>,
}

impl LlmResponse {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            tool_calls: Vec::new(),
        }
    }

    pub fn with_tool_call(mut self, call: ToolCallSpec) -> Self {
        self.tool_calls.push(call);
        self
    }
}
