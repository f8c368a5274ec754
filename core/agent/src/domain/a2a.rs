//! A2A（JSON-RPC 2.0 形式）のワイヤ型
//!
//! リクエスト・成功応答・エラー応答の 3 つの封筒と、その中身の Message / Part。

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const JSONRPC_VERSION: &str = "2.0";

pub const MESSAGE_KIND: &str = "message";
pub const TEXT_KIND: &str = "text";

/// Invalid Request（プロトコルバージョン不一致）
pub const CODE_INVALID_REQUEST: i64 = -32600;
/// Internal Error（必須 part 欠落・生成失敗）
pub const CODE_INTERNAL_ERROR: i64 = -32603;
/// Parse error（JSON として読めない・封筒の形に合わない）
pub const CODE_PARSE_ERROR: i64 = -32700;

/// 送信者の種別
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Agent,
}

/// 受信する JSON-RPC リクエスト
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct A2ARequest {
    #[serde(default)]
    pub jsonrpc: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    /// 相関 ID（数値・文字列どちらも可）。応答でそのまま返す
    #[serde(default)]
    pub id: Value,
    #[serde(default)]
    pub params: Params,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Params {
    #[serde(default)]
    pub message: Message,
}

/// user と agent の間でやりとりする 1 メッセージ
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Message {
    #[serde(rename = "messageId", default)]
    pub id: String,
    #[serde(default)]
    pub role: Role,
    #[serde(default)]
    pub parts: Vec<Part>,
    #[serde(default)]
    pub kind: String,
}

impl Message {
    /// agent からの text 1 part の返答
    pub fn agent_text(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            role: Role::Agent,
            parts: vec![Part::text(text)],
            kind: MESSAGE_KIND.to_string(),
        }
    }
}

/// メッセージの構成要素（text か、過去発話の列を持つ data）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Part {
    #[serde(default)]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub data: Vec<DataPart>,
}

impl Part {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            kind: TEXT_KIND.to_string(),
            text: Some(text.into()),
            data: Vec::new(),
        }
    }
}

/// data part の要素（過去の 1 発話）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataPart {
    #[serde(default)]
    pub kind: String,
    #[serde(default)]
    pub text: String,
}

/// JSON-RPC エラーオブジェクト
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsonRpcError {
    pub code: i64,
    pub message: String,
}

impl JsonRpcError {
    pub fn invalid_version() -> Self {
        Self {
            code: CODE_INVALID_REQUEST,
            message: "Invalid Request: jsonrpc must be \"2.0\" and id is required".to_string(),
        }
    }

    pub fn missing_part() -> Self {
        Self {
            code: CODE_INTERNAL_ERROR,
            message: "Invalid Request: missing required part".to_string(),
        }
    }

    pub fn internal() -> Self {
        Self {
            code: CODE_INTERNAL_ERROR,
            message: "Internal Error".to_string(),
        }
    }

    pub fn parse_error() -> Self {
        Self {
            code: CODE_PARSE_ERROR,
            message: "Parse error".to_string(),
        }
    }
}

/// 成功応答
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct A2AResponseSuccess {
    pub jsonrpc: String,
    pub id: Value,
    pub result: Message,
}

/// エラー応答
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct A2AResponseError {
    pub jsonrpc: String,
    pub id: Value,
    pub error: JsonRpcError,
}

/// 応答封筒（成功 / エラー）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum A2AResponse {
    Success(A2AResponseSuccess),
    Error(A2AResponseError),
}

impl A2AResponse {
    pub fn success(id: Value, result: Message) -> Self {
        Self::Success(A2AResponseSuccess {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            result,
        })
    }

    pub fn error(id: Value, error: JsonRpcError) -> Self {
        Self::Error(A2AResponseError {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            error,
        })
    }
}
