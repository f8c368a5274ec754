//! エラーハンドリング
//!
//! 呼び出し元に見せる分類（入力不正 / 上流失敗 / 設定不備）と、CLI 用の終了コードを一体で持つ。

/// エラー型
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// 引数・リクエスト不正
    #[error("{0}")]
    InvalidArgument(String),
    /// 環境変数・設定ファイルの不備（起動時のみ）
    #[error("configuration error: {0}")]
    Env(String),
    /// HTTP 通信の失敗、または上流 API のエラー応答
    #[error("http error: {0}")]
    Http(String),
    /// JSON のパース・生成失敗、または上流応答の形式不正
    #[error("json error: {0}")]
    Json(String),
    /// ツール実行の失敗
    #[error("tool error: {0}")]
    Tool(String),
    /// その他の内部エラー
    #[error("system error: {0}")]
    System(String),
}

impl Error {
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    pub fn env(msg: impl Into<String>) -> Self {
        Self::Env(msg.into())
    }

    pub fn http(msg: impl Into<String>) -> Self {
        Self::Http(msg.into())
    }

    pub fn json(msg: impl Into<String>) -> Self {
        Self::Json(msg.into())
    }

    pub fn system(msg: impl Into<String>) -> Self {
        Self::System(msg.into())
    }

    /// sysexits.h に合わせた終了コード
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::InvalidArgument(_) => 64,
            Self::Json(_) => 65,
            Self::Http(_) => 69,
            Self::Tool(_) | Self::System(_) => 70,
            Self::Env(_) => 78,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e.to_string())
    }
}

impl From<crate::tool::ToolError> for Error {
    fn from(e: crate::tool::ToolError) -> Self {
        Self::Tool(e.to_string())
    }
}
