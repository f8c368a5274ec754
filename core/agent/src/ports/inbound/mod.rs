//! Inbound ポート: ドライバがアプリを呼び出すインターフェース

use crate::domain::{A2ARequest, A2AResponse};
use common::error::Error;

/// 応答の種別（HTTP ステータスへの対応は adapter 側）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyStatus {
    Ok,
    BadRequest,
    InternalError,
}

impl ReplyStatus {
    pub fn http_code(self) -> u16 {
        match self {
            Self::Ok => 200,
            Self::BadRequest => 400,
            Self::InternalError => 500,
        }
    }
}

/// 1 リクエストに対する応答
#[derive(Debug, Clone, PartialEq)]
pub struct A2AReply {
    pub status: ReplyStatus,
    pub body: A2AResponse,
}

/// /history_agent の 1 リクエストを処理する Inbound ポート
///
/// 失敗も含めて常に封筒を返す（エラーは JSON-RPC のエラー応答になる）。
pub trait HandleA2ARequest: Send + Sync {
    fn handle(&self, request: A2ARequest) -> A2AReply;
}

/// 日次ダイジェストを生成・配信する Inbound ポート
pub trait RunDailyDigest: Send + Sync {
    /// 定型プロンプトで生成し、成功応答と同じ封筒にする
    fn compose(&self) -> Result<A2AResponse, Error>;

    /// compose して Webhook に投稿する
    fn run(&self) -> Result<(), Error>;
}
