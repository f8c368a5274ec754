//! A2A Message とユースケース入出力の相互変換
//!
//! part[0] の text がプロンプト、part[1] の data が過去の発話列。返答は text 1 part の agent メッセージ。

use crate::domain::{History, Message};
use common::error::Error;
use common::ports::outbound::IdGenerator;

/// デコード結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedMessage {
    pub prompt: String,
    pub history: History,
}

/// リクエストのメッセージからプロンプトと履歴を取り出す
///
/// part[0] が無い、または text を持たない場合は InvalidArgument。part が 1 つなら履歴は空。
pub fn decode_message(message: &Message) -> Result<DecodedMessage, Error> {
    let first = message
        .parts
        .first()
        .ok_or_else(|| Error::invalid_argument("missing required part"))?;
    let prompt = first
        .text
        .clone()
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| Error::invalid_argument("first part has no text"))?;
    let history = message
        .parts
        .get(1)
        .map(|p| History::from_data_parts(&p.data))
        .unwrap_or_default();
    Ok(DecodedMessage { prompt, history })
}

/// 返答テキストを agent メッセージにする（ID は毎回新規）
pub fn encode_reply(ids: &dyn IdGenerator, text: impl Into<String>) -> Message {
    Message::agent_text(ids.next_id(), text)
}
