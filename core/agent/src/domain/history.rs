//! 会話履歴のドメイン型
//!
//! リクエストの data part（過去の発話の平坦な列）を、LLM に渡す user/model ターン列に読み替える。
//! 列は呼び出し側が古い順に並べて送る前提で、ここでは並べ替えず role を付けるだけ。

use crate::domain::a2a::DataPart;
use common::llm::provider::Message as LlmMessage;

/// 履歴ターンの話者
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryRole {
    User,
    Model,
}

/// role 付きの 1 発話
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryTurn {
    pub role: HistoryRole,
    pub text: String,
}

impl HistoryTurn {
    /// 偶数番目は model、奇数番目は user
    pub fn role_for_index(index: usize) -> HistoryRole {
        if index % 2 == 0 {
            HistoryRole::Model
        } else {
            HistoryRole::User
        }
    }

    pub fn to_llm_message(&self) -> LlmMessage {
        match self.role {
            HistoryRole::User => LlmMessage::user(&self.text),
            HistoryRole::Model => LlmMessage::assistant(&self.text),
        }
    }
}

/// data part 列を index の偶奇でターン列にする
pub fn turns_from_data_parts(parts: &[DataPart]) -> Vec<HistoryTurn> {
    parts
        .iter()
        .enumerate()
        .map(|(i, dp)| HistoryTurn {
            role: HistoryTurn::role_for_index(i),
            text: dp.text.clone(),
        })
        .collect()
}

/// 会話履歴（古い順）
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct History {
    turns: Vec<HistoryTurn>,
}

impl History {
    pub fn from_data_parts(parts: &[DataPart]) -> Self {
        Self {
            turns: turns_from_data_parts(parts),
        }
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn to_llm_messages(&self) -> Vec<LlmMessage> {
        self.turns.iter().map(HistoryTurn::to_llm_message).collect()
    }
}

#[cfg(test)]
impl History {
    pub fn turns(&self) -> &[HistoryTurn] {
        &self.turns
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}
