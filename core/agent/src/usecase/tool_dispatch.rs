//! ツール 1 往復つきの生成
//!
//! 1 回目の応答が登録済みツールを呼んでいれば呼び出しごとに実行し、結果を付けてもう 1 回だけ生成する。
//! 2 回目の応答は、さらに関数呼び出しを含んでいても最終結果として扱う。

use common::error::Error;
use common::llm::provider::{LlmResponse, Message, ToolCallSpec};
use common::llm::LlmDriver;
use common::tool::{ToolDef, ToolRegistry};

/// 1 回目の応答を見たあとの状態
#[derive(Debug, Clone, PartialEq)]
pub enum DispatchState {
    NoToolCall,
    /// 登録済みツールへの呼び出し（応答内の順）
    ToolCallsPending(Vec<ToolCallSpec>),
}

impl DispatchState {
    /// 登録済みツールへの呼び出しを集める（未登録の関数は無視）
    pub fn inspect(response: &LlmResponse, tools: &ToolRegistry) -> Self {
        let calls: Vec<ToolCallSpec> = response
            .tool_calls
            .iter()
            .filter(|call| tools.contains(&call.name))
            .cloned()
            .collect();
        if calls.is_empty() {
            Self::NoToolCall
        } else {
            Self::ToolCallsPending(calls)
        }
    }
}

pub struct ToolDispatch {
    driver: LlmDriver,
    tools: ToolRegistry,
    system_instruction: String,
}

impl ToolDispatch {
    pub fn new(driver: LlmDriver, tools: ToolRegistry, system_instruction: impl Into<String>) -> Self {
        Self {
            driver,
            tools,
            system_instruction: system_instruction.into(),
        }
    }

    /// プロンプトと履歴から返答テキストを作る
    ///
    /// LLM・ツールのどちらが失敗してもそのままエラーを返す（再試行しない）。
    pub fn generate(&self, prompt: &str, history: &[Message]) -> Result<String, Error> {
        let declarations = self.tools.list_definitions();
        let first = self.call_llm(prompt, history, &declarations)?;

        let calls = match DispatchState::inspect(&first, &self.tools) {
            DispatchState::NoToolCall => return final_text(first),
            DispatchState::ToolCallsPending(calls) => calls,
        };

        // assistant ターンには答える呼び出しだけを載せ、functionCall と functionResponse の数を揃える
        let mut follow_up_history = history.to_vec();
        follow_up_history.push(Message::user(prompt));
        follow_up_history.push(Message::assistant_with_tool_calls(
            first.text.clone().unwrap_or_default(),
            calls.clone(),
        ));
        for call in &calls {
            tracing::info!(tool = %call.name, id = %call.id, "model requested a tool call");
            let result = self.tools.call(&call.name, call.args.clone())?;
            let result_json = serde_json::to_string(&result)?;
            follow_up_history.push(Message::tool_result(&call.id, &call.name, result_json));
        }

        let second = self.call_llm("", &follow_up_history, &declarations)?;
        if !second.tool_calls.is_empty() {
            tracing::debug!(
                calls = second.tool_calls.len(),
                "follow-up requested more tool calls; ignoring"
            );
        }
        final_text(second)
    }

    fn call_llm(
        &self,
        query: &str,
        history: &[Message],
        declarations: &[ToolDef],
    ) -> Result<LlmResponse, Error> {
        let tools = if declarations.is_empty() {
            None
        } else {
            Some(declarations)
        };
        self.driver
            .generate(query, Some(&self.system_instruction), history, tools)
    }
}

fn final_text(response: LlmResponse) -> Result<String, Error> {
    response
        .text
        .ok_or_else(|| Error::json("model response has no text"))
}
