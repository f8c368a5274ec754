//! Geminiプロバイダの実装（generateContent, 非ストリーミング）

use crate::domain::{ModelName, Secret};
use crate::error::Error;
use crate::llm::provider::{LlmProvider, LlmResponse, Message, ToolCallSpec};
use crate::tool::ToolDef;
use serde_json::{json, Value};
use std::time::Duration;

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Geminiプロバイダ
pub struct GeminiProvider {
    model: ModelName,
    api_key: Secret,
    base_url: String,
    client: reqwest::blocking::Client,
}

impl GeminiProvider {
    /// 新しいGeminiプロバイダを作成
    ///
    /// # Arguments
    /// * `model` - モデル名
    /// * `api_key` - API キー（x-goog-api-key ヘッダで送る）
    /// * `base_url` - API のベース URL（テストでローカルサーバに向けられる）
    /// * `timeout` - 1 リクエストあたりのタイムアウト
    pub fn new(
        model: ModelName,
        api_key: Secret,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, Error> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::http(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self {
            model,
            api_key,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }
}

impl LlmProvider for GeminiProvider {
    fn name(&self) -> &str {
        "gemini"
    }

    fn make_request_payload(
        &self,
        query: &str,
        system_instruction: Option<&str>,
        history: &[Message],
        tools: Option<&[ToolDef]>,
    ) -> Result<Value, Error> {
        let mut payload = json!({});

        if let Some(system) = system_instruction {
            payload["systemInstruction"] = json!({
                "parts": [{"text": system}]
            });
        }

        if let Some(defs) = tools.filter(|d| !d.is_empty()) {
            let declarations: Vec<Value> = defs
                .iter()
                .map(|d| {
                    json!({
                        "name": d.name,
                        "description": d.description,
                        "parameters": d.parameters
                    })
                })
                .collect();
            payload["tools"] = json!([{ "functionDeclarations": declarations }]);
        }

        // Gemini APIは "assistant" ではなく "model" というroleを使用する
        let mut contents = Vec::new();
        for msg in history {
            if msg.role == "tool" {
                // ツール結果: user ターンで functionResponse を返す（連続する結果は 1 ターンにまとめる）
                let name = msg.tool_name.as_deref().unwrap_or("unknown");
                let response: Value = serde_json::from_str(&msg.content)
                    .unwrap_or_else(|_| json!({ "result": msg.content }));
                let part = json!({
                    "functionResponse": {
                        "name": name,
                        "response": response
                    }
                });
                match contents.last_mut().and_then(function_response_parts) {
                    Some(parts) => parts.push(part),
                    None => contents.push(json!({ "role": "user", "parts": [part] })),
                }
                continue;
            }
            let role = if msg.role == "assistant" { "model" } else { msg.role.as_str() };
            let mut parts: Vec<Value> = Vec::new();
            if !msg.content.is_empty() {
                parts.push(json!({"text": msg.content}));
            }
            if let Some(ref tool_calls) = msg.tool_calls {
                for tc in tool_calls {
                    let mut fc = json!({
                        "functionCall": {
                            "name": tc.name,
                            "args": tc.args
                        }
                    });
                    if let Some(ref sig) = tc.thought_signature {
                        fc["thoughtSignature"] = json!(sig);
                    }
                    parts.push(fc);
                }
            }
            if parts.is_empty() {
                parts.push(json!({"text": ""}));
            }
            contents.push(json!({ "role": role, "parts": parts }));
        }

        // ツール実行直後の継続呼び出しでは query が空で、履歴末尾が functionResponse になっている
        if !query.is_empty() || contents.is_empty() {
            contents.push(json!({
                "role": "user",
                "parts": [{"text": query}]
            }));
        }

        payload["contents"] = json!(contents);
        Ok(payload)
    }

    fn make_http_request(&self, request_json: &str) -> Result<String, Error> {
        let response = self
            .client
            .post(self.endpoint())
            .header("Content-Type", "application/json")
            .header("x-goog-api-key", self.api_key.expose())
            .body(request_json.to_string())
            .send()
            .map_err(|e| Error::http(format!("HTTP request failed: {}", e)))?;

        let status = response.status();
        let response_text = response
            .text()
            .map_err(|e| Error::http(format!("Failed to read response: {}", e)))?;

        if !status.is_success() {
            let error_msg = serde_json::from_str::<Value>(&response_text)
                .ok()
                .and_then(|v| v["error"]["message"].as_str().map(str::to_string))
                .unwrap_or_else(|| format!("HTTP {}: {}", status, response_text));
            return Err(Error::http(format!("Gemini API error: {}", error_msg)));
        }

        Ok(response_text)
    }

    fn parse_response(&self, response_json: &str) -> Result<LlmResponse, Error> {
        let v: Value = serde_json::from_str(response_json)
            .map_err(|e| Error::json(format!("Failed to parse response JSON: {}", e)))?;

        if let Some(error) = v.get("error") {
            let error_msg = error["message"].as_str().unwrap_or("Unknown error");
            return Err(Error::http(format!("Gemini API error: {}", error_msg)));
        }

        let candidate = v["candidates"]
            .as_array()
            .and_then(|c| c.first())
            .ok_or_else(|| {
                let reason = v["promptFeedback"]["blockReason"]
                    .as_str()
                    .unwrap_or("no candidates");
                Error::json(format!("Gemini response has no candidates ({})", reason))
            })?;

        let mut text = String::new();
        let mut has_text = false;
        let mut tool_calls = Vec::new();
        for part in candidate["content"]["parts"].as_array().into_iter().flatten() {
            if let Some(t) = part["text"].as_str() {
                // thought: true の part は思考過程なので返答に含めない
                if !part["thought"].as_bool().unwrap_or(false) {
                    text.push_str(t);
                    has_text = true;
                }
            }
            if let Some(fc) = part["functionCall"].as_object() {
                let name = fc
                    .get("name")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string();
                let id = fc
                    .get("id")
                    .and_then(Value::as_str)
                    .map(String::from)
                    .unwrap_or_else(|| format!("call_{}", name));
                tool_calls.push(ToolCallSpec {
                    id,
                    name,
                    args: fc.get("args").cloned().unwrap_or_else(|| json!({})),
                    thought_signature: part["thoughtSignature"].as_str().map(String::from),
                });
            }
        }

        Ok(LlmResponse {
            text: has_text.then_some(text),
            tool_calls,
        })
    }
}

/// functionResponse だけで構成された user ターンなら、その parts を返す
fn function_response_parts(content: &mut Value) -> Option<&mut Vec<Value>> {
    if content["role"] != "user" {
        return None;
    }
    let parts = content["parts"].as_array_mut()?;
    if parts.iter().all(|p| p.get("functionResponse").is_some()) {
        Some(parts)
    } else {
        None
    }
}
