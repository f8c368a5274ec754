//! ツール実行の Ports & Adapters（trait で副作用隔離）
//!
//! ToolRegistry で name -> Arc<dyn Tool> を解決する。LLM に渡す宣言（ToolDef）もここから作る。

use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;

/// ツール実行エラー（ドメイン層）
#[derive(Debug, Clone, thiserror::Error)]
pub enum ToolError {
    #[error("Tool not found: {0}")]
    NotFound(String),
    #[error("Execution failed: {0}")]
    ExecutionFailed(String),
}

/// LLM に渡す関数宣言
#[derive(Debug, Clone, PartialEq)]
pub struct ToolDef {
    pub name: String,
    pub description: String,
    /// JSON Schema（object）
    pub parameters: Value,
}

/// ツールのトレイト
pub trait Tool: Send + Sync {
    /// ツール名（API の name と一致させる）
    fn name(&self) -> &'static str;

    fn description(&self) -> &'static str;

    /// 引数スキーマ。None なら引数なし（空 object）として宣言する
    fn parameters_schema(&self) -> Option<Value> {
        None
    }

    /// 引数で実行し、JSON 結果を返す
    fn call(&self, args: Value) -> Result<Value, ToolError>;

    fn definition(&self) -> ToolDef {
        ToolDef {
            name: self.name().to_string(),
            description: self.description().to_string(),
            parameters: self.parameters_schema().unwrap_or_else(|| {
                serde_json::json!({
                    "type": "object",
                    "properties": {},
                    "required": []
                })
            }),
        }
    }
}

/// ツール名で解決するレジストリ
#[derive(Clone, Default)]
pub struct ToolRegistry {
    tools: BTreeMap<String, Arc<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, tool: Arc<dyn Tool>) {
        self.tools.insert(tool.name().to_string(), tool);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    /// 登録済みツールの宣言一覧（名前順）
    pub fn list_definitions(&self) -> Vec<ToolDef> {
        self.tools.values().map(|t| t.definition()).collect()
    }

    pub fn call(&self, name: &str, args: Value) -> Result<Value, ToolError> {
        let tool = self
            .tools
            .get(name)
            .ok_or_else(|| ToolError::NotFound(name.to_string()))?;
        tool.call(args)
    }
}
