//! Outbound ポート: アプリが外界（環境変数・ID 生成・LLM・ツール）を使うための trait

pub mod env_resolver;
pub mod id_generator;

pub use env_resolver::EnvResolver;
pub use id_generator::IdGenerator;
pub use crate::llm::provider::LlmProvider;
pub use crate::tool::Tool;
