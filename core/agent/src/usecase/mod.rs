//! ユースケース層（ポート経由でのみ外界に触れる）

pub mod daily_digest;
pub mod history_agent;
pub mod message_adapter;
pub mod prompts;
pub mod tool_dispatch;

pub use daily_digest::DailyDigestUseCase;
pub use history_agent::HistoryAgentUseCase;
pub use tool_dispatch::ToolDispatch;
