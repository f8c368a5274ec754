//! アダプター（Outbound / Inbound ポートの実装）
//!
//! 外部 API・HTTP サーバ・スケジューラ・設定読み込みなど I/O を伴う実装をここに置く。

pub mod config;
pub mod daily_scheduler;
pub mod http_server;
pub mod http_webhook;
pub mod ninjas_event_source;
pub mod stub_llm;
pub mod tools;
pub mod uuid_id_generator;

pub use config::{load_app_config, load_env_file, parse_cron};
pub use daily_scheduler::run_daily_scheduler;
pub use http_server::{router, serve, AppState};
pub use http_webhook::HttpWebhook;
pub use ninjas_event_source::NinjasEventSource;
pub use tools::HistoricalEventTool;
pub use uuid_id_generator::UuidIdGenerator;

#[cfg(test)]
pub use stub_llm::StubLlm;
