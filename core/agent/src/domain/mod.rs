//! history-agent 固有のドメイン型（型と不変条件）

pub mod a2a;
pub mod config;
pub mod historical_event;
pub mod history;

pub use a2a::{A2ARequest, A2AResponse, JsonRpcError, Message};
pub use config::{AppConfig, WebhookConfig};
pub use historical_event::HistoricalEvent;
pub use history::History;
