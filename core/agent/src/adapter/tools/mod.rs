//! ツール実装（adapter 層）
//!
//! 外部 API を叩く具象ツールをここに配置する。

pub mod get_historical_event;

pub use get_historical_event::HistoricalEventTool;
