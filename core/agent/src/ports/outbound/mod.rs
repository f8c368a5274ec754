//! Outbound ポート: アプリが外界（歴史イベント API・Webhook）を使うための trait

pub mod historical_event_source;
pub mod webhook_sink;

pub use historical_event_source::HistoricalEventSource;
pub use webhook_sink::WebhookSink;
