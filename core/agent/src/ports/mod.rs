//! Ports & Adapters のポート定義
//!
//! - inbound: ドライバ（HTTP サーバ・スケジューラ・CLI）がアプリを呼び出すインターフェース
//! - outbound: アプリが外界（歴史イベント API・Webhook）を使うための trait

pub mod inbound;
pub mod outbound;
