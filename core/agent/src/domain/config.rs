//! 起動時に 1 回だけ組み立てるアプリ設定
//!
//! 読み込み（環境変数・.env ファイル）は adapter::config が行い、ここは値の形だけを持つ。

use common::domain::{ModelName, Secret};
use std::path::PathBuf;
use std::time::Duration;

/// 日次ダイジェストの投稿先
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebhookConfig {
    pub url: String,
    /// 設定されていれば `Authorization: Bearer <token>` を付ける
    pub token: Option<Secret>,
}

/// プロセス全体で共有する不変の設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub gemini_api_key: Secret,
    pub gemini_model: ModelName,
    pub gemini_base_url: String,
    pub ninjas_api_key: Secret,
    pub events_base_url: String,
    /// None なら日次スケジューラを起動しない
    pub webhook: Option<WebhookConfig>,
    /// cron 式（秒 分 時 日 月 曜日）
    pub daily_cron: String,
    pub port: u16,
    /// 外向き HTTP 1 回あたりのタイムアウト
    pub http_timeout: Duration,
    pub well_known_dir: PathBuf,
}
