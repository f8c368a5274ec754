//! history-agent 共通ライブラリ
//!
//! HTTP サーバ（`history-agent`）から使う LLM クライアント・ツール境界・ポートを提供します。

/// エラーハンドリング
pub mod error;

/// ドメイン型（Newtype）
pub mod domain;

/// LLMドライバーとプロバイダ
pub mod llm;

/// ツール呼び出しの境界
pub mod tool;

/// Outbound ポート
pub mod ports;

/// ポートの標準実装
pub mod adapter;
