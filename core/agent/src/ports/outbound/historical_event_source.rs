//! 歴史イベント取得 Outbound ポート

use crate::domain::HistoricalEvent;
use common::error::Error;

/// 指定日の歴史イベント一覧を返す（0 件なら空 Vec）
///
/// 実装は `adapter::NinjasEventSource` やテスト用の固定リストなど。
pub trait HistoricalEventSource: Send + Sync {
    fn events_on(&self, month: u32, day: u32) -> Result<Vec<HistoricalEvent>, Error>;
}
