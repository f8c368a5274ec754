//! get_historical_event ツール
//!
//! 平年の日数表からランダムな (月, 日) を選んでイベント一覧を取得し、1〜5 件を選んで文字列化する。

use crate::domain::historical_event::{random_month_and_day, select_events};
use crate::ports::outbound::HistoricalEventSource;
use common::tool::{Tool, ToolError};
use serde_json::{json, Value};
use std::sync::Arc;

type DatePicker = dyn Fn() -> (u32, u32) + Send + Sync;

pub struct HistoricalEventTool {
    source: Arc<dyn HistoricalEventSource>,
    pick_date: Arc<DatePicker>,
}

impl HistoricalEventTool {
    pub const NAME: &'static str = "get_historical_event";

    pub fn new(source: Arc<dyn HistoricalEventSource>) -> Self {
        Self {
            source,
            pick_date: Arc::new(|| random_month_and_day(&mut rand::thread_rng())),
        }
    }

    /// 日付の選び方を差し替える
    #[cfg(test)]
    pub fn with_date_picker(
        mut self,
        pick_date: impl Fn() -> (u32, u32) + Send + Sync + 'static,
    ) -> Self {
        self.pick_date = Arc::new(pick_date);
        self
    }
}

impl Tool for HistoricalEventTool {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn description(&self) -> &'static str {
        "Get historical events that happened on a day of the year"
    }

    fn call(&self, _args: Value) -> Result<Value, ToolError> {
        let (month, day) = (self.pick_date)();
        let events = self
            .source
            .events_on(month, day)
            .map_err(|e| ToolError::ExecutionFailed(e.to_string()))?;
        let total = events.len();
        let selection = select_events(events, &mut rand::thread_rng());
        tracing::debug!(month, day, total, selected = selection.len(), "historical events selected");
        Ok(json!({ "result": selection.to_tool_result() }))
    }
}
