//! 歴史イベントのドメイン型と選択ルール
//!
//! 外部 API が返した一覧から何件をどう選ぶか、ツール結果としてどう文字列化するかをここに閉じ込める。

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// 1 回に選ぶ最大件数
pub const MAX_SELECTED: usize = 5;

/// イベントが 0 件のときにツール結果として返す文言
pub const NO_EVENTS_MESSAGE: &str = "No historical events found for today";

/// 月ごとの日数（平年）
const DAYS_IN_MONTH: [u32; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// 外部 API の 1 件
///
/// API は year/month/day を文字列で返すが、数値でも受け付ける。
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HistoricalEvent {
    #[serde(deserialize_with = "string_or_number")]
    pub year: String,
    #[serde(default, deserialize_with = "opt_string_or_number")]
    pub month: Option<String>,
    #[serde(default, deserialize_with = "opt_string_or_number")]
    pub day: Option<String>,
    pub event: String,
}

impl HistoricalEvent {
    /// "On <day>/<month>/<year>(dd/mm/yy) in history: <description>"
    pub fn on_this_day(&self) -> String {
        format!(
            "On {}/{}/{}(dd/mm/yy) in history: {}",
            display_number(self.day.as_deref().unwrap_or("")),
            display_number(self.month.as_deref().unwrap_or("")),
            display_number(&self.year),
            self.event
        )
    }

    /// "In the year <year>: <description>"
    pub fn in_the_year(&self) -> String {
        format!("In the year {}: {}", display_number(&self.year), self.event)
    }
}

/// "0045" は 45、数値でなければそのまま
fn display_number(raw: &str) -> String {
    let trimmed = raw.trim();
    trimmed
        .parse::<i64>()
        .map(|n| n.to_string())
        .unwrap_or_else(|_| trimmed.to_string())
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number, got {}",
            other
        ))),
    }
}

fn opt_string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s)),
        Value::Number(n) => Ok(Some(n.to_string())),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number, got {}",
            other
        ))),
    }
}

/// 選択結果。0 件は Empty で表し、呼び出し側が添字アクセスしないようにする
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventSelection {
    Empty,
    Events(Vec<HistoricalEvent>),
}

impl EventSelection {
    pub fn len(&self) -> usize {
        match self {
            Self::Empty => 0,
            Self::Events(events) => events.len(),
        }
    }

    /// 1 件 1 行の一覧
    pub fn listing(&self) -> Option<String> {
        match self {
            Self::Empty => None,
            Self::Events(events) => Some(
                events
                    .iter()
                    .map(HistoricalEvent::in_the_year)
                    .collect::<Vec<_>>()
                    .join("\n"),
            ),
        }
    }

    /// LLM に返すツール結果の文字列
    ///
    /// 1 件なら日付付きの 1 文、複数なら一覧、0 件なら NO_EVENTS_MESSAGE。
    pub fn to_tool_result(&self) -> String {
        match self {
            Self::Empty => NO_EVENTS_MESSAGE.to_string(),
            Self::Events(events) if events.len() == 1 => events[0].on_this_day(),
            Self::Events(_) => self.listing().unwrap_or_default(),
        }
    }
}

/// k を [1, min(5, N)] から一様に選び、シャッフルして先頭 k 件を取る
pub fn select_events<R: Rng + ?Sized>(mut events: Vec<HistoricalEvent>, rng: &mut R) -> EventSelection {
    if events.is_empty() {
        return EventSelection::Empty;
    }
    let max = events.len().min(MAX_SELECTED);
    let k = rng.gen_range(1..=max);
    events.shuffle(rng);
    events.truncate(k);
    EventSelection::Events(events)
}

/// 月（1〜12）の日数
pub fn days_in_month(month: u32) -> Option<u32> {
    month
        .checked_sub(1)
        .and_then(|i| DAYS_IN_MONTH.get(i as usize))
        .copied()
}

/// 日数表の範囲内か
pub fn is_valid_month_day(month: u32, day: u32) -> bool {
    days_in_month(month).map(|max| (1..=max).contains(&day)).unwrap_or(false)
}

/// ランダムな (月, 日)
pub fn random_month_and_day<R: Rng + ?Sized>(rng: &mut R) -> (u32, u32) {
    let month = rng.gen_range(1..=12u32);
    let day = rng.gen_range(1..=DAYS_IN_MONTH[(month - 1) as usize]);
    (month, day)
}
