//! テスト共通の部品

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use common::error::Error;
use common::llm::provider::{LlmResponse, ToolCallSpec};
use common::ports::outbound::IdGenerator;
use serde_json::json;

use crate::adapter::{HistoricalEventTool, StubLlm};
use crate::domain::{A2ARequest, A2AResponse, HistoricalEvent};
use crate::ports::outbound::{HistoricalEventSource, WebhookSink};
use crate::wiring::{wire_with, App};
use common::tool::ToolRegistry;

/// 連番 ID
pub struct SeqIds(AtomicUsize);

impl SeqIds {
    pub fn new() -> Self {
        Self(AtomicUsize::new(1))
    }
}

impl IdGenerator for SeqIds {
    fn next_id(&self) -> String {
        format!("msg-{}", self.0.fetch_add(1, Ordering::SeqCst))
    }
}

/// 固定のイベント一覧を返し、問い合わせ日を記録する
pub struct FixedEvents {
    events: Vec<HistoricalEvent>,
    pub asked: Mutex<Vec<(u32, u32)>>,
}

impl FixedEvents {
    pub fn new(events: Vec<HistoricalEvent>) -> Self {
        Self {
            events,
            asked: Mutex::new(Vec::new()),
        }
    }
}

impl HistoricalEventSource for FixedEvents {
    fn events_on(&self, month: u32, day: u32) -> Result<Vec<HistoricalEvent>, Error> {
        self.asked.lock().unwrap().push((month, day));
        Ok(self.events.clone())
    }
}

/// 常に失敗するイベント取得
pub struct FailingEvents;

impl HistoricalEventSource for FailingEvents {
    fn events_on(&self, _month: u32, _day: u32) -> Result<Vec<HistoricalEvent>, Error> {
        Err(Error::http("Historical events API error (HTTP 503): unavailable"))
    }
}

/// 受け取った封筒を溜める Webhook
#[derive(Default)]
pub struct RecordingWebhook {
    pub posted: Mutex<Vec<A2AResponse>>,
    pub fail: bool,
}

impl WebhookSink for RecordingWebhook {
    fn post(&self, payload: &A2AResponse) -> Result<(), Error> {
        self.posted.lock().unwrap().push(payload.clone());
        if self.fail {
            Err(Error::http("Webhook returned HTTP 500"))
        } else {
            Ok(())
        }
    }
}

pub fn event(year: &str, month: &str, day: &str, text: &str) -> HistoricalEvent {
    HistoricalEvent {
        year: year.to_string(),
        month: Some(month.to_string()),
        day: Some(day.to_string()),
        event: text.to_string(),
    }
}

pub fn history_call() -> ToolCallSpec {
    ToolCallSpec {
        id: "call_get_historical_event".to_string(),
        name: HistoricalEventTool::NAME.to_string(),
        args: json!({}),
        thought_signature: Some("sig-1".to_string()),
    }
}

/// 関数呼び出しだけの応答
pub fn tool_call_response() -> LlmResponse {
    LlmResponse::default().with_tool_call(history_call())
}

/// 固定日付（7/20）のツールだけを登録したレジストリ
pub fn tools_with(source: Arc<dyn HistoricalEventSource>) -> ToolRegistry {
    let mut tools = ToolRegistry::new();
    tools.register(Arc::new(
        HistoricalEventTool::new(source).with_date_picker(|| (7, 20)),
    ));
    tools
}

/// スタブ LLM とスタブポートで組み立てた App
pub struct TestApp {
    pub app: App,
    pub llm: Arc<StubLlm>,
    pub events: Arc<FixedEvents>,
    pub webhook: Arc<RecordingWebhook>,
}

pub fn test_app(script: Vec<Result<LlmResponse, Error>>, events: Vec<HistoricalEvent>) -> TestApp {
    let llm = Arc::new(StubLlm::new(script));
    let source = Arc::new(FixedEvents::new(events));
    let webhook = Arc::new(RecordingWebhook::default());
    let app = wire_with(
        llm.clone(),
        tools_with(source.clone()),
        Some(webhook.clone() as Arc<dyn WebhookSink>),
        Arc::new(SeqIds::new()),
    );
    TestApp {
        app,
        llm,
        events: source,
        webhook,
    }
}

pub fn request(value: serde_json::Value) -> A2ARequest {
    serde_json::from_value(value).unwrap()
}

/// "hi" だけを送るリクエスト
pub fn hi_request() -> A2ARequest {
    request(json!({
        "jsonrpc": "2.0",
        "id": "req-1",
        "method": "message/send",
        "params": {"message": {
            "messageId": "u1",
            "role": "user",
            "kind": "message",
            "parts": [{"kind": "text", "text": "hi"}]
        }}
    }))
}

/// 別スレッドの tokio ランタイムで axum ルータを起動し、アドレスを返す
///
/// blocking クライアントのアダプタを plain な #[test] から叩くため。
pub fn spawn_stub_server(router: axum::Router) -> SocketAddr {
    let (tx, rx) = std::sync::mpsc::channel();
    std::thread::spawn(move || {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()
            .unwrap();
        runtime.block_on(async move {
            let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
            tx.send(listener.local_addr().unwrap()).unwrap();
            axum::serve(listener, router).await.unwrap();
        });
    });
    rx.recv().unwrap()
}
