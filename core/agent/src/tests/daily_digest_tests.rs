use std::sync::Arc;

use common::error::Error;
use common::llm::provider::LlmResponse;

use crate::adapter::StubLlm;
use crate::domain::a2a::Role;
use crate::domain::A2AResponse;
use crate::ports::inbound::RunDailyDigest;
use crate::ports::outbound::WebhookSink;
use crate::tests::support::{event, test_app, tool_call_response, tools_with, FixedEvents, RecordingWebhook, SeqIds};
use crate::usecase::prompts::DAILY_DIGEST_PROMPT;
use crate::wiring::wire_with;

#[test]
fn test_compose_uses_canned_prompt_without_history() {
    let t = test_app(vec![Ok(LlmResponse::text("Today in 1776..."))], vec![]);
    let envelope = t.app.daily_digest.compose().unwrap();

    let calls = t.llm.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].query, DAILY_DIGEST_PROMPT);
    assert!(calls[0].history.is_empty());

    match envelope {
        A2AResponse::Success(s) => {
            assert_eq!(s.jsonrpc, "2.0");
            let id: u32 = s.id.as_str().unwrap().parse().unwrap();
            assert!((1..=20).contains(&id), "envelope id {} out of range", id);
            assert_eq!(s.result.role, Role::Agent);
            assert_eq!(s.result.parts[0].text.as_deref(), Some("Today in 1776..."));
        }
        other => panic!("unexpected: {:?}", other),
    }
}

#[test]
fn test_run_posts_envelope_to_webhook() {
    let t = test_app(
        vec![
            Ok(tool_call_response()),
            Ok(LlmResponse::text("On this day: the Moon landing.")),
        ],
        vec![event("1969", "07", "20", "Apollo 11 lands on the Moon")],
    );
    t.app.daily_digest.run().unwrap();

    let posted = t.webhook.posted.lock().unwrap();
    assert_eq!(posted.len(), 1);
    let body = serde_json::to_value(&posted[0]).unwrap();
    assert_eq!(body["result"]["parts"][0]["text"], "On this day: the Moon landing.");
    assert!(body["id"].is_string());
}

#[test]
fn test_generation_failure_posts_nothing() {
    let t = test_app(vec![Err(Error::http("Gemini API error (HTTP 500)"))], vec![]);
    let err = t.app.daily_digest.run().unwrap_err();
    assert!(matches!(err, Error::Http(_)));
    assert!(t.webhook.posted.lock().unwrap().is_empty());
}

#[test]
fn test_webhook_failure_is_returned() {
    let llm = Arc::new(StubLlm::text_only("fact"));
    let webhook = Arc::new(RecordingWebhook {
        fail: true,
        ..RecordingWebhook::default()
    });
    let app = wire_with(
        llm,
        tools_with(Arc::new(FixedEvents::new(vec![]))),
        Some(webhook.clone() as Arc<dyn WebhookSink>),
        Arc::new(SeqIds::new()),
    );
    let err = app.daily_digest.run().unwrap_err();
    assert!(err.to_string().contains("HTTP 500"));
    assert_eq!(webhook.posted.lock().unwrap().len(), 1);
}

#[test]
fn test_run_without_webhook_is_config_error() {
    let app = wire_with(
        Arc::new(StubLlm::text_only("fact")),
        tools_with(Arc::new(FixedEvents::new(vec![]))),
        None,
        Arc::new(SeqIds::new()),
    );
    assert!(!app.daily_digest.has_webhook());
    let err = app.daily_digest.run().unwrap_err();
    assert!(matches!(err, Error::Env(_)));
    // compose だけなら webhook 無しでも動く（--once）
    assert!(app.daily_digest.compose().is_ok());
}
