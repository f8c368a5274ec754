//! 実アダプタで組み立てた App を main と同じ手順（ランタイムの外で配線 → serve_app）で動かす

use axum::{Json, Router};
use common::adapter::MapEnvResolver;
use serde_json::{json, Value};

use crate::adapter::{load_app_config, parse_cron};
use crate::domain::AppConfig;
use crate::tests::support::spawn_stub_server;
use crate::wiring::{serve_app, wire_app};

/// テキストだけを返す Gemini と、何でも 200 を返す Webhook のスタブ
fn stub_config() -> AppConfig {
    let gemini = spawn_stub_server(Router::new().fallback(|| async {
        Json(json!({"candidates": [{"content": {"role": "model", "parts": [{"text": "Hello from history!"}]}}]}))
    }));
    let webhook = spawn_stub_server(Router::new().fallback(|| async { Json(json!({})) }));
    load_app_config(&MapEnvResolver::new(vec![
        ("GEMINI_API_KEY", "g-key".to_string()),
        ("NINJAS_API_KEY", "n-key".to_string()),
        ("GEMINI_BASE_URL", format!("http://{}", gemini)),
        ("WEBHOOK_URL", format!("http://{}/hooks", webhook)),
    ]))
    .unwrap()
}

#[test]
fn test_real_wiring_serves_requests() {
    let config = stub_config();
    let app = wire_app(&config).unwrap();
    assert!(app.daily_digest.has_webhook());

    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let schedule = parse_cron(&config.daily_cron).unwrap();
    let (stop_tx, stop_rx) = tokio::sync::oneshot::channel::<()>();
    let (app_ref, config_ref) = (&app, &config);

    std::thread::scope(|s| {
        let server = s.spawn(move || {
            serve_app(app_ref, config_ref, listener, Some(schedule), async move {
                stop_rx.await.ok();
            })
        });

        let client = reqwest::blocking::Client::new();
        let health: Value = client
            .get(format!("http://{addr}/health"))
            .send()
            .unwrap()
            .json()
            .unwrap();
        assert_eq!(health, json!({"status": "ok"}));

        let resp = client
            .post(format!("http://{addr}/history_agent"))
            .json(&json!({
                "jsonrpc": "2.0",
                "id": 1,
                "method": "message/send",
                "params": {"message": {"role": "user", "parts": [{"kind": "text", "text": "hi"}]}}
            }))
            .send()
            .unwrap();
        assert_eq!(resp.status().as_u16(), 200);
        let body: Value = resp.json().unwrap();
        assert_eq!(body["result"]["parts"][0]["text"], "Hello from history!");

        stop_tx.send(()).unwrap();
        server.join().unwrap().unwrap();
    });

    // ランタイム停止後、App の破棄もランタイムの外で行われる
    drop(app);
}
