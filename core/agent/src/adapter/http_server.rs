//! HTTP Inbound アダプタ（axum）
//!
//! - `POST /history_agent`: 本文を A2ARequest として読み、HandleA2ARequest に渡す
//! - `GET /health`: 生存確認
//! - `/.well-known/*`: エージェントカード等の静的ファイル
//!
//! ユースケースは同期（blocking HTTP を含む）なので spawn_blocking で実行する。

use crate::domain::a2a::JsonRpcError;
use crate::domain::{A2ARequest, A2AResponse};
use crate::ports::inbound::{A2AReply, HandleA2ARequest, ReplyStatus};
use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use std::future::Future;
use std::path::Path;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::services::ServeDir;

#[derive(Clone)]
pub struct AppState {
    handler: Arc<dyn HandleA2ARequest>,
}

impl AppState {
    pub fn new(handler: Arc<dyn HandleA2ARequest>) -> Self {
        Self { handler }
    }
}

/// ルーティングを組み立てる
pub fn router(state: AppState, well_known_dir: &Path) -> Router {
    Router::new()
        .route("/history_agent", post(history_agent))
        .route("/health", get(health))
        .nest_service("/.well-known", ServeDir::new(well_known_dir))
        .with_state(state)
}

/// shutdown が完了するまでリクエストを受け付ける
pub async fn serve<F>(listener: TcpListener, router: Router, shutdown: F) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    if let Ok(addr) = listener.local_addr() {
        tracing::info!(%addr, "listening");
    }
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown)
        .await
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

async fn history_agent(State(state): State<AppState>, body: Bytes) -> Response {
    let request: A2ARequest = match serde_json::from_slice(&body) {
        Ok(request) => request,
        Err(e) => {
            tracing::warn!(error = %e, "request body is not a JSON-RPC envelope");
            // 本文が JSON としては読めるなら id だけは拾って返す
            let id = serde_json::from_slice::<Value>(&body)
                .ok()
                .and_then(|v| v.get("id").cloned())
                .unwrap_or(Value::Null);
            return into_response(A2AReply {
                status: ReplyStatus::BadRequest,
                body: A2AResponse::error(id, JsonRpcError::parse_error()),
            });
        }
    };

    let id = request.id.clone();
    let handler = Arc::clone(&state.handler);
    let reply = match tokio::task::spawn_blocking(move || handler.handle(request)).await {
        Ok(reply) => reply,
        Err(e) => {
            tracing::error!(error = %e, "request handler panicked");
            A2AReply {
                status: ReplyStatus::InternalError,
                body: A2AResponse::error(id, JsonRpcError::internal()),
            }
        }
    };
    into_response(reply)
}

fn into_response(reply: A2AReply) -> Response {
    let status = StatusCode::from_u16(reply.status.http_code())
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(reply.body)).into_response()
}
