//! 配線: AppConfig から標準アダプタを作り、ユースケースを組み立てる
//!
//! 標準アダプタは blocking クライアントを持つため、App の生成と破棄は tokio ランタイムの外で行う。

use std::future::Future;
use std::net::TcpListener;
use std::sync::Arc;

use anyhow::Context;
use common::error::Error;
use common::llm::{GeminiProvider, LlmDriver, LlmProvider};
use common::ports::outbound::IdGenerator;
use common::tool::ToolRegistry;

use crate::adapter::{
    router, run_daily_scheduler, serve, AppState, HistoricalEventTool, HttpWebhook, NinjasEventSource,
    UuidIdGenerator,
};
use crate::domain::AppConfig;
use crate::ports::inbound::{HandleA2ARequest, RunDailyDigest};
use crate::ports::outbound::{HistoricalEventSource, WebhookSink};
use crate::usecase::prompts::HISTORY_SYSTEM_INSTRUCTION;
use crate::usecase::{DailyDigestUseCase, HistoryAgentUseCase, ToolDispatch};

/// 組み立て済みのユースケース（HTTP ハンドラとスケジューラで共有）
#[derive(Clone)]
pub struct App {
    pub history_agent: Arc<HistoryAgentUseCase>,
    pub daily_digest: Arc<DailyDigestUseCase>,
}

/// get_historical_event だけを登録したレジストリ
pub fn history_tools(source: Arc<dyn HistoricalEventSource>) -> ToolRegistry {
    let mut tools = ToolRegistry::new();
    tools.register(Arc::new(HistoricalEventTool::new(source)));
    tools
}

/// 配線: 標準アダプタで App を組み立てる
pub fn wire_app(config: &AppConfig) -> Result<App, Error> {
    let provider: Arc<dyn LlmProvider> = Arc::new(GeminiProvider::new(
        config.gemini_model.clone(),
        config.gemini_api_key.clone(),
        &config.gemini_base_url,
        config.http_timeout,
    )?);
    let source: Arc<dyn HistoricalEventSource> = Arc::new(NinjasEventSource::new(
        &config.events_base_url,
        config.ninjas_api_key.clone(),
        config.http_timeout,
    )?);
    let webhook: Option<Arc<dyn WebhookSink>> = match &config.webhook {
        Some(webhook) => Some(Arc::new(HttpWebhook::new(webhook, config.http_timeout)?)),
        None => None,
    };
    Ok(wire_with(
        provider,
        history_tools(source),
        webhook,
        Arc::new(UuidIdGenerator),
    ))
}

/// 配線: 差し替え可能な部品から App を組み立てる
pub fn wire_with(
    provider: Arc<dyn LlmProvider>,
    tools: ToolRegistry,
    webhook: Option<Arc<dyn WebhookSink>>,
    ids: Arc<dyn IdGenerator>,
) -> App {
    let dispatch = Arc::new(ToolDispatch::new(
        LlmDriver::new(provider),
        tools,
        HISTORY_SYSTEM_INSTRUCTION,
    ));
    App {
        history_agent: Arc::new(HistoryAgentUseCase::new(Arc::clone(&dispatch), Arc::clone(&ids))),
        daily_digest: Arc::new(DailyDigestUseCase::new(dispatch, ids, webhook)),
    }
}

/// 専用の tokio ランタイムで HTTP サーバ（と日次スケジューラ）を shutdown まで動かす
///
/// schedule が None ならスケジューラは起動しない。戻った時点でランタイムは破棄済み。
pub fn serve_app<F>(
    app: &App,
    config: &AppConfig,
    listener: TcpListener,
    schedule: Option<cron::Schedule>,
    shutdown: F,
) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    listener
        .set_nonblocking(true)
        .context("failed to configure listener")?;
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to start tokio runtime")?;

    runtime.block_on(async {
        let listener = tokio::net::TcpListener::from_std(listener).context("failed to register listener")?;

        let (stop_tx, stop_rx) = tokio::sync::oneshot::channel::<()>();
        let scheduler = schedule.map(|schedule| {
            tracing::info!(cron = %config.daily_cron, "daily scheduler started");
            tokio::spawn(run_daily_scheduler(
                schedule,
                Arc::clone(&app.daily_digest) as Arc<dyn RunDailyDigest>,
                async move {
                    if stop_rx.await.is_err() {
                        tracing::debug!("scheduler stop handle dropped");
                    }
                },
            ))
        });

        let router = router(AppState::new(Arc::clone(&app.history_agent) as Arc<dyn HandleA2ARequest>), &config.well_known_dir);
        serve(listener, router, shutdown)
            .await
            .context("http server failed")?;

        if stop_tx.send(()).is_err() {
            tracing::debug!("daily scheduler already stopped");
        }
        if let Some(task) = scheduler {
            if let Err(e) = task.await {
                tracing::error!(error = %e, "daily scheduler task failed");
            }
        }
        Ok::<(), anyhow::Error>(())
    })
}
