mod adapter;
mod cli;
mod domain;
mod ports;
mod usecase;
mod wiring;

#[cfg(test)]
mod tests;

use std::net::TcpListener;
use std::process;

use anyhow::Context;
use common::adapter::StdEnvResolver;
use common::error::Error;
use tracing_subscriber::EnvFilter;

use adapter::{load_app_config, load_env_file, parse_cron};
use cli::{help_text, parse_args};
use ports::inbound::RunDailyDigest;
use wiring::{serve_app, wire_app};

fn main() {
    let exit_code = match run() {
        Ok(code) => code,
        Err(e) => {
            let message = format!("{:#}", e);
            tracing::error!(error = %message, "history-agent failed");
            eprintln!("history-agent: {}", message);
            e.downcast_ref::<Error>().map(Error::exit_code).unwrap_or(1)
        }
    };
    process::exit(exit_code);
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    if let Err(e) = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
    {
        eprintln!("history-agent: logging is not available: {}", e);
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for Ctrl-C; running until killed");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown requested");
}

/// 設定を読み、App を組み立ててから（ランタイムの外）サーバを動かす
fn run() -> anyhow::Result<i32> {
    let args = parse_args()?;
    if args.help {
        print!("{}", help_text());
        return Ok(0);
    }
    init_tracing(args.verbose);

    if let Some(path) = load_env_file(args.env_file.as_deref())? {
        tracing::info!(path = %path.display(), "loaded env file");
    }
    let mut config = load_app_config(&StdEnvResolver)?;
    if let Some(port) = args.port {
        config.port = port;
    }
    let app = wire_app(&config)?;

    if args.once {
        let envelope = app.daily_digest.compose()?;
        println!("{}", serde_json::to_string_pretty(&envelope)?);
        return Ok(0);
    }

    let schedule = if args.no_scheduler {
        tracing::info!("daily scheduler disabled by --no-scheduler");
        None
    } else if !app.daily_digest.has_webhook() {
        tracing::info!("WEBHOOK_URL is not set; daily scheduler disabled");
        None
    } else {
        Some(parse_cron(&config.daily_cron)?)
    };

    let listener = TcpListener::bind(("0.0.0.0", config.port))
        .with_context(|| format!("failed to bind port {}", config.port))?;
    serve_app(&app, &config, listener, schedule, shutdown_signal())?;
    Ok(0)
}
