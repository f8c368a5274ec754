//! 起動時の設定読み込み
//!
//! `.env` 形式のファイルをプロセス環境に流し込み、EnvResolver 経由で AppConfig を組み立てる。
//! 値の検証（cron 式・ポート・タイムアウト）もここで済ませ、起動後は読み直さない。

use crate::adapter::ninjas_event_source::DEFAULT_EVENTS_BASE_URL;
use crate::domain::{AppConfig, WebhookConfig};
use common::domain::{ModelName, Secret};
use common::error::Error;
use common::llm::gemini::{DEFAULT_BASE_URL as DEFAULT_GEMINI_BASE_URL, DEFAULT_MODEL};
use common::ports::outbound::EnvResolver;
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_ENV_FILE: &str = "app.env";
pub const DEFAULT_DAILY_CRON: &str = "0 0 7 * * *";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_WELL_KNOWN_DIR: &str = "./.well-known";

/// env ファイルを読み込む
///
/// `explicit` が None なら `app.env` を試し、無ければ何もしない。明示指定のファイルが無いのはエラー。
/// 既にプロセス環境にある変数は上書きしない。読み込んだパスを返す。
pub fn load_env_file(explicit: Option<&Path>) -> Result<Option<PathBuf>, Error> {
    let (path, required) = match explicit {
        Some(p) => (p.to_path_buf(), true),
        None => (PathBuf::from(DEFAULT_ENV_FILE), false),
    };
    match dotenvy::from_path(&path) {
        Ok(()) => Ok(Some(path)),
        Err(dotenvy::Error::Io(e)) if e.kind() == io::ErrorKind::NotFound && !required => Ok(None),
        Err(e) => Err(Error::env(format!(
            "failed to load env file {}: {}",
            path.display(),
            e
        ))),
    }
}

fn or_default(env: &dyn EnvResolver, name: &str, default: &str) -> String {
    env.var(name).unwrap_or_else(|| default.to_string())
}

fn parse_port(raw: &str) -> Result<u16, Error> {
    raw.trim()
        .parse::<u16>()
        .map_err(|_| Error::env(format!("PORT must be a port number, got {:?}", raw)))
}

fn parse_timeout(raw: &str) -> Result<Duration, Error> {
    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(Error::env(format!(
            "HTTP_TIMEOUT_SECS must be a positive integer, got {:?}",
            raw
        ))),
    }
}

/// cron 式として読めるか
pub fn parse_cron(expr: &str) -> Result<cron::Schedule, Error> {
    cron::Schedule::from_str(expr)
        .map_err(|e| Error::env(format!("DAILY_CRON {:?} is not a valid cron expression: {}", expr, e)))
}

/// 環境変数から AppConfig を作る
pub fn load_app_config(env: &dyn EnvResolver) -> Result<AppConfig, Error> {
    let gemini_api_key = Secret::new(env.required("GEMINI_API_KEY")?);
    let ninjas_api_key = Secret::new(env.required("NINJAS_API_KEY")?);

    let webhook = env.var("WEBHOOK_URL").map(|url| WebhookConfig {
        url,
        token: env.var("WEBHOOK_TOKEN").map(Secret::new),
    });

    let daily_cron = or_default(env, "DAILY_CRON", DEFAULT_DAILY_CRON);
    parse_cron(&daily_cron)?;

    let port = match env.var("PORT") {
        Some(raw) => parse_port(&raw)?,
        None => DEFAULT_PORT,
    };
    let http_timeout = match env.var("HTTP_TIMEOUT_SECS") {
        Some(raw) => parse_timeout(&raw)?,
        None => Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
    };

    Ok(AppConfig {
        gemini_api_key,
        gemini_model: ModelName::new(or_default(env, "GEMINI_MODEL", DEFAULT_MODEL)),
        gemini_base_url: or_default(env, "GEMINI_BASE_URL", DEFAULT_GEMINI_BASE_URL),
        ninjas_api_key,
        events_base_url: or_default(env, "EVENTS_BASE_URL", DEFAULT_EVENTS_BASE_URL),
        webhook,
        daily_cron,
        port,
        http_timeout,
        well_known_dir: PathBuf::from(or_default(env, "WELL_KNOWN_DIR", DEFAULT_WELL_KNOWN_DIR)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::adapter::MapEnvResolver;
    use std::io::Write;

    fn required_only() -> Vec<(&'static str, &'static str)> {
        vec![("GEMINI_API_KEY", "g-key"), ("NINJAS_API_KEY", "n-key")]
    }

    #[test]
    fn test_defaults() {
        let config = load_app_config(&MapEnvResolver::new(required_only())).unwrap();
        assert_eq!(config.gemini_api_key.expose(), "g-key");
        assert_eq!(config.ninjas_api_key.expose(), "n-key");
        assert_eq!(&*config.gemini_model, DEFAULT_MODEL);
        assert_eq!(config.events_base_url, DEFAULT_EVENTS_BASE_URL);
        assert_eq!(config.daily_cron, DEFAULT_DAILY_CRON);
        assert_eq!(config.port, 8080);
        assert_eq!(config.http_timeout, Duration::from_secs(30));
        assert_eq!(config.well_known_dir, PathBuf::from("./.well-known"));
        assert!(config.webhook.is_none());
    }

    #[test]
    fn test_missing_required_key_is_env_error() {
        let err = load_app_config(&MapEnvResolver::new(vec![("GEMINI_API_KEY", "g")])).unwrap_err();
        assert!(matches!(err, Error::Env(_)));
        assert!(err.to_string().contains("NINJAS_API_KEY"));
        assert_eq!(err.exit_code(), 78);
    }

    #[test]
    fn test_overrides_and_webhook() {
        let mut vars = required_only();
        vars.extend([
            ("GEMINI_MODEL", "gemini-2.0-flash"),
            ("WEBHOOK_URL", "https://hooks.example.com/daily"),
            ("WEBHOOK_TOKEN", "t0k"),
            ("DAILY_CRON", "0 30 6 * * *"),
            ("PORT", "9090"),
            ("HTTP_TIMEOUT_SECS", "5"),
        ]);
        let config = load_app_config(&MapEnvResolver::new(vars)).unwrap();
        assert_eq!(&*config.gemini_model, "gemini-2.0-flash");
        assert_eq!(config.port, 9090);
        assert_eq!(config.http_timeout, Duration::from_secs(5));
        let webhook = config.webhook.unwrap();
        assert_eq!(webhook.url, "https://hooks.example.com/daily");
        assert_eq!(webhook.token.unwrap().expose(), "t0k");
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        for (name, value) in [
            ("PORT", "http"),
            ("PORT", "70000"),
            ("HTTP_TIMEOUT_SECS", "0"),
            ("DAILY_CRON", "every morning"),
        ] {
            let mut vars = required_only();
            vars.push((name, value));
            let err = load_app_config(&MapEnvResolver::new(vars)).unwrap_err();
            assert!(matches!(err, Error::Env(_)), "{}={}", name, value);
        }
    }

    #[test]
    fn test_missing_explicit_env_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_env_file(Some(&dir.path().join("nope.env"))).unwrap_err();
        assert!(matches!(err, Error::Env(_)));
    }

    #[test]
    fn test_explicit_env_file_is_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test.env");
        let mut f = std::fs::File::create(&path).unwrap();
        writeln!(f, "HISTORY_AGENT_CONFIG_TEST_VAR=loaded").unwrap();
        drop(f);

        let loaded = load_env_file(Some(&path)).unwrap();
        assert_eq!(loaded.as_deref(), Some(path.as_path()));
        assert_eq!(
            std::env::var("HISTORY_AGENT_CONFIG_TEST_VAR").as_deref(),
            Ok("loaded")
        );
    }
}
