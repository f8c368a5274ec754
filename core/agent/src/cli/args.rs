use clap::builder::ArgAction;
use clap::value_parser;
use common::error::Error;
use std::path::PathBuf;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Config {
    pub help: bool,
    /// --env-file: 読み込む env ファイル（未指定なら app.env があれば読む）
    pub env_file: Option<PathBuf>,
    /// -p / --port: PORT より優先する待ち受けポート
    pub port: Option<u16>,
    /// --no-scheduler: WEBHOOK_URL があっても日次スケジューラを起動しない
    pub no_scheduler: bool,
    /// --once: 日次ダイジェストを 1 回生成して標準出力に出し、終了する
    pub once: bool,
    /// -v / --verbose: 既定のログレベルを debug にする
    pub verbose: bool,
}

fn build_clap_command() -> clap::Command {
    clap::Command::new("history-agent")
        .about("Serve the history assistant over JSON-RPC and post a daily digest")
        .disable_help_flag(true)
        .arg(
            clap::Arg::new("help")
                .short('h')
                .long("help")
                .help("Show this help message")
                .action(ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("env-file")
                .long("env-file")
                .value_name("path")
                .help("Load environment variables from this file (default: app.env if present)")
                .value_parser(value_parser!(PathBuf))
                .num_args(1),
        )
        .arg(
            clap::Arg::new("port")
                .short('p')
                .long("port")
                .value_name("port")
                .help("Listen on this port (overrides PORT)")
                .value_parser(value_parser!(u16))
                .num_args(1),
        )
        .arg(
            clap::Arg::new("no-scheduler")
                .long("no-scheduler")
                .help("Do not start the daily webhook scheduler")
                .action(ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("once")
                .long("once")
                .help("Generate the daily digest once, print it and exit")
                .action(ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Emit debug logs to stderr (RUST_LOG takes precedence)")
                .action(ArgAction::SetTrue),
        )
}

fn matches_to_config(matches: &clap::ArgMatches) -> Config {
    Config {
        help: matches.get_flag("help"),
        env_file: matches.get_one::<PathBuf>("env-file").cloned(),
        port: matches.get_one::<u16>("port").copied(),
        no_scheduler: matches.get_flag("no-scheduler"),
        once: matches.get_flag("once"),
        verbose: matches.get_flag("verbose"),
    }
}

/// コマンドラインを解析する
pub fn parse_args() -> Result<Config, Error> {
    let matches = build_clap_command()
        .try_get_matches()
        .map_err(|e| Error::invalid_argument(e.to_string()))?;
    Ok(matches_to_config(&matches))
}

/// テスト用: 引数スライスから解析する
#[allow(dead_code)]
pub fn parse_args_from(args: &[String]) -> Result<Config, Error> {
    let matches = build_clap_command()
        .try_get_matches_from(args)
        .map_err(|e| Error::invalid_argument(e.to_string()))?;
    Ok(matches_to_config(&matches))
}

/// ヘルプ文字列（clap の自動生成）
pub fn help_text() -> String {
    build_clap_command().render_help().to_string()
}
