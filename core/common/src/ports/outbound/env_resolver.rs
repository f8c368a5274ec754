//! 環境変数解決 Outbound ポート
//!
//! 設定の読み込みはこの trait 経由でのみ環境変数にアクセスする。
//! 起動時に 1 回だけ使い、リクエスト処理中には読まない。

/// 環境変数解決抽象（Outbound ポート）
///
/// 実装は `common::adapter::StdEnvResolver` やテスト用の `MapEnvResolver` など。
pub trait EnvResolver: Send + Sync {
    /// 変数の値。未設定または空文字なら None
    fn var(&self, name: &str) -> Option<String>;

    /// 必須変数。未設定なら `Error::Env`
    fn required(&self, name: &str) -> Result<String, crate::error::Error> {
        self.var(name)
            .ok_or_else(|| crate::error::Error::env(format!("{} environment variable is not set", name)))
    }
}
