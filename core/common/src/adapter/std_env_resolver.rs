//! 標準環境変数解決実装（std::env を委譲）とテスト用のマップ実装

use crate::ports::outbound::EnvResolver;
use std::collections::HashMap;
use std::env;

/// 標準環境変数解決実装
#[derive(Debug, Clone, Default)]
pub struct StdEnvResolver;

impl EnvResolver for StdEnvResolver {
    fn var(&self, name: &str) -> Option<String> {
        env::var(name).ok().filter(|s| !s.trim().is_empty())
    }
}

/// 固定のキー・値から解決する実装（テスト・組み込み用）
#[derive(Debug, Clone, Default)]
pub struct MapEnvResolver {
    vars: HashMap<String, String>,
}

impl MapEnvResolver {
    pub fn new<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: vars.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

impl EnvResolver for MapEnvResolver {
    fn var(&self, name: &str) -> Option<String> {
        self.vars
            .get(name)
            .filter(|s| !s.trim().is_empty())
            .cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_map_resolver_treats_blank_as_unset() {
        let env = MapEnvResolver::new([("A", "1"), ("B", "  ")]);
        assert_eq!(env.var("A").as_deref(), Some("1"));
        assert!(env.var("B").is_none());
        assert!(env.var("C").is_none());
    }

    #[test]
    fn test_required_reports_variable_name() {
        let env = MapEnvResolver::default();
        let err = env.required("GEMINI_API_KEY").unwrap_err();
        assert!(matches!(err, Error::Env(ref m) if m.contains("GEMINI_API_KEY")));
    }
}
