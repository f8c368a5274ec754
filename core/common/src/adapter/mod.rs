//! アダプター（外界の I/O を trait で抽象化）
//!
//! usecase はポートの trait 経由でのみ環境変数等に触れる。

pub mod std_env_resolver;

pub use std_env_resolver::{MapEnvResolver, StdEnvResolver};
