//! ユースケース・HTTP 層のテスト（スタブポート・ローカル HTTP サーバを使う）

mod support;

mod daily_digest_tests;
mod wiring_tests;
