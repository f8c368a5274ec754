//! テスト用: 台本どおりの応答を順に返す LlmProvider 実装


#[cfg(test)]
pub use stub::StubLlm;
