//! LLMドライバーとプロバイダの実装
//!
//! プロバイダ固有の形式（Gemini の contents / functionCall 等）は provider 側で吸収する。

pub mod driver;
pub mod gemini;
pub mod provider;

pub use driver::LlmDriver;
pub use gemini::GeminiProvider;
pub use provider::{LlmProvider, LlmResponse, Message, ToolCallSpec};
