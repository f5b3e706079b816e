//! AI 问答核心模块
//!
//! 提供作品集站点的问答能力，包括：
//! - 提示词拼装（composer）
//! - 展示型回答路由（showcase）
//! - 会话与历史管理（session）
//! - 补全服务客户端（provider）
//! - 回答翻译与访客语言检测（translate / language）

pub mod composer;
pub mod language;
pub mod provider;
pub mod session;
pub mod showcase;
pub mod translate;

pub use provider::{CompletionProvider, OpenAiCompatProvider};

/// 上游失败时给访客的兜底文案，不暴露内部错误
pub const FALLBACK_ANSWER: &str =
    "Sorry, I couldn't come up with an answer just now. Please try again in a moment.";
