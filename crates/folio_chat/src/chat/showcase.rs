//! 展示型回答路由
//!
//! 只有显式携带 prompt_example_id 的请求才可能走展示型短路，
//! 手动输入的相同文字一律交给提示词拼装。哨兵串保留在 answer 字段里，
//! 历史浏览侧可以直接按子串过滤，不需要重新分类。

use folio_chat_entity::prompt_example;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// 展示型回答的哨兵串（与历史数据的线上格式保持兼容）
pub const PROJECT_SHOWCASE: &str = "PROJECT_SHOWCASE";
pub const EXPERIENCE_SHOWCASE: &str = "EXPERIENCE_SHOWCASE";
pub const CONTACT_SHOWCASE: &str = "CONTACT_SHOWCASE";
pub const SKILL_SHOWCASE: &str = "SKILL_SHOWCASE";

const ALL_SENTINELS: &[&str] = &[PROJECT_SHOWCASE, EXPERIENCE_SHOWCASE, CONTACT_SHOWCASE, SKILL_SHOWCASE];

/// 回答类别，随响应一并返回（哨兵串之外的显式标记）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ResponseKind {
    /// 普通 AI 生成回答
    Ai,
    Projects,
    Experiences,
    Contacts,
    Skills,
    Introduction,
}

impl From<&str> for ResponseKind {
    fn from(value: &str) -> Self {
        match value {
            "projects" => ResponseKind::Projects,
            "experiences" => ResponseKind::Experiences,
            "contacts" => ResponseKind::Contacts,
            "skills" => ResponseKind::Skills,
            "introduction" => ResponseKind::Introduction,
            _ => ResponseKind::Ai, // 未知类型按普通回答处理
        }
    }
}

impl ResponseKind {
    /// 展示型类别对应的哨兵串，普通回答和自我介绍没有
    pub fn sentinel(&self) -> Option<&'static str> {
        match self {
            ResponseKind::Projects => Some(PROJECT_SHOWCASE),
            ResponseKind::Experiences => Some(EXPERIENCE_SHOWCASE),
            ResponseKind::Contacts => Some(CONTACT_SHOWCASE),
            ResponseKind::Skills => Some(SKILL_SHOWCASE),
            ResponseKind::Ai | ResponseKind::Introduction => None,
        }
    }
}

/// 根据 id 解析出的预设问题决定回答类别
///
/// 传 None 表示没带 id 或 id 不存在，一律落回普通 AI 路径
pub fn classify(example: Option<&prompt_example::Model>) -> ResponseKind {
    match example {
        Some(example) => ResponseKind::from(example.response_type.as_str()),
        None => ResponseKind::Ai,
    }
}

/// 检查回答是否带任一展示型哨兵串
pub fn is_showcase_answer(answer: &str) -> bool {
    ALL_SENTINELS.iter().any(|sentinel| answer.contains(sentinel))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn example(response_type: &str) -> prompt_example::Model {
        prompt_example::Model {
            id: 1,
            question: "Tell me about your projects".to_string(),
            response_type: response_type.to_string(),
            is_active: true,
            display_order: 0,
        }
    }

    #[test]
    fn test_classify_by_response_type() {
        assert_eq!(classify(Some(&example("projects"))), ResponseKind::Projects);
        assert_eq!(classify(Some(&example("experiences"))), ResponseKind::Experiences);
        assert_eq!(classify(Some(&example("contacts"))), ResponseKind::Contacts);
        assert_eq!(classify(Some(&example("skills"))), ResponseKind::Skills);
        assert_eq!(classify(Some(&example("introduction"))), ResponseKind::Introduction);
        assert_eq!(classify(Some(&example("ai"))), ResponseKind::Ai);
    }

    #[test]
    fn test_missing_example_falls_back_to_ai() {
        // 没带 id 或 id 查不到，都走普通 AI 路径
        assert_eq!(classify(None), ResponseKind::Ai);
    }

    #[test]
    fn test_unknown_response_type_falls_back_to_ai() {
        assert_eq!(classify(Some(&example("something_new"))), ResponseKind::Ai);
    }

    #[test]
    fn test_sentinel_mapping() {
        assert_eq!(ResponseKind::Projects.sentinel(), Some(PROJECT_SHOWCASE));
        assert_eq!(ResponseKind::Experiences.sentinel(), Some(EXPERIENCE_SHOWCASE));
        assert_eq!(ResponseKind::Ai.sentinel(), None);
        assert_eq!(ResponseKind::Introduction.sentinel(), None);
    }

    #[test]
    fn test_is_showcase_answer() {
        assert!(is_showcase_answer(PROJECT_SHOWCASE));
        assert!(is_showcase_answer("EXPERIENCE_SHOWCASE"));
        assert!(!is_showcase_answer("A normal AI answer about projects"));
        assert!(!is_showcase_answer(""));
    }
}
