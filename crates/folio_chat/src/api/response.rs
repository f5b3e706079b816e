use folio_chat_entity::{
    contact, conversation_turn, experience, introduction, knowledge_entry, project, prompt_example, skill_category,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::chat::session::SessionGroup;
use crate::chat::showcase::ResponseKind;

/// 问答响应
///
/// kind 是显式的回答类别；展示型回答同时在 answer 里保留哨兵串，
/// 兼容只认哨兵串的旧前端
#[derive(Serialize, ToSchema)]
pub struct AskResponse {
    pub answer: String,
    /// 当前会话 id，首轮由服务端铸造后返回
    pub session_id: String,
    pub kind: ResponseKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub projects: Option<Vec<ProjectInfo>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub experiences: Option<Vec<ExperienceInfo>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact: Option<ContactInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skills: Option<Vec<SkillCategoryInfo>>,
}

#[derive(Serialize, ToSchema)]
pub struct KnowledgeEntryInfo {
    pub id: i32,
    pub content: String,
    pub is_active: bool,
    pub created_at: String,
}

impl From<knowledge_entry::Model> for KnowledgeEntryInfo {
    fn from(model: knowledge_entry::Model) -> Self {
        Self {
            id: model.id,
            content: model.content,
            is_active: model.is_active,
            created_at: model.created_at,
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct ProjectInfo {
    pub id: i32,
    pub title: String,
    pub period: String,
    pub subtitle: String,
    pub summary: String,
    pub contents: Vec<String>,
    pub tech: String,
    pub image: String,
    pub more_link: Option<String>,
    pub width: String,
    pub detailed_content: Option<String>,
    pub display_order: i32,
}

impl From<project::Model> for ProjectInfo {
    fn from(model: project::Model) -> Self {
        let contents = model.content_lines();
        Self {
            id: model.id,
            title: model.title,
            period: model.period,
            subtitle: model.subtitle,
            summary: model.summary,
            contents,
            tech: model.tech,
            image: model.image,
            more_link: model.more_link,
            width: model.width,
            detailed_content: model.detailed_content,
            display_order: model.display_order,
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct ExperienceInfo {
    pub id: i32,
    pub company: String,
    pub position: String,
    pub period: String,
    pub location: String,
    pub description: Option<String>,
    pub responsibilities: Vec<String>,
    pub skills: Option<String>,
    pub website: Option<String>,
    pub detailed_content: Option<String>,
    pub display_order: i32,
}

impl From<experience::Model> for ExperienceInfo {
    fn from(model: experience::Model) -> Self {
        let responsibilities = model.responsibility_lines();
        Self {
            id: model.id,
            company: model.company,
            position: model.position,
            period: model.period,
            location: model.location,
            description: model.description,
            responsibilities,
            skills: model.skills,
            website: model.website,
            detailed_content: model.detailed_content,
            display_order: model.display_order,
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct IntroductionInfo {
    pub id: i32,
    pub name: String,
    pub title: String,
    pub location: String,
    pub experience: String,
    pub technologies: String,
    pub content: String,
    pub created_at: String,
}

impl From<introduction::Model> for IntroductionInfo {
    fn from(model: introduction::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            title: model.title,
            location: model.location,
            experience: model.experience,
            technologies: model.technologies,
            content: model.content,
            created_at: model.created_at,
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct PromptExampleInfo {
    pub id: i32,
    pub question: String,
    pub response_type: String,
    pub is_active: bool,
    pub display_order: i32,
}

impl From<prompt_example::Model> for PromptExampleInfo {
    fn from(model: prompt_example::Model) -> Self {
        Self {
            id: model.id,
            question: model.question,
            response_type: model.response_type,
            is_active: model.is_active,
            display_order: model.display_order,
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct ContactInfo {
    pub id: i32,
    pub email: String,
    pub phone: Option<String>,
    pub github: Option<String>,
    pub linkedin: Option<String>,
    pub location: Option<String>,
    pub created_at: String,
}

impl From<contact::Model> for ContactInfo {
    fn from(model: contact::Model) -> Self {
        Self {
            id: model.id,
            email: model.email,
            phone: model.phone,
            github: model.github,
            linkedin: model.linkedin,
            location: model.location,
            created_at: model.created_at,
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct SkillCategoryInfo {
    pub id: i32,
    pub name: String,
    pub items: Vec<String>,
    pub display_order: i32,
}

impl From<skill_category::Model> for SkillCategoryInfo {
    fn from(model: skill_category::Model) -> Self {
        let items = model.item_list();
        Self {
            id: model.id,
            name: model.name,
            items,
            display_order: model.display_order,
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct ConversationTurnInfo {
    pub id: i32,
    pub question: String,
    pub answer: String,
    pub session_id: Option<String>,
    pub created_at: String,
}

impl From<conversation_turn::Model> for ConversationTurnInfo {
    fn from(model: conversation_turn::Model) -> Self {
        Self {
            id: model.id,
            question: model.question,
            answer: model.answer,
            session_id: model.session_id,
            created_at: model.created_at,
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct SessionGroupInfo {
    pub session_id: Option<String>,
    pub label: String,
    pub turns: Vec<ConversationTurnInfo>,
}

impl From<SessionGroup> for SessionGroupInfo {
    fn from(group: SessionGroup) -> Self {
        Self {
            session_id: group.session_id,
            label: group.label,
            turns: group.turns.into_iter().map(ConversationTurnInfo::from).collect(),
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct DeleteResponse {
    pub deleted: u64,
}

#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}
