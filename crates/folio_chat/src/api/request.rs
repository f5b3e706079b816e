use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

use crate::chat::session::HistoryTurn;

fn default_true() -> bool {
    true
}

/// 提问请求
#[derive(Deserialize, ToSchema)]
pub struct AskRequest {
    pub question: String,
    /// 服务端铸造的会话 id，首轮不带
    pub session_id: Option<String>,
    /// 点击预设问题按钮时由前端附带，手动输入时必须缺省
    pub prompt_example_id: Option<i32>,
    /// 客户端侧本会话的历史，缺省时从数据库按会话 id 取
    pub session_history: Option<Vec<HistoryTurnPayload>>,
}

#[derive(Deserialize, ToSchema)]
pub struct HistoryTurnPayload {
    pub question: String,
    pub answer: String,
}

impl From<HistoryTurnPayload> for HistoryTurn {
    fn from(payload: HistoryTurnPayload) -> Self {
        HistoryTurn {
            question: payload.question,
            answer: payload.answer,
        }
    }
}

/// 分组查询参数
#[derive(Deserialize, IntoParams)]
pub struct GroupedConversationsQuery {
    /// asc 或 desc，缺省 desc
    pub order: Option<String>,
    /// 是否隐藏展示型回答
    pub hide_showcase: Option<bool>,
}

#[derive(Deserialize, ToSchema)]
pub struct CreateKnowledgeEntryRequest {
    pub content: String,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

#[derive(Deserialize, ToSchema)]
pub struct UpdateKnowledgeEntryRequest {
    pub content: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Deserialize, ToSchema)]
pub struct CreateProjectRequest {
    pub title: String,
    pub period: String,
    pub subtitle: String,
    pub summary: String,
    #[serde(default)]
    pub contents: Vec<String>,
    pub tech: String,
    pub image: String,
    pub more_link: Option<String>,
    pub width: Option<String>,
    pub detailed_content: Option<String>,
    #[serde(default)]
    pub display_order: i32,
}

#[derive(Deserialize, ToSchema)]
pub struct UpdateProjectRequest {
    pub title: Option<String>,
    pub period: Option<String>,
    pub subtitle: Option<String>,
    pub summary: Option<String>,
    pub contents: Option<Vec<String>>,
    pub tech: Option<String>,
    pub image: Option<String>,
    pub more_link: Option<String>,
    pub width: Option<String>,
    pub detailed_content: Option<String>,
    pub display_order: Option<i32>,
}

#[derive(Deserialize, ToSchema)]
pub struct CreateExperienceRequest {
    pub company: String,
    pub position: String,
    pub period: String,
    pub location: String,
    pub description: Option<String>,
    pub responsibilities: Option<Vec<String>>,
    pub skills: Option<String>,
    pub website: Option<String>,
    pub detailed_content: Option<String>,
    #[serde(default)]
    pub display_order: i32,
}

#[derive(Deserialize, ToSchema)]
pub struct UpdateExperienceRequest {
    pub company: Option<String>,
    pub position: Option<String>,
    pub period: Option<String>,
    pub location: Option<String>,
    pub description: Option<String>,
    pub responsibilities: Option<Vec<String>>,
    pub skills: Option<String>,
    pub website: Option<String>,
    pub detailed_content: Option<String>,
    pub display_order: Option<i32>,
}

#[derive(Deserialize, ToSchema)]
pub struct CreatePromptExampleRequest {
    pub question: String,
    /// ai / projects / experiences / contacts / skills / introduction
    pub response_type: String,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub display_order: i32,
}

#[derive(Deserialize, ToSchema)]
pub struct UpdatePromptExampleRequest {
    pub question: Option<String>,
    pub response_type: Option<String>,
    pub is_active: Option<bool>,
    pub display_order: Option<i32>,
}

/// 自我介绍只追加新版本，不做原地更新
#[derive(Deserialize, ToSchema)]
pub struct CreateIntroductionRequest {
    pub name: String,
    pub title: String,
    pub location: String,
    pub experience: String,
    pub technologies: String,
    pub content: String,
}

/// 联系方式只追加新版本，不做原地更新
#[derive(Deserialize, ToSchema)]
pub struct CreateContactRequest {
    pub email: String,
    pub phone: Option<String>,
    pub github: Option<String>,
    pub linkedin: Option<String>,
    pub location: Option<String>,
}

#[derive(Deserialize, ToSchema)]
pub struct CreateSkillCategoryRequest {
    pub name: String,
    #[serde(default)]
    pub items: Vec<String>,
    #[serde(default)]
    pub display_order: i32,
}

#[derive(Deserialize, ToSchema)]
pub struct UpdateSkillCategoryRequest {
    pub name: Option<String>,
    pub items: Option<Vec<String>>,
    pub display_order: Option<i32>,
}
