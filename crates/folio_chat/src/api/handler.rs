use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::{ConnectInfo, Extension, Json, Path, Query};
use axum::http::HeaderMap;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryFilter, QueryOrder, Set,
};
use tracing::{info, warn};
use utoipa::OpenApi;

use folio_chat_entity::{
    contact, conversation_turn, experience, introduction, knowledge_entry, project, prompt_example, skill_category,
};

use crate::api::error::InnerApiError;
use crate::api::request::{
    AskRequest, CreateContactRequest, CreateExperienceRequest, CreateIntroductionRequest,
    CreateKnowledgeEntryRequest, CreateProjectRequest, CreatePromptExampleRequest, CreateSkillCategoryRequest,
    GroupedConversationsQuery, UpdateExperienceRequest, UpdateKnowledgeEntryRequest, UpdateProjectRequest,
    UpdatePromptExampleRequest, UpdateSkillCategoryRequest,
};
use crate::api::response::{
    AskResponse, ContactInfo, ConversationTurnInfo, DeleteResponse, ExperienceInfo, HealthResponse, IntroductionInfo,
    KnowledgeEntryInfo, ProjectInfo, PromptExampleInfo, SessionGroupInfo, SkillCategoryInfo,
};
use crate::api::wrapper::{ApiError, ApiResponse};
use crate::chat::composer::{build_system_prompt, validate_question, PromptSources};
use crate::chat::language::{GeoLanguageDetector, LanguageCode};
use crate::chat::session::{
    fetch_history, group_sessions, mint_session_id, record_turn, window_history, GroupOrder, HistoryTurn,
    HISTORY_WINDOW,
};
use crate::chat::showcase::{classify, ResponseKind};
use crate::chat::translate::{translate_answer, translate_many};
use crate::chat::{CompletionProvider, FALLBACK_ANSWER};
use crate::config::Config;
use crate::utils::rate_limit::RateLimiter;
use crate::utils::time_format::now_standard_string;

/// 预设问题合法的 response_type 取值
const VALID_RESPONSE_TYPES: &[&str] = &["ai", "projects", "experiences", "contacts", "skills", "introduction"];

#[derive(OpenApi)]
#[openapi(
    paths(
        health,
        ask,
        get_conversations,
        get_grouped_conversations,
        delete_conversations,
        get_knowledge_entries,
        get_active_knowledge_entries,
        create_knowledge_entry,
        update_knowledge_entry,
        delete_knowledge_entry,
        get_projects,
        create_project,
        update_project,
        delete_project,
        get_experiences,
        create_experience,
        update_experience,
        delete_experience,
        get_prompt_examples,
        get_active_prompt_examples,
        create_prompt_example,
        update_prompt_example,
        delete_prompt_example,
        get_introduction,
        create_introduction,
        get_contact,
        create_contact,
        get_skill_categories,
        create_skill_category,
        update_skill_category,
        delete_skill_category,
    )
)]
pub struct ApiDoc;

/// 提取访客标识：优先取反向代理写入的头，退回 TCP 对端地址
fn client_ip(headers: &HeaderMap, addr: SocketAddr) -> String {
    if let Some(forwarded) = headers.get("x-forwarded-for").and_then(|v| v.to_str().ok()) {
        if let Some(first) = forwarded.split(',').next() {
            let trimmed = first.trim();
            if !trimmed.is_empty() {
                return trimmed.to_string();
            }
        }
    }
    if let Some(real_ip) = headers.get("x-real-ip").and_then(|v| v.to_str().ok()) {
        let trimmed = real_ip.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }
    addr.ip().to_string()
}

/// 组装问答响应：展示型回答的 answer 固定为对应哨兵串
fn assemble_ask_response(
    kind: ResponseKind,
    session_id: String,
    plain_answer: String,
    projects: Option<Vec<ProjectInfo>>,
    experiences: Option<Vec<ExperienceInfo>>,
    contact: Option<ContactInfo>,
    skills: Option<Vec<SkillCategoryInfo>>,
) -> AskResponse {
    let answer = kind.sentinel().map(|s| s.to_string()).unwrap_or(plain_answer);
    AskResponse {
        answer,
        session_id,
        kind,
        projects,
        experiences,
        contact,
        skills,
    }
}

/// 健康检查
#[utoipa::path(
    get,
    path = "/api/health",
    responses(
        (status = 200, body = ApiResponse<HealthResponse>),
    )
)]
pub async fn health() -> Result<ApiResponse<HealthResponse>, ApiError> {
    Ok(ApiResponse::ok(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    }))
}

/// 提问接口：展示型短路或普通 AI 回答
#[utoipa::path(
    post,
    path = "/api/ask",
    request_body = AskRequest,
    responses(
        (status = 200, body = ApiResponse<AskResponse>),
        (status = 400, description = "问题为空或超长"),
        (status = 429, description = "触发限流"),
    )
)]
#[allow(clippy::too_many_arguments)]
pub async fn ask(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Extension(config): Extension<Arc<Config>>,
    Extension(limiter): Extension<Arc<RateLimiter>>,
    Extension(provider): Extension<Arc<dyn CompletionProvider>>,
    Extension(detector): Extension<Arc<GeoLanguageDetector>>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    Json(payload): Json<AskRequest>,
) -> Result<ApiResponse<AskResponse>, ApiError> {
    // 先校验再碰任何协作方
    validate_question(&payload.question).map_err(InnerApiError::BadRequest)?;

    let ip = client_ip(&headers, addr);
    if !limiter.allow(&ip) {
        return Err(InnerApiError::RateLimited {
            remaining: limiter.remaining(&ip),
            reset_at: limiter.reset_at(&ip).to_rfc3339(),
        }
        .into());
    }

    // 首轮铸造会话 id，之后客户端带回
    let session_id = match payload.session_id.as_deref().filter(|s| !s.trim().is_empty()) {
        Some(existing) => existing.to_string(),
        None => mint_session_id(),
    };

    // 只认显式传入的 id，不做问题文本匹配
    let example = match payload.prompt_example_id {
        Some(id) => prompt_example::Entity::find_by_id(id).one(db.as_ref()).await?,
        None => None,
    };
    let kind = classify(example.as_ref());

    // 按访客地区决定翻译目标语言，未启用翻译时不发起地理位置查询
    let target_lang = if config.translate {
        detector.detect_preferred_language(&ip).await
    } else {
        LanguageCode::En
    };

    let response = match kind {
        ResponseKind::Projects => {
            let models = project::Entity::find()
                .order_by_asc(project::Column::DisplayOrder)
                .order_by_asc(project::Column::Id)
                .all(db.as_ref())
                .await?;
            let mut infos: Vec<ProjectInfo> = models.into_iter().map(ProjectInfo::from).collect();

            // 摘要互相独立，并发翻译；整批失败则保留原文
            if config.translate {
                let summaries: Vec<String> = infos.iter().map(|p| p.summary.clone()).collect();
                match translate_many(provider.as_ref(), &summaries, target_lang).await {
                    Ok(translated) => {
                        for (info, summary) in infos.iter_mut().zip(translated) {
                            info.summary = summary;
                        }
                    }
                    Err(e) => warn!("批量翻译项目摘要失败，保留原文: {}", e),
                }
            }

            assemble_ask_response(kind, session_id.clone(), String::new(), Some(infos), None, None, None)
        }
        ResponseKind::Experiences => {
            let models = experience::Entity::find()
                .order_by_asc(experience::Column::DisplayOrder)
                .order_by_asc(experience::Column::Id)
                .all(db.as_ref())
                .await?;
            let mut infos: Vec<ExperienceInfo> = models.into_iter().map(ExperienceInfo::from).collect();

            if config.translate {
                let descriptions: Vec<String> = infos
                    .iter()
                    .map(|e| e.description.clone().unwrap_or_default())
                    .collect();
                match translate_many(provider.as_ref(), &descriptions, target_lang).await {
                    Ok(translated) => {
                        for (info, description) in infos.iter_mut().zip(translated) {
                            if info.description.is_some() {
                                info.description = Some(description);
                            }
                        }
                    }
                    Err(e) => warn!("批量翻译经历描述失败，保留原文: {}", e),
                }
            }

            assemble_ask_response(kind, session_id.clone(), String::new(), None, Some(infos), None, None)
        }
        ResponseKind::Contacts => {
            let latest = contact::Entity::find()
                .order_by_desc(contact::Column::Id)
                .one(db.as_ref())
                .await?;
            assemble_ask_response(
                kind,
                session_id.clone(),
                String::new(),
                None,
                None,
                latest.map(ContactInfo::from),
                None,
            )
        }
        ResponseKind::Skills => {
            let models = skill_category::Entity::find()
                .order_by_asc(skill_category::Column::DisplayOrder)
                .order_by_asc(skill_category::Column::Id)
                .all(db.as_ref())
                .await?;
            let infos = models.into_iter().map(SkillCategoryInfo::from).collect();
            assemble_ask_response(kind, session_id.clone(), String::new(), None, None, None, Some(infos))
        }
        ResponseKind::Introduction => {
            let latest = introduction::Entity::find()
                .order_by_desc(introduction::Column::Id)
                .one(db.as_ref())
                .await?;
            match latest {
                Some(intro) => {
                    let answer = translate_answer(provider.as_ref(), &intro.content, target_lang).await;
                    assemble_ask_response(kind, session_id.clone(), answer, None, None, None, None)
                }
                // 自我介绍缺失时落回普通 AI 路径
                None => {
                    let answer =
                        plain_ai_answer(db.as_ref(), provider.as_ref(), &payload, &session_id, target_lang).await?;
                    assemble_ask_response(
                        ResponseKind::Ai,
                        session_id.clone(),
                        answer,
                        None,
                        None,
                        None,
                        None,
                    )
                }
            }
        }
        ResponseKind::Ai => {
            let answer = plain_ai_answer(db.as_ref(), provider.as_ref(), &payload, &session_id, target_lang).await?;
            assemble_ask_response(kind, session_id.clone(), answer, None, None, None, None)
        }
    };

    // 落库失败只记日志，不影响已生成的回答返回
    if let Err(e) = record_turn(db.as_ref(), Some(&session_id), &payload.question, &response.answer).await {
        warn!("保存对话记录失败: {}", e);
    }

    Ok(ApiResponse::ok(response))
}

/// 普通 AI 路径：拼装提示词并调用补全服务，上游失败返回兜底文案
async fn plain_ai_answer(
    db: &DatabaseConnection,
    provider: &dyn CompletionProvider,
    payload: &AskRequest,
    session_id: &str,
    target_lang: LanguageCode,
) -> Result<String, ApiError> {
    // 四类内容源互相独立，并发读取
    let (intro, knowledge, projects, experiences) = tokio::try_join!(
        introduction::Entity::find()
            .order_by_desc(introduction::Column::Id)
            .one(db),
        knowledge_entry::Entity::find()
            .order_by_asc(knowledge_entry::Column::Id)
            .all(db),
        project::Entity::find()
            .order_by_asc(project::Column::DisplayOrder)
            .order_by_asc(project::Column::Id)
            .all(db),
        experience::Entity::find()
            .order_by_asc(experience::Column::DisplayOrder)
            .order_by_asc(experience::Column::Id)
            .all(db),
    )?;

    let sources = PromptSources {
        introduction: intro,
        knowledge,
        projects,
        experiences,
    };

    // 客户端带了本会话历史就用它，否则按会话 id 查库，两边走同一套窗口裁剪
    let history = match &payload.session_history {
        Some(turns) => window_history(
            turns.iter()
                .map(|t| HistoryTurn {
                    question: t.question.clone(),
                    answer: t.answer.clone(),
                })
                .collect(),
            HISTORY_WINDOW,
        ),
        None => fetch_history(db, session_id).await?,
    };

    let system_prompt = build_system_prompt(&sources, &history);
    match provider.complete(&system_prompt, payload.question.trim()).await {
        Ok(answer) => Ok(translate_answer(provider, &answer, target_lang).await),
        Err(e) => {
            // 不重试，对外只给兜底文案
            warn!("补全服务调用失败: {:#}", e);
            Ok(FALLBACK_ANSWER.to_string())
        }
    }
}

/// 全部对话记录（前端自行分组用）
#[utoipa::path(
    get,
    path = "/api/conversations",
    responses(
        (status = 200, body = ApiResponse<Vec<ConversationTurnInfo>>),
    )
)]
pub async fn get_conversations(
    Extension(db): Extension<Arc<DatabaseConnection>>,
) -> Result<ApiResponse<Vec<ConversationTurnInfo>>, ApiError> {
    let turns = conversation_turn::Entity::find()
        .order_by_asc(conversation_turn::Column::Id)
        .all(db.as_ref())
        .await?;
    Ok(ApiResponse::ok(turns.into_iter().map(ConversationTurnInfo::from).collect()))
}

/// 按会话分组的对话记录
#[utoipa::path(
    get,
    path = "/api/conversations/grouped",
    params(GroupedConversationsQuery),
    responses(
        (status = 200, body = ApiResponse<Vec<SessionGroupInfo>>),
    )
)]
pub async fn get_grouped_conversations(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Query(query): Query<GroupedConversationsQuery>,
) -> Result<ApiResponse<Vec<SessionGroupInfo>>, ApiError> {
    let turns = conversation_turn::Entity::find()
        .order_by_asc(conversation_turn::Column::Id)
        .all(db.as_ref())
        .await?;

    let order = GroupOrder::from_str(query.order.as_deref().unwrap_or(""));
    let groups = group_sessions(turns, order, query.hide_showcase.unwrap_or(false));
    Ok(ApiResponse::ok(groups.into_iter().map(SessionGroupInfo::from).collect()))
}

/// 清空对话记录
#[utoipa::path(
    delete,
    path = "/api/conversations",
    responses(
        (status = 200, body = ApiResponse<DeleteResponse>),
    )
)]
pub async fn delete_conversations(
    Extension(db): Extension<Arc<DatabaseConnection>>,
) -> Result<ApiResponse<DeleteResponse>, ApiError> {
    let result = conversation_turn::Entity::delete_many().exec(db.as_ref()).await?;
    info!("已清空对话记录，删除 {} 条", result.rows_affected);
    Ok(ApiResponse::ok(DeleteResponse {
        deleted: result.rows_affected,
    }))
}

/// 全部知识条目
#[utoipa::path(
    get,
    path = "/api/knowledge",
    responses(
        (status = 200, body = ApiResponse<Vec<KnowledgeEntryInfo>>),
    )
)]
pub async fn get_knowledge_entries(
    Extension(db): Extension<Arc<DatabaseConnection>>,
) -> Result<ApiResponse<Vec<KnowledgeEntryInfo>>, ApiError> {
    let entries = knowledge_entry::Entity::find()
        .order_by_asc(knowledge_entry::Column::Id)
        .all(db.as_ref())
        .await?;
    Ok(ApiResponse::ok(entries.into_iter().map(KnowledgeEntryInfo::from).collect()))
}

/// 生效中的知识条目
#[utoipa::path(
    get,
    path = "/api/knowledge/active",
    responses(
        (status = 200, body = ApiResponse<Vec<KnowledgeEntryInfo>>),
    )
)]
pub async fn get_active_knowledge_entries(
    Extension(db): Extension<Arc<DatabaseConnection>>,
) -> Result<ApiResponse<Vec<KnowledgeEntryInfo>>, ApiError> {
    let entries = knowledge_entry::Entity::find()
        .filter(knowledge_entry::Column::IsActive.eq(true))
        .order_by_asc(knowledge_entry::Column::Id)
        .all(db.as_ref())
        .await?;
    Ok(ApiResponse::ok(entries.into_iter().map(KnowledgeEntryInfo::from).collect()))
}

/// 新建知识条目
#[utoipa::path(
    post,
    path = "/api/knowledge",
    request_body = CreateKnowledgeEntryRequest,
    responses(
        (status = 200, body = ApiResponse<KnowledgeEntryInfo>),
    )
)]
pub async fn create_knowledge_entry(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Json(payload): Json<CreateKnowledgeEntryRequest>,
) -> Result<ApiResponse<KnowledgeEntryInfo>, ApiError> {
    if payload.content.trim().is_empty() {
        return Err(InnerApiError::BadRequest("content 不能为空".to_string()).into());
    }

    let entry = knowledge_entry::ActiveModel {
        content: Set(payload.content),
        is_active: Set(payload.is_active),
        created_at: Set(now_standard_string()),
        ..Default::default()
    };
    let inserted = entry.insert(db.as_ref()).await?;
    Ok(ApiResponse::ok(inserted.into()))
}

/// 更新知识条目
#[utoipa::path(
    put,
    path = "/api/knowledge/{id}",
    request_body = UpdateKnowledgeEntryRequest,
    responses(
        (status = 200, body = ApiResponse<KnowledgeEntryInfo>),
        (status = 404, description = "条目不存在"),
    )
)]
pub async fn update_knowledge_entry(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateKnowledgeEntryRequest>,
) -> Result<ApiResponse<KnowledgeEntryInfo>, ApiError> {
    let model = knowledge_entry::Entity::find_by_id(id)
        .one(db.as_ref())
        .await?
        .ok_or_else(|| InnerApiError::NotFound(format!("知识条目 {} 不存在", id)))?;

    let mut active = model.into_active_model();
    if let Some(content) = payload.content {
        if content.trim().is_empty() {
            return Err(InnerApiError::BadRequest("content 不能为空".to_string()).into());
        }
        active.content = Set(content);
    }
    if let Some(is_active) = payload.is_active {
        active.is_active = Set(is_active);
    }

    let updated = active.update(db.as_ref()).await?;
    Ok(ApiResponse::ok(updated.into()))
}

/// 删除知识条目
#[utoipa::path(
    delete,
    path = "/api/knowledge/{id}",
    responses(
        (status = 200, body = ApiResponse<DeleteResponse>),
        (status = 404, description = "条目不存在"),
    )
)]
pub async fn delete_knowledge_entry(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Path(id): Path<i32>,
) -> Result<ApiResponse<DeleteResponse>, ApiError> {
    let result = knowledge_entry::Entity::delete_by_id(id).exec(db.as_ref()).await?;
    if result.rows_affected == 0 {
        return Err(InnerApiError::NotFound(format!("知识条目 {} 不存在", id)).into());
    }
    Ok(ApiResponse::ok(DeleteResponse {
        deleted: result.rows_affected,
    }))
}

/// 全部项目
#[utoipa::path(
    get,
    path = "/api/projects",
    responses(
        (status = 200, body = ApiResponse<Vec<ProjectInfo>>),
    )
)]
pub async fn get_projects(
    Extension(db): Extension<Arc<DatabaseConnection>>,
) -> Result<ApiResponse<Vec<ProjectInfo>>, ApiError> {
    let projects = project::Entity::find()
        .order_by_asc(project::Column::DisplayOrder)
        .order_by_asc(project::Column::Id)
        .all(db.as_ref())
        .await?;
    Ok(ApiResponse::ok(projects.into_iter().map(ProjectInfo::from).collect()))
}

/// 新建项目
#[utoipa::path(
    post,
    path = "/api/projects",
    request_body = CreateProjectRequest,
    responses(
        (status = 200, body = ApiResponse<ProjectInfo>),
    )
)]
pub async fn create_project(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Json(payload): Json<CreateProjectRequest>,
) -> Result<ApiResponse<ProjectInfo>, ApiError> {
    if payload.title.trim().is_empty() {
        return Err(InnerApiError::BadRequest("title 不能为空".to_string()).into());
    }

    let project = project::ActiveModel {
        title: Set(payload.title),
        period: Set(payload.period),
        subtitle: Set(payload.subtitle),
        summary: Set(payload.summary),
        contents: Set(serde_json::to_string(&payload.contents)?),
        tech: Set(payload.tech),
        image: Set(payload.image),
        more_link: Set(payload.more_link),
        width: Set(payload.width.unwrap_or_else(|| "full".to_string())),
        detailed_content: Set(payload.detailed_content),
        display_order: Set(payload.display_order),
        ..Default::default()
    };
    let inserted = project.insert(db.as_ref()).await?;
    Ok(ApiResponse::ok(inserted.into()))
}

/// 更新项目
#[utoipa::path(
    put,
    path = "/api/projects/{id}",
    request_body = UpdateProjectRequest,
    responses(
        (status = 200, body = ApiResponse<ProjectInfo>),
        (status = 404, description = "项目不存在"),
    )
)]
pub async fn update_project(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateProjectRequest>,
) -> Result<ApiResponse<ProjectInfo>, ApiError> {
    let model = project::Entity::find_by_id(id)
        .one(db.as_ref())
        .await?
        .ok_or_else(|| InnerApiError::NotFound(format!("项目 {} 不存在", id)))?;

    let mut active = model.into_active_model();
    if let Some(title) = payload.title {
        active.title = Set(title);
    }
    if let Some(period) = payload.period {
        active.period = Set(period);
    }
    if let Some(subtitle) = payload.subtitle {
        active.subtitle = Set(subtitle);
    }
    if let Some(summary) = payload.summary {
        active.summary = Set(summary);
    }
    if let Some(contents) = payload.contents {
        active.contents = Set(serde_json::to_string(&contents)?);
    }
    if let Some(tech) = payload.tech {
        active.tech = Set(tech);
    }
    if let Some(image) = payload.image {
        active.image = Set(image);
    }
    if let Some(more_link) = payload.more_link {
        active.more_link = Set(Some(more_link));
    }
    if let Some(width) = payload.width {
        active.width = Set(width);
    }
    if let Some(detailed_content) = payload.detailed_content {
        active.detailed_content = Set(Some(detailed_content));
    }
    if let Some(display_order) = payload.display_order {
        active.display_order = Set(display_order);
    }

    let updated = active.update(db.as_ref()).await?;
    Ok(ApiResponse::ok(updated.into()))
}

/// 删除项目
#[utoipa::path(
    delete,
    path = "/api/projects/{id}",
    responses(
        (status = 200, body = ApiResponse<DeleteResponse>),
        (status = 404, description = "项目不存在"),
    )
)]
pub async fn delete_project(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Path(id): Path<i32>,
) -> Result<ApiResponse<DeleteResponse>, ApiError> {
    let result = project::Entity::delete_by_id(id).exec(db.as_ref()).await?;
    if result.rows_affected == 0 {
        return Err(InnerApiError::NotFound(format!("项目 {} 不存在", id)).into());
    }
    Ok(ApiResponse::ok(DeleteResponse {
        deleted: result.rows_affected,
    }))
}

/// 全部工作经历
#[utoipa::path(
    get,
    path = "/api/experiences",
    responses(
        (status = 200, body = ApiResponse<Vec<ExperienceInfo>>),
    )
)]
pub async fn get_experiences(
    Extension(db): Extension<Arc<DatabaseConnection>>,
) -> Result<ApiResponse<Vec<ExperienceInfo>>, ApiError> {
    let experiences = experience::Entity::find()
        .order_by_asc(experience::Column::DisplayOrder)
        .order_by_asc(experience::Column::Id)
        .all(db.as_ref())
        .await?;
    Ok(ApiResponse::ok(experiences.into_iter().map(ExperienceInfo::from).collect()))
}

/// 新建工作经历
#[utoipa::path(
    post,
    path = "/api/experiences",
    request_body = CreateExperienceRequest,
    responses(
        (status = 200, body = ApiResponse<ExperienceInfo>),
    )
)]
pub async fn create_experience(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Json(payload): Json<CreateExperienceRequest>,
) -> Result<ApiResponse<ExperienceInfo>, ApiError> {
    if payload.company.trim().is_empty() || payload.position.trim().is_empty() {
        return Err(InnerApiError::BadRequest("company 和 position 不能为空".to_string()).into());
    }

    let responsibilities = match &payload.responsibilities {
        Some(lines) => Some(serde_json::to_string(lines)?),
        None => None,
    };
    let experience = experience::ActiveModel {
        company: Set(payload.company),
        position: Set(payload.position),
        period: Set(payload.period),
        location: Set(payload.location),
        description: Set(payload.description),
        responsibilities: Set(responsibilities),
        skills: Set(payload.skills),
        website: Set(payload.website),
        detailed_content: Set(payload.detailed_content),
        display_order: Set(payload.display_order),
        ..Default::default()
    };
    let inserted = experience.insert(db.as_ref()).await?;
    Ok(ApiResponse::ok(inserted.into()))
}

/// 更新工作经历
#[utoipa::path(
    put,
    path = "/api/experiences/{id}",
    request_body = UpdateExperienceRequest,
    responses(
        (status = 200, body = ApiResponse<ExperienceInfo>),
        (status = 404, description = "经历不存在"),
    )
)]
pub async fn update_experience(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateExperienceRequest>,
) -> Result<ApiResponse<ExperienceInfo>, ApiError> {
    let model = experience::Entity::find_by_id(id)
        .one(db.as_ref())
        .await?
        .ok_or_else(|| InnerApiError::NotFound(format!("经历 {} 不存在", id)))?;

    let mut active = model.into_active_model();
    if let Some(company) = payload.company {
        active.company = Set(company);
    }
    if let Some(position) = payload.position {
        active.position = Set(position);
    }
    if let Some(period) = payload.period {
        active.period = Set(period);
    }
    if let Some(location) = payload.location {
        active.location = Set(location);
    }
    if let Some(description) = payload.description {
        active.description = Set(Some(description));
    }
    if let Some(responsibilities) = payload.responsibilities {
        active.responsibilities = Set(Some(serde_json::to_string(&responsibilities)?));
    }
    if let Some(skills) = payload.skills {
        active.skills = Set(Some(skills));
    }
    if let Some(website) = payload.website {
        active.website = Set(Some(website));
    }
    if let Some(detailed_content) = payload.detailed_content {
        active.detailed_content = Set(Some(detailed_content));
    }
    if let Some(display_order) = payload.display_order {
        active.display_order = Set(display_order);
    }

    let updated = active.update(db.as_ref()).await?;
    Ok(ApiResponse::ok(updated.into()))
}

/// 删除工作经历
#[utoipa::path(
    delete,
    path = "/api/experiences/{id}",
    responses(
        (status = 200, body = ApiResponse<DeleteResponse>),
        (status = 404, description = "经历不存在"),
    )
)]
pub async fn delete_experience(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Path(id): Path<i32>,
) -> Result<ApiResponse<DeleteResponse>, ApiError> {
    let result = experience::Entity::delete_by_id(id).exec(db.as_ref()).await?;
    if result.rows_affected == 0 {
        return Err(InnerApiError::NotFound(format!("经历 {} 不存在", id)).into());
    }
    Ok(ApiResponse::ok(DeleteResponse {
        deleted: result.rows_affected,
    }))
}

/// 全部预设问题
#[utoipa::path(
    get,
    path = "/api/prompt-examples",
    responses(
        (status = 200, body = ApiResponse<Vec<PromptExampleInfo>>),
    )
)]
pub async fn get_prompt_examples(
    Extension(db): Extension<Arc<DatabaseConnection>>,
) -> Result<ApiResponse<Vec<PromptExampleInfo>>, ApiError> {
    let examples = prompt_example::Entity::find()
        .order_by_asc(prompt_example::Column::DisplayOrder)
        .order_by_asc(prompt_example::Column::Id)
        .all(db.as_ref())
        .await?;
    Ok(ApiResponse::ok(examples.into_iter().map(PromptExampleInfo::from).collect()))
}

/// 生效中的预设问题（按 display_order 排序，给前端按钮用）
#[utoipa::path(
    get,
    path = "/api/prompt-examples/active",
    responses(
        (status = 200, body = ApiResponse<Vec<PromptExampleInfo>>),
    )
)]
pub async fn get_active_prompt_examples(
    Extension(db): Extension<Arc<DatabaseConnection>>,
) -> Result<ApiResponse<Vec<PromptExampleInfo>>, ApiError> {
    let examples = prompt_example::Entity::find()
        .filter(prompt_example::Column::IsActive.eq(true))
        .order_by_asc(prompt_example::Column::DisplayOrder)
        .order_by_asc(prompt_example::Column::Id)
        .all(db.as_ref())
        .await?;
    Ok(ApiResponse::ok(examples.into_iter().map(PromptExampleInfo::from).collect()))
}

/// 新建预设问题
#[utoipa::path(
    post,
    path = "/api/prompt-examples",
    request_body = CreatePromptExampleRequest,
    responses(
        (status = 200, body = ApiResponse<PromptExampleInfo>),
    )
)]
pub async fn create_prompt_example(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Json(payload): Json<CreatePromptExampleRequest>,
) -> Result<ApiResponse<PromptExampleInfo>, ApiError> {
    if payload.question.trim().is_empty() {
        return Err(InnerApiError::BadRequest("question 不能为空".to_string()).into());
    }
    if !VALID_RESPONSE_TYPES.contains(&payload.response_type.as_str()) {
        return Err(InnerApiError::BadRequest(format!(
            "response_type 必须是 {} 之一",
            VALID_RESPONSE_TYPES.join("/")
        ))
        .into());
    }

    let example = prompt_example::ActiveModel {
        question: Set(payload.question),
        response_type: Set(payload.response_type),
        is_active: Set(payload.is_active),
        display_order: Set(payload.display_order),
        ..Default::default()
    };
    let inserted = example.insert(db.as_ref()).await?;
    Ok(ApiResponse::ok(inserted.into()))
}

/// 更新预设问题
#[utoipa::path(
    put,
    path = "/api/prompt-examples/{id}",
    request_body = UpdatePromptExampleRequest,
    responses(
        (status = 200, body = ApiResponse<PromptExampleInfo>),
        (status = 404, description = "预设问题不存在"),
    )
)]
pub async fn update_prompt_example(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdatePromptExampleRequest>,
) -> Result<ApiResponse<PromptExampleInfo>, ApiError> {
    let model = prompt_example::Entity::find_by_id(id)
        .one(db.as_ref())
        .await?
        .ok_or_else(|| InnerApiError::NotFound(format!("预设问题 {} 不存在", id)))?;

    let mut active = model.into_active_model();
    if let Some(question) = payload.question {
        active.question = Set(question);
    }
    if let Some(response_type) = payload.response_type {
        if !VALID_RESPONSE_TYPES.contains(&response_type.as_str()) {
            return Err(InnerApiError::BadRequest(format!(
                "response_type 必须是 {} 之一",
                VALID_RESPONSE_TYPES.join("/")
            ))
            .into());
        }
        active.response_type = Set(response_type);
    }
    if let Some(is_active) = payload.is_active {
        active.is_active = Set(is_active);
    }
    if let Some(display_order) = payload.display_order {
        active.display_order = Set(display_order);
    }

    let updated = active.update(db.as_ref()).await?;
    Ok(ApiResponse::ok(updated.into()))
}

/// 删除预设问题
#[utoipa::path(
    delete,
    path = "/api/prompt-examples/{id}",
    responses(
        (status = 200, body = ApiResponse<DeleteResponse>),
        (status = 404, description = "预设问题不存在"),
    )
)]
pub async fn delete_prompt_example(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Path(id): Path<i32>,
) -> Result<ApiResponse<DeleteResponse>, ApiError> {
    let result = prompt_example::Entity::delete_by_id(id).exec(db.as_ref()).await?;
    if result.rows_affected == 0 {
        return Err(InnerApiError::NotFound(format!("预设问题 {} 不存在", id)).into());
    }
    Ok(ApiResponse::ok(DeleteResponse {
        deleted: result.rows_affected,
    }))
}

/// 当前生效的自我介绍（最新一行）
#[utoipa::path(
    get,
    path = "/api/introduction",
    responses(
        (status = 200, body = ApiResponse<IntroductionInfo>),
        (status = 404, description = "尚未录入自我介绍"),
    )
)]
pub async fn get_introduction(
    Extension(db): Extension<Arc<DatabaseConnection>>,
) -> Result<ApiResponse<IntroductionInfo>, ApiError> {
    let latest = introduction::Entity::find()
        .order_by_desc(introduction::Column::Id)
        .one(db.as_ref())
        .await?
        .ok_or_else(|| InnerApiError::NotFound("尚未录入自我介绍".to_string()))?;
    Ok(ApiResponse::ok(latest.into()))
}

/// 追加新版自我介绍
#[utoipa::path(
    post,
    path = "/api/introduction",
    request_body = CreateIntroductionRequest,
    responses(
        (status = 200, body = ApiResponse<IntroductionInfo>),
    )
)]
pub async fn create_introduction(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Json(payload): Json<CreateIntroductionRequest>,
) -> Result<ApiResponse<IntroductionInfo>, ApiError> {
    if payload.name.trim().is_empty() || payload.content.trim().is_empty() {
        return Err(InnerApiError::BadRequest("name 和 content 不能为空".to_string()).into());
    }

    let intro = introduction::ActiveModel {
        name: Set(payload.name),
        title: Set(payload.title),
        location: Set(payload.location),
        experience: Set(payload.experience),
        technologies: Set(payload.technologies),
        content: Set(payload.content),
        created_at: Set(now_standard_string()),
        ..Default::default()
    };
    let inserted = intro.insert(db.as_ref()).await?;
    Ok(ApiResponse::ok(inserted.into()))
}

/// 当前生效的联系方式（最新一行）
#[utoipa::path(
    get,
    path = "/api/contact",
    responses(
        (status = 200, body = ApiResponse<ContactInfo>),
        (status = 404, description = "尚未录入联系方式"),
    )
)]
pub async fn get_contact(
    Extension(db): Extension<Arc<DatabaseConnection>>,
) -> Result<ApiResponse<ContactInfo>, ApiError> {
    let latest = contact::Entity::find()
        .order_by_desc(contact::Column::Id)
        .one(db.as_ref())
        .await?
        .ok_or_else(|| InnerApiError::NotFound("尚未录入联系方式".to_string()))?;
    Ok(ApiResponse::ok(latest.into()))
}

/// 追加新版联系方式
#[utoipa::path(
    post,
    path = "/api/contact",
    request_body = CreateContactRequest,
    responses(
        (status = 200, body = ApiResponse<ContactInfo>),
    )
)]
pub async fn create_contact(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Json(payload): Json<CreateContactRequest>,
) -> Result<ApiResponse<ContactInfo>, ApiError> {
    if payload.email.trim().is_empty() {
        return Err(InnerApiError::BadRequest("email 不能为空".to_string()).into());
    }

    let contact = contact::ActiveModel {
        email: Set(payload.email),
        phone: Set(payload.phone),
        github: Set(payload.github),
        linkedin: Set(payload.linkedin),
        location: Set(payload.location),
        created_at: Set(now_standard_string()),
        ..Default::default()
    };
    let inserted = contact.insert(db.as_ref()).await?;
    Ok(ApiResponse::ok(inserted.into()))
}

/// 全部技能分类
#[utoipa::path(
    get,
    path = "/api/skills",
    responses(
        (status = 200, body = ApiResponse<Vec<SkillCategoryInfo>>),
    )
)]
pub async fn get_skill_categories(
    Extension(db): Extension<Arc<DatabaseConnection>>,
) -> Result<ApiResponse<Vec<SkillCategoryInfo>>, ApiError> {
    let categories = skill_category::Entity::find()
        .order_by_asc(skill_category::Column::DisplayOrder)
        .order_by_asc(skill_category::Column::Id)
        .all(db.as_ref())
        .await?;
    Ok(ApiResponse::ok(categories.into_iter().map(SkillCategoryInfo::from).collect()))
}

/// 新建技能分类
#[utoipa::path(
    post,
    path = "/api/skills",
    request_body = CreateSkillCategoryRequest,
    responses(
        (status = 200, body = ApiResponse<SkillCategoryInfo>),
    )
)]
pub async fn create_skill_category(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Json(payload): Json<CreateSkillCategoryRequest>,
) -> Result<ApiResponse<SkillCategoryInfo>, ApiError> {
    if payload.name.trim().is_empty() {
        return Err(InnerApiError::BadRequest("name 不能为空".to_string()).into());
    }

    let category = skill_category::ActiveModel {
        name: Set(payload.name),
        items: Set(serde_json::to_string(&payload.items)?),
        display_order: Set(payload.display_order),
        ..Default::default()
    };
    let inserted = category.insert(db.as_ref()).await?;
    Ok(ApiResponse::ok(inserted.into()))
}

/// 更新技能分类
#[utoipa::path(
    put,
    path = "/api/skills/{id}",
    request_body = UpdateSkillCategoryRequest,
    responses(
        (status = 200, body = ApiResponse<SkillCategoryInfo>),
        (status = 404, description = "技能分类不存在"),
    )
)]
pub async fn update_skill_category(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateSkillCategoryRequest>,
) -> Result<ApiResponse<SkillCategoryInfo>, ApiError> {
    let model = skill_category::Entity::find_by_id(id)
        .one(db.as_ref())
        .await?
        .ok_or_else(|| InnerApiError::NotFound(format!("技能分类 {} 不存在", id)))?;

    let mut active = model.into_active_model();
    if let Some(name) = payload.name {
        active.name = Set(name);
    }
    if let Some(items) = payload.items {
        active.items = Set(serde_json::to_string(&items)?);
    }
    if let Some(display_order) = payload.display_order {
        active.display_order = Set(display_order);
    }

    let updated = active.update(db.as_ref()).await?;
    Ok(ApiResponse::ok(updated.into()))
}

/// 删除技能分类
#[utoipa::path(
    delete,
    path = "/api/skills/{id}",
    responses(
        (status = 200, body = ApiResponse<DeleteResponse>),
        (status = 404, description = "技能分类不存在"),
    )
)]
pub async fn delete_skill_category(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Path(id): Path<i32>,
) -> Result<ApiResponse<DeleteResponse>, ApiError> {
    let result = skill_category::Entity::delete_by_id(id).exec(db.as_ref()).await?;
    if result.rows_affected == 0 {
        return Err(InnerApiError::NotFound(format!("技能分类 {} 不存在", id)).into());
    }
    Ok(ApiResponse::ok(DeleteResponse {
        deleted: result.rows_affected,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::showcase::{EXPERIENCE_SHOWCASE, PROJECT_SHOWCASE};

    fn addr() -> SocketAddr {
        "203.0.113.7:50000".parse().unwrap()
    }

    fn project_info(id: i32) -> ProjectInfo {
        ProjectInfo {
            id,
            title: format!("project {}", id),
            period: "2025".to_string(),
            subtitle: String::new(),
            summary: String::new(),
            contents: Vec::new(),
            tech: String::new(),
            image: String::new(),
            more_link: None,
            width: "full".to_string(),
            detailed_content: None,
            display_order: 0,
        }
    }

    #[test]
    fn test_client_ip_prefers_forwarded_header() {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", "198.51.100.1, 10.0.0.1".parse().unwrap());
        assert_eq!(client_ip(&headers, addr()), "198.51.100.1");
    }

    #[test]
    fn test_client_ip_falls_back_to_real_ip_then_peer() {
        let mut headers = HeaderMap::new();
        headers.insert("x-real-ip", "198.51.100.2".parse().unwrap());
        assert_eq!(client_ip(&headers, addr()), "198.51.100.2");

        assert_eq!(client_ip(&HeaderMap::new(), addr()), "203.0.113.7");
    }

    #[test]
    fn test_showcase_answer_is_exact_sentinel() {
        // 2 个项目时：answer 恰为哨兵串，projects 长度为 2
        let response = assemble_ask_response(
            ResponseKind::Projects,
            "s1".to_string(),
            String::new(),
            Some(vec![project_info(1), project_info(2)]),
            None,
            None,
            None,
        );
        assert_eq!(response.answer, PROJECT_SHOWCASE);
        assert_eq!(response.projects.as_ref().unwrap().len(), 2);
        assert!(response.experiences.is_none());
        assert!(response.contact.is_none());
        assert!(response.skills.is_none());
    }

    #[test]
    fn test_experience_showcase_sentinel() {
        let response = assemble_ask_response(
            ResponseKind::Experiences,
            "s1".to_string(),
            String::new(),
            None,
            Some(Vec::new()),
            None,
            None,
        );
        assert_eq!(response.answer, EXPERIENCE_SHOWCASE);
    }

    #[test]
    fn test_plain_ai_answer_passes_through() {
        let response = assemble_ask_response(
            ResponseKind::Ai,
            "s1".to_string(),
            "generated text".to_string(),
            None,
            None,
            None,
            None,
        );
        assert_eq!(response.answer, "generated text");
        assert!(response.projects.is_none());
        assert!(response.skills.is_none());
    }

    #[test]
    fn test_introduction_keeps_plain_answer() {
        let response = assemble_ask_response(
            ResponseKind::Introduction,
            "s1".to_string(),
            "I am a developer".to_string(),
            None,
            None,
            None,
            None,
        );
        assert_eq!(response.answer, "I am a developer");
        assert_eq!(response.kind, ResponseKind::Introduction);
    }
}
