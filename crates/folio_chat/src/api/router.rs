use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::Extension;
use axum::http::{header, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::Router;
use rust_embed::RustEmbed;
use sea_orm::DatabaseConnection;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::handler::{self, ApiDoc};
use crate::chat::language::GeoLanguageDetector;
use crate::chat::CompletionProvider;
use crate::config::Config;
use crate::utils::rate_limit::RateLimiter;

/// 打包进二进制的前端静态资源
#[derive(RustEmbed)]
#[folder = "../../web"]
struct WebAssets;

/// 组装完整应用路由
///
/// /api 下是业务接口，/swagger-ui 提供在线文档，其余路径落到内嵌前端
pub fn build_router(
    db: Arc<DatabaseConnection>,
    config: Arc<Config>,
    limiter: Arc<RateLimiter>,
    provider: Arc<dyn CompletionProvider>,
    detector: Arc<GeoLanguageDetector>,
) -> Router {
    let api = Router::new()
        .route("/health", get(handler::health))
        .route("/ask", post(handler::ask))
        .route(
            "/conversations",
            get(handler::get_conversations).delete(handler::delete_conversations),
        )
        .route("/conversations/grouped", get(handler::get_grouped_conversations))
        .route(
            "/knowledge",
            get(handler::get_knowledge_entries).post(handler::create_knowledge_entry),
        )
        .route("/knowledge/active", get(handler::get_active_knowledge_entries))
        .route(
            "/knowledge/{id}",
            put(handler::update_knowledge_entry).delete(handler::delete_knowledge_entry),
        )
        .route("/projects", get(handler::get_projects).post(handler::create_project))
        .route(
            "/projects/{id}",
            put(handler::update_project).delete(handler::delete_project),
        )
        .route(
            "/experiences",
            get(handler::get_experiences).post(handler::create_experience),
        )
        .route(
            "/experiences/{id}",
            put(handler::update_experience).delete(handler::delete_experience),
        )
        .route(
            "/prompt-examples",
            get(handler::get_prompt_examples).post(handler::create_prompt_example),
        )
        .route("/prompt-examples/active", get(handler::get_active_prompt_examples))
        .route(
            "/prompt-examples/{id}",
            put(handler::update_prompt_example).delete(handler::delete_prompt_example),
        )
        .route(
            "/introduction",
            get(handler::get_introduction).post(handler::create_introduction),
        )
        .route("/contact", get(handler::get_contact).post(handler::create_contact))
        .route(
            "/skills",
            get(handler::get_skill_categories).post(handler::create_skill_category),
        )
        .route(
            "/skills/{id}",
            put(handler::update_skill_category).delete(handler::delete_skill_category),
        );

    Router::new()
        .nest("/api", api)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .fallback(serve_static)
        .layer(CorsLayer::permissive())
        .layer(Extension(db))
        .layer(Extension(config))
        .layer(Extension(limiter))
        .layer(Extension(provider))
        .layer(Extension(detector))
}

/// 启动 HTTP 服务，收到 ctrl-c 后优雅退出
pub async fn start_server(router: Router, bind: &str) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(bind).await?;
    tracing::info!("服务已启动，监听 {}", bind);
    axum::serve(listener, router.into_make_service_with_connect_info::<SocketAddr>())
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("监听退出信号失败: {}", e);
        return;
    }
    tracing::info!("收到退出信号，开始关闭服务");
}

/// 兜底路由：返回内嵌前端文件，未命中的路径回落到 index.html（SPA 路由）
async fn serve_static(uri: Uri) -> Response {
    let path = uri.path().trim_start_matches('/');
    let path = if path.is_empty() { "index.html" } else { path };

    match WebAssets::get(path) {
        Some(file) => embedded_response(path, file),
        None => match WebAssets::get("index.html") {
            Some(index) => embedded_response("index.html", index),
            None => (StatusCode::NOT_FOUND, "页面不存在").into_response(),
        },
    }
}

fn embedded_response(path: &str, file: rust_embed::EmbeddedFile) -> Response {
    let mime = mime_guess::from_path(path).first_or_octet_stream();
    ([(header::CONTENT_TYPE, mime.as_ref().to_string())], file.data).into_response()
}
