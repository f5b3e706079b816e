mod api;
mod chat;
mod config;
mod database;
mod utils;

use std::sync::Arc;

use clap::Parser;
use tracing::info;

use crate::api::router::{build_router, start_server};
use crate::chat::language::GeoLanguageDetector;
use crate::chat::{CompletionProvider, OpenAiCompatProvider};
use crate::config::Config;
use crate::database::setup_database;
use crate::utils::init_logger;
use crate::utils::rate_limit::RateLimiter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();
    // 配置有问题直接拒绝启动
    config.validate()?;
    init_logger(&config.log_level);

    info!("folio-chat v{} 启动中", env!("CARGO_PKG_VERSION"));

    let data_dir = config.effective_data_dir();
    let db = Arc::new(setup_database(&data_dir).await?);
    info!("数据库就绪: {}", data_dir.display());

    let provider: Arc<dyn CompletionProvider> = Arc::new(OpenAiCompatProvider::new(
        &config.api_base_url,
        &config.api_key,
        &config.model,
        config.timeout_seconds,
    )?);
    let limiter = Arc::new(RateLimiter::new(
        config.rate_limit_max,
        config.rate_limit_window_seconds,
    ));
    let detector = Arc::new(GeoLanguageDetector::new()?);

    let bind = config.bind.clone();
    let router = build_router(db, Arc::new(config), limiter, provider, detector);
    start_server(router, &bind).await
}
