use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Parser;
use once_cell::sync::Lazy;

/// 默认数据目录（可被 --data-dir 覆盖）
pub static CONFIG_DIR: Lazy<PathBuf> = Lazy::new(|| {
    dirs::config_dir()
        .expect("无法获取系统配置目录")
        .join("folio-chat")
});

/// 启动配置，全部支持环境变量注入
///
/// API Key 是硬性要求：缺失时进程直接启动失败，而不是等到第一次请求才报错
#[derive(Parser, Debug, Clone)]
#[command(name = "folio-chat-rs", version, about = "个人作品集站点后端，内置 AI 问答助手")]
pub struct Config {
    /// HTTP 监听地址
    #[arg(long, env = "FOLIO_CHAT_BIND", default_value = "0.0.0.0:12380")]
    pub bind: String,

    /// 日志级别（trace/debug/info/warn/error）
    #[arg(long, env = "FOLIO_CHAT_LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// 数据目录，存放 sqlite 数据库，缺省时使用系统配置目录
    #[arg(long, env = "FOLIO_CHAT_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// OpenAI 兼容 chat/completions 接口的 base url
    #[arg(
        long,
        env = "FOLIO_CHAT_API_BASE_URL",
        default_value = "https://api.deepseek.com/v1"
    )]
    pub api_base_url: String,

    /// 补全服务的 API Key（必填）
    #[arg(long, env = "FOLIO_CHAT_API_KEY")]
    pub api_key: String,

    /// 模型名，例如 deepseek-chat / gpt-4o-mini
    #[arg(long, env = "FOLIO_CHAT_MODEL", default_value = "deepseek-chat")]
    pub model: String,

    /// 上游请求超时（秒）
    #[arg(long, env = "FOLIO_CHAT_TIMEOUT_SECONDS", default_value_t = 30)]
    pub timeout_seconds: u64,

    /// 是否按访客地区自动翻译回答
    #[arg(long, env = "FOLIO_CHAT_TRANSLATE", default_value_t = false)]
    pub translate: bool,

    /// 限流：窗口内允许的提问次数
    #[arg(long, env = "FOLIO_CHAT_RATE_LIMIT_MAX", default_value_t = 20)]
    pub rate_limit_max: u32,

    /// 限流：窗口长度（秒）
    #[arg(long, env = "FOLIO_CHAT_RATE_LIMIT_WINDOW_SECONDS", default_value_t = 60)]
    pub rate_limit_window_seconds: u64,
}

impl Config {
    /// 校验配置合法性，启动时调用一次
    pub fn validate(&self) -> Result<()> {
        if self.api_key.trim().is_empty() {
            bail!("FOLIO_CHAT_API_KEY 为空，拒绝启动");
        }
        if self.api_base_url.trim().is_empty() {
            bail!("FOLIO_CHAT_API_BASE_URL 为空，拒绝启动");
        }
        if self.timeout_seconds == 0 {
            bail!("上游超时必须大于 0 秒");
        }
        if self.rate_limit_max == 0 || self.rate_limit_window_seconds == 0 {
            bail!("限流参数必须大于 0");
        }
        Ok(())
    }

    /// 实际生效的数据目录
    pub fn effective_data_dir(&self) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(|| CONFIG_DIR.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> Config {
        Config::parse_from(["folio-chat-rs", "--api-key", "sk-test"])
    }

    #[test]
    fn test_validate_ok() {
        assert!(base_config().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_blank_api_key() {
        let mut config = base_config();
        config.api_key = "   ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_rate_limit() {
        let mut config = base_config();
        config.rate_limit_max = 0;
        assert!(config.validate().is_err());
    }
}
