//! 访客语言检测
//!
//! 一次 IP 地理位置查询，经静态国家→语言表映射。独立适配器，
//! 查询失败一律回退英文，绝不影响提示词拼装本身。

use std::time::Duration;

use anyhow::Result;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

/// 回答翻译的目标语言
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LanguageCode {
    #[default]
    En,
    Ko,
    Ja,
    Zh,
    Fr,
    De,
    Es,
}

impl LanguageCode {
    /// 翻译指令里使用的语言英文名
    pub fn english_name(&self) -> &'static str {
        match self {
            LanguageCode::En => "English",
            LanguageCode::Ko => "Korean",
            LanguageCode::Ja => "Japanese",
            LanguageCode::Zh => "Chinese",
            LanguageCode::Fr => "French",
            LanguageCode::De => "German",
            LanguageCode::Es => "Spanish",
        }
    }
}

/// 静态国家代码→语言映射，未收录的国家一律英文
pub fn language_for_country(country_code: &str) -> LanguageCode {
    match country_code.to_uppercase().as_str() {
        "KR" => LanguageCode::Ko,
        "JP" => LanguageCode::Ja,
        "CN" | "TW" | "HK" => LanguageCode::Zh,
        "FR" => LanguageCode::Fr,
        "DE" | "AT" => LanguageCode::De,
        "ES" | "MX" | "AR" => LanguageCode::Es,
        _ => LanguageCode::En,
    }
}

#[derive(Deserialize)]
struct GeoResponse {
    #[serde(rename = "countryCode")]
    country_code: Option<String>,
}

/// 基于 ip-api.com 的地理位置语言检测器
pub struct GeoLanguageDetector {
    client: Client,
}

impl GeoLanguageDetector {
    pub fn new() -> Result<Self> {
        let client = Client::builder().timeout(Duration::from_secs(5)).build()?;
        Ok(Self { client })
    }

    /// 按访客 IP 检测偏好语言，任何失败都回退英文
    pub async fn detect_preferred_language(&self, ip: &str) -> LanguageCode {
        // 本地/内网地址查不出国家，直接回退
        if ip.is_empty() || ip == "127.0.0.1" || ip == "::1" || ip.starts_with("192.168.") || ip.starts_with("10.") {
            return LanguageCode::En;
        }

        let url = format!("http://ip-api.com/json/{}?fields=countryCode", ip);
        match self.client.get(&url).send().await {
            Ok(response) => match response.json::<GeoResponse>().await {
                Ok(geo) => {
                    let code = geo.country_code.unwrap_or_default();
                    debug!("访客 {} 的国家代码: {}", ip, code);
                    language_for_country(&code)
                }
                Err(e) => {
                    debug!("解析地理位置响应失败: {}", e);
                    LanguageCode::En
                }
            },
            Err(e) => {
                debug!("地理位置查询失败: {}", e);
                LanguageCode::En
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_table() {
        assert_eq!(language_for_country("KR"), LanguageCode::Ko);
        assert_eq!(language_for_country("JP"), LanguageCode::Ja);
        assert_eq!(language_for_country("CN"), LanguageCode::Zh);
        assert_eq!(language_for_country("FR"), LanguageCode::Fr);
        assert_eq!(language_for_country("DE"), LanguageCode::De);
        assert_eq!(language_for_country("ES"), LanguageCode::Es);
    }

    #[test]
    fn test_language_table_is_case_insensitive() {
        assert_eq!(language_for_country("kr"), LanguageCode::Ko);
        assert_eq!(language_for_country("Jp"), LanguageCode::Ja);
    }

    #[test]
    fn test_unknown_country_defaults_to_english() {
        assert_eq!(language_for_country("US"), LanguageCode::En);
        assert_eq!(language_for_country(""), LanguageCode::En);
        assert_eq!(language_for_country("??"), LanguageCode::En);
    }
}
