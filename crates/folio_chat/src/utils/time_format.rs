//! 时间格式工具
//!
//! 全库统一使用 "%Y-%m-%d %H:%M:%S" 的本地时间字符串入库

use chrono::{Local, NaiveDateTime};

pub const STANDARD_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// 当前本地时间的标准字符串
pub fn now_standard_string() -> String {
    Local::now().format(STANDARD_FORMAT).to_string()
}

/// 解析标准时间字符串，失败时返回 None
pub fn parse_standard_string(value: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, STANDARD_FORMAT).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_standard_string() {
        let parsed = parse_standard_string("2026-08-30 12:34:56").unwrap();
        assert_eq!(parsed.format(STANDARD_FORMAT).to_string(), "2026-08-30 12:34:56");
    }

    #[test]
    fn test_parse_invalid_returns_none() {
        assert!(parse_standard_string("2026/08/30").is_none());
        assert!(parse_standard_string("").is_none());
    }

    #[test]
    fn test_now_round_trips() {
        let now = now_standard_string();
        assert!(parse_standard_string(&now).is_some());
    }
}
