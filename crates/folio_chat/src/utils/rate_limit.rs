//! 按访客标识的固定窗口限流器
//!
//! 单进程内用 DashMap 的 entry 锁保证同一 key 的检查与计数是原子的。
//! 多副本部署时各副本独立计数，配额会被放大，需要外部计数存储才能精确，
//! 当前部署形态为单实例，不做处理。

use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;

#[derive(Debug, Clone, Copy)]
struct Window {
    count: u32,
    started_at: DateTime<Utc>,
}

/// 固定窗口限流器
pub struct RateLimiter {
    max_requests: u32,
    window: Duration,
    windows: DashMap<String, Window>,
}

impl RateLimiter {
    pub fn new(max_requests: u32, window_seconds: u64) -> Self {
        Self {
            max_requests,
            window: Duration::seconds(window_seconds as i64),
            windows: DashMap::new(),
        }
    }

    /// 检查并计数，允许则返回 true
    pub fn allow(&self, key: &str) -> bool {
        self.allow_at(key, Utc::now())
    }

    /// 当前窗口剩余配额
    pub fn remaining(&self, key: &str) -> u32 {
        self.remaining_at(key, Utc::now())
    }

    /// 当前窗口的重置时间
    pub fn reset_at(&self, key: &str) -> DateTime<Utc> {
        self.reset_at_with(key, Utc::now())
    }

    fn allow_at(&self, key: &str, now: DateTime<Utc>) -> bool {
        let mut entry = self.windows.entry(key.to_string()).or_insert(Window {
            count: 0,
            started_at: now,
        });

        // 窗口过期则重置
        if now - entry.started_at >= self.window {
            entry.count = 0;
            entry.started_at = now;
        }

        if entry.count >= self.max_requests {
            return false;
        }
        entry.count += 1;
        true
    }

    fn remaining_at(&self, key: &str, now: DateTime<Utc>) -> u32 {
        match self.windows.get(key) {
            Some(window) if now - window.started_at < self.window => {
                self.max_requests.saturating_sub(window.count)
            }
            _ => self.max_requests,
        }
    }

    fn reset_at_with(&self, key: &str, now: DateTime<Utc>) -> DateTime<Utc> {
        match self.windows.get(key) {
            Some(window) if now - window.started_at < self.window => window.started_at + self.window,
            _ => now + self.window,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(seconds: i64) -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000 + seconds, 0).unwrap()
    }

    #[test]
    fn test_allows_up_to_max_then_rejects() {
        let limiter = RateLimiter::new(3, 60);
        assert!(limiter.allow_at("1.2.3.4", at(0)));
        assert!(limiter.allow_at("1.2.3.4", at(1)));
        assert!(limiter.allow_at("1.2.3.4", at(2)));
        // 第 N+1 次在窗口内被拒绝
        assert!(!limiter.allow_at("1.2.3.4", at(3)));
        assert_eq!(limiter.remaining_at("1.2.3.4", at(3)), 0);
    }

    #[test]
    fn test_window_elapse_resets_quota() {
        let limiter = RateLimiter::new(2, 60);
        assert!(limiter.allow_at("k", at(0)));
        assert!(limiter.allow_at("k", at(1)));
        assert!(!limiter.allow_at("k", at(59)));
        // 窗口过期后恢复
        assert!(limiter.allow_at("k", at(60)));
        assert_eq!(limiter.remaining_at("k", at(61)), 1);
    }

    #[test]
    fn test_keys_are_independent() {
        let limiter = RateLimiter::new(1, 60);
        assert!(limiter.allow_at("a", at(0)));
        assert!(limiter.allow_at("b", at(0)));
        assert!(!limiter.allow_at("a", at(1)));
    }

    #[test]
    fn test_reset_at_reports_window_end() {
        let limiter = RateLimiter::new(1, 60);
        assert!(limiter.allow_at("k", at(0)));
        assert_eq!(limiter.reset_at_with("k", at(10)), at(60));
        // 未见过的 key 返回从现在起的一个完整窗口
        assert_eq!(limiter.reset_at_with("new", at(10)), at(70));
    }

    #[test]
    fn test_remaining_for_unseen_key() {
        let limiter = RateLimiter::new(5, 60);
        assert_eq!(limiter.remaining_at("nobody", at(0)), 5);
    }
}
