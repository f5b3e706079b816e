use axum::http::StatusCode;
use thiserror::Error;

/// API 层的业务错误，决定响应状态码
///
/// 上游补全服务的失败不在这里：问答接口对外永远返回兜底文案而不是 5xx
#[derive(Error, Debug)]
pub enum InnerApiError {
    #[error("请求不合法: {0}")]
    BadRequest(String),

    #[error("资源不存在: {0}")]
    NotFound(String),

    #[error("请求过于频繁，请稍后再试")]
    RateLimited {
        remaining: u32,
        /// RFC3339 格式的窗口重置时间
        reset_at: String,
    },
}

impl InnerApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            InnerApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            InnerApiError::NotFound(_) => StatusCode::NOT_FOUND,
            InnerApiError::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_code_mapping() {
        assert_eq!(
            InnerApiError::BadRequest("x".to_string()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            InnerApiError::NotFound("x".to_string()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            InnerApiError::RateLimited {
                remaining: 0,
                reset_at: "2026-08-30T00:00:00Z".to_string()
            }
            .status_code(),
            StatusCode::TOO_MANY_REQUESTS
        );
    }
}
