use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tracing::warn;
use utoipa::ToSchema;

use crate::api::error::InnerApiError;

/// 统一的 JSON 响应包装
#[derive(Serialize, ToSchema)]
pub struct ApiResponse<T: Serialize> {
    pub status_code: u16,
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            status_code: StatusCode::OK.as_u16(),
            data,
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

/// 错误响应包装：内部统一走 anyhow，输出时按 InnerApiError 决定状态码
pub struct ApiError(anyhow::Error);

impl<E: Into<anyhow::Error>> From<E> for ApiError {
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

#[derive(Serialize)]
struct ErrorBody {
    status_code: u16,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self.0.downcast_ref::<InnerApiError>() {
            Some(inner) => (inner.status_code(), inner.to_string()),
            None => {
                // 非业务错误不把细节透给调用方
                warn!("请求处理失败: {:#}", self.0);
                (StatusCode::INTERNAL_SERVER_ERROR, "内部错误".to_string())
            }
        };

        let body = Json(ErrorBody {
            status_code: status.as_u16(),
            message,
        });

        // 限流响应附带配额元数据头
        if let Some(InnerApiError::RateLimited { remaining, reset_at }) = self.0.downcast_ref::<InnerApiError>() {
            return (
                status,
                [
                    ("X-RateLimit-Remaining", remaining.to_string()),
                    ("X-RateLimit-Reset", reset_at.clone()),
                ],
                body,
            )
                .into_response();
        }

        (status, body).into_response()
    }
}
