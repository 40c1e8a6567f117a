//! API 에러 응답 타입.
//!
//! 웹훅 호출자는 알림 도구이므로 에러 본문은 JSON이 아닌 평문입니다.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use signal_core::SignalError;
use thiserror::Error;
use tracing::error;

/// 핸들러 에러.
#[derive(Debug, Error)]
pub enum ApiError {
    /// 요청 처리 실패
    #[error(transparent)]
    Signal(#[from] SignalError),
}

/// API 핸들러 Result 타입.
pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    /// HTTP 상태 코드.
    ///
    /// 입력 오류와 저장소 오류 모두 500으로 응답합니다.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Signal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let ApiError::Signal(ref inner) = self;
        error!(
            client_error = inner.is_client_error(),
            storage_error = inner.is_storage_error(),
            "Request failed: {}",
            inner
        );
        (status, self.to_string()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_error_response_is_plain_text_500() {
        let err = ApiError::from(SignalError::InvalidInput("bad number".to_string()));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let text = String::from_utf8(body.to_vec()).unwrap();
        assert!(text.contains("bad number"));
    }
}
