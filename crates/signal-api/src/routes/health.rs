//! 헬스 체크 endpoint.
//!
//! 서버 상태 확인을 위한 엔드포인트를 제공합니다.
//! 호스팅 플랫폼의 상태 확인이나 업타임 모니터링에서 사용됩니다.

use axum::{http::StatusCode, response::IntoResponse};

/// 루트 경로 응답 본문.
pub const INDEX_MESSAGE: &str = "ASA Trading Bot is running!";

/// 서비스 안내.
///
/// GET /
pub async fn index() -> impl IntoResponse {
    (StatusCode::OK, INDEX_MESSAGE)
}

/// 헬스 체크.
///
/// 서버가 응답 가능한 상태인지만 확인합니다.
/// GET /health
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}
