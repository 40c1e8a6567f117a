//! 시그널 웹훅 endpoint.
//!
//! POST /webhook
//!
//! 본문은 Content-Type과 무관하게 JSON으로 디코딩합니다. 처리 성공 시
//! (알 수 없는 `t` 포함) 200 `OK`, 디코딩/변환/저장 실패 시 500과 에러
//! 메시지를 평문으로 응답합니다.

use std::sync::Arc;

use axum::{body::Bytes, extract::State};
use tracing::debug;

use crate::error::ApiResult;
use crate::state::AppState;

/// 알림 도구 웹훅 수신.
pub async fn receive_alert(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> ApiResult<&'static str> {
    let outcome = state.event_router.handle_payload(&body).await?;
    debug!(?outcome, "Webhook handled");
    Ok("OK")
}
