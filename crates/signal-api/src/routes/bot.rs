//! 텔레그램 봇 웹훅 endpoint.
//!
//! POST /bot
//!
//! 처리 결과와 무관하게 항상 200 `OK`로 응답하며, 에러는 로그로만 남깁니다.

use std::sync::Arc;

use axum::{body::Bytes, extract::State, http::StatusCode, response::IntoResponse};
use signal_notification::BotUpdate;
use tracing::{error, warn};

use crate::state::AppState;

/// 봇 업데이트 수신.
pub async fn receive_update(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> impl IntoResponse {
    match serde_json::from_slice::<BotUpdate>(&body) {
        Ok(update) => {
            if let Err(e) = state.bot.handle_update(update).await {
                error!("Failed to handle bot update: {}", e);
            }
        }
        Err(e) => warn!("Invalid bot update payload: {}", e),
    }

    (StatusCode::OK, "OK")
}
