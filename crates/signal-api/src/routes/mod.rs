//! API 라우트.
//!
//! 모든 엔드포인트를 정의하고 라우터를 구성합니다.
//!
//! # 라우트 구조
//!
//! - `/` - 서비스 안내
//! - `/health` - 헬스 체크
//! - `/webhook` - 알림 도구 시그널 수신
//! - `/bot` - 텔레그램 봇 업데이트 수신

pub mod bot;
pub mod health;
pub mod webhook;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;

pub use bot::receive_update;
pub use health::{health_check, index};
pub use webhook::receive_alert;

/// 전체 라우터 생성.
pub fn create_api_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health_check))
        .route("/webhook", post(receive_alert))
        .route("/bot", post(receive_update))
}
