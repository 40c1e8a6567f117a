//! 시그널 웹훅 서버.
//!
//! 이 크레이트는 다음을 제공합니다:
//! - 알림 도구 웹훅 수신 및 거래 기록 (SQLite)
//! - 텔레그램 시그널 알림 전송
//! - 텔레그램 봇 `/stats` 명령어 응답
//! - 헬스 체크 엔드포인트
//!
//! # 모듈 구성
//!
//! - [`state`]: 애플리케이션 공유 상태 (AppState)
//! - [`routes`]: HTTP 엔드포인트
//! - [`repository`]: 거래 기록 저장소
//! - [`services`]: 웹훅 라우팅과 봇 명령어 처리

pub mod error;
pub mod repository;
pub mod routes;
pub mod services;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use repository::{TradeRecord, TradeRepository};
pub use routes::create_api_router;
pub use services::{DispatchOutcome, EventRouter, StatsBotHandler};
pub use state::AppState;

#[cfg(any(test, feature = "test-utils"))]
pub use state::create_test_state;
