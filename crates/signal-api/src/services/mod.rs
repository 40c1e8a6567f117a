//! 요청 처리 서비스 모듈.
//!
//! 웹훅 알림 라우팅과 봇 명령어 응답을 제공합니다.

pub mod event_router;
pub mod telegram_bot;

pub use event_router::{DispatchOutcome, EventRouter};
pub use telegram_bot::StatsBotHandler;
