//! # Signal Notification
//!
//! 트레이딩 시그널 알림 서비스.
//!
//! - 진입/청산/본전 이벤트를 텔레그램 메시지로 포맷
//! - Telegram Bot API로 전송 (실패는 로그만 남기고 무시)
//! - 봇 웹훅 명령어 처리
//!
//! # 텔레그램 봇 명령어
//!
//! - `/start` - 봇 소개
//! - `/stats` - 청산 거래 통계
//! - `/help` - 도움말

pub mod bot_handler;
pub mod format;
pub mod telegram;
#[cfg(any(test, feature = "test-utils"))]
pub mod testing;
pub mod types;

pub use bot_handler::*;
pub use format::*;
pub use telegram::*;
pub use types::*;
