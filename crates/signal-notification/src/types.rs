//! 알림 타입 및 trait 정의.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use signal_core::{Direction, TradeResult};

/// 알림 이벤트 타입.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NotificationEvent {
    /// 신규 진입 시그널
    EntryOpened {
        direction: Direction,
        symbol: String,
        timeframe: String,
        entry: f64,
        stop_loss: f64,
        take_profit: f64,
        risk_reward: f64,
        h1_note: Option<String>,
        h4_note: Option<String>,
    },
    /// 포지션 청산
    PositionClosed {
        symbol: String,
        direction: Direction,
        result: TradeResult,
        pnl: f64,
    },
    /// 손절가 본전 이동
    BreakevenActivated {
        symbol: String,
        direction: Direction,
        /// 알림 도구가 보낸 원문 그대로의 새 손절가
        new_stop_loss: String,
    },
}

impl NotificationEvent {
    /// 이벤트 종류 이름 (로그용).
    pub fn kind(&self) -> &'static str {
        match self {
            NotificationEvent::EntryOpened { .. } => "entry_opened",
            NotificationEvent::PositionClosed { .. } => "position_closed",
            NotificationEvent::BreakevenActivated { .. } => "breakeven_activated",
        }
    }

    /// 이벤트 대상 심볼.
    pub fn symbol(&self) -> &str {
        match self {
            NotificationEvent::EntryOpened { symbol, .. }
            | NotificationEvent::PositionClosed { symbol, .. }
            | NotificationEvent::BreakevenActivated { symbol, .. } => symbol,
        }
    }
}

/// 알림 메시지.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    /// 알림 이벤트
    pub event: NotificationEvent,
    /// 타임스탬프
    pub timestamp: DateTime<Utc>,
}

impl Notification {
    /// 새 알림을 생성합니다.
    pub fn new(event: NotificationEvent) -> Self {
        Self {
            event,
            timestamp: Utc::now(),
        }
    }
}

/// 알림 작업용 Result 타입.
pub type NotificationResult<T> = Result<T, NotificationError>;

/// 알림 에러.
#[derive(Debug, thiserror::Error)]
pub enum NotificationError {
    #[error("알림 전송 실패: {0}")]
    SendFailed(String),

    #[error("잘못된 설정: {0}")]
    InvalidConfig(String),

    #[error("요청 한도 초과: {0}초 후 재시도")]
    RateLimited(u64),

    #[error("명령어 처리 실패: {0}")]
    CommandFailed(String),

    #[error("네트워크 에러: {0}")]
    NetworkError(#[from] reqwest::Error),
}

/// 알림 전송기 trait.
#[async_trait]
pub trait NotificationSender: Send + Sync {
    /// 알림을 전송합니다.
    async fn send(&self, notification: &Notification) -> NotificationResult<()>;

    /// 전송기가 활성화되어 있는지 확인합니다.
    fn is_enabled(&self) -> bool;

    /// 전송기 이름을 반환합니다.
    fn name(&self) -> &str;
}
