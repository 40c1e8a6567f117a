//! 거래 기록 도메인 타입.
//!
//! - `Direction` - 포지션 방향
//! - `TradeResult` - 청산 결과
//! - `NewTrade` - 진입 시 저장되는 불변 필드

use serde::{Deserialize, Serialize};

/// 포지션 방향.
///
/// 알림 도구가 보낸 원문을 그대로 보존합니다. `LONG`/`SHORT` 외의 값이나
/// 빈 문자열도 거부하지 않고 `Other`로 유지합니다.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Direction {
    /// 매수 포지션
    Long,
    /// 매도 포지션
    Short,
    /// 그 외 원문
    Other(String),
}

impl Direction {
    /// 원문 문자열에서 방향을 만듭니다. 대소문자를 구분합니다.
    pub fn from_raw(raw: &str) -> Self {
        match raw {
            "LONG" => Direction::Long,
            "SHORT" => Direction::Short,
            other => Direction::Other(other.to_string()),
        }
    }

    /// 저장/표시에 사용하는 원문.
    pub fn as_str(&self) -> &str {
        match self {
            Direction::Long => "LONG",
            Direction::Short => "SHORT",
            Direction::Other(raw) => raw,
        }
    }

    /// 매수 포지션 여부.
    pub fn is_long(&self) -> bool {
        matches!(self, Direction::Long)
    }
}

impl From<String> for Direction {
    fn from(raw: String) -> Self {
        Direction::from_raw(&raw)
    }
}

impl From<Direction> for String {
    fn from(direction: Direction) -> Self {
        direction.as_str().to_string()
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 청산 결과.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TradeResult {
    /// 익절 (TP)
    TakeProfit,
    /// 손절 (SL)
    StopLoss,
    /// 본전 청산 (BE)
    Breakeven,
    /// 그 외 원문
    Other(String),
}

impl TradeResult {
    /// 원문 문자열에서 결과를 만듭니다.
    pub fn from_raw(raw: &str) -> Self {
        match raw {
            "TP" => TradeResult::TakeProfit,
            "SL" => TradeResult::StopLoss,
            "BE" => TradeResult::Breakeven,
            other => TradeResult::Other(other.to_string()),
        }
    }

    /// `result` 컬럼에 저장되는 값.
    pub fn as_str(&self) -> &str {
        match self {
            TradeResult::TakeProfit => "TP",
            TradeResult::StopLoss => "SL",
            TradeResult::Breakeven => "BE",
            TradeResult::Other(raw) => raw,
        }
    }

    /// 알림에 표시하는 이름. 알 수 없는 결과는 원문 그대로입니다.
    pub fn label(&self) -> &str {
        match self {
            TradeResult::TakeProfit => "TAKE PROFIT",
            TradeResult::StopLoss => "STOP LOSS",
            TradeResult::Breakeven => "BREAKEVEN",
            TradeResult::Other(raw) => raw,
        }
    }
}

impl From<String> for TradeResult {
    fn from(raw: String) -> Self {
        TradeResult::from_raw(&raw)
    }
}

impl From<TradeResult> for String {
    fn from(result: TradeResult) -> Self {
        result.as_str().to_string()
    }
}

impl std::fmt::Display for TradeResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 진입 이벤트로 생성되는 거래.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTrade {
    pub direction: Direction,
    pub symbol: String,
    pub timeframe: String,
    pub entry: f64,
    pub stop_loss: f64,
    pub take_profit: f64,
    pub risk_reward: f64,
    /// H1 관심 구간 메모
    pub h1_note: String,
    /// H4 관심 구간 메모
    pub h4_note: String,
}
