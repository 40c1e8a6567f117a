//! 웹훅 알림 페이로드.
//!
//! 차트 알림 도구는 짧은 키를 가진 JSON 객체를 보냅니다:
//!
//! | 키   | 의미                         | 사용          |
//! |------|------------------------------|---------------|
//! | `t`  | 알림 종류 (ENTRY/CLOSE/BE)   | 전체          |
//! | `d`  | 방향                         | 전체          |
//! | `s`  | 심볼                         | 전체          |
//! | `tf` | 타임프레임                   | ENTRY         |
//! | `e`, `sl`, `tp`, `rr` | 진입/손절/익절/손익비 | ENTRY (BE는 `sl`만 원문) |
//! | `h1`, `h4` | 관심 구간 메모         | ENTRY         |
//! | `r`, `pnl` | 청산 결과/손익         | CLOSE         |
//!
//! 누락된 숫자 필드는 0, 누락된 문자열 필드는 빈 문자열로 채웁니다.

use serde_json::{Map, Value};

use super::trade::{Direction, NewTrade, TradeResult};
use crate::error::{SignalError, SignalResult};

/// 파싱된 웹훅 알림.
#[derive(Debug, Clone, PartialEq)]
pub enum TradeAlert {
    /// 신규 진입
    Entry(NewTrade),
    /// 청산
    Close {
        direction: Direction,
        symbol: String,
        result: TradeResult,
        pnl: f64,
    },
    /// 손절가 본전 이동
    Breakeven {
        direction: Direction,
        symbol: String,
        /// 변환하지 않은 원문
        new_stop_loss: String,
    },
}

impl TradeAlert {
    /// JSON 값에서 알림을 파싱합니다.
    ///
    /// 알 수 없거나 누락된 `t` 값은 `Ok(None)`을 반환합니다. 객체가 아닌
    /// 본문이나 숫자로 변환할 수 없는 필드는 `InvalidInput` 에러입니다.
    pub fn from_json(value: &Value) -> SignalResult<Option<Self>> {
        let fields = value.as_object().ok_or_else(|| {
            SignalError::InvalidInput(format!("expected JSON object, got {}", json_type(value)))
        })?;

        let alert = match string_field(fields, "t").as_str() {
            "ENTRY" => TradeAlert::Entry(NewTrade {
                direction: Direction::from_raw(&string_field(fields, "d")),
                symbol: string_field(fields, "s"),
                timeframe: string_field(fields, "tf"),
                entry: number_field(fields, "e")?,
                stop_loss: number_field(fields, "sl")?,
                take_profit: number_field(fields, "tp")?,
                risk_reward: number_field(fields, "rr")?,
                h1_note: string_field(fields, "h1"),
                h4_note: string_field(fields, "h4"),
            }),
            "CLOSE" => TradeAlert::Close {
                direction: Direction::from_raw(&string_field(fields, "d")),
                symbol: string_field(fields, "s"),
                result: TradeResult::from_raw(&string_field(fields, "r")),
                pnl: number_field(fields, "pnl")?,
            },
            "BE" => TradeAlert::Breakeven {
                direction: Direction::from_raw(&string_field(fields, "d")),
                symbol: string_field(fields, "s"),
                new_stop_loss: string_field(fields, "sl"),
            },
            _ => return Ok(None),
        };

        Ok(Some(alert))
    }

    /// 알림 종류 (`ENTRY`, `CLOSE`, `BE`).
    pub fn kind(&self) -> &'static str {
        match self {
            TradeAlert::Entry(_) => "ENTRY",
            TradeAlert::Close { .. } => "CLOSE",
            TradeAlert::Breakeven { .. } => "BE",
        }
    }

    /// 알림 대상 심볼.
    pub fn symbol(&self) -> &str {
        match self {
            TradeAlert::Entry(trade) => &trade.symbol,
            TradeAlert::Close { symbol, .. } | TradeAlert::Breakeven { symbol, .. } => symbol,
        }
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// 문자열 필드. 누락/null은 빈 문자열, 숫자 등은 JSON 표기 그대로입니다.
fn string_field(fields: &Map<String, Value>, key: &str) -> String {
    match fields.get(key) {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// 숫자 필드. 숫자와 숫자 문자열을 모두 받고, 누락/null은 0입니다.
fn number_field(fields: &Map<String, Value>, key: &str) -> SignalResult<f64> {
    match fields.get(key) {
        None | Some(Value::Null) => Ok(0.0),
        Some(Value::Number(n)) => n.as_f64().ok_or_else(|| invalid_number(key, &n.to_string())),
        Some(Value::String(s)) => s.trim().parse::<f64>().map_err(|_| invalid_number(key, s)),
        Some(Value::Bool(b)) => Ok(if *b { 1.0 } else { 0.0 }),
        Some(other) => Err(invalid_number(key, &other.to_string())),
    }
}

fn invalid_number(key: &str, raw: &str) -> SignalError {
    SignalError::InvalidInput(format!("field '{key}': could not convert '{raw}' to a number"))
}
