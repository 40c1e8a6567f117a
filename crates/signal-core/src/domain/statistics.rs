//! 청산된 거래의 집계 통계.

use serde::{Deserialize, Serialize};

/// 거래 통계 집계.
///
/// 결과가 기록된(청산된) 거래만 대상으로 합니다.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TradeStats {
    /// 청산된 거래 수
    pub total_closed: i64,
    /// 승률 (백분율, 예: 66.7 = 66.7%)
    pub win_rate: f64,
    /// 누적 손익 (핍)
    pub total_pnl: f64,
    /// 익절 횟수
    pub tp_count: i64,
    /// 손절 횟수
    pub sl_count: i64,
    /// 본전 청산 횟수
    pub be_count: i64,
}

impl TradeStats {
    /// 집계 값으로부터 통계를 만듭니다.
    ///
    /// 승률은 익절 횟수 / 청산 수 * 100 이며, 청산된 거래가 없으면 0입니다.
    /// 손익 합계가 없으면(NULL) 0으로 취급합니다.
    pub fn from_counts(
        total_closed: i64,
        tp_count: i64,
        sl_count: i64,
        be_count: i64,
        total_pnl: Option<f64>,
    ) -> Self {
        Self {
            total_closed,
            win_rate: win_rate(tp_count, total_closed),
            total_pnl: total_pnl.unwrap_or(0.0),
            tp_count,
            sl_count,
            be_count,
        }
    }

    /// 다른 결과(TP/SL/BE 이외)로 청산된 거래 수.
    pub fn other_count(&self) -> i64 {
        (self.total_closed - self.tp_count - self.sl_count - self.be_count).max(0)
    }
}

/// 승률 계산 (백분율).
pub fn win_rate(wins: i64, total: i64) -> f64 {
    if total > 0 {
        wins as f64 / total as f64 * 100.0
    } else {
        0.0
    }
}
