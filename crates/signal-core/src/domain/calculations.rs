//! 가격 거리 계산 공통 로직.
//!
//! 진입 알림의 손절/익절 거리와 통계 표시에 사용됩니다.

/// 가격 차이를 핍으로 변환하는 배율.
///
/// 소수점 4자리 호가(EURUSD 등) 기준입니다. JPY 페어처럼 소수점 2자리
/// 호가를 쓰는 종목에는 맞지 않으며 설정으로 바꿀 수 없습니다.
pub const PIP_FACTOR: f64 = 10_000.0;

/// 두 가격 사이의 거리를 핍 단위로 계산합니다.
///
/// 방향과 무관하게 항상 0 이상의 값을 반환합니다.
pub fn pips(from: f64, to: f64) -> f64 {
    (from - to).abs() * PIP_FACTOR
}

/// 진입가 기준 손절/익절 거리.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PipDistances {
    /// 진입가와 손절가 사이 거리
    pub stop_loss: f64,
    /// 진입가와 익절가 사이 거리
    pub take_profit: f64,
}

impl PipDistances {
    /// 진입/손절/익절 가격으로부터 거리를 계산합니다.
    pub fn new(entry: f64, stop_loss: f64, take_profit: f64) -> Self {
        Self {
            stop_loss: pips(entry, stop_loss),
            take_profit: pips(take_profit, entry),
        }
    }
}
