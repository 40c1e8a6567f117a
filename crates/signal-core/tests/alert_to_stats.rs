//! 알림 파싱과 통계 계산 통합 테스트
//!
//! 웹훅 페이로드에서 만든 진입/청산 값으로 핍 거리와 통계를 계산합니다.

use serde_json::json;
use signal_core::{Direction, PipDistances, TradeAlert, TradeResult, TradeStats};

#[test]
fn test_entry_payload_to_pip_distances() {
    let payload = json!({
        "t": "ENTRY", "d": "LONG", "s": "EURUSD", "tf": "M15",
        "e": "1.1050", "sl": 1.1020, "tp": "1.1120", "rr": 2.3
    });

    let Some(TradeAlert::Entry(trade)) = TradeAlert::from_json(&payload).unwrap() else {
        panic!("expected entry alert");
    };
    assert_eq!(trade.direction, Direction::Long);

    let distances = PipDistances::new(trade.entry, trade.stop_loss, trade.take_profit);
    assert_eq!(format!("{:.1}", distances.stop_loss), "30.0");
    assert_eq!(format!("{:.1}", distances.take_profit), "70.0");
}

#[test]
fn test_close_payloads_to_stats() {
    let payloads = [
        json!({"t": "CLOSE", "s": "EURUSD", "r": "TP", "pnl": 20}),
        json!({"t": "CLOSE", "s": "GBPUSD", "r": "TP", "pnl": "15.5"}),
        json!({"t": "CLOSE", "s": "USDJPY", "r": "SL", "pnl": -10}),
        json!({"t": "CLOSE", "s": "AUDUSD", "r": "BE"}),
    ];

    let (mut tp, mut sl, mut be, mut pnl) = (0, 0, 0, 0.0);
    for payload in &payloads {
        let Some(TradeAlert::Close { result, pnl: value, .. }) =
            TradeAlert::from_json(payload).unwrap()
        else {
            panic!("expected close alert");
        };
        match result {
            TradeResult::TakeProfit => tp += 1,
            TradeResult::StopLoss => sl += 1,
            TradeResult::Breakeven => be += 1,
            TradeResult::Other(_) => {}
        }
        pnl += value;
    }

    let stats = TradeStats::from_counts(payloads.len() as i64, tp, sl, be, Some(pnl));
    assert_eq!(stats.total_closed, 4);
    assert_eq!(stats.be_count, 1);
    assert_eq!(format!("{:.1}", stats.win_rate), "50.0");
    assert_eq!(format!("{:+.1}", stats.total_pnl), "+25.5");
}
