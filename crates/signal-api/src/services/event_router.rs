//! 웹훅 알림 라우터.
//!
//! 알림 종류에 따라 저장소를 갱신하고 텔레그램 알림을 보냅니다.
//!
//! | 종류    | 저장소                       | 알림                 |
//! |---------|------------------------------|----------------------|
//! | `ENTRY` | 레코드 추가                  | `EntryOpened`        |
//! | `CLOSE` | 최근 미청산 레코드 청산      | `PositionClosed`     |
//! | `BE`    | 없음                         | `BreakevenActivated` |

use std::sync::Arc;

use serde_json::Value;
use signal_core::{SignalResult, TradeAlert};
use signal_notification::{NotificationEvent, NotificationManager};
use tracing::{debug, info, warn};

use crate::repository::TradeRepository;

/// 알림 처리 결과.
#[derive(Debug, Clone, PartialEq)]
pub enum DispatchOutcome {
    /// 진입 기록됨
    EntryRecorded { trade_id: i64 },
    /// 청산 처리됨. 미청산 레코드가 없었으면 `None`
    Closed { trade_id: Option<i64> },
    /// 본전 이동 알림만 전송됨
    BreakevenNotified,
    /// 알 수 없는 종류, 처리하지 않음
    Ignored,
}

/// 웹훅 알림 라우터.
pub struct EventRouter {
    repository: TradeRepository,
    notifier: Arc<NotificationManager>,
}

impl EventRouter {
    pub fn new(repository: TradeRepository, notifier: Arc<NotificationManager>) -> Self {
        Self {
            repository,
            notifier,
        }
    }

    /// 원시 요청 본문을 처리합니다.
    ///
    /// Content-Type과 무관하게 본문을 JSON으로 디코딩합니다.
    pub async fn handle_payload(&self, body: &[u8]) -> SignalResult<DispatchOutcome> {
        let value: Value = serde_json::from_slice(body)?;

        match TradeAlert::from_json(&value)? {
            Some(alert) => self.dispatch(alert).await,
            None => {
                debug!(kind = ?value.get("t"), "Unknown alert type, ignoring");
                Ok(DispatchOutcome::Ignored)
            }
        }
    }

    /// 파싱된 알림을 처리합니다.
    ///
    /// 저장소 에러는 `SignalError::Database`로 전파되고, 알림 전송 실패는
    /// 로그로만 남습니다.
    pub async fn dispatch(&self, alert: TradeAlert) -> SignalResult<DispatchOutcome> {
        match alert {
            TradeAlert::Entry(trade) => {
                let trade_id = self.repository.record_entry(&trade).await?;
                info!(
                    trade_id = trade_id,
                    symbol = %trade.symbol,
                    direction = %trade.direction,
                    "Entry recorded"
                );

                self.notifier
                    .notify(NotificationEvent::EntryOpened {
                        direction: trade.direction,
                        symbol: trade.symbol,
                        timeframe: trade.timeframe,
                        entry: trade.entry,
                        stop_loss: trade.stop_loss,
                        take_profit: trade.take_profit,
                        risk_reward: trade.risk_reward,
                        h1_note: non_empty(trade.h1_note),
                        h4_note: non_empty(trade.h4_note),
                    })
                    .await;

                Ok(DispatchOutcome::EntryRecorded { trade_id })
            }

            TradeAlert::Close {
                direction,
                symbol,
                result,
                pnl,
            } => {
                let trade_id = self.repository.record_close(&symbol, &result, pnl).await?;
                match trade_id {
                    Some(id) => info!(
                        trade_id = id,
                        symbol = %symbol,
                        result = %result,
                        pnl = pnl,
                        "Trade closed"
                    ),
                    None => warn!(symbol = %symbol, "Close received with no open trade"),
                }

                self.notifier
                    .notify(NotificationEvent::PositionClosed {
                        symbol,
                        direction,
                        result,
                        pnl,
                    })
                    .await;

                Ok(DispatchOutcome::Closed { trade_id })
            }

            TradeAlert::Breakeven {
                direction,
                symbol,
                new_stop_loss,
            } => {
                info!(symbol = %symbol, new_stop_loss = %new_stop_loss, "Breakeven activated");

                self.notifier
                    .notify(NotificationEvent::BreakevenActivated {
                        symbol,
                        direction,
                        new_stop_loss,
                    })
                    .await;

                Ok(DispatchOutcome::BreakevenNotified)
            }
        }
    }
}

fn non_empty(note: String) -> Option<String> {
    if note.is_empty() {
        None
    } else {
        Some(note)
    }
}
