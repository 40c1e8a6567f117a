//! 텔레그램 메시지 템플릿.
//!
//! 모든 템플릿은 Telegram `Markdown` 파싱 모드를 기준으로 작성됩니다.

use signal_core::{Direction, PipDistances, TradeResult, TradeStats};

use crate::types::NotificationEvent;

const SEPARATOR: &str = "━━━━━━━━━━━━";

/// 봇 소개 메시지 (`/start`).
pub const START_MESSAGE: &str = "🤖 *ASA Trading Bot*\n\n/stats - Statistics\n/help - Help";

/// 도움말 메시지 (`/help`).
pub const HELP_MESSAGE: &str = "❓ *Help*\n\n\
     /stats - Closed trades, win rate and PnL\n\
     /start - Bot info\n\
     /help - This message";

/// 알 수 없는 명령어 응답.
pub const UNKNOWN_COMMAND_MESSAGE: &str = "Use /stats or /help";

/// 가격을 표시용 문자열로 변환합니다.
///
/// 정수 값도 `1.0`처럼 소수점을 유지합니다.
pub fn format_price(value: f64) -> String {
    let text = value.to_string();
    if value.is_finite() && !text.contains('.') && !text.contains('e') {
        format!("{text}.0")
    } else {
        text
    }
}

/// 방향 표시 이모지. `LONG`만 초록색입니다.
fn direction_emoji(direction: &Direction) -> &'static str {
    if direction.is_long() {
        "🟢"
    } else {
        "🔴"
    }
}

/// 청산 결과 이모지.
fn result_emoji(result: &TradeResult) -> &'static str {
    match result {
        TradeResult::TakeProfit => "✅🎯",
        TradeResult::StopLoss => "❌🛑",
        _ => "🔄",
    }
}

/// 손익 부호에 따른 표시 이모지.
fn pnl_emoji(pnl: f64) -> &'static str {
    if pnl >= 0.0 {
        "💵"
    } else {
        "🔻"
    }
}

/// 알림 이벤트를 텔레그램 메시지로 포맷합니다.
pub fn render_event(event: &NotificationEvent) -> String {
    match event {
        NotificationEvent::EntryOpened {
            direction,
            symbol,
            timeframe,
            entry,
            stop_loss,
            take_profit,
            risk_reward,
            h1_note,
            h4_note,
        } => {
            let distances = PipDistances::new(*entry, *stop_loss, *take_profit);
            let mut message = format!(
                "{emoji} *{direction} SIGNAL*\n\n\
                 💱 *{symbol}* | {timeframe}\n\
                 {SEPARATOR}\n\
                 💰 Entry: `{entry}`\n\
                 🛑 SL: `{sl}` ({sl_pips:.1} pips)\n\
                 🎯 TP: `{tp}` ({tp_pips:.1} pips)\n\
                 📊 RR: 1:{rr}",
                emoji = direction_emoji(direction),
                entry = format_price(*entry),
                sl = format_price(*stop_loss),
                tp = format_price(*take_profit),
                sl_pips = distances.stop_loss,
                tp_pips = distances.take_profit,
                rr = format_price(*risk_reward),
            );

            let notes: Vec<String> = [("H1", h1_note), ("H4", h4_note)]
                .into_iter()
                .filter_map(|(label, note)| {
                    note.as_deref()
                        .filter(|n| !n.is_empty())
                        .map(|n| format!("📍 {label}: {n}"))
                })
                .collect();
            if !notes.is_empty() {
                message.push_str(&format!("\n{SEPARATOR}\n{}", notes.join("\n")));
            }

            message
        }

        NotificationEvent::PositionClosed {
            symbol,
            direction,
            result,
            pnl,
        } => {
            let direction_line = if direction.as_str().is_empty() {
                String::new()
            } else {
                format!("📊 {direction}\n")
            };
            format!(
                "{emoji} *CLOSED*\n\n\
                 💱 *{symbol}*\n\
                 {direction_line}\
                 📋 Result: *{label}*\n\
                 {pnl_emoji} PnL: *{pnl:+.1} pips*",
                emoji = result_emoji(result),
                label = result.label(),
                pnl_emoji = pnl_emoji(*pnl),
            )
        }

        NotificationEvent::BreakevenActivated {
            symbol,
            direction,
            new_stop_loss,
        } => {
            format!(
                "🔄 *BREAKEVEN*\n\n\
                 💱 *{symbol}*\n\
                 📊 {direction}\n\
                 🛑 New SL: `{new_stop_loss}`"
            )
        }
    }
}

/// `/stats` 응답 메시지.
pub fn render_stats(stats: &TradeStats) -> String {
    format!(
        "📊 *Stats*\n\n\
         Trades: {total}\n\
         Win Rate: {win_rate:.1}%\n\
         PnL: {pnl:+.1} pips\n\n\
         ✅ TP: {tp}\n\
         ❌ SL: {sl}\n\
         🔄 BE: {be}",
        total = stats.total_closed,
        win_rate = stats.win_rate,
        pnl = stats.total_pnl,
        tp = stats.tp_count,
        sl = stats.sl_count,
        be = stats.be_count,
    )
}
