//! 텔레그램 봇 서비스.
//!
//! 거래 저장소를 조회하여 `/stats` 명령어에 응답합니다.

use async_trait::async_trait;
use tracing::{debug, error};

use signal_notification::{
    render_stats, BotCommandHandler, CommandResponse, NotificationError, NotificationResult,
};

use crate::repository::TradeRepository;

/// 저장소 연동 봇 핸들러.
pub struct StatsBotHandler {
    repository: TradeRepository,
}

impl StatsBotHandler {
    /// 새 핸들러 생성.
    pub fn new(repository: TradeRepository) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl BotCommandHandler for StatsBotHandler {
    async fn handle_stats(&self) -> NotificationResult<CommandResponse> {
        debug!("통계 조회 시작");

        let stats = self.repository.compute_stats().await.map_err(|e| {
            error!("통계 조회 실패: {}", e);
            NotificationError::CommandFailed(e.to_string())
        })?;

        Ok(CommandResponse::markdown(render_stats(&stats)))
    }
}
