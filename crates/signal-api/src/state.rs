//! 모든 핸들러에서 공유되는 애플리케이션 상태.
//!
//! AppState는 모든 API 핸들러에서 공유되는 상태를 관리합니다.
//! Arc로 래핑되어 여러 요청 간에 안전하게 공유됩니다.

use std::sync::Arc;

use signal_notification::{NotificationManager, TelegramBotHandler, TelegramSender};

use crate::repository::TradeRepository;
use crate::services::{EventRouter, StatsBotHandler};

/// 애플리케이션 공유 상태.
///
/// Axum의 State extractor를 통해 핸들러에 주입됩니다.
#[derive(Clone)]
pub struct AppState {
    /// 거래 기록 저장소 (SQLite)
    pub repository: TradeRepository,

    /// 알림 관리자 - 시그널 알림 전송
    pub notifier: Arc<NotificationManager>,

    /// 웹훅 알림 라우터
    pub event_router: Arc<EventRouter>,

    /// 봇 명령어 핸들러 - `/bot` 업데이트 처리
    pub bot: Arc<TelegramBotHandler<StatsBotHandler>>,

    /// API 버전
    pub version: String,
}

impl AppState {
    /// 새 AppState 생성.
    ///
    /// # Arguments
    /// * `repository` - 거래 기록 저장소
    /// * `notifier` - 시그널 알림 관리자
    /// * `bot_sender` - 봇 응답 전송에 사용할 텔레그램 전송기
    pub fn new(
        repository: TradeRepository,
        notifier: NotificationManager,
        bot_sender: TelegramSender,
    ) -> Self {
        let notifier = Arc::new(notifier);
        let event_router = Arc::new(EventRouter::new(repository.clone(), Arc::clone(&notifier)));
        let stats_handler = Arc::new(StatsBotHandler::new(repository.clone()));
        let bot = Arc::new(TelegramBotHandler::new(bot_sender, stats_handler));

        Self {
            repository,
            notifier,
            event_router,
            bot,
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// 테스트용 AppState 생성.
///
/// 인메모리 SQLite와 메모리 전송기를 사용합니다. 봇 응답 전송기는 토큰이
/// 없으므로 응답 전송은 항상 실패합니다.
#[cfg(any(test, feature = "test-utils"))]
pub async fn create_test_state() -> (AppState, signal_notification::testing::MemorySender) {
    use signal_core::DatabaseConfig;
    use signal_notification::testing::MemorySender;
    use signal_notification::TelegramConfig;

    let config = DatabaseConfig {
        url: "sqlite::memory:".to_string(),
        ..Default::default()
    };
    let repository = TradeRepository::connect(&config)
        .await
        .expect("Failed to open in-memory trade store");

    let memory = MemorySender::new();
    let notifier = NotificationManager::new().with_sender(memory.clone());
    let bot_sender = TelegramSender::new(TelegramConfig::new("", ""));

    (AppState::new(repository, notifier, bot_sender), memory)
}
