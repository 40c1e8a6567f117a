//! 시그널 웹훅 서버.
//!
//! Axum 기반 HTTP 서버를 시작합니다.
//! 알림 도구 웹훅, 텔레그램 봇 웹훅, 헬스 체크 엔드포인트를 제공합니다.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use axum::{http::StatusCode, Router};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use signal_api::repository::TradeRepository;
use signal_api::routes::create_api_router;
use signal_api::state::AppState;
use signal_core::{init_logging, AppConfig, LogConfig};
use signal_notification::{NotificationManager, NotificationSender, TelegramConfig, TelegramSender};

/// 전체 라우터 생성.
fn create_router(state: Arc<AppState>, request_timeout: Duration) -> Router {
    create_api_router()
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        // 전역 타임아웃 - 408 상태 코드 반환
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            request_timeout,
        ))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env 파일 로드 (있는 경우)
    let _ = dotenvy::dotenv();

    let config = AppConfig::load_default().context("설정 로드 실패")?;

    init_logging(LogConfig::from(&config.logging))
        .map_err(|e| anyhow::anyhow!("로깅 초기화 실패: {e}"))?;

    info!("Starting signal webhook server...");

    let addr: SocketAddr = config.server.bind_address().parse().map_err(|e| {
        error!(
            host = %config.server.host,
            port = config.server.port,
            error = %e,
            "소켓 주소 설정이 유효하지 않습니다. SIGNAL_SERVER__HOST, PORT 환경변수를 확인하세요."
        );
        e
    })?;

    let repository = TradeRepository::connect(&config.database)
        .await
        .with_context(|| format!("거래 저장소 연결 실패: {}", config.database.url))?;

    // 시그널 알림과 봇 응답은 같은 텔레그램 봇을 사용
    let telegram = TelegramSender::new(TelegramConfig::from_settings(&config.telegram));
    if !telegram.is_enabled() {
        warn!("BOT_TOKEN or CHAT_ID not set, Telegram notifications disabled");
    }
    let notifier = NotificationManager::new().with_sender(telegram.clone());

    let state = Arc::new(AppState::new(repository, notifier, telegram));
    info!(
        version = %state.version,
        notification_senders = state.notifier.enabled_senders(),
        "Application state initialized"
    );

    let app = create_router(
        state,
        Duration::from_secs(config.server.request_timeout_secs),
    );

    info!(%addr, "Signal server listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped gracefully");

    Ok(())
}

/// Graceful shutdown 시그널 대기.
///
/// Ctrl+C 또는 SIGTERM 시그널을 수신하면 반환합니다.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            warn!("Received Ctrl+C, initiating graceful shutdown...");
        }
        _ = terminate => {
            warn!("Received SIGTERM, initiating graceful shutdown...");
        }
    }
}
