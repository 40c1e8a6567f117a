//! 웹훅 → 저장소 → 알림 통합 테스트
//!
//! 전체 라우터에 HTTP 요청을 보내 알림 도구와 텔레그램 봇의 흐름을 검증합니다.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use mockito::Matcher;
use signal_api::{create_api_router, AppState, TradeRepository};
use signal_core::DatabaseConfig;
use signal_notification::testing::MemorySender;
use signal_notification::{NotificationManager, TelegramConfig, TelegramSender};
use tower::ServiceExt;

struct TestApp {
    router: Router,
    repository: TradeRepository,
    memory: MemorySender,
}

async fn test_app(bot_sender: TelegramSender) -> TestApp {
    let config = DatabaseConfig {
        url: "sqlite::memory:".to_string(),
        ..Default::default()
    };
    let repository = TradeRepository::connect(&config).await.unwrap();
    let memory = MemorySender::new();
    let notifier = NotificationManager::new().with_sender(memory.clone());

    let state = AppState::new(repository.clone(), notifier, bot_sender);
    TestApp {
        router: create_api_router().with_state(Arc::new(state)),
        repository,
        memory,
    }
}

fn offline_bot() -> TelegramSender {
    TelegramSender::new(TelegramConfig::new("", ""))
}

async fn send(router: &Router, method: &str, uri: &str, body: &str) -> (StatusCode, String) {
    let response = router
        .clone()
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

#[tokio::test]
async fn test_service_endpoints() {
    let app = test_app(offline_bot()).await;

    assert_eq!(
        send(&app.router, "GET", "/", "").await,
        (StatusCode::OK, "ASA Trading Bot is running!".to_string())
    );
    assert_eq!(
        send(&app.router, "GET", "/health", "").await,
        (StatusCode::OK, "OK".to_string())
    );
    assert_eq!(
        send(&app.router, "GET", "/health/ready", "").await.0,
        StatusCode::NOT_FOUND
    );
}

#[tokio::test]
async fn test_entry_then_close_lifecycle() {
    let app = test_app(offline_bot()).await;

    let entry = r#"{"t":"ENTRY","d":"LONG","s":"GBPUSD","tf":"M5","e":1.2700,"sl":1.2680,"tp":1.2740,"rr":2}"#;
    assert_eq!(send(&app.router, "POST", "/webhook", entry).await.0, StatusCode::OK);
    assert_eq!(send(&app.router, "POST", "/webhook", entry).await.0, StatusCode::OK);

    let close = r#"{"t":"CLOSE","d":"LONG","s":"GBPUSD","r":"TP","pnl":15.5}"#;
    assert_eq!(
        send(&app.router, "POST", "/webhook", close).await,
        (StatusCode::OK, "OK".to_string())
    );

    let records = app.repository.list_by_symbol("GBPUSD").await.unwrap();
    assert_eq!(records.len(), 2);
    assert!(records[0].result.is_none());
    assert_eq!(records[1].result.as_deref(), Some("TP"));
    assert_eq!(records[1].pnl, Some(15.5));

    let messages = app.memory.messages();
    assert_eq!(messages.len(), 3);
    assert!(messages[0].contains("20.0 pips"));
    assert!(messages[0].contains("40.0 pips"));
    assert!(messages[2].contains("TAKE PROFIT"));
}

#[tokio::test]
async fn test_close_without_open_trade_is_accepted() {
    let app = test_app(offline_bot()).await;

    let close = r#"{"t":"CLOSE","d":"SHORT","s":"EURJPY","r":"SL","pnl":-25}"#;
    assert_eq!(
        send(&app.router, "POST", "/webhook", close).await,
        (StatusCode::OK, "OK".to_string())
    );

    assert!(app.repository.list_by_symbol("EURJPY").await.unwrap().is_empty());
    let stats = app.repository.compute_stats().await.unwrap();
    assert_eq!(stats.total_closed, 0);
    assert_eq!(app.memory.events().len(), 1);
}

#[tokio::test]
async fn test_second_close_leaves_closed_record_untouched() {
    let app = test_app(offline_bot()).await;

    let entry = r#"{"t":"ENTRY","d":"LONG","s":"AUDUSD","e":0.6650,"sl":0.6630,"tp":0.6690,"rr":2}"#;
    let take_profit = r#"{"t":"CLOSE","d":"LONG","s":"AUDUSD","r":"TP","pnl":10}"#;
    let stop_loss = r#"{"t":"CLOSE","d":"LONG","s":"AUDUSD","r":"SL","pnl":-5}"#;

    assert_eq!(send(&app.router, "POST", "/webhook", entry).await.0, StatusCode::OK);
    assert_eq!(send(&app.router, "POST", "/webhook", take_profit).await.0, StatusCode::OK);
    assert_eq!(
        send(&app.router, "POST", "/webhook", stop_loss).await,
        (StatusCode::OK, "OK".to_string())
    );

    let records = app.repository.list_by_symbol("AUDUSD").await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].result.as_deref(), Some("TP"));
    assert_eq!(records[0].pnl, Some(10.0));

    let messages = app.memory.messages();
    assert_eq!(messages.len(), 3);
    assert!(messages[2].contains("STOP LOSS"));
}

#[tokio::test]
async fn test_entry_with_nan_price_is_accepted() {
    let app = test_app(offline_bot()).await;

    let entry = r#"{"t":"ENTRY","d":"SHORT","s":"XAUUSD","e":2350.5,"sl":2360,"tp":"NaN","rr":"NaN"}"#;
    assert_eq!(
        send(&app.router, "POST", "/webhook", entry).await,
        (StatusCode::OK, "OK".to_string())
    );

    let records = app.repository.list_by_symbol("XAUUSD").await.unwrap();
    assert_eq!(records.len(), 1);
    assert!(records[0].take_profit.is_none());
    assert_eq!(app.memory.events().len(), 1);
}

#[tokio::test]
async fn test_webhook_rejects_bad_numbers() {
    let app = test_app(offline_bot()).await;

    let (status, body) = send(
        &app.router,
        "POST",
        "/webhook",
        r#"{"t":"CLOSE","s":"EURUSD","r":"TP","pnl":"fifteen"}"#,
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body.contains("fifteen"));
    assert!(app.memory.events().is_empty());
}

#[tokio::test]
async fn test_stats_command_reports_win_rate() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/bot42:secret/sendMessage")
        .match_body(Matcher::AllOf(vec![
            Matcher::UrlEncoded("chat_id".into(), "-100777".into()),
            // 폼 인코딩된 본문: "Win Rate: 66.7%", "Trades: 3"
            Matcher::Regex(r"Win\+Rate%3A\+66\.7%25".into()),
            Matcher::Regex(r"Trades%3A\+3".into()),
        ]))
        .with_status(200)
        .with_body(r#"{"ok":true}"#)
        .create_async()
        .await;

    let bot = TelegramSender::new(
        TelegramConfig::new("42:secret", "-100777").with_api_base_url(server.url()),
    );
    let app = test_app(bot).await;

    for (symbol, result, pnl) in [("EURUSD", "TP", 20), ("GBPUSD", "TP", 10), ("USDJPY", "SL", -15)] {
        let entry = format!(r#"{{"t":"ENTRY","d":"LONG","s":"{symbol}","e":1,"sl":0.99,"tp":1.02,"rr":2}}"#);
        let close = format!(r#"{{"t":"CLOSE","d":"LONG","s":"{symbol}","r":"{result}","pnl":{pnl}}}"#);
        assert_eq!(send(&app.router, "POST", "/webhook", &entry).await.0, StatusCode::OK);
        assert_eq!(send(&app.router, "POST", "/webhook", &close).await.0, StatusCode::OK);
    }

    let update = r#"{"update_id":1,"message":{"message_id":9,"chat":{"id":-100777},"text":"/stats"}}"#;
    assert_eq!(
        send(&app.router, "POST", "/bot", update).await,
        (StatusCode::OK, "OK".to_string())
    );

    mock.assert_async().await;
}
