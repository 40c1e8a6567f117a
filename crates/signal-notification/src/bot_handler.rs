//! 텔레그램 봇 명령어 핸들러.
//!
//! 봇 웹훅으로 들어온 업데이트에서 명령어를 읽고 응답을 보냅니다.
//! - `/start` - 봇 소개
//! - `/stats` - 청산 거래 통계
//! - `/help` - 도움말

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, info};

use crate::format::{HELP_MESSAGE, START_MESSAGE, UNKNOWN_COMMAND_MESSAGE};
use crate::telegram::TelegramSender;
use crate::types::NotificationResult;

/// 봇 웹훅 업데이트.
#[derive(Debug, Clone, Deserialize)]
pub struct BotUpdate {
    #[serde(default)]
    pub message: Option<BotMessage>,
}

/// 메시지 정보.
#[derive(Debug, Clone, Deserialize)]
pub struct BotMessage {
    pub chat: BotChat,
    #[serde(default)]
    pub text: Option<String>,
}

/// 채팅 정보.
#[derive(Debug, Clone, Deserialize)]
pub struct BotChat {
    pub id: i64,
}

/// 봇 명령어 타입.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BotCommand {
    /// 봇 소개
    Start,
    /// 거래 통계
    Stats,
    /// 도움말
    Help,
    /// 알 수 없는 명령어
    Unknown(String),
}

impl BotCommand {
    /// 텍스트에서 명령어 파싱.
    ///
    /// 정확히 일치하는 경우만 인식합니다 (`/stats now`는 알 수 없는 명령어).
    pub fn parse(text: &str) -> Self {
        match text {
            "/start" => BotCommand::Start,
            "/stats" => BotCommand::Stats,
            "/help" => BotCommand::Help,
            other => BotCommand::Unknown(other.to_string()),
        }
    }
}

/// 명령어 응답 데이터.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandResponse {
    /// 응답 텍스트
    pub text: String,
}

impl CommandResponse {
    /// Markdown 형식 응답 생성.
    pub fn markdown(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// 봇 명령어 핸들러 trait.
///
/// 데이터 조회가 필요한 명령어의 실제 로직을 구현합니다.
#[async_trait]
pub trait BotCommandHandler: Send + Sync {
    /// 청산 거래 통계 조회.
    async fn handle_stats(&self) -> NotificationResult<CommandResponse>;
}

/// 텔레그램 봇 핸들러.
///
/// 웹훅으로 업데이트를 받아 명령어를 처리하고 보낸 채팅으로 응답합니다.
pub struct TelegramBotHandler<H: BotCommandHandler> {
    sender: TelegramSender,
    handler: Arc<H>,
}

impl<H: BotCommandHandler> TelegramBotHandler<H> {
    /// 새 봇 핸들러 생성.
    pub fn new(sender: TelegramSender, handler: Arc<H>) -> Self {
        Self { sender, handler }
    }

    /// 개별 업데이트 처리.
    ///
    /// 메시지가 없는 업데이트는 무시하고 `None`을 반환합니다.
    pub async fn handle_update(
        &self,
        update: BotUpdate,
    ) -> NotificationResult<Option<CommandResponse>> {
        let Some(message) = update.message else {
            debug!("Update without message, ignoring");
            return Ok(None);
        };

        let chat_id = message.chat.id;
        let text = message.text.unwrap_or_default();

        debug!(chat_id = chat_id, text = %text, "Bot command received");

        let command = BotCommand::parse(&text);
        let response = self.execute_command(command).await?;

        self.sender
            .send_text(&chat_id.to_string(), &response.text)
            .await?;
        info!(chat_id = chat_id, "Bot reply sent");

        Ok(Some(response))
    }

    /// 명령어 실행.
    pub async fn execute_command(
        &self,
        command: BotCommand,
    ) -> NotificationResult<CommandResponse> {
        match command {
            BotCommand::Start => Ok(CommandResponse::markdown(START_MESSAGE)),
            BotCommand::Stats => self.handler.handle_stats().await,
            BotCommand::Help => Ok(CommandResponse::markdown(HELP_MESSAGE)),
            BotCommand::Unknown(_) => Ok(CommandResponse::markdown(UNKNOWN_COMMAND_MESSAGE)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::telegram::TelegramConfig;
    use crate::types::NotificationError;
    use mockito::Matcher;

    struct FixedStats;

    #[async_trait]
    impl BotCommandHandler for FixedStats {
        async fn handle_stats(&self) -> NotificationResult<CommandResponse> {
            Ok(CommandResponse::markdown("📊 *Stats*\n\nTrades: 7"))
        }
    }

    struct FailingStats;

    #[async_trait]
    impl BotCommandHandler for FailingStats {
        async fn handle_stats(&self) -> NotificationResult<CommandResponse> {
            Err(NotificationError::CommandFailed("database is locked".to_string()))
        }
    }

    fn update(json: &str) -> BotUpdate {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_parse_known_commands() {
        assert_eq!(BotCommand::parse("/start"), BotCommand::Start);
        assert_eq!(BotCommand::parse("/stats"), BotCommand::Stats);
        assert_eq!(BotCommand::parse("/help"), BotCommand::Help);
    }

    #[test]
    fn test_parse_is_exact_match() {
        assert!(matches!(BotCommand::parse("/stats now"), BotCommand::Unknown(_)));
        assert!(matches!(BotCommand::parse(" /stats"), BotCommand::Unknown(_)));
        assert!(matches!(BotCommand::parse("/STATS"), BotCommand::Unknown(_)));
        assert!(matches!(BotCommand::parse(""), BotCommand::Unknown(_)));
    }

    #[test]
    fn test_update_deserialization() {
        let parsed = update(r#"{"update_id": 1, "message": {"message_id": 5, "chat": {"id": -1001}, "text": "/stats"}}"#);
        let message = parsed.message.unwrap();
        assert_eq!(message.chat.id, -1001);
        assert_eq!(message.text.as_deref(), Some("/stats"));

        let no_message = update(r#"{"update_id": 2, "edited_message": {}}"#);
        assert!(no_message.message.is_none());
    }

    #[tokio::test]
    async fn test_execute_static_commands() {
        let bot = TelegramBotHandler::new(
            TelegramSender::new(TelegramConfig::new("token", "1")),
            Arc::new(FixedStats),
        );

        let start = bot.execute_command(BotCommand::Start).await.unwrap();
        assert!(start.text.contains("ASA Trading Bot"));

        let help = bot.execute_command(BotCommand::Help).await.unwrap();
        assert!(help.text.contains("/stats"));

        let unknown = bot
            .execute_command(BotCommand::Unknown("/foo".to_string()))
            .await
            .unwrap();
        assert_eq!(unknown.text, "Use /stats or /help");
    }

    #[tokio::test]
    async fn test_handle_update_replies_to_sender_chat() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/bottoken/sendMessage")
            .match_body(Matcher::AllOf(vec![
                Matcher::UrlEncoded("chat_id".into(), "987".into()),
                Matcher::UrlEncoded("text".into(), "📊 *Stats*\n\nTrades: 7".into()),
                Matcher::UrlEncoded("parse_mode".into(), "Markdown".into()),
            ]))
            .with_status(200)
            .create_async()
            .await;

        let sender = TelegramSender::new(
            TelegramConfig::new("token", "1").with_api_base_url(server.url()),
        );
        let bot = TelegramBotHandler::new(sender, Arc::new(FixedStats));

        let response = bot
            .handle_update(update(r#"{"message": {"chat": {"id": 987}, "text": "/stats"}}"#))
            .await
            .unwrap();

        assert!(response.unwrap().text.contains("Trades: 7"));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_handle_update_without_message() {
        let bot = TelegramBotHandler::new(
            TelegramSender::new(TelegramConfig::new("token", "1")),
            Arc::new(FixedStats),
        );
        let response = bot.handle_update(update("{}")).await.unwrap();
        assert!(response.is_none());
    }

    #[tokio::test]
    async fn test_handle_update_propagates_handler_error() {
        let bot = TelegramBotHandler::new(
            TelegramSender::new(TelegramConfig::new("token", "1")),
            Arc::new(FailingStats),
        );
        let err = bot
            .handle_update(update(r#"{"message": {"chat": {"id": 1}, "text": "/stats"}}"#))
            .await
            .unwrap_err();
        assert!(matches!(err, NotificationError::CommandFailed(_)));
    }
}
