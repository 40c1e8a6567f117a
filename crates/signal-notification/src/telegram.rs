//! 텔레그램 알림 서비스.
//!
//! Telegram Bot API의 `sendMessage`로 시그널 알림과 봇 응답을 전송합니다.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use signal_core::TelegramSettings;
use tracing::{debug, error, info, warn};

use crate::format::render_event;
use crate::types::{
    Notification, NotificationError, NotificationEvent, NotificationResult, NotificationSender,
};

/// 기본 Bot API 주소.
pub const TELEGRAM_API_BASE: &str = "https://api.telegram.org";

/// 기본 `sendMessage` 요청 타임아웃.
pub const DEFAULT_SEND_TIMEOUT: Duration = Duration::from_secs(10);

/// 텔레그램 알림 전송 설정.
#[derive(Debug)]
pub struct TelegramConfig {
    /// @BotFather에서 받은 봇 토큰
    pub bot_token: SecretString,
    /// 시그널 알림을 보낼 채팅 ID
    pub chat_id: String,
    /// Bot API 기본 URL
    pub api_base_url: String,
    /// 파싱 모드 (Markdown)
    pub parse_mode: String,
    /// 요청 타임아웃. 전송은 재시도 없이 한 번만 시도합니다.
    pub request_timeout: Duration,
    /// 전송 활성화 여부
    pub enabled: bool,
}

impl TelegramConfig {
    /// 새 텔레그램 설정을 생성합니다.
    pub fn new(bot_token: impl Into<String>, chat_id: impl Into<String>) -> Self {
        Self {
            bot_token: SecretString::from(bot_token.into()),
            chat_id: chat_id.into(),
            api_base_url: TELEGRAM_API_BASE.to_string(),
            parse_mode: "Markdown".to_string(),
            request_timeout: DEFAULT_SEND_TIMEOUT,
            enabled: true,
        }
    }

    /// 애플리케이션 설정에서 생성합니다.
    pub fn from_settings(settings: &TelegramSettings) -> Self {
        Self {
            bot_token: SecretString::from(settings.bot_token.clone()),
            chat_id: settings.chat_id.clone(),
            api_base_url: settings.api_base_url.clone(),
            parse_mode: settings.parse_mode.clone(),
            request_timeout: Duration::from_secs(settings.request_timeout_secs),
            enabled: true,
        }
    }

    /// Bot API 기본 URL을 변경합니다.
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    /// 요청 타임아웃을 변경합니다.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// 토큰이 설정되어 있는지 확인합니다.
    pub fn has_token(&self) -> bool {
        !self.bot_token.expose_secret().is_empty()
    }

    fn send_message_url(&self) -> String {
        format!(
            "{}/bot{}/sendMessage",
            self.api_base_url.trim_end_matches('/'),
            self.bot_token.expose_secret()
        )
    }
}

/// 텔레그램 알림 전송기.
#[derive(Clone)]
pub struct TelegramSender {
    config: Arc<TelegramConfig>,
    client: reqwest::Client,
}

impl TelegramSender {
    /// 새 텔레그램 전송기를 생성합니다.
    pub fn new(config: TelegramConfig) -> Self {
        Self {
            config: Arc::new(config),
            client: reqwest::Client::new(),
        }
    }

    /// 설정을 반환합니다.
    pub fn config(&self) -> &TelegramConfig {
        &self.config
    }

    /// 알림을 텔레그램 메시지로 포맷합니다.
    pub fn format_message(&self, notification: &Notification) -> String {
        render_event(&notification.event)
    }

    /// 지정한 채팅으로 원시 메시지를 전송합니다.
    ///
    /// 봇 응답처럼 설정된 채팅이 아닌 곳으로 보낼 때도 사용합니다.
    /// 요청은 `chat_id`, `text`, `parse_mode` 폼 필드로 인코딩됩니다.
    pub async fn send_text(&self, chat_id: &str, text: &str) -> NotificationResult<()> {
        if !self.config.has_token() {
            return Err(NotificationError::InvalidConfig(
                "bot token is not configured".to_string(),
            ));
        }

        debug!(chat_id = %chat_id, "Sending Telegram message");

        let params = [
            ("chat_id", chat_id),
            ("text", text),
            ("parse_mode", self.config.parse_mode.as_str()),
        ];

        let response = self
            .client
            .post(self.config.send_message_url())
            .timeout(self.config.request_timeout)
            .form(&params)
            .send()
            .await
            .map_err(NotificationError::NetworkError)?;

        if response.status().is_success() {
            info!(chat_id = %chat_id, "Telegram message sent");
            Ok(())
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();

            if status.as_u16() == 429 {
                warn!("Telegram rate limited");
                return Err(NotificationError::RateLimited(60));
            }

            error!("Failed to send Telegram message: {} - {}", status, body);
            Err(NotificationError::SendFailed(format!(
                "HTTP {}: {}",
                status, body
            )))
        }
    }
}

#[async_trait]
impl NotificationSender for TelegramSender {
    async fn send(&self, notification: &Notification) -> NotificationResult<()> {
        if !self.is_enabled() {
            warn!(
                event = notification.event.kind(),
                "Missing BOT_TOKEN or CHAT_ID, skipping Telegram notification"
            );
            return Ok(());
        }

        let message = self.format_message(notification);
        self.send_text(&self.config.chat_id, &message).await
    }

    fn is_enabled(&self) -> bool {
        self.config.enabled && self.config.has_token() && !self.config.chat_id.is_empty()
    }

    fn name(&self) -> &str {
        "telegram"
    }
}

/// 여러 전송기를 관리하는 알림 관리자.
///
/// 전송 실패는 로그로만 남기고 호출자에게 전파하지 않습니다.
pub struct NotificationManager {
    senders: Vec<Box<dyn NotificationSender>>,
}

impl NotificationManager {
    /// 새 알림 관리자를 생성합니다.
    pub fn new() -> Self {
        Self {
            senders: Vec::new(),
        }
    }

    /// 알림 전송기를 추가합니다.
    pub fn add_sender<S: NotificationSender + 'static>(&mut self, sender: S) {
        self.senders.push(Box::new(sender));
    }

    /// 전송기를 추가한 관리자를 반환합니다.
    pub fn with_sender<S: NotificationSender + 'static>(mut self, sender: S) -> Self {
        self.add_sender(sender);
        self
    }

    /// 활성화된 전송기 수.
    pub fn enabled_senders(&self) -> usize {
        self.senders.iter().filter(|s| s.is_enabled()).count()
    }

    /// 이벤트를 알림으로 만들어 모든 활성 전송기로 보냅니다.
    pub async fn notify(&self, event: NotificationEvent) {
        self.dispatch(&Notification::new(event)).await;
    }

    /// 활성화된 모든 전송기를 통해 알림을 전송합니다.
    ///
    /// 한 번만 시도하며 실패는 무시합니다.
    pub async fn dispatch(&self, notification: &Notification) {
        for sender in &self.senders {
            if !sender.is_enabled() {
                debug!(sender = sender.name(), "Sender disabled, skipping");
                continue;
            }
            if let Err(e) = sender.send(notification).await {
                error!(
                    sender = sender.name(),
                    event = notification.event.kind(),
                    symbol = %notification.event.symbol(),
                    "Failed to send notification: {}",
                    e
                );
            }
        }
    }
}

impl Default for NotificationManager {
    fn default() -> Self {
        Self::new()
    }
}
