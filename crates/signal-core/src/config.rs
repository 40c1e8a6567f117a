//! 설정 관리.
//!
//! 설정은 기본값 → 설정 파일(선택) → `SIGNAL_` 접두사 환경 변수 순으로 적용되며,
//! 마지막으로 기존 배포 환경에서 사용하던 환경 변수(`PORT`, `BOT_TOKEN`,
//! `CHAT_ID`, `DATABASE_URL`)가 덮어씁니다.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// 기본 설정 파일 경로.
pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// 애플리케이션 설정.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    /// 서버 설정
    pub server: ServerConfig,
    /// 데이터베이스 설정
    pub database: DatabaseConfig,
    /// 텔레그램 설정
    pub telegram: TelegramSettings,
    /// 로깅 설정
    pub logging: LoggingConfig,
}

/// 서버 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    /// 바인딩할 호스트
    pub host: String,
    /// 리스닝할 포트
    pub port: u16,
    /// 요청 타임아웃 (초)
    pub request_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            request_timeout_secs: 30,
        }
    }
}

impl ServerConfig {
    /// `host:port` 형식의 바인딩 주소.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// 데이터베이스 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// SQLite 연결 URL
    pub url: String,
    /// 최대 연결 수
    pub max_connections: u32,
    /// 쓰기 잠금 대기 시간 (초)
    pub busy_timeout_secs: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://trades.db".to_string(),
            max_connections: 5,
            busy_timeout_secs: 5,
        }
    }
}

/// 텔레그램 설정.
///
/// 토큰과 채팅 ID가 비어 있으면 알림 전송이 비활성화됩니다.
#[derive(Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TelegramSettings {
    /// @BotFather에서 받은 봇 토큰
    pub bot_token: String,
    /// 시그널 알림을 보낼 채팅 ID
    pub chat_id: String,
    /// Bot API 기본 URL
    pub api_base_url: String,
    /// 파싱 모드
    pub parse_mode: String,
    /// `sendMessage` 요청 타임아웃(초)
    pub request_timeout_secs: u64,
}

impl Default for TelegramSettings {
    fn default() -> Self {
        Self {
            bot_token: String::new(),
            chat_id: String::new(),
            api_base_url: "https://api.telegram.org".to_string(),
            parse_mode: "Markdown".to_string(),
            request_timeout_secs: 10,
        }
    }
}

// 토큰이 로그에 남지 않도록 Debug를 직접 구현
impl std::fmt::Debug for TelegramSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramSettings")
            .field("bot_token", &"[REDACTED]")
            .field("chat_id", &self.chat_id)
            .field("api_base_url", &self.api_base_url)
            .field("parse_mode", &self.parse_mode)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}

/// 로깅 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// 로그 레벨
    pub level: String,
    /// 로그 형식 (pretty, json, compact)
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "signal_api=info,signal_notification=info,tower_http=info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

/// `SIGNAL_` 접두사 환경 변수 소스 (예: `SIGNAL_SERVER__PORT`).
fn env_source() -> config::Environment {
    config::Environment::with_prefix("SIGNAL")
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}

impl AppConfig {
    /// 파일과 환경 변수에서 설정을 로드합니다.
    ///
    /// 파일이 없으면 건너뜁니다.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, config::ConfigError> {
        let mut config = Self::load_from(path, env_source())?;
        config.apply_legacy_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    fn load_from<P: AsRef<Path>>(
        path: P,
        environment: config::Environment,
    ) -> Result<Self, config::ConfigError> {
        config::Config::builder()
            // 기본값으로 시작
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 5000)?
            // 파일에서 로드
            .add_source(config::File::from(path.as_ref()).required(false))
            // 환경 변수로 오버라이드
            .add_source(environment)
            .build()?
            .try_deserialize()
    }

    /// 기본 경로에서 설정을 로드합니다.
    pub fn load_default() -> Result<Self, config::ConfigError> {
        Self::load(DEFAULT_CONFIG_PATH)
    }

    /// 기존 배포 환경 변수를 적용합니다.
    ///
    /// 값이 비어 있거나 파싱할 수 없는 변수는 무시합니다.
    pub fn apply_legacy_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(port) = non_empty("PORT").and_then(|p| p.trim().parse().ok()) {
            self.server.port = port;
        }
        if let Some(token) = non_empty("BOT_TOKEN") {
            self.telegram.bot_token = token;
        }
        if let Some(chat_id) = non_empty("CHAT_ID") {
            self.telegram.chat_id = chat_id;
        }
        if let Some(url) = non_empty("DATABASE_URL") {
            self.database.url = url;
        }
    }
}
