//! 거래 기록 저장소.
//!
//! 진입 시 레코드를 추가하고, 청산 시 심볼별 가장 최근의 미청산 레코드를
//! 갱신합니다. 레코드는 삭제하지 않습니다.

use std::str::FromStr;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use signal_core::{DatabaseConfig, NewTrade, TradeResult, TradeStats};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use sqlx::FromRow;
use tracing::{debug, info};

const CREATE_TRADES_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS trades (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        timestamp TEXT NOT NULL,
        direction TEXT NOT NULL,
        symbol TEXT NOT NULL,
        timeframe TEXT NOT NULL,
        entry REAL,
        sl REAL,
        tp REAL,
        rr REAL,
        h1poi TEXT NOT NULL,
        h4poi TEXT NOT NULL,
        result TEXT,
        pnl REAL
    )
"#;

// 청산 대상 조회 (symbol, 최신 id, 미청산)
const CREATE_OPEN_TRADES_INDEX: &str = r#"
    CREATE INDEX IF NOT EXISTS idx_trades_open_symbol
    ON trades (symbol, id)
    WHERE result IS NULL
"#;

/// 거래 레코드.
///
/// trades 테이블의 데이터베이스 표현입니다.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct TradeRecord {
    pub id: i64,
    pub timestamp: DateTime<Utc>,
    pub direction: String,
    pub symbol: String,
    pub timeframe: String,
    // NaN 가격은 SQLite에 NULL로 저장됨
    pub entry: Option<f64>,
    #[sqlx(rename = "sl")]
    pub stop_loss: Option<f64>,
    #[sqlx(rename = "tp")]
    pub take_profit: Option<f64>,
    #[sqlx(rename = "rr")]
    pub risk_reward: Option<f64>,
    #[sqlx(rename = "h1poi")]
    pub h1_note: String,
    #[sqlx(rename = "h4poi")]
    pub h4_note: String,
    pub result: Option<String>,
    pub pnl: Option<f64>,
}

impl TradeRecord {
    /// 청산 여부.
    pub fn is_closed(&self) -> bool {
        self.result.is_some()
    }
}

/// 거래 기록 저장소.
#[derive(Debug, Clone)]
pub struct TradeRepository {
    pool: SqlitePool,
}

impl TradeRepository {
    /// 설정에 따라 SQLite 풀을 열고 스키마를 준비합니다.
    ///
    /// 파일이 없으면 생성합니다. 동시 쓰기는 SQLite 잠금과 busy timeout으로
    /// 직렬화됩니다. `:memory:` 데이터베이스는 연결마다 별도 DB가 되므로
    /// 단일 연결로 고정합니다.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, sqlx::Error> {
        let in_memory = config.url.contains(":memory:");

        let mut options = SqliteConnectOptions::from_str(&config.url)?
            .create_if_missing(true)
            .busy_timeout(Duration::from_secs(config.busy_timeout_secs));
        if !in_memory {
            options = options.journal_mode(SqliteJournalMode::Wal);
        }

        let pool_options = if in_memory {
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None::<Duration>)
                .max_lifetime(None::<Duration>)
        } else {
            SqlitePoolOptions::new().max_connections(config.max_connections)
        };

        let pool = pool_options.connect_with(options).await?;
        let repository = Self::from_pool(pool);
        repository.ensure_schema().await?;

        info!(url = %config.url, "Trade store ready");
        Ok(repository)
    }

    /// 기존 풀로 저장소를 만듭니다. 스키마는 준비하지 않습니다.
    pub fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// 내부 연결 풀.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// trades 테이블과 인덱스를 생성합니다. 여러 번 호출해도 안전합니다.
    pub async fn ensure_schema(&self) -> Result<(), sqlx::Error> {
        sqlx::query(CREATE_TRADES_TABLE).execute(&self.pool).await?;
        sqlx::query(CREATE_OPEN_TRADES_INDEX)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// 신규 진입을 기록하고 생성된 ID를 반환합니다.
    ///
    /// 중복 진입도 거부하지 않습니다.
    pub async fn record_entry(&self, trade: &NewTrade) -> Result<i64, sqlx::Error> {
        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO trades (
                timestamp, direction, symbol, timeframe,
                entry, sl, tp, rr, h1poi, h4poi
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING id
            "#,
        )
        .bind(Utc::now())
        .bind(trade.direction.as_str())
        .bind(&trade.symbol)
        .bind(&trade.timeframe)
        .bind(trade.entry)
        .bind(trade.stop_loss)
        .bind(trade.take_profit)
        .bind(trade.risk_reward)
        .bind(&trade.h1_note)
        .bind(&trade.h4_note)
        .fetch_one(&self.pool)
        .await?;

        debug!(trade_id = id, symbol = %trade.symbol, "Trade entry recorded");
        Ok(id)
    }

    /// 심볼의 가장 최근 미청산 레코드를 청산 처리합니다.
    ///
    /// 갱신된 레코드 ID를 반환하며, 미청산 레코드가 없으면 `None`입니다.
    pub async fn record_close(
        &self,
        symbol: &str,
        result: &TradeResult,
        pnl: f64,
    ) -> Result<Option<i64>, sqlx::Error> {
        let id = sqlx::query_scalar::<_, i64>(
            r#"
            UPDATE trades
            SET result = ?, pnl = ?
            WHERE id = (
                SELECT id FROM trades
                WHERE symbol = ? AND result IS NULL
                ORDER BY id DESC
                LIMIT 1
            )
            RETURNING id
            "#,
        )
        .bind(result.as_str())
        .bind(pnl)
        .bind(symbol)
        .fetch_optional(&self.pool)
        .await?;

        Ok(id)
    }

    /// 청산된 거래의 집계 통계.
    pub async fn compute_stats(&self) -> Result<TradeStats, sqlx::Error> {
        let (total, tp, sl, be, total_pnl) = sqlx::query_as::<_, (i64, i64, i64, i64, f64)>(
            r#"
            SELECT
                COALESCE(SUM(CASE WHEN result IS NOT NULL THEN 1 ELSE 0 END), 0),
                COALESCE(SUM(CASE WHEN result = 'TP' THEN 1 ELSE 0 END), 0),
                COALESCE(SUM(CASE WHEN result = 'SL' THEN 1 ELSE 0 END), 0),
                COALESCE(SUM(CASE WHEN result = 'BE' THEN 1 ELSE 0 END), 0),
                TOTAL(pnl)
            FROM trades
            "#,
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(TradeStats::from_counts(total, tp, sl, be, Some(total_pnl)))
    }

    /// ID로 레코드 조회.
    pub async fn find_by_id(&self, id: i64) -> Result<Option<TradeRecord>, sqlx::Error> {
        sqlx::query_as::<_, TradeRecord>("SELECT * FROM trades WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    /// 심볼의 전체 레코드를 ID 순서로 조회.
    pub async fn list_by_symbol(&self, symbol: &str) -> Result<Vec<TradeRecord>, sqlx::Error> {
        sqlx::query_as::<_, TradeRecord>("SELECT * FROM trades WHERE symbol = ? ORDER BY id")
            .bind(symbol)
            .fetch_all(&self.pool)
            .await
    }

    /// DB 연결 상태 확인.
    pub async fn is_healthy(&self) -> bool {
        sqlx::query("SELECT 1").execute(&self.pool).await.is_ok()
    }
}
