//! 시그널 저널의 에러 타입.
//!
//! 웹훅 처리와 저장소에서 사용되는 에러를 정의합니다.
//! "열린 거래 없음"은 에러가 아니라 정상 결과이므로 여기에 포함되지 않습니다.

use thiserror::Error;

/// 핵심 에러.
#[derive(Debug, Error)]
pub enum SignalError {
    /// 잘못된 입력 (JSON 디코딩, 필드 변환 실패)
    #[error("잘못된 입력: {0}")]
    InvalidInput(String),

    /// 데이터베이스 에러
    #[error("데이터베이스 에러: {0}")]
    Database(String),
}

/// 시그널 저널 작업을 위한 Result 타입.
pub type SignalResult<T> = Result<T, SignalError>;

impl SignalError {
    /// 요청 입력 문제로 발생한 에러인지 확인합니다.
    pub fn is_client_error(&self) -> bool {
        matches!(self, SignalError::InvalidInput(_))
    }

    /// 저장소 가용성 문제인지 확인합니다.
    pub fn is_storage_error(&self) -> bool {
        matches!(self, SignalError::Database(_))
    }
}

impl From<serde_json::Error> for SignalError {
    fn from(err: serde_json::Error) -> Self {
        SignalError::InvalidInput(err.to_string())
    }
}

#[cfg(feature = "sqlx-support")]
impl From<sqlx::Error> for SignalError {
    fn from(err: sqlx::Error) -> Self {
        SignalError::Database(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_classification() {
        let input_err = SignalError::InvalidInput("bad float".to_string());
        assert!(input_err.is_client_error());
        assert!(!input_err.is_storage_error());

        let db_err = SignalError::Database("locked".to_string());
        assert!(db_err.is_storage_error());
        assert!(!db_err.is_client_error());
    }

    #[test]
    fn test_json_error_is_invalid_input() {
        let err: SignalError = serde_json::from_str::<serde_json::Value>("{not json")
            .unwrap_err()
            .into();
        assert!(matches!(err, SignalError::InvalidInput(_)));
    }

    #[test]
    fn test_error_display() {
        let err = SignalError::Database("disk I/O error".to_string());
        assert_eq!(err.to_string(), "데이터베이스 에러: disk I/O error");
    }
}
