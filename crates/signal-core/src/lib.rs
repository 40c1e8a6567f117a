//! # Signal Core
//!
//! 시그널 저널의 핵심 도메인 모델 및 공통 인프라를 제공합니다.
//!
//! - 거래 방향/결과 및 거래 통계 타입
//! - 핍(pip) 거리 계산
//! - 에러 타입
//! - 설정 관리
//! - 로깅 인프라

pub mod config;
pub mod domain;
pub mod error;
pub mod logging;

pub use config::*;
pub use domain::*;
pub use error::*;
pub use logging::*;
