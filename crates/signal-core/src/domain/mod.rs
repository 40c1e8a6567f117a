//! 시그널 저널 도메인 모델.

mod alert;
mod calculations;
mod statistics;
mod trade;

pub use alert::*;
pub use calculations::*;
pub use statistics::*;
pub use trade::*;
