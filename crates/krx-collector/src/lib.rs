//! KRX end-of-day stock price collector.
//!
//! 이 crate는 `krx-data` 클라이언트를 호출하는 수집기를 제공합니다:
//! - 재시도/백오프 정책 (요청 전 랜덤 지연 포함)
//! - 최근 영업일 또는 지정일 전종목 시세 수집
//! - 주기 실행(데몬) 설정

pub mod config;
pub mod error;
pub mod modules;
pub mod stats;

pub use config::CollectorConfig;
pub use error::{CollectorError, Result};
pub use stats::CollectionStats;
