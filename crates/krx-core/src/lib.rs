//! # KRX Core
//!
//! KRX 일별 시세 수집기의 핵심 도메인 타입을 제공합니다.
//!
//! 이 크레이트는 수집 파이프라인 전반에서 사용되는 기본 타입을 제공합니다:
//! - 영업일(`BusinessDay`) 타입
//! - 종목 시세 레코드 (`StockRecord`, `StockPrice`)
//! - KRX 숫자 문자열 파싱
//! - 설정 관리
//! - 로깅 인프라

pub mod config;
pub mod domain;
pub mod error;
pub mod logging;
pub mod types;

pub use config::*;
pub use domain::*;
pub use error::*;
pub use logging::*;
pub use types::*;
