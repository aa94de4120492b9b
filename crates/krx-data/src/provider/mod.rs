//! 데이터 Provider 모듈.
//!
//! ## KRX 정보데이터시스템
//! - `KrxClient`: OTP 발급 → CSV 다운로드 방식의 일별 시세 클라이언트
//! - `ReportRequest`: 전종목 시세 / 코스피 지수 일별 시세 리포트 폼

pub mod krx;
pub mod report;

pub use krx::{KrxClient, MarketSnapshot};
pub use report::ReportRequest;
