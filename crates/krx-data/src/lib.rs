//! KRX 정보데이터시스템 데이터 수집.
//!
//! 이 crate는 다음을 제공합니다:
//! - OTP 발급 → CSV 다운로드 2단계 요청 (`KrxClient`)
//! - 최근 영업일 조회 (KOSPI 지수 일별 시세 기반)
//! - EUC-KR → UTF-8 변환
//! - CSV 행 → `StockRecord` 매핑
//! - 테스트 대체가 가능한 HTTP 전송 계층 (`HttpTransport`)

pub mod calendar;
pub mod encoding;
pub mod error;
pub mod parser;
pub mod provider;
pub mod transport;

pub use error::{ErrorKind, KrxError, Result};

// KRX 클라이언트 재내보내기
pub use provider::krx::{KrxClient, MarketSnapshot};
pub use provider::report::{ReportRequest, REPORT_INDEX_SERIES, REPORT_MARKET_SNAPSHOT};

// 전송 계층 재내보내기
pub use transport::{HttpTransport, PortalRequest, PortalResponse, ReqwestTransport};
