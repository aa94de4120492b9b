//! 에러 타입 정의.

use krx_core::DomainError;
use krx_data::KrxError;
use std::fmt;

/// Collector 에러 타입
#[derive(Debug)]
pub enum CollectorError {
    /// 설정 에러
    Config(String),
    /// 데이터 소스 에러 (KRX 포털)
    DataSource(KrxError),
    /// 레코드 정규화 에러
    Normalize(DomainError),
    /// 결과 출력 에러
    Output(String),
}

impl fmt::Display for CollectorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(msg) => write!(f, "Configuration error: {}", msg),
            Self::DataSource(e) => write!(f, "Data source error: {}", e),
            Self::Normalize(e) => write!(f, "Normalize error: {}", e),
            Self::Output(msg) => write!(f, "Output error: {}", msg),
        }
    }
}

impl std::error::Error for CollectorError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::DataSource(e) => Some(e),
            Self::Normalize(e) => Some(e),
            _ => None,
        }
    }
}

impl From<KrxError> for CollectorError {
    fn from(err: KrxError) -> Self {
        Self::DataSource(err)
    }
}

impl From<DomainError> for CollectorError {
    fn from(err: DomainError) -> Self {
        Self::Normalize(err)
    }
}

impl From<serde_json::Error> for CollectorError {
    fn from(err: serde_json::Error) -> Self {
        Self::Output(err.to_string())
    }
}

/// Result 타입 별칭
pub type Result<T> = std::result::Result<T, CollectorError>;
