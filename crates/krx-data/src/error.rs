//! KRX 데이터 수집 오류 타입.

use krx_core::DomainError;
use thiserror::Error;

/// KRX 수집 관련 오류.
#[derive(Debug, Error)]
pub enum KrxError {
    /// HTTP 요청 자체의 실패 (DNS, 연결 등)
    #[error("Transport error: {0}")]
    Transport(String),

    /// 요청 타임아웃
    #[error("Request timeout: {0}")]
    Timeout(String),

    /// 2xx가 아닌 HTTP 응답
    #[error("HTTP {status} from {url}")]
    HttpStatus { status: u16, url: String },

    /// EUC-KR로 해석할 수 없는 응답 바이트
    #[error("Decode error: {0}")]
    Decode(String),

    /// OTP 응답 본문이 비어 있음
    #[error("Empty OTP token for report {report}")]
    EmptyToken { report: String },

    /// 헤더를 제외하면 데이터 행이 없는 CSV
    #[error("Empty result: {0}")]
    EmptyResult(String),

    /// 최대 조회 구간 내에 거래일이 없음
    #[error("No trading session found within the last {lookback_days} days")]
    NoSession { lookback_days: u32 },

    /// 최소 컬럼 수보다 짧은 행 (배치 전체 거부)
    #[error("Row {row} has {actual} columns, at least {expected} required")]
    Shape {
        row: usize,
        expected: usize,
        actual: usize,
    },

    /// 호출자가 넘긴 날짜가 YYYYMMDD가 아니거나 존재하지 않는 날짜
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    /// CSV/필드 파싱 오류
    #[error("Parse error: {0}")]
    ParseError(String),

    /// 설정 오류
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// 호출자가 재시도 정책을 정하기 위한 오류 분류.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// 네트워크 장애 (연결 실패, 타임아웃, 비정상 상태 코드)
    Network,
    /// 포털 응답에 데이터가 없음
    NoData,
    /// 응답 인코딩 오류
    Decode,
    /// 응답 형태가 리포트 계약과 다름
    Shape,
    /// 잘못된 입력
    Validation,
    /// 설정 오류
    Config,
}

impl KrxError {
    /// 오류 분류를 반환합니다.
    pub fn kind(&self) -> ErrorKind {
        match self {
            KrxError::Transport(_) | KrxError::Timeout(_) | KrxError::HttpStatus { .. } => {
                ErrorKind::Network
            }
            KrxError::EmptyToken { .. } | KrxError::EmptyResult(_) | KrxError::NoSession { .. } => {
                ErrorKind::NoData
            }
            KrxError::Decode(_) => ErrorKind::Decode,
            KrxError::Shape { .. } | KrxError::ParseError(_) => ErrorKind::Shape,
            KrxError::InvalidDate(_) => ErrorKind::Validation,
            KrxError::ConfigError(_) => ErrorKind::Config,
        }
    }

    /// 재시도 가능한 오류인지 확인합니다.
    pub fn is_retryable(&self) -> bool {
        matches!(self.kind(), ErrorKind::Network | ErrorKind::NoData)
    }
}

impl From<reqwest::Error> for KrxError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            KrxError::Timeout(err.to_string())
        } else {
            KrxError::Transport(err.to_string())
        }
    }
}

impl From<csv::Error> for KrxError {
    fn from(err: csv::Error) -> Self {
        KrxError::ParseError(format!("CSV 파싱 실패: {}", err))
    }
}

impl From<DomainError> for KrxError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::InvalidDate { .. } => KrxError::InvalidDate(err.to_string()),
            DomainError::InvalidNumber { .. } => KrxError::ParseError(err.to_string()),
            DomainError::ShortRow { expected, actual } => KrxError::Shape {
                row: 0,
                expected,
                actual,
            },
        }
    }
}

pub type Result<T> = std::result::Result<T, KrxError>;
