//! 도메인 타입 변환 에러.

use thiserror::Error;

/// 도메인 값 생성/변환 에러.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// 잘못된 날짜 (형식 오류 또는 존재하지 않는 날짜)
    #[error("잘못된 날짜 '{input}': {reason}")]
    InvalidDate { input: String, reason: String },

    /// 숫자로 해석할 수 없는 필드
    #[error("숫자 파싱 실패 [{field}]: '{value}'")]
    InvalidNumber { field: &'static str, value: String },

    /// 최소 컬럼 수보다 짧은 CSV 행
    #[error("컬럼 수 부족: 최소 {expected}개 필요, {actual}개 수신")]
    ShortRow { expected: usize, actual: usize },
}

/// 도메인 작업을 위한 Result 타입.
pub type DomainResult<T> = Result<T, DomainError>;

impl DomainError {
    pub(crate) fn invalid_date(input: &str, reason: impl Into<String>) -> Self {
        Self::InvalidDate {
            input: input.to_string(),
            reason: reason.into(),
        }
    }
}
