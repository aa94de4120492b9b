//! KRX 숫자 문자열을 위한 Decimal 유틸리티.
//!
//! KRX CSV는 모든 값을 문자열로 내려주며, 천 단위 쉼표가 포함되거나
//! 값이 없을 때 빈 문자열 또는 `-`가 들어옵니다.

use crate::error::{DomainError, DomainResult};
use rust_decimal::Decimal;
use std::str::FromStr;

/// 금융 정밀도를 위한 가격 타입.
pub type Price = Decimal;

/// 퍼센트 타입 (1.25 = 1.25%).
pub type Percentage = Decimal;

/// 값이 비어 있음을 나타내는 KRX 표기인지 확인합니다.
fn is_blank(s: &str) -> bool {
    s.is_empty() || s == "-"
}

/// KRX 숫자 문자열을 Decimal로 파싱합니다 (쉼표 제거, 빈 값은 0).
pub fn parse_krx_decimal(field: &'static str, raw: &str) -> DomainResult<Decimal> {
    let s = raw.trim();
    if is_blank(s) {
        return Ok(Decimal::ZERO);
    }

    let cleaned = s.replace(',', "");
    Decimal::from_str(&cleaned).map_err(|_| DomainError::InvalidNumber {
        field,
        value: raw.to_string(),
    })
}

/// KRX 수량 문자열(거래량 등)을 u64로 파싱합니다.
pub fn parse_krx_count(field: &'static str, raw: &str) -> DomainResult<u64> {
    let s = raw.trim();
    if is_blank(s) {
        return Ok(0);
    }

    s.replace(',', "")
        .parse::<u64>()
        .map_err(|_| DomainError::InvalidNumber {
            field,
            value: raw.to_string(),
        })
}
