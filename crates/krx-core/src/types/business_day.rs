//! KRX 영업일 타입.
//!
//! 영업일은 거래소가 실제로 매매를 진행한 날짜이며,
//! KRX 요청/응답에서는 항상 `YYYYMMDD` 8자리 문자열로 표현됩니다.

use crate::error::{DomainError, DomainResult};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// `YYYYMMDD` 형식의 영업일.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BusinessDay(NaiveDate);

impl BusinessDay {
    /// KRX 날짜 포맷.
    pub const FORMAT: &'static str = "%Y%m%d";

    /// 날짜로부터 영업일을 생성합니다.
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// 내부 날짜를 반환합니다.
    pub fn date(&self) -> NaiveDate {
        self.0
    }

    /// KRX CSV 셀의 날짜를 파싱합니다.
    ///
    /// `2023/09/02`, `2023-09-02`, `2023.09.02`처럼 구분자가 포함된 값도
    /// 구분자를 제거한 뒤 `YYYYMMDD`로 해석합니다.
    pub fn from_krx_cell(cell: &str) -> DomainResult<Self> {
        let compact: String = cell
            .trim()
            .chars()
            .filter(|c| !matches!(c, '/' | '-' | '.'))
            .collect();
        compact.parse()
    }
}

impl FromStr for BusinessDay {
    type Err = DomainError;

    /// 정확히 8자리 숫자이면서 실제 달력에 존재하는 날짜만 허용합니다.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 8 || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(DomainError::invalid_date(s, "YYYYMMDD 8자리 숫자가 아닙니다"));
        }

        let year: i32 = s[0..4]
            .parse()
            .map_err(|_| DomainError::invalid_date(s, "연도 파싱 실패"))?;
        let month: u32 = s[4..6]
            .parse()
            .map_err(|_| DomainError::invalid_date(s, "월 파싱 실패"))?;
        let day: u32 = s[6..8]
            .parse()
            .map_err(|_| DomainError::invalid_date(s, "일 파싱 실패"))?;

        NaiveDate::from_ymd_opt(year, month, day)
            .map(Self)
            .ok_or_else(|| DomainError::invalid_date(s, "존재하지 않는 날짜입니다"))
    }
}

impl fmt::Display for BusinessDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}{:02}{:02}",
            self.0.year(),
            self.0.month(),
            self.0.day()
        )
    }
}

impl From<NaiveDate> for BusinessDay {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl From<BusinessDay> for String {
    fn from(day: BusinessDay) -> Self {
        day.to_string()
    }
}

impl TryFrom<String> for BusinessDay {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
