//! 한국 시간 기준 날짜 계산.

use crate::error::{KrxError, Result};
use chrono::{Duration, NaiveDate, Utc};
use chrono_tz::Asia::Seoul;
use krx_core::BusinessDay;

/// 현재 한국 시간(Asia/Seoul) 기준 날짜.
pub fn today_in_seoul() -> NaiveDate {
    Utc::now().with_timezone(&Seoul).date_naive()
}

/// `[today - days, today]` 조회 구간을 반환합니다.
///
/// 시작일이 표현 가능한 날짜 범위를 벗어나면 `KrxError::ConfigError`를 반환합니다.
pub fn lookback_window(today: NaiveDate, days: u32) -> Result<(BusinessDay, BusinessDay)> {
    let start = today
        .checked_sub_signed(Duration::days(i64::from(days)))
        .ok_or_else(|| {
            KrxError::ConfigError(format!("조회 구간이 날짜 범위를 벗어납니다: {}일", days))
        })?;
    Ok((BusinessDay::new(start), BusinessDay::new(today)))
}

/// 영업일 조회 구간 확장 순서 (기본 구간부터 두 배씩, 최대 구간에서 멈춤).
pub fn widening_windows(initial: u32, max: u32) -> Vec<u32> {
    let mut windows = Vec::new();
    let mut days = initial.max(1);
    loop {
        let capped = days.min(max.max(initial));
        windows.push(capped);
        if capped >= max {
            break;
        }
        days = days.saturating_mul(2);
    }
    windows
}
