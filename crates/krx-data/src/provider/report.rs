//! KRX 다운로드 리포트 정의.
//!
//! OTP 발급 요청의 폼 필드가 어떤 리포트를 내려받을지 결정합니다.
//! `url` 필드가 리포트 식별자입니다.

use krx_core::{BusinessDay, SNAPSHOT_MIN_COLUMNS};
use std::fmt;

/// 전종목 시세 (시장별, 일별 스냅샷) 리포트.
pub const REPORT_MARKET_SNAPSHOT: &str = "dbms/MDC/STAT/standard/MDCSTAT01501";

/// 지수 일별 시세 리포트.
pub const REPORT_INDEX_SERIES: &str = "dbms/MDC/STAT/standard/MDCSTAT00301";

/// 코스피 지수 검색창 표기.
const KOSPI_INDEX_NAME: &str = "코스피";

/// OTP 발급 대상 리포트.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportRequest {
    /// 특정 일자의 시장별 전종목 시세
    MarketSnapshot {
        market_id: String,
        date: BusinessDay,
    },
    /// 기간 내 코스피 지수 일별 시세 (최근일 우선 정렬)
    IndexSeries {
        start: BusinessDay,
        end: BusinessDay,
    },
}

impl ReportRequest {
    /// 전종목 시세 리포트를 생성합니다.
    pub fn market_snapshot(market_id: impl Into<String>, date: BusinessDay) -> Self {
        Self::MarketSnapshot {
            market_id: market_id.into(),
            date,
        }
    }

    /// 코스피 지수 일별 시세 리포트를 생성합니다.
    pub fn index_series(start: BusinessDay, end: BusinessDay) -> Self {
        Self::IndexSeries { start, end }
    }

    /// 리포트 식별자.
    pub fn report_id(&self) -> &'static str {
        match self {
            Self::MarketSnapshot { .. } => REPORT_MARKET_SNAPSHOT,
            Self::IndexSeries { .. } => REPORT_INDEX_SERIES,
        }
    }

    /// 데이터 행이 가져야 하는 최소 컬럼 수.
    pub fn min_columns(&self) -> usize {
        match self {
            Self::MarketSnapshot { .. } => SNAPSHOT_MIN_COLUMNS,
            Self::IndexSeries { .. } => 1,
        }
    }

    /// OTP 발급 폼 필드.
    pub fn to_form(&self, locale: &str) -> Vec<(String, String)> {
        let mut form: Vec<(&str, String)> = vec![("locale", locale.to_string())];

        match self {
            Self::MarketSnapshot { market_id, date } => {
                form.extend([
                    ("mktId", market_id.clone()),
                    ("trdDd", date.to_string()),
                    ("share", "1".to_string()),
                    ("money", "1".to_string()),
                ]);
            }
            Self::IndexSeries { start, end } => {
                form.extend([
                    ("tboxindIdx_finder_equidx0_8", KOSPI_INDEX_NAME.to_string()),
                    ("indIdx", "1".to_string()),
                    ("indIdx2", "001".to_string()),
                    ("codeNmindIdx_finder_equidx0_8", KOSPI_INDEX_NAME.to_string()),
                    ("param1indIdx_finder_equidx0_8", String::new()),
                    ("strtDd", start.to_string()),
                    ("endDd", end.to_string()),
                    ("share", "2".to_string()),
                    ("money", "3".to_string()),
                ]);
            }
        }

        form.extend([
            ("csvxls_isNo", "false".to_string()),
            ("name", "fileDown".to_string()),
            ("url", self.report_id().to_string()),
        ]);

        form.into_iter().map(|(k, v)| (k.to_string(), v)).collect()
    }
}

impl fmt::Display for ReportRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MarketSnapshot { market_id, date } => {
                write!(f, "market_snapshot({}, {})", market_id, date)
            }
            Self::IndexSeries { start, end } => write!(f, "kospi_index({}~{})", start, end),
        }
    }
}
