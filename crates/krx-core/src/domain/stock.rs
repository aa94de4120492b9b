//! 종목 일별 시세 타입.
//!
//! - `StockRecord` - KRX 전종목 시세 CSV 한 행을 그대로 옮긴 레코드
//! - `StockPrice` - `StockRecord`를 숫자 타입으로 정규화한 시세

use crate::error::{DomainError, DomainResult};
use crate::types::{parse_krx_count, parse_krx_decimal, Percentage, Price};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 전종목 시세 CSV의 최소 컬럼 수.
pub const SNAPSHOT_MIN_COLUMNS: usize = 12;

/// 전종목 시세 CSV 컬럼 위치.
pub mod column {
    pub const TICKER: usize = 0;
    pub const NAME: usize = 1;
    pub const CLOSE: usize = 2;
    pub const CHANGE: usize = 3;
    pub const CHANGE_RATE: usize = 4;
    pub const OPEN: usize = 5;
    pub const HIGH: usize = 6;
    pub const LOW: usize = 7;
    pub const VOLUME: usize = 8;
    pub const TRADING_VALUE: usize = 9;
    pub const MARKET_CAP: usize = 10;
}

/// 한 종목의 하루 시세 (CSV 원문 값).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockRecord {
    /// 종목코드
    pub ticker: String,
    /// 종목명
    pub name: String,
    /// 종가
    pub close: String,
    /// 전일대비 (부호 포함)
    pub change: String,
    /// 등락률 (%)
    pub change_rate: String,
    /// 시가
    pub open: String,
    /// 고가
    pub high: String,
    /// 저가
    pub low: String,
    /// 거래량
    pub volume: String,
    /// 거래대금
    pub trading_value: String,
    /// 시가총액
    pub market_cap: String,
}

impl StockRecord {
    /// CSV 행에서 레코드를 생성합니다.
    ///
    /// 행이 `SNAPSHOT_MIN_COLUMNS`보다 짧으면 `DomainError::ShortRow`를 반환합니다.
    pub fn from_row<S: AsRef<str>>(row: &[S]) -> DomainResult<Self> {
        if row.len() < SNAPSHOT_MIN_COLUMNS {
            return Err(DomainError::ShortRow {
                expected: SNAPSHOT_MIN_COLUMNS,
                actual: row.len(),
            });
        }

        let field = |idx: usize| row[idx].as_ref().to_string();

        Ok(Self {
            ticker: field(column::TICKER),
            name: field(column::NAME),
            close: field(column::CLOSE),
            change: field(column::CHANGE),
            change_rate: field(column::CHANGE_RATE),
            open: field(column::OPEN),
            high: field(column::HIGH),
            low: field(column::LOW),
            volume: field(column::VOLUME),
            trading_value: field(column::TRADING_VALUE),
            market_cap: field(column::MARKET_CAP),
        })
    }

    /// 숫자 필드를 파싱하여 `StockPrice`로 변환합니다.
    pub fn normalize(&self) -> DomainResult<StockPrice> {
        Ok(StockPrice {
            ticker: self.ticker.clone(),
            name: self.name.clone(),
            close: parse_krx_decimal("close", &self.close)?,
            change: parse_krx_decimal("change", &self.change)?,
            change_rate: parse_krx_decimal("change_rate", &self.change_rate)?,
            open: parse_krx_decimal("open", &self.open)?,
            high: parse_krx_decimal("high", &self.high)?,
            low: parse_krx_decimal("low", &self.low)?,
            volume: parse_krx_count("volume", &self.volume)?,
            trading_value: parse_krx_decimal("trading_value", &self.trading_value)?,
            market_cap: parse_krx_decimal("market_cap", &self.market_cap)?,
        })
    }
}

/// 숫자 타입으로 정규화된 종목 시세.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockPrice {
    /// 종목코드
    pub ticker: String,
    /// 종목명
    pub name: String,
    /// 종가
    pub close: Price,
    /// 전일대비
    pub change: Price,
    /// 등락률 (%)
    pub change_rate: Percentage,
    /// 시가
    pub open: Price,
    /// 고가
    pub high: Price,
    /// 저가
    pub low: Price,
    /// 거래량
    pub volume: u64,
    /// 거래대금 (원)
    pub trading_value: Decimal,
    /// 시가총액 (원)
    pub market_cap: Decimal,
}

impl StockPrice {
    /// 전일 종가 (종가 - 전일대비).
    pub fn previous_close(&self) -> Price {
        self.close - self.change
    }

    /// 상승 종목 여부.
    pub fn is_advancing(&self) -> bool {
        self.change > Decimal::ZERO
    }
}

impl TryFrom<&StockRecord> for StockPrice {
    type Error = DomainError;

    fn try_from(record: &StockRecord) -> Result<Self, Self::Error> {
        record.normalize()
    }
}
