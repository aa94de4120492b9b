//! 수집 대상 도메인 모델.

pub mod stock;

pub use stock::{column, StockPrice, StockRecord, SNAPSHOT_MIN_COLUMNS};
