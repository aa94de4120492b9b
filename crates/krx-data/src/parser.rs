//! KRX CSV 파싱 및 레코드 매핑.

use crate::error::{KrxError, Result};
use krx_core::StockRecord;

/// CSV 문자열을 행 목록으로 파싱합니다 (헤더 행 제외).
///
/// 행마다 컬럼 수가 달라도 허용하며, 컬럼 수 검증은 호출자가 리포트별로 수행합니다.
pub fn parse_csv_rows(text: &str) -> Result<Vec<Vec<String>>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    Ok(rows)
}

/// 모든 행이 최소 컬럼 수를 만족하는지 확인합니다.
///
/// 한 행이라도 짧으면 배치 전체를 거부합니다.
pub fn ensure_min_columns(rows: &[Vec<String>], min_columns: usize) -> Result<()> {
    match rows.iter().position(|row| row.len() < min_columns) {
        Some(idx) => Err(KrxError::Shape {
            row: idx,
            expected: min_columns,
            actual: rows[idx].len(),
        }),
        None => Ok(()),
    }
}

/// 전종목 시세 행을 `StockRecord`로 변환합니다.
pub fn map_records(rows: &[Vec<String>]) -> Result<Vec<StockRecord>> {
    rows.iter()
        .enumerate()
        .map(|(idx, row)| {
            StockRecord::from_row(row).map_err(|e| match KrxError::from(e) {
                KrxError::Shape {
                    expected, actual, ..
                } => KrxError::Shape {
                    row: idx,
                    expected,
                    actual,
                },
                other => other,
            })
        })
        .collect()
}
