//! 수집 통계 구조체.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// 수집 작업 통계
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CollectionStats {
    /// 총 시도 횟수
    pub attempts: u32,
    /// 실패한 시도 횟수
    pub failures: u32,
    /// 빈 응답 횟수 (조회 성공, 데이터 없음)
    pub empty: u32,
    /// 수집된 종목 수
    pub records: usize,
    /// 기준 영업일
    pub business_day: Option<String>,
    /// 소요 시간
    #[serde(skip)]
    pub elapsed: Duration,
}

impl CollectionStats {
    /// 새 통계 객체 생성
    pub fn new() -> Self {
        Self::default()
    }

    /// 마지막 시도가 성공했는지 여부
    pub fn succeeded(&self) -> bool {
        self.attempts > self.failures
    }

    /// 통계 요약 로그 출력
    pub fn log_summary(&self, operation: &str) {
        tracing::info!(
            operation = operation,
            attempts = self.attempts,
            failures = self.failures,
            empty = self.empty,
            records = self.records,
            business_day = self.business_day.as_deref().unwrap_or("-"),
            elapsed = format!("{:.1}s", self.elapsed.as_secs_f64()),
            "수집 완료"
        );
    }
}
