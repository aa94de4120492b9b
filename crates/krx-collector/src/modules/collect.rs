//! 전종목 시세 수집 모듈.

use crate::modules::retry::{run_with_retry, RetryPolicy};
use crate::{CollectionStats, Result};
use krx_core::{BusinessDay, StockPrice};
use krx_data::{KrxClient, MarketSnapshot};
use serde::Serialize;
use std::time::Instant;

/// 수집 대상 일자
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectTarget {
    /// 가장 최근 영업일
    Latest,
    /// 지정한 일자
    Date(BusinessDay),
}

/// 전종목 시세를 수집합니다 (재시도 포함).
pub async fn collect_snapshot(
    client: &KrxClient,
    policy: &RetryPolicy,
    target: CollectTarget,
) -> Result<(MarketSnapshot, CollectionStats)> {
    let start = Instant::now();
    let mut stats = CollectionStats::new();

    tracing::info!(target = ?target, "전종목 시세 수집 시작");

    let result = run_with_retry(policy, &mut stats, || async move {
        match target {
            CollectTarget::Latest => client.fetch_latest().await,
            CollectTarget::Date(day) => client.fetch_by_day(day).await,
        }
    })
    .await;

    stats.elapsed = start.elapsed();

    match result {
        Ok(snapshot) => {
            stats.records = snapshot.records.len();
            stats.business_day = Some(snapshot.date.to_string());
            log_sample(&snapshot);
            Ok((snapshot, stats))
        }
        Err(e) => {
            stats.log_summary("전종목 시세 수집");
            Err(e.into())
        }
    }
}

/// 수집 결과를 숫자 타입으로 정규화합니다.
pub fn normalize_snapshot(snapshot: &MarketSnapshot) -> Result<Vec<StockPrice>> {
    snapshot
        .records
        .iter()
        .map(|record| record.normalize().map_err(Into::into))
        .collect()
}

/// 수집 결과를 출력용 JSON으로 직렬화합니다.
pub fn render_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// 첫 종목을 샘플로 로그에 남깁니다.
fn log_sample(snapshot: &MarketSnapshot) {
    if let Some(first) = snapshot.records.first() {
        tracing::info!(
            date = %snapshot.date,
            ticker = %first.ticker,
            name = %first.name,
            close = %first.close,
            change_rate = %first.change_rate,
            "샘플 데이터"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use encoding_rs::EUC_KR;
    use krx_core::PortalConfig;
    use krx_data::{HttpTransport, KrxError, PortalRequest, PortalResponse};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    const SNAPSHOT: &str = "\
종목코드,종목명,종가,대비,등락률,시가,고가,저가,거래량,거래대금,시가총액,상장주식수
005930,삼성전자,71000,-500,-0.70,71500,72000,70800,12345678,876543210000,423849000000000,5969782550
";

    /// 처음 `failures`번의 요청은 연결 실패로 응답하는 포털.
    struct FlakyPortal {
        failures: usize,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl HttpTransport for FlakyPortal {
        async fn send(&self, request: PortalRequest) -> krx_data::Result<PortalResponse> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            if call < self.failures {
                return Err(KrxError::Transport("connection reset".to_string()));
            }
            if request.form_value("code").is_none() {
                return Ok(PortalResponse::ok("otp"));
            }
            let (body, _, _) = EUC_KR.encode(SNAPSHOT);
            Ok(PortalResponse::ok(body.into_owned()))
        }
    }

    fn policy() -> RetryPolicy {
        RetryPolicy {
            max_attempts: 3,
            base_delay: Duration::from_secs(10),
            pre_delay_min: Duration::ZERO,
            pre_delay_max: Duration::ZERO,
        }
    }

    fn client(failures: usize) -> KrxClient {
        KrxClient::with_transport(
            PortalConfig::with_endpoints("http://portal.test/otp", "http://portal.test/csv"),
            Arc::new(FlakyPortal {
                failures,
                calls: AtomicUsize::new(0),
            }),
        )
    }

    #[tokio::test(start_paused = true)]
    async fn test_collect_recovers_from_transient_failure() {
        let day: BusinessDay = "20230901".parse().unwrap();

        let (snapshot, stats) = collect_snapshot(&client(1), &policy(), CollectTarget::Date(day))
            .await
            .unwrap();

        assert_eq!(snapshot.records.len(), 1);
        assert_eq!(snapshot.records[0].ticker, "005930");
        assert_eq!(stats.attempts, 2);
        assert_eq!(stats.failures, 1);
        assert_eq!(stats.records, 1);
        assert_eq!(stats.business_day.as_deref(), Some("20230901"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_collect_reports_error_after_retries() {
        let day: BusinessDay = "20230901".parse().unwrap();

        let err = collect_snapshot(&client(100), &policy(), CollectTarget::Date(day))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            crate::CollectorError::DataSource(KrxError::Transport(_))
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_normalize_snapshot() {
        let day: BusinessDay = "20230901".parse().unwrap();
        let (snapshot, _) = collect_snapshot(&client(0), &policy(), CollectTarget::Date(day))
            .await
            .unwrap();

        let prices = normalize_snapshot(&snapshot).unwrap();
        assert_eq!(prices.len(), 1);
        assert_eq!(prices[0].volume, 12_345_678);
        assert_eq!(prices[0].close.to_string(), "71000");
    }

    #[tokio::test(start_paused = true)]
    async fn test_render_json_snapshot() {
        let day: BusinessDay = "20230901".parse().unwrap();
        let (snapshot, _) = collect_snapshot(&client(0), &policy(), CollectTarget::Date(day))
            .await
            .unwrap();

        let json = render_json(&snapshot).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["date"], "20230901");
        assert_eq!(value["records"][0]["name"], "삼성전자");
    }

    #[test]
    fn test_render_json_error_is_output_error() {
        let mut bad = std::collections::HashMap::new();
        bad.insert((1u8, 2u8), "tuple key");

        let err = render_json(&bad).unwrap_err();
        assert!(matches!(err, crate::CollectorError::Output(_)));
    }
}
