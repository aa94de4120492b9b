//! 재시도 정책.
//!
//! 포털 차단을 피하기 위해 매 시도 전에 랜덤 지연을 두고,
//! 재시도 가능한 오류(네트워크, 빈 응답)에 한해 선형 백오프로 재시도합니다.

use crate::config::RetryConfig;
use crate::stats::CollectionStats;
use krx_data::{ErrorKind, KrxError};
use rand::Rng;
use std::future::Future;
use std::time::Duration;

/// 재시도 정책
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
    pub pre_delay_min: Duration,
    pub pre_delay_max: Duration,
}

impl RetryPolicy {
    /// 한 번만 시도하고 지연도 두지 않는 정책
    pub fn no_retry() -> Self {
        Self {
            max_attempts: 1,
            base_delay: Duration::ZERO,
            pre_delay_min: Duration::ZERO,
            pre_delay_max: Duration::ZERO,
        }
    }

    /// `failed_attempt`번째 실패 후 대기 시간
    pub fn backoff(&self, failed_attempt: u32) -> Duration {
        self.base_delay.saturating_mul(failed_attempt)
    }

    /// 요청 전 랜덤 지연
    pub fn pre_delay<R: Rng + ?Sized>(&self, rng: &mut R) -> Duration {
        if self.pre_delay_max <= self.pre_delay_min {
            return self.pre_delay_min;
        }
        let min = self.pre_delay_min.as_millis() as u64;
        let max = self.pre_delay_max.as_millis() as u64;
        Duration::from_millis(rng.gen_range(min..=max))
    }
}

impl From<&RetryConfig> for RetryPolicy {
    fn from(config: &RetryConfig) -> Self {
        Self {
            max_attempts: config.max_attempts.max(1),
            base_delay: Duration::from_secs(config.base_delay_secs),
            pre_delay_min: Duration::from_millis(config.pre_delay_min_ms),
            pre_delay_max: Duration::from_millis(config.pre_delay_max_ms),
        }
    }
}

/// 정책에 따라 작업을 재시도합니다.
///
/// 시도/실패 횟수는 `stats`에 기록됩니다.
pub async fn run_with_retry<T, F, Fut>(
    policy: &RetryPolicy,
    stats: &mut CollectionStats,
    mut operation: F,
) -> Result<T, KrxError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, KrxError>>,
{
    let mut attempt = 0;

    loop {
        attempt += 1;
        stats.attempts = attempt;

        let pre_delay = policy.pre_delay(&mut rand::thread_rng());
        if !pre_delay.is_zero() {
            tracing::debug!(
                attempt,
                delay_ms = pre_delay.as_millis() as u64,
                "요청 전 대기"
            );
            tokio::time::sleep(pre_delay).await;
        }

        tracing::info!(attempt, max = policy.max_attempts, "데이터 수집 시도");

        match operation().await {
            Ok(value) => return Ok(value),
            Err(e) => {
                stats.failures += 1;
                if e.kind() == ErrorKind::NoData {
                    stats.empty += 1;
                }

                if !e.is_retryable() || attempt >= policy.max_attempts {
                    tracing::error!(attempt, kind = ?e.kind(), error = %e, "수집 실패");
                    return Err(e);
                }

                let delay = policy.backoff(attempt);
                tracing::warn!(
                    attempt,
                    kind = ?e.kind(),
                    error = %e,
                    retry_in_secs = delay.as_secs(),
                    "수집 실패, 재시도 대기"
                );
                tokio::time::sleep(delay).await;
            }
        }
    }
}
