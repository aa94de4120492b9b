//! 수집기 설정 모듈.
//!
//! 포털/로깅 설정은 `krx_core::AppConfig`(설정 파일 + `KRX__` 환경변수)에서,
//! 재시도/데몬 설정은 개별 환경변수에서 읽습니다.

use crate::error::CollectorError;
use crate::Result;
use krx_core::AppConfig;
use std::path::Path;
use std::time::Duration;

/// Collector 전체 설정
#[derive(Debug, Clone)]
pub struct CollectorConfig {
    /// 포털 및 로깅 설정
    pub app: AppConfig,
    /// 재시도 설정
    pub retry: RetryConfig,
    /// 데몬 모드 설정
    pub daemon: DaemonConfig,
}

/// 재시도 설정
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryConfig {
    /// 최대 시도 횟수
    pub max_attempts: u32,
    /// 백오프 기준 지연 (초). n번째 실패 후 n배 대기
    pub base_delay_secs: u64,
    /// 요청 전 랜덤 지연 최소값 (밀리초)
    pub pre_delay_min_ms: u64,
    /// 요청 전 랜덤 지연 최대값 (밀리초)
    pub pre_delay_max_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay_secs: 10,
            pre_delay_min_ms: 2_000,
            pre_delay_max_ms: 5_000,
        }
    }
}

/// 데몬 모드 설정
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DaemonConfig {
    /// 수집 주기 (초)
    pub interval_secs: u64,
    /// 주기에 더할 랜덤 지연 최대값 (초)
    pub jitter_max_secs: u64,
}

impl Default for DaemonConfig {
    fn default() -> Self {
        Self {
            interval_secs: 60,
            jitter_max_secs: 30,
        }
    }
}

impl CollectorConfig {
    /// `.env`, 설정 파일(선택), 환경변수에서 설정 로드
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        dotenvy::dotenv().ok();

        let app = AppConfig::load(config_path).map_err(|e| {
            CollectorError::Config(format!("설정 로드 실패: {}", e))
        })?;

        let defaults = RetryConfig::default();
        let retry = RetryConfig {
            max_attempts: env_var_parse("COLLECT_MAX_ATTEMPTS", defaults.max_attempts),
            base_delay_secs: env_var_parse("COLLECT_BASE_DELAY_SECS", defaults.base_delay_secs),
            pre_delay_min_ms: env_var_parse("COLLECT_PRE_DELAY_MIN_MS", defaults.pre_delay_min_ms),
            pre_delay_max_ms: env_var_parse("COLLECT_PRE_DELAY_MAX_MS", defaults.pre_delay_max_ms),
        };

        let defaults = DaemonConfig::default();
        let daemon = DaemonConfig {
            interval_secs: env_var_parse("DAEMON_INTERVAL_SECS", defaults.interval_secs),
            jitter_max_secs: env_var_parse("DAEMON_JITTER_MAX_SECS", defaults.jitter_max_secs),
        };

        let config = Self { app, retry, daemon };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.retry.max_attempts == 0 {
            return Err(CollectorError::Config(
                "COLLECT_MAX_ATTEMPTS는 1 이상이어야 합니다".to_string(),
            ));
        }
        if self.retry.pre_delay_min_ms > self.retry.pre_delay_max_ms {
            return Err(CollectorError::Config(
                "COLLECT_PRE_DELAY_MIN_MS가 최대값보다 큽니다".to_string(),
            ));
        }
        if self.daemon.interval_secs == 0 {
            return Err(CollectorError::Config(
                "DAEMON_INTERVAL_SECS는 0보다 커야 합니다".to_string(),
            ));
        }
        Ok(())
    }
}

impl DaemonConfig {
    /// 수집 주기를 Duration으로 반환
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }
}

/// 환경변수에서 값을 파싱 (실패 시 기본값 사용)
fn env_var_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
