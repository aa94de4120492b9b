//! 설정 관리.
//!
//! 기본값 → 설정 파일(TOML 등) → 환경 변수(`KRX__` 접두사) 순서로 덮어씁니다.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// KRX 정보데이터시스템 OTP 발급 URL.
pub const DEFAULT_OTP_URL: &str = "http://data.krx.co.kr/comm/fileDn/GenerateOTP/generate.cmd";

/// KRX 정보데이터시스템 CSV 다운로드 URL.
pub const DEFAULT_CSV_URL: &str = "http://data.krx.co.kr/comm/fileDn/download_csv/download.cmd";

/// 브라우저가 아닌 요청은 포털에서 차단되므로 데스크톱 Chrome UA를 사용합니다.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/94.0.4606.61 Safari/537.36";

/// 영업일 조회 구간 상한 (일).
pub const MAX_LOOKBACK_DAYS: u32 = 366;

pub const DEFAULT_ACCEPT_LANGUAGE: &str = "ko-KR,ko;q=0.9,en-US;q=0.8,en;q=0.7";

/// 애플리케이션 설정.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    /// KRX 포털 설정
    pub portal: PortalConfig,
    /// 로깅 설정
    pub logging: LoggingConfig,
}

/// KRX 포털 접속 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PortalConfig {
    /// OTP 발급 엔드포인트
    pub otp_url: String,
    /// CSV 다운로드 엔드포인트
    pub csv_url: String,
    /// 요청 로케일 (폼 필드 `locale`)
    pub locale: String,
    /// `Accept-Language` 헤더
    pub accept_language: String,
    /// `User-Agent` 헤더
    pub user_agent: String,
    /// 요청 타임아웃 (초)
    pub request_timeout_secs: u64,
    /// 시장 구분 (STK: 유가증권시장)
    pub market_id: String,
    /// 영업일 조회 기본 구간 (일)
    pub lookback_days: u32,
    /// 영업일 조회 최대 구간 (일)
    pub max_lookback_days: u32,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            otp_url: DEFAULT_OTP_URL.to_string(),
            csv_url: DEFAULT_CSV_URL.to_string(),
            locale: "ko_KR".to_string(),
            accept_language: DEFAULT_ACCEPT_LANGUAGE.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            request_timeout_secs: 60,
            market_id: "STK".to_string(),
            lookback_days: 7,
            max_lookback_days: 28,
        }
    }
}

impl PortalConfig {
    /// 두 엔드포인트를 지정하여 설정을 생성합니다 (나머지는 기본값).
    pub fn with_endpoints(otp_url: impl Into<String>, csv_url: impl Into<String>) -> Self {
        Self {
            otp_url: otp_url.into(),
            csv_url: csv_url.into(),
            ..Default::default()
        }
    }

    /// 요청 타임아웃을 Duration으로 반환합니다.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// 설정값을 검증합니다.
    pub fn validate(&self) -> Result<(), config::ConfigError> {
        if self.otp_url.trim().is_empty() || self.csv_url.trim().is_empty() {
            return Err(config::ConfigError::Message(
                "portal.otp_url / portal.csv_url은 비어 있을 수 없습니다".to_string(),
            ));
        }
        if self.request_timeout_secs == 0 {
            return Err(config::ConfigError::Message(
                "portal.request_timeout_secs는 0보다 커야 합니다".to_string(),
            ));
        }
        if self.lookback_days == 0 || self.max_lookback_days < self.lookback_days {
            return Err(config::ConfigError::Message(format!(
                "영업일 조회 구간이 잘못되었습니다: lookback_days={}, max_lookback_days={}",
                self.lookback_days, self.max_lookback_days
            )));
        }
        if self.max_lookback_days > MAX_LOOKBACK_DAYS {
            return Err(config::ConfigError::Message(format!(
                "portal.max_lookback_days는 {}일을 넘을 수 없습니다: {}",
                MAX_LOOKBACK_DAYS, self.max_lookback_days
            )));
        }
        Ok(())
    }
}

/// 로깅 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// 로그 레벨
    pub level: String,
    /// 로그 형식 (pretty, json, compact)
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl AppConfig {
    /// 설정 파일(선택)과 환경 변수에서 설정을 로드합니다.
    ///
    /// 파일이 없으면 기본값과 환경 변수만 사용합니다.
    pub fn load<P: AsRef<Path>>(path: Option<P>) -> Result<Self, config::ConfigError> {
        let mut builder =
            config::Config::builder().add_source(config::Config::try_from(&Self::default())?);

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path.as_ref()).required(false));
        }

        let config = builder
            .add_source(
                config::Environment::with_prefix("KRX")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let loaded: Self = config.try_deserialize()?;
        loaded.portal.validate()?;
        Ok(loaded)
    }
}
