//! tracing을 사용한 로깅 인프라.
//!
//! 출력 형식은 세 가지를 지원합니다:
//! - **pretty**: 개발용 사람이 읽기 쉬운 형식
//! - **json**: 운영환경/로그 집계용 JSON 형식
//! - **compact**: 수집 데몬용 한 줄 형식

use crate::config::LoggingConfig;
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    registry::Registry,
    util::SubscriberInitExt,
    EnvFilter, Layer,
};

/// 로그 출력 형식.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// 색상이 포함된 사람이 읽기 쉬운 형식 (개발용)
    #[default]
    Pretty,
    /// 로그 집계용 JSON 형식 (운영용)
    Json,
    /// 간결한 한 줄 형식
    Compact,
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            "compact" => Ok(Self::Compact),
            _ => Err(format!("Unknown log format: {}", s)),
        }
    }
}

/// 로깅 설정.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// 로그 레벨 필터 (예: "info", "krx_data=debug")
    pub level: String,
    /// 출력 형식
    pub format: LogFormat,
    /// span 이벤트 포함 여부 (진입/종료)
    pub with_span_events: bool,
    /// 파일명과 줄 번호 포함 여부
    pub with_file: bool,
    /// 대상(모듈 경로) 포함 여부
    pub with_target: bool,
    /// `RUST_LOG`가 설정되어 있으면 `level` 대신 사용
    pub env_override: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
            with_span_events: false,
            with_file: false,
            with_target: true,
            env_override: true,
        }
    }
}

impl LogConfig {
    /// 새 로그 설정을 생성합니다.
    pub fn new(level: impl Into<String>) -> Self {
        Self {
            level: level.into(),
            ..Default::default()
        }
    }

    /// 로그 형식을 설정합니다.
    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    /// span 이벤트를 활성화합니다.
    pub fn with_span_events(mut self, enabled: bool) -> Self {
        self.with_span_events = enabled;
        self
    }

    /// `RUST_LOG` 우선 적용 여부를 설정합니다.
    pub fn with_env_override(mut self, enabled: bool) -> Self {
        self.env_override = enabled;
        self
    }

    fn env_filter(&self) -> Result<EnvFilter, Box<dyn std::error::Error>> {
        if self.env_override {
            if let Ok(filter) = EnvFilter::try_from_default_env() {
                return Ok(filter);
            }
        }
        Ok(EnvFilter::try_new(&self.level)?)
    }
}

impl From<&LoggingConfig> for LogConfig {
    /// 알 수 없는 형식 문자열은 pretty로 처리합니다.
    fn from(config: &LoggingConfig) -> Self {
        Self::new(config.level.clone()).with_format(config.format.parse().unwrap_or_default())
    }
}

fn fmt_layer(config: &LogConfig) -> Box<dyn Layer<Registry> + Send + Sync> {
    let span_events = if config.with_span_events {
        FmtSpan::NEW | FmtSpan::CLOSE
    } else {
        FmtSpan::NONE
    };

    let base = fmt::layer()
        .with_file(config.with_file)
        .with_line_number(config.with_file)
        .with_target(config.with_target)
        .with_span_events(span_events);

    match config.format {
        LogFormat::Pretty => base.pretty().boxed(),
        LogFormat::Json => base.json().boxed(),
        LogFormat::Compact => base.compact().boxed(),
    }
}

/// 주어진 설정으로 로깅 시스템을 초기화합니다.
///
/// `config.env_override`가 켜져 있고 `RUST_LOG`가 설정되어 있으면
/// `config.level`보다 우선합니다.
///
/// # 예제
///
/// ```no_run
/// use krx_core::logging::{init_logging, LogConfig, LogFormat};
///
/// let config = LogConfig::new("krx_data=debug").with_format(LogFormat::Json);
/// init_logging(config).unwrap();
/// ```
pub fn init_logging(config: LogConfig) -> Result<(), Box<dyn std::error::Error>> {
    let env_filter = config.env_filter()?;

    tracing_subscriber::registry()
        .with(fmt_layer(&config))
        .with(env_filter)
        .try_init()?;

    tracing::debug!(
        format = ?config.format,
        level = %config.level,
        "Logging initialized"
    );

    Ok(())
}

/// KRX 리포트 요청 span을 생성하는 매크로.
#[macro_export]
macro_rules! report_span {
    ($name:expr, $report:expr) => {
        tracing::info_span!($name, report = %$report)
    };
    ($name:expr, $report:expr, $date:expr) => {
        tracing::info_span!($name, report = %$report, date = %$date)
    };
}
