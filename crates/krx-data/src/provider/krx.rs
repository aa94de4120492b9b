//! KRX(한국거래소) 정보데이터시스템 클라이언트.
//!
//! CSV 다운로드는 두 단계로 이루어집니다:
//! 1. 리포트 폼을 `GenerateOTP`에 POST하여 일회용 토큰(OTP)을 발급받음
//! 2. 토큰을 `download_csv`에 POST하여 EUC-KR CSV를 내려받음
//!
//! # 사용 예제
//!
//! ```rust,ignore
//! use krx_core::PortalConfig;
//! use krx_data::KrxClient;
//!
//! let client = KrxClient::new(PortalConfig::default())?;
//! let snapshot = client.fetch_latest().await?;
//! println!("{} 종목 ({})", snapshot.records.len(), snapshot.date);
//! ```

use crate::calendar::{lookback_window, today_in_seoul, widening_windows};
use crate::encoding::decode_euc_kr;
use crate::error::{KrxError, Result};
use crate::parser::{ensure_min_columns, map_records, parse_csv_rows};
use crate::provider::report::ReportRequest;
use crate::transport::{HttpTransport, PortalRequest, PortalResponse, ReqwestTransport};
use chrono::NaiveDate;
use krx_core::{report_span, BusinessDay, PortalConfig, StockRecord};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info, warn, Instrument};

/// 한 영업일의 전종목 시세.
#[derive(Debug, Clone, Serialize)]
pub struct MarketSnapshot {
    /// 기준 영업일
    pub date: BusinessDay,
    /// 시장 구분
    pub market_id: String,
    /// 종목별 시세
    pub records: Vec<StockRecord>,
}

/// KRX 데이터 클라이언트.
///
/// 전송 계층은 `Arc`로 공유되므로 클라이언트를 복제하여 동시에 사용할 수 있습니다.
#[derive(Clone)]
pub struct KrxClient {
    transport: Arc<dyn HttpTransport>,
    config: PortalConfig,
}

impl KrxClient {
    /// reqwest 전송 계층으로 클라이언트를 생성합니다.
    pub fn new(config: PortalConfig) -> Result<Self> {
        config
            .validate()
            .map_err(|e| KrxError::ConfigError(e.to_string()))?;
        let transport = ReqwestTransport::new(config.request_timeout())?;
        Ok(Self::with_transport(config, Arc::new(transport)))
    }

    /// 전송 계층을 지정하여 클라이언트를 생성합니다.
    pub fn with_transport(config: PortalConfig, transport: Arc<dyn HttpTransport>) -> Self {
        Self { transport, config }
    }

    /// 가장 최근 영업일의 전종목 시세를 조회합니다.
    pub async fn fetch_latest(&self) -> Result<MarketSnapshot> {
        let day = self.resolve_business_day().await?;
        self.fetch_by_day(day).await
    }

    /// 지정한 날짜(`YYYYMMDD`)의 전종목 시세를 조회합니다.
    ///
    /// 영업일 조회를 거치지 않으며, 날짜 형식이 잘못되면 요청 없이 실패합니다.
    pub async fn fetch_by_date(&self, date: &str) -> Result<MarketSnapshot> {
        let day: BusinessDay = date.parse()?;
        self.fetch_by_day(day).await
    }

    /// 지정한 영업일의 전종목 시세를 조회합니다.
    pub async fn fetch_by_day(&self, day: BusinessDay) -> Result<MarketSnapshot> {
        let report = ReportRequest::market_snapshot(self.config.market_id.clone(), day);
        let span = report_span!("krx_snapshot", report.report_id(), day);

        async {
            let rows = self.fetch_report(&report).await?;
            ensure_min_columns(&rows, report.min_columns())?;
            let records = map_records(&rows)?;

            info!(
                market = %self.config.market_id,
                date = %day,
                count = records.len(),
                "KRX 전종목 시세 조회 완료"
            );

            Ok::<_, KrxError>(MarketSnapshot {
                date: day,
                market_id: self.config.market_id.clone(),
                records,
            })
        }
        .instrument(span)
        .await
    }

    /// 한국 시간 기준 가장 최근 영업일을 조회합니다.
    pub async fn resolve_business_day(&self) -> Result<BusinessDay> {
        self.resolve_business_day_at(today_in_seoul()).await
    }

    /// `today` 기준 가장 최근 영업일을 조회합니다.
    ///
    /// `[today - N일, today]` 구간의 코스피 지수 일별 시세에서 첫 행(최근일)의
    /// 날짜를 사용합니다. 구간에 거래일이 없으면 구간을 넓혀 다시 조회하고,
    /// 최대 구간에서도 없으면 `KrxError::NoSession`을 반환합니다.
    pub async fn resolve_business_day_at(&self, today: NaiveDate) -> Result<BusinessDay> {
        let windows = widening_windows(self.config.lookback_days, self.config.max_lookback_days);
        let mut searched = 0;

        for days in windows {
            searched = days;
            let (start, end) = lookback_window(today, days)?;
            let report = ReportRequest::index_series(start, end);

            let rows = match self
                .fetch_report(&report)
                .instrument(report_span!("krx_business_day", report.report_id(), end))
                .await
            {
                Ok(rows) => rows,
                Err(KrxError::EmptyResult(_)) => {
                    warn!(days, start = %start, end = %end, "조회 구간에 거래일 없음, 구간 확장");
                    continue;
                }
                Err(e) => return Err(e),
            };

            let cell = rows
                .first()
                .and_then(|row| row.first())
                .ok_or_else(|| KrxError::ParseError("지수 시세 첫 행에 날짜가 없습니다".to_string()))?;

            let day = BusinessDay::from_krx_cell(cell)
                .map_err(|e| KrxError::ParseError(format!("영업일 파싱 실패: {}", e)))?;

            debug!(business_day = %day, window_days = days, "최근 영업일 확인");
            return Ok(day);
        }

        Err(KrxError::NoSession {
            lookback_days: searched,
        })
    }

    /// OTP 발급 후 CSV를 내려받습니다 (헤더 제외).
    pub async fn fetch_report(&self, report: &ReportRequest) -> Result<Vec<Vec<String>>> {
        let otp = self.request_otp(report).await?;
        self.download_csv(&otp).await
    }

    /// 리포트 폼으로 OTP를 발급받습니다.
    pub async fn request_otp(&self, report: &ReportRequest) -> Result<String> {
        let form = report.to_form(&self.config.locale);
        let response = self.post(&self.config.otp_url, form).await?;

        let otp = String::from_utf8_lossy(&response.body).trim().to_string();
        if otp.is_empty() {
            return Err(KrxError::EmptyToken {
                report: report.to_string(),
            });
        }

        debug!(report = %report, otp_len = otp.len(), "KRX OTP 발급");
        Ok(otp)
    }

    /// OTP로 CSV를 내려받아 행 목록으로 반환합니다 (헤더 제외).
    ///
    /// 데이터 행이 없으면 `KrxError::EmptyResult`를 반환합니다.
    pub async fn download_csv(&self, otp: &str) -> Result<Vec<Vec<String>>> {
        let form = vec![("code".to_string(), otp.to_string())];
        let response = self.post(&self.config.csv_url, form).await?;

        debug!(response_len = response.body.len(), "KRX CSV 응답 수신");

        let text = decode_euc_kr(&response.body)?;
        let rows = parse_csv_rows(&text)?;
        if rows.is_empty() {
            return Err(KrxError::EmptyResult(
                "CSV 응답에 데이터 행이 없습니다".to_string(),
            ));
        }

        Ok(rows)
    }

    /// 공통 헤더를 붙여 폼 POST를 전송합니다.
    async fn post(&self, url: &str, form: Vec<(String, String)>) -> Result<PortalResponse> {
        let request = PortalRequest {
            url: url.to_string(),
            form,
            headers: vec![
                ("Accept-Language", self.config.accept_language.clone()),
                (
                    "Content-Type",
                    "application/x-www-form-urlencoded".to_string(),
                ),
                ("User-Agent", self.config.user_agent.clone()),
            ],
        };

        let timeout = self.config.request_timeout();
        let response = tokio::time::timeout(timeout, self.transport.send(request))
            .await
            .map_err(|_| KrxError::Timeout(format!("{} ({}s)", url, timeout.as_secs())))??;

        if !response.is_success() {
            return Err(KrxError::HttpStatus {
                status: response.status,
                url: url.to_string(),
            });
        }

        Ok(response)
    }
}
