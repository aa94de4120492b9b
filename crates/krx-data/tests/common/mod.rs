//! KRX 포털 응답을 대체하는 테스트용 전송 계층.

#![allow(dead_code)]

use async_trait::async_trait;
use encoding_rs::EUC_KR;
use krx_core::PortalConfig;
use krx_data::{HttpTransport, KrxError, PortalRequest, PortalResponse, REPORT_INDEX_SERIES};
use std::collections::VecDeque;
use std::sync::Mutex;

pub const OTP_URL: &str = "http://portal.test/comm/fileDn/GenerateOTP/generate.cmd";
pub const CSV_URL: &str = "http://portal.test/comm/fileDn/download_csv/download.cmd";

pub const SNAPSHOT_HEADER: &str =
    "종목코드,종목명,종가,대비,등락률,시가,고가,저가,거래량,거래대금,시가총액,상장주식수";

pub const INDEX_CSV: &str = "\
일자,종가,대비,등락률,시가,고가,저가,거래량,거래대금
2023/09/02,2563.71,-2.67,-0.10,2570.12,2574.11,2557.03,412345,7812345678901
2023/09/01,2566.38,10.12,0.40,2560.00,2569.44,2551.90,398765,7523456789012
";

/// 포털 응답 시나리오.
#[derive(Debug, Clone)]
pub enum Reply {
    /// EUC-KR로 인코딩하여 200으로 응답
    Csv(String),
    /// 원본 바이트를 200으로 응답
    Bytes(Vec<u8>),
    /// 본문 없이 상태 코드만 응답
    Status(u16),
    /// 연결 실패
    Fail,
}

impl Reply {
    pub fn csv(text: &str) -> Self {
        Self::Csv(text.to_string())
    }

    fn respond(&self) -> krx_data::Result<PortalResponse> {
        match self {
            Reply::Csv(text) => {
                let (encoded, _, had_errors) = EUC_KR.encode(text);
                assert!(!had_errors, "fixture must be EUC-KR encodable");
                Ok(PortalResponse::ok(encoded.into_owned()))
            }
            Reply::Bytes(bytes) => Ok(PortalResponse::ok(bytes.clone())),
            Reply::Status(status) => Ok(PortalResponse {
                status: *status,
                body: Vec::new(),
            }),
            Reply::Fail => Err(KrxError::Transport("connection refused".to_string())),
        }
    }
}

/// OTP는 리포트 식별자를 담아 발급하고, CSV 요청은 OTP로 리포트를 구분합니다.
pub struct MockPortal {
    otp: Option<Reply>,
    index: Mutex<VecDeque<Reply>>,
    snapshot: Reply,
    requests: Mutex<Vec<PortalRequest>>,
}

impl MockPortal {
    pub fn new(index: Reply, snapshot: Reply) -> Self {
        Self::with_index_sequence(vec![index], snapshot)
    }

    /// 지수 조회 응답을 순서대로 사용합니다 (마지막 응답은 반복).
    pub fn with_index_sequence(index: Vec<Reply>, snapshot: Reply) -> Self {
        Self {
            otp: None,
            index: Mutex::new(index.into()),
            snapshot,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// OTP 발급 응답을 고정합니다.
    pub fn with_otp_reply(mut self, reply: Reply) -> Self {
        self.otp = Some(reply);
        self
    }

    pub fn requests(&self) -> Vec<PortalRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// 특정 리포트에 대한 OTP 발급 요청 목록.
    pub fn otp_requests_for(&self, report_id: &str) -> Vec<PortalRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.url == OTP_URL && r.form_value("url") == Some(report_id))
            .collect()
    }

    fn next_index(&self) -> Reply {
        let mut index = self.index.lock().unwrap();
        if index.len() > 1 {
            index.pop_front().unwrap()
        } else {
            index.front().cloned().unwrap_or(Reply::Status(404))
        }
    }
}

#[async_trait]
impl HttpTransport for MockPortal {
    async fn send(&self, request: PortalRequest) -> krx_data::Result<PortalResponse> {
        self.requests.lock().unwrap().push(request.clone());

        if request.url == OTP_URL {
            if let Some(reply) = &self.otp {
                return reply.respond();
            }
            let report = request.form_value("url").unwrap_or_default();
            return Ok(PortalResponse::ok(format!("otp:{}", report)));
        }

        let code = request.form_value("code").unwrap_or_default();
        if code.ends_with(REPORT_INDEX_SERIES) {
            self.next_index().respond()
        } else {
            self.snapshot.respond()
        }
    }
}

pub fn portal_config() -> PortalConfig {
    PortalConfig::with_endpoints(OTP_URL, CSV_URL)
}

/// 컬럼 수를 지정한 전종목 시세 CSV (헤더 포함).
pub fn snapshot_csv(rows: usize, columns: usize) -> String {
    let header: Vec<String> = (1..=columns).map(|c| format!("Column{}", c)).collect();
    let mut csv = header.join(",");
    csv.push('\n');
    for r in 1..=rows {
        let row: Vec<String> = (1..=columns).map(|c| format!("Value{}-{}", r, c)).collect();
        csv.push_str(&row.join(","));
        csv.push('\n');
    }
    csv
}
