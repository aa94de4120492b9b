//! HTTP 전송 계층.
//!
//! KRX 클라이언트는 "요청 하나를 보내고 상태 코드와 본문을 받는" 기능만
//! 필요로 합니다. 이 경계를 trait으로 분리하여 테스트에서 포털 응답을
//! 대체할 수 있게 합니다.

use crate::error::{KrxError, Result};
use async_trait::async_trait;
use std::time::Duration;

/// 폼 인코딩 POST 요청.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortalRequest {
    /// 요청 URL
    pub url: String,
    /// 폼 필드 (순서 유지)
    pub form: Vec<(String, String)>,
    /// 요청 헤더
    pub headers: Vec<(&'static str, String)>,
}

impl PortalRequest {
    /// 폼 필드 값을 조회합니다.
    pub fn form_value(&self, key: &str) -> Option<&str> {
        self.form
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// 헤더 값을 조회합니다 (대소문자 무시).
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// HTTP 응답 (상태 코드 + 원본 바이트).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortalResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl PortalResponse {
    /// 200 응답을 생성합니다.
    pub fn ok(body: impl Into<Vec<u8>>) -> Self {
        Self {
            status: 200,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// 요청 하나를 보내고 응답을 받는 전송 계층.
///
/// 여러 요청이 동시에 같은 인스턴스를 사용할 수 있어야 합니다.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// 요청을 전송합니다.
    ///
    /// 연결 실패나 타임아웃은 `Err`로, 그 외에는 상태 코드와 관계없이 `Ok`로 반환합니다.
    async fn send(&self, request: PortalRequest) -> Result<PortalResponse>;
}

/// reqwest 기반 전송 계층.
#[derive(Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// 요청 타임아웃을 지정하여 생성합니다.
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .pool_max_idle_per_host(5)
            .pool_idle_timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| KrxError::ConfigError(format!("HTTP 클라이언트 생성 실패: {}", e)))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: PortalRequest) -> Result<PortalResponse> {
        let mut builder = self.client.post(&request.url);
        for (name, value) in &request.headers {
            builder = builder.header(*name, value);
        }

        let response = builder.form(&request.form).send().await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?.to_vec();

        Ok(PortalResponse { status, body })
    }
}
