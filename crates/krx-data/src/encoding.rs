//! EUC-KR(CP949) → UTF-8 변환.
//!
//! KRX CSV 다운로드는 `Content-Type`과 무관하게 항상 EUC-KR로 내려옵니다.

use crate::error::{KrxError, Result};
use encoding_rs::EUC_KR;

/// EUC-KR 바이트를 UTF-8 문자열로 변환합니다.
///
/// 치환 문자(U+FFFD)로 대체하지 않고, 잘못된 바이트열이 있으면 실패합니다.
pub fn decode_euc_kr(bytes: &[u8]) -> Result<String> {
    EUC_KR
        .decode_without_bom_handling_and_without_replacement(bytes)
        .map(|text| text.into_owned())
        .ok_or_else(|| {
            KrxError::Decode(format!(
                "EUC-KR로 해석할 수 없는 응답 ({} bytes)",
                bytes.len()
            ))
        })
}
