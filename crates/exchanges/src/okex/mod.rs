//! OKEx 무기한 선물(swap) v3 REST 어댑터
//!
//! - `lenient`: 문자열 숫자/타임스탬프 파싱 정책
//! - `types`: 거래소 응답 그대로의 구조체와 에러 envelope
//! - `mapping`: 응답 구조체 → 정규화 도메인 타입
//! - `swap`: `FutureExchange` 구현체 `OkexSwap`
//!
//! 인증: Base64(HMAC-SHA256(timestamp + method + requestPath + body))

use std::env;

use base64::Engine;
use chrono::Utc;
use hmac::{Hmac, Mac};
use sha2::Sha256;

use interface::ExchangeError;

pub mod lenient;
pub mod mapping;
mod swap;
pub mod types;

pub use swap::OkexSwap;

pub const ENDPOINT: &str = "https://www.okex.com";

// http headers
pub const OK_ACCESS_KEY: &str = "OK-ACCESS-KEY";
pub const OK_ACCESS_SIGN: &str = "OK-ACCESS-SIGN";
pub const OK_ACCESS_TIMESTAMP: &str = "OK-ACCESS-TIMESTAMP";
pub const OK_ACCESS_PASSPHRASE: &str = "OK-ACCESS-PASSPHRASE";
pub const CONTENT_TYPE: &str = "Content-Type";
pub const ACCEPT: &str = "Accept";
pub const APPLICATION_JSON: &str = "application/json";
pub const APPLICATION_JSON_UTF8: &str = "application/json; charset=UTF-8";

// instruments
pub const BTC_USD_SWAP: &str = "BTC-USD-SWAP";
pub const LTC_USD_SWAP: &str = "LTC-USD-SWAP";
pub const ETH_USD_SWAP: &str = "ETH-USD-SWAP";
pub const ETC_USD_SWAP: &str = "ETC-USD-SWAP";
pub const BCH_USD_SWAP: &str = "BCH-USD-SWAP";
pub const BSV_USD_SWAP: &str = "BSV-USD-SWAP";
pub const EOS_USD_SWAP: &str = "EOS-USD-SWAP";
pub const XRP_USD_SWAP: &str = "XRP-USD-SWAP";

// rest paths
pub const GET_ACCOUNTS: &str = "/api/swap/v3/accounts";
pub const PLACE_ORDER: &str = "/api/swap/v3/order";

pub fn cancel_order_path(instrument_id: &str, order_id: &str) -> String {
    format!("/api/swap/v3/cancel_order/{instrument_id}/{order_id}")
}

pub fn get_order_path(instrument_id: &str, order_id: &str) -> String {
    format!("/api/swap/v3/orders/{instrument_id}/{order_id}")
}

pub fn get_position_path(instrument_id: &str) -> String {
    format!("/api/swap/v3/{instrument_id}/position")
}

pub fn get_depth_path(instrument_id: &str, size: u32) -> String {
    format!("/api/swap/v3/instruments/{instrument_id}/depth?size={size}")
}

pub fn get_ticker_path(instrument_id: &str) -> String {
    format!("/api/swap/v3/instruments/{instrument_id}/ticker")
}

pub fn get_unfinished_orders_path(instrument_id: &str, status: i32, from: u32, limit: u32) -> String {
    format!("/api/swap/v3/orders/{instrument_id}?status={status}&from={from}&limit={limit}")
}

// 주문 목록 조회용 상태 필터
pub const ORDER_STATE_UNFINISHED: i32 = 0;
pub const ORDER_STATE_PART_FILLED: i32 = 1;
pub const ORDER_PAGE_FROM: u32 = 1;
pub const ORDER_PAGE_LIMIT: u32 = 100;

/// OKEx API 인증 정보
#[derive(Clone)]
pub struct ApiConfig {
    pub endpoint: String,
    pub api_key: String,
    pub api_secret_key: String,
    pub api_passphrase: String,
}

impl ApiConfig {
    pub fn new(
        api_key: impl Into<String>,
        api_secret_key: impl Into<String>,
        api_passphrase: impl Into<String>,
    ) -> Self {
        Self {
            endpoint: ENDPOINT.to_string(),
            api_key: api_key.into(),
            api_secret_key: api_secret_key.into(),
            api_passphrase: api_passphrase.into(),
        }
    }

    /// 환경변수에서 API 키, 시크릿, 패스프레이즈 가져오기.
    /// OKEX_ENDPOINT 가 있으면 기본 endpoint 대신 사용한다.
    pub fn from_env() -> Result<Self, ExchangeError> {
        let api_key = env::var("OKEX_API_KEY")
            .map_err(|e| ExchangeError::Other(format!("OKEX_API_KEY not found: {}", e)))?;
        let api_secret_key = env::var("OKEX_API_SECRET")
            .map_err(|e| ExchangeError::Other(format!("OKEX_API_SECRET not found: {}", e)))?;
        let api_passphrase = env::var("OKEX_API_PASSPHRASE")
            .map_err(|e| ExchangeError::Other(format!("OKEX_API_PASSPHRASE not found: {}", e)))?;

        let mut config = Self::new(api_key, api_secret_key, api_passphrase);
        if let Ok(endpoint) = env::var("OKEX_ENDPOINT") {
            config.endpoint = endpoint.trim_end_matches('/').to_string();
        }
        Ok(config)
    }
}

impl std::fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiConfig")
            .field("endpoint", &self.endpoint)
            .field("api_key", &self.api_key)
            .finish_non_exhaustive()
    }
}

/// 환경변수가 설정되어 있는지 확인
pub fn has_api_credentials() -> bool {
    env::var("OKEX_API_KEY").is_ok()
        && env::var("OKEX_API_SECRET").is_ok()
        && env::var("OKEX_API_PASSPHRASE").is_ok()
}

type HmacSha256 = Hmac<Sha256>;

/// OKEx API 서명 생성
/// request_path 는 query string 을 포함한 경로 (예: "/api/swap/v3/orders/BTC-USD-SWAP?status=0")
pub fn generate_signature(
    api_secret: &str,
    timestamp: &str,
    method: &str,
    request_path: &str,
    body: &str,
) -> String {
    let mut mac =
        HmacSha256::new_from_slice(api_secret.as_bytes()).expect("HMAC can take key of any size");
    mac.update(timestamp.as_bytes());
    mac.update(method.as_bytes());
    mac.update(request_path.as_bytes());
    mac.update(body.as_bytes());
    base64::engine::general_purpose::STANDARD.encode(mac.finalize().into_bytes())
}

/// ISO 8601 밀리초 타임스탬프 (예: 2020-12-08T09:08:57.715Z)
pub fn get_timestamp() -> String {
    Utc::now().format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()
}
