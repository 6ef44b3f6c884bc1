//! OKEx swap v3 응답/요청 구조체. 숫자 필드는 모두 문자열로 받는다.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use interface::ExchangeError;

use super::lenient;

/// 주문/취소 응답의 에러 envelope: `{error_code, error_message, result}`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BaseResponse {
    #[serde(default, deserialize_with = "lenient::string")]
    pub error_code: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub error_message: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub result: String,
}

impl BaseResponse {
    /// message 가 있거나 code 가 "0" 이 아닌 값이면 에러
    pub fn check(&self) -> Result<(), ExchangeError> {
        if is_error(&self.error_code, &self.error_message) {
            return Err(ExchangeError::exchange(&self.error_code, &self.error_message));
        }
        Ok(())
    }

    pub fn result(&self) -> bool {
        lenient::parse_bool(&self.result)
    }
}

/// 주문 조회 응답의 에러 envelope: `{code, message}`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BizWarmTips {
    #[serde(default, deserialize_with = "lenient::string")]
    pub code: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub message: String,
}

impl BizWarmTips {
    pub fn check(&self) -> Result<(), ExchangeError> {
        if is_error(&self.code, &self.message) {
            return Err(ExchangeError::exchange(&self.code, &self.message));
        }
        Ok(())
    }
}

fn is_error(code: &str, message: &str) -> bool {
    !message.is_empty() || !(code.is_empty() || code == "0")
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BaseTickerInfo {
    #[serde(flatten)]
    pub tips: BizWarmTips,
    #[serde(default)]
    pub instrument_id: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub last: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub high_24h: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub low_24h: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub volume_24h: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub best_bid: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub best_ask: String,
    #[serde(default)]
    pub timestamp: String,
}

/// 호가 한 단계: [price, size, 강제청산 주문 수, 주문 수]
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SwapInstrumentDepth {
    #[serde(flatten)]
    pub tips: BizWarmTips,
    #[serde(default)]
    pub asks: Vec<Vec<Value>>,
    #[serde(default)]
    pub bids: Vec<Vec<Value>>,
    #[serde(default)]
    pub timestamp: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SwapAccounts {
    #[serde(flatten)]
    pub tips: BizWarmTips,
    #[serde(default)]
    pub info: Vec<SwapAccountInfo>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SwapAccountInfo {
    #[serde(default)]
    pub instrument_id: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub equity: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub margin: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub realized_pnl: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub unrealized_pnl: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub margin_ratio: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BaseOrderInfo {
    #[serde(default, deserialize_with = "lenient::string")]
    pub order_id: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub client_oid: String,
    #[serde(default)]
    pub instrument_id: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub size: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub price: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub filled_qty: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub price_avg: String,
    #[serde(rename = "type", default, deserialize_with = "lenient::string")]
    pub order_type: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub status: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub fee: String,
    #[serde(default)]
    pub timestamp: String,
}

/// 단건 주문 조회 응답. 주문 필드와 biz warm tip 이 같은 객체에 섞여 온다.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SwapOrderInfo {
    #[serde(flatten)]
    pub tips: BizWarmTips,
    #[serde(flatten)]
    pub order: BaseOrderInfo,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SwapOrdersInfo {
    #[serde(flatten)]
    pub tips: BizWarmTips,
    #[serde(default)]
    pub order_info: Vec<BaseOrderInfo>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SwapPosition {
    #[serde(flatten)]
    pub tips: BizWarmTips,
    #[serde(default)]
    pub margin_mode: String,
    #[serde(default)]
    pub holding: Vec<SwapPositionHolding>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SwapPositionHolding {
    #[serde(default, deserialize_with = "lenient::string")]
    pub avail_position: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub avg_cost: String,
    #[serde(default)]
    pub instrument_id: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub leverage: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub liquidation_price: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub margin: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub position: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub realized_pnl: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub settlement_price: String,
    /// "long" 또는 "short"
    #[serde(default)]
    pub side: String,
    #[serde(default)]
    pub timestamp: String,
}

/// 주문 요청 body
#[derive(Debug, Clone, Serialize)]
pub struct PlaceOrderInfo {
    pub client_oid: String,
    pub price: String,
    pub match_price: String,
    #[serde(rename = "type")]
    pub order_type: String,
    pub size: String,
    pub instrument_id: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlaceOrderResult {
    #[serde(flatten)]
    pub envelope: BaseResponse,
    #[serde(default, deserialize_with = "lenient::string")]
    pub order_id: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub client_oid: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SwapCancelOrderResult {
    #[serde(flatten)]
    pub envelope: BaseResponse,
    #[serde(default, deserialize_with = "lenient::string")]
    pub order_id: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub client_oid: String,
}
