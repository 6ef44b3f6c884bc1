use std::collections::HashMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Currency, CurrencyPair, ExchangeError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExchangeId {
    OkexSwap,
}

impl ExchangeId {
    pub fn name(&self) -> &'static str {
        match self {
            ExchangeId::OkexSwap => "okex_swap",
        }
    }
}

impl fmt::Display for ExchangeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ticker {
    pub pair: CurrencyPair,
    pub last: f64,
    pub low: f64,
    pub high: f64,
    pub vol: f64,
    /// epoch milliseconds
    pub date: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DepthRecord {
    pub price: f64,
    pub amount: f64,
}

/// 호가창. bid/ask 모두 index 0 이 최우선 호가.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Depth {
    pub pair: CurrencyPair,
    pub contract_type: String,
    pub utime: DateTime<Utc>,
    pub bid_list: Vec<DepthRecord>,
    pub ask_list: Vec<DepthRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FutureSubAccount {
    pub currency: Currency,
    /// equity
    pub account_rights: f64,
    /// 사용 중인 증거금
    pub keep_deposit: f64,
    pub profit_real: f64,
    pub profit_unreal: f64,
    /// margin ratio
    pub risk_rate: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FutureAccount {
    pub future_sub_accounts: HashMap<Currency, FutureSubAccount>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TradeStatus {
    Cancelled,
    Unfinished,
    PartiallyFilled,
    Finished,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FutureOrder {
    pub order_id: String,
    pub currency: CurrencyPair,
    pub contract_name: String,
    pub amount: f64,
    pub price: f64,
    pub deal_amount: f64,
    pub avg_price: f64,
    pub o_type: i32,
    pub status: TradeStatus,
    pub fee: f64,
    /// epoch milliseconds
    pub order_time: i64,
}

/// 하나의 (pair, contract) 에 대한 양방향 포지션
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuturePosition {
    pub contract_type: String,
    pub symbol: CurrencyPair,
    pub force_liqu_price: f64,

    pub buy_amount: f64,
    pub buy_available: f64,
    pub buy_price_avg: f64,
    pub buy_profit_real: f64,
    pub buy_price_cost: f64,

    pub sell_amount: f64,
    pub sell_available: f64,
    pub sell_price_avg: f64,
    pub sell_profit_real: f64,
    pub sell_price_cost: f64,
}

impl FuturePosition {
    /// 수량/가격이 모두 0 인 포지션
    pub fn empty(symbol: CurrencyPair, contract_type: impl Into<String>) -> Self {
        Self {
            contract_type: contract_type.into(),
            symbol,
            force_liqu_price: 0.0,
            buy_amount: 0.0,
            buy_available: 0.0,
            buy_price_avg: 0.0,
            buy_profit_real: 0.0,
            buy_price_cost: 0.0,
            sell_amount: 0.0,
            sell_available: 0.0,
            sell_price_avg: 0.0,
            sell_profit_real: 0.0,
            sell_price_cost: 0.0,
        }
    }
}

/// 주문 방향 코드. 거래소에는 정수 문자열로 전달된다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OpenType {
    OpenLong = 1,
    OpenShort = 2,
    CloseLong = 3,
    CloseShort = 4,
}

impl OpenType {
    pub fn code(self) -> i32 {
        self as i32
    }
}

impl TryFrom<i32> for OpenType {
    type Error = ExchangeError;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(OpenType::OpenLong),
            2 => Ok(OpenType::OpenShort),
            3 => Ok(OpenType::CloseLong),
            4 => Ok(OpenType::CloseShort),
            other => Err(ExchangeError::Other(format!("invalid open type: {other}"))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaceOrderOptions {
    pub open_type: OpenType,
    /// true 이면 지정가 대신 상대 최우선 호가로 체결
    pub match_price: bool,
}

/// 미체결 주문 조회 결과.
///
/// `diagnostic` 이 `Some` 이면 두 번째 페이지(부분 체결) 조회가 실패해서
/// 첫 번째 페이지의 주문만 담겨 있다는 뜻이다.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UnfinishedOrders {
    pub orders: Vec<FutureOrder>,
    pub diagnostic: Option<ExchangeError>,
}

impl UnfinishedOrders {
    pub fn is_partial(&self) -> bool {
        self.diagnostic.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FutureKline {
    pub pair: CurrencyPair,
    pub contract_type: String,
    pub timestamp: i64,
    pub open: f64,
    pub close: f64,
    pub high: f64,
    pub low: f64,
    pub vol: f64,
    pub vol2: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TradeSide {
    Buy,
    Sell,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    pub tid: i64,
    pub side: TradeSide,
    pub amount: f64,
    pub price: f64,
    pub date: i64,
    pub pair: CurrencyPair,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_type_codes() {
        assert_eq!(OpenType::OpenLong.code(), 1);
        assert_eq!(OpenType::CloseShort.code(), 4);
        assert_eq!(OpenType::try_from(2).unwrap(), OpenType::OpenShort);
        assert!(OpenType::try_from(0).is_err());
    }

    #[test]
    fn exchange_name() {
        assert_eq!(ExchangeId::OkexSwap.to_string(), "okex_swap");
    }
}
