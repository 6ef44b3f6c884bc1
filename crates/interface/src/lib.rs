//! 거래소 독립적인 도메인 타입과 에러 모델
//!
//! 어댑터는 거래소별 JSON 응답을 여기 정의된 타입으로 정규화해서 돌려준다.

mod currency;
mod error;
mod model;

pub use currency::{Currency, CurrencyPair};
pub use error::ExchangeError;
pub use model::{
    Depth, DepthRecord, ExchangeId, FutureAccount, FutureKline, FutureOrder, FuturePosition,
    FutureSubAccount, OpenType, PlaceOrderOptions, Ticker, Trade, TradeSide, TradeStatus,
    UnfinishedOrders,
};
