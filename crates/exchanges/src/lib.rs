use async_trait::async_trait;

use interface::{
    CurrencyPair, Depth, ExchangeError, ExchangeId, FutureAccount, FutureKline, FutureOrder,
    FuturePosition, PlaceOrderOptions, Ticker, Trade, UnfinishedOrders,
};

pub mod okex;
pub mod transport;

#[cfg(test)]
pub(crate) mod testing;

/// 무기한 선물(swap) 거래소의 정규화된 인터페이스.
///
/// 거래소가 제공하지 않는 기능은 네트워크 호출 없이
/// `ExchangeError::Unsupported` 를 반환해야 한다.
#[async_trait]
pub trait FutureExchange: Send + Sync {
    fn id(&self) -> ExchangeId;

    async fn fetch_ticker(
        &self,
        pair: CurrencyPair,
        contract_type: &str,
    ) -> Result<Ticker, ExchangeError>;

    /// size: 조회할 호가 단계 수
    async fn fetch_depth(
        &self,
        pair: CurrencyPair,
        contract_type: &str,
        size: u32,
    ) -> Result<Depth, ExchangeError>;

    async fn fetch_account(&self) -> Result<FutureAccount, ExchangeError>;

    /// 주문 후 거래소 order id 를 반환
    async fn place_order(
        &self,
        pair: CurrencyPair,
        contract_type: &str,
        price: &str,
        amount: &str,
        options: PlaceOrderOptions,
    ) -> Result<String, ExchangeError>;

    async fn cancel_order(
        &self,
        pair: CurrencyPair,
        contract_type: &str,
        order_id: &str,
    ) -> Result<bool, ExchangeError>;

    async fn fetch_order(
        &self,
        order_id: &str,
        pair: CurrencyPair,
        contract_type: &str,
    ) -> Result<FutureOrder, ExchangeError>;

    async fn fetch_orders(
        &self,
        order_ids: &[String],
        pair: CurrencyPair,
        contract_type: &str,
    ) -> Result<Vec<FutureOrder>, ExchangeError>;

    /// 미체결 + 부분 체결 주문
    async fn fetch_unfinished_orders(
        &self,
        pair: CurrencyPair,
        contract_type: &str,
    ) -> Result<UnfinishedOrders, ExchangeError>;

    async fn fetch_position(
        &self,
        pair: CurrencyPair,
        contract_type: &str,
    ) -> Result<Vec<FuturePosition>, ExchangeError>;

    /// 계약 1장의 USD 가치
    fn contract_value(&self, pair: CurrencyPair) -> Result<f64, ExchangeError>;

    async fn fetch_fee(&self) -> Result<f64, ExchangeError>;

    async fn fetch_estimated_price(&self, pair: CurrencyPair) -> Result<f64, ExchangeError>;

    async fn fetch_index_price(&self, pair: CurrencyPair) -> Result<f64, ExchangeError>;

    /// (요일, 시, 분, 초)
    async fn fetch_delivery_time(&self) -> Result<(i32, i32, i32, i32), ExchangeError>;

    async fn fetch_klines(
        &self,
        contract_type: &str,
        pair: CurrencyPair,
        period: i32,
        size: u32,
        since: i64,
    ) -> Result<Vec<FutureKline>, ExchangeError>;

    async fn fetch_trades(
        &self,
        contract_type: &str,
        pair: CurrencyPair,
        since: i64,
    ) -> Result<Vec<Trade>, ExchangeError>;

    async fn fetch_exchange_rate(&self) -> Result<f64, ExchangeError>;
}

pub use okex::{ApiConfig, OkexSwap};
pub use transport::{HttpTransport, ReqwestTransport};
