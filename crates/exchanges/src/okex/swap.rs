use async_trait::async_trait;
use reqwest::Method;
use serde::de::DeserializeOwned;
use tracing::{debug, trace, warn};
use uuid::Uuid;

use interface::{
    CurrencyPair, Depth, ExchangeError, ExchangeId, FutureAccount, FutureKline, FutureOrder,
    FuturePosition, PlaceOrderOptions, Ticker, Trade, UnfinishedOrders,
};

use super::mapping::{contract_value, map_account, map_depth, map_order, map_position, map_ticker};
use super::types::{
    BaseOrderInfo, BaseTickerInfo, PlaceOrderInfo, PlaceOrderResult, SwapAccounts,
    SwapCancelOrderResult, SwapInstrumentDepth, SwapOrderInfo, SwapOrdersInfo, SwapPosition,
};
use super::{
    cancel_order_path, generate_signature, get_depth_path, get_order_path, get_position_path,
    get_ticker_path, get_timestamp, get_unfinished_orders_path, ApiConfig, ACCEPT,
    APPLICATION_JSON, APPLICATION_JSON_UTF8, CONTENT_TYPE, GET_ACCOUNTS, OK_ACCESS_KEY,
    OK_ACCESS_PASSPHRASE, OK_ACCESS_SIGN, OK_ACCESS_TIMESTAMP, ORDER_PAGE_FROM, ORDER_PAGE_LIMIT,
    ORDER_STATE_PART_FILLED, ORDER_STATE_UNFINISHED, PLACE_ORDER,
};
use crate::transport::{HttpTransport, ReqwestTransport};
use crate::FutureExchange;

/// OKEx swap 어댑터. 생성 후에는 설정만 들고 있으며 호출 간 상태가 없다.
pub struct OkexSwap<T = ReqwestTransport> {
    config: ApiConfig,
    transport: T,
}

impl OkexSwap<ReqwestTransport> {
    pub fn new(config: ApiConfig) -> Result<Self, ExchangeError> {
        Ok(Self::with_transport(config, ReqwestTransport::new()?))
    }

    /// OKEX_API_KEY / OKEX_API_SECRET / OKEX_API_PASSPHRASE 환경변수 사용
    pub fn with_credentials() -> Result<Self, ExchangeError> {
        Self::new(ApiConfig::from_env()?)
    }
}

impl<T: HttpTransport> OkexSwap<T> {
    pub fn with_transport(config: ApiConfig, transport: T) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// 서명 헤더를 붙여 요청하고 응답 body 를 `R` 로 디코딩한다.
    /// uri 는 query string 을 포함한 경로이며 그대로 서명 대상이 된다.
    async fn do_request<R: DeserializeOwned>(
        &self,
        method: Method,
        uri: &str,
        body: &str,
    ) -> Result<R, ExchangeError> {
        let url = format!("{}{}", self.config.endpoint, uri);
        debug!("{} {}", method, url);

        let timestamp = get_timestamp();
        let sign = generate_signature(
            &self.config.api_secret_key,
            &timestamp,
            method.as_str(),
            uri,
            body,
        );

        let headers = [
            (CONTENT_TYPE, APPLICATION_JSON_UTF8.to_string()),
            (ACCEPT, APPLICATION_JSON.to_string()),
            (OK_ACCESS_KEY, self.config.api_key.clone()),
            (OK_ACCESS_PASSPHRASE, self.config.api_passphrase.clone()),
            (OK_ACCESS_SIGN, sign),
            (OK_ACCESS_TIMESTAMP, timestamp),
        ];

        let response_text = self.transport.send(method, &url, body, &headers).await?;
        trace!("{} response: {}", uri, response_text);

        serde_json::from_str(&response_text).map_err(|e| {
            ExchangeError::Decode(format!(
                "{}, response: {}",
                e,
                response_text.chars().take(200).collect::<String>()
            ))
        })
    }

    /// 상태 필터 하나에 대한 주문 목록 한 페이지
    async fn fetch_order_page(
        &self,
        contract_type: &str,
        status: i32,
    ) -> Result<Vec<BaseOrderInfo>, ExchangeError> {
        let uri =
            get_unfinished_orders_path(contract_type, status, ORDER_PAGE_FROM, ORDER_PAGE_LIMIT);
        let resp: SwapOrdersInfo = self.do_request(Method::GET, &uri, "").await?;
        resp.tips.check()?;
        Ok(resp.order_info)
    }
}

#[async_trait]
impl<T: HttpTransport> FutureExchange for OkexSwap<T> {
    fn id(&self) -> ExchangeId {
        ExchangeId::OkexSwap
    }

    async fn fetch_ticker(
        &self,
        pair: CurrencyPair,
        contract_type: &str,
    ) -> Result<Ticker, ExchangeError> {
        let resp: BaseTickerInfo = self
            .do_request(Method::GET, &get_ticker_path(contract_type), "")
            .await?;
        resp.tips.check()?;
        Ok(map_ticker(pair, &resp))
    }

    async fn fetch_depth(
        &self,
        pair: CurrencyPair,
        contract_type: &str,
        size: u32,
    ) -> Result<Depth, ExchangeError> {
        let resp: SwapInstrumentDepth = self
            .do_request(Method::GET, &get_depth_path(contract_type, size), "")
            .await?;
        resp.tips.check()?;
        Ok(map_depth(pair, contract_type, &resp))
    }

    async fn fetch_account(&self) -> Result<FutureAccount, ExchangeError> {
        let resp: SwapAccounts = self.do_request(Method::GET, GET_ACCOUNTS, "").await?;
        resp.tips.check()?;
        Ok(map_account(&resp.info))
    }

    async fn place_order(
        &self,
        _pair: CurrencyPair,
        contract_type: &str,
        price: &str,
        amount: &str,
        options: PlaceOrderOptions,
    ) -> Result<String, ExchangeError> {
        let req = PlaceOrderInfo {
            client_oid: Uuid::new_v4().simple().to_string(),
            price: price.to_string(),
            match_price: if options.match_price { "1" } else { "0" }.to_string(),
            order_type: options.open_type.code().to_string(),
            size: amount.to_string(),
            instrument_id: contract_type.to_string(),
        };
        let body = serde_json::to_string(&req)?;

        let resp: PlaceOrderResult = self.do_request(Method::POST, PLACE_ORDER, &body).await?;
        resp.envelope.check()?;

        debug!(
            "placed {} order {} (client_oid {})",
            contract_type, resp.order_id, resp.client_oid
        );
        Ok(resp.order_id)
    }

    async fn cancel_order(
        &self,
        _pair: CurrencyPair,
        contract_type: &str,
        order_id: &str,
    ) -> Result<bool, ExchangeError> {
        let resp: SwapCancelOrderResult = self
            .do_request(Method::POST, &cancel_order_path(contract_type, order_id), "")
            .await?;
        resp.envelope.check()?;
        Ok(resp.envelope.result())
    }

    async fn fetch_order(
        &self,
        order_id: &str,
        pair: CurrencyPair,
        contract_type: &str,
    ) -> Result<FutureOrder, ExchangeError> {
        let resp: SwapOrderInfo = self
            .do_request(Method::GET, &get_order_path(contract_type, order_id), "")
            .await?;
        resp.tips.check()?;
        Ok(map_order(&resp.order, pair, contract_type))
    }

    async fn fetch_orders(
        &self,
        _order_ids: &[String],
        _pair: CurrencyPair,
        _contract_type: &str,
    ) -> Result<Vec<FutureOrder>, ExchangeError> {
        Err(ExchangeError::Unsupported("fetch_orders"))
    }

    /// 거래소에 "미완료 전체" 필터가 없어서 미체결(0), 부분 체결(1) 순서로 두 번 조회한다.
    /// 첫 페이지 실패는 전체 실패, 두 번째 페이지 실패는 첫 페이지 결과 + diagnostic.
    async fn fetch_unfinished_orders(
        &self,
        pair: CurrencyPair,
        contract_type: &str,
    ) -> Result<UnfinishedOrders, ExchangeError> {
        let unfinished = self
            .fetch_order_page(contract_type, ORDER_STATE_UNFINISHED)
            .await?;

        let mut orders: Vec<FutureOrder> = unfinished
            .iter()
            .map(|info| map_order(info, pair, contract_type))
            .collect();

        let diagnostic = match self
            .fetch_order_page(contract_type, ORDER_STATE_PART_FILLED)
            .await
        {
            Ok(part_filled) => {
                orders.extend(
                    part_filled
                        .iter()
                        .map(|info| map_order(info, pair, contract_type)),
                );
                None
            }
            Err(e) => {
                warn!(
                    "{} partially filled orders unavailable, returning {} unfinished orders: {}",
                    contract_type,
                    orders.len(),
                    e
                );
                Some(e)
            }
        };

        Ok(UnfinishedOrders { orders, diagnostic })
    }

    async fn fetch_position(
        &self,
        pair: CurrencyPair,
        contract_type: &str,
    ) -> Result<Vec<FuturePosition>, ExchangeError> {
        let resp: SwapPosition = self
            .do_request(Method::GET, &get_position_path(contract_type), "")
            .await?;
        resp.tips.check()?;
        Ok(vec![map_position(pair, contract_type, &resp.holding)])
    }

    fn contract_value(&self, pair: CurrencyPair) -> Result<f64, ExchangeError> {
        contract_value(pair)
    }

    async fn fetch_fee(&self) -> Result<f64, ExchangeError> {
        Err(ExchangeError::Unsupported("fetch_fee"))
    }

    async fn fetch_estimated_price(&self, _pair: CurrencyPair) -> Result<f64, ExchangeError> {
        Err(ExchangeError::Unsupported("fetch_estimated_price"))
    }

    async fn fetch_index_price(&self, _pair: CurrencyPair) -> Result<f64, ExchangeError> {
        Err(ExchangeError::Unsupported("fetch_index_price"))
    }

    async fn fetch_delivery_time(&self) -> Result<(i32, i32, i32, i32), ExchangeError> {
        Err(ExchangeError::Unsupported("fetch_delivery_time"))
    }

    async fn fetch_klines(
        &self,
        _contract_type: &str,
        _pair: CurrencyPair,
        _period: i32,
        _size: u32,
        _since: i64,
    ) -> Result<Vec<FutureKline>, ExchangeError> {
        Err(ExchangeError::Unsupported("fetch_klines"))
    }

    async fn fetch_trades(
        &self,
        _contract_type: &str,
        _pair: CurrencyPair,
        _since: i64,
    ) -> Result<Vec<Trade>, ExchangeError> {
        Err(ExchangeError::Unsupported("fetch_trades"))
    }

    async fn fetch_exchange_rate(&self) -> Result<f64, ExchangeError> {
        Err(ExchangeError::Unsupported("fetch_exchange_rate"))
    }
}
