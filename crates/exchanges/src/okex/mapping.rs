//! 거래소 응답 구조체 → 정규화 도메인 타입

use std::collections::HashMap;

use interface::{
    Currency, CurrencyPair, Depth, DepthRecord, ExchangeError, FutureAccount, FutureOrder,
    FuturePosition, FutureSubAccount, Ticker, TradeStatus,
};

use super::lenient;
use super::types::{
    BaseOrderInfo, BaseTickerInfo, SwapAccountInfo, SwapInstrumentDepth, SwapPositionHolding,
};
use super::{
    BCH_USD_SWAP, BSV_USD_SWAP, BTC_USD_SWAP, EOS_USD_SWAP, ETC_USD_SWAP, ETH_USD_SWAP,
    LTC_USD_SWAP, XRP_USD_SWAP,
};

/// swap 상품 → 정산 통화
const SWAP_CURRENCIES: [(&str, Currency); 8] = [
    (BTC_USD_SWAP, Currency::BTC),
    (LTC_USD_SWAP, Currency::LTC),
    (ETH_USD_SWAP, Currency::ETH),
    (ETC_USD_SWAP, Currency::ETC),
    (BCH_USD_SWAP, Currency::BCH),
    (BSV_USD_SWAP, Currency::BSV),
    (EOS_USD_SWAP, Currency::EOS),
    (XRP_USD_SWAP, Currency::XRP),
];

/// 테이블에 없는 상품은 `Currency::UNKNOWN`
pub fn currency_of_instrument(instrument_id: &str) -> Currency {
    SWAP_CURRENCIES
        .iter()
        .find(|(id, _)| *id == instrument_id)
        .map(|(_, currency)| *currency)
        .unwrap_or(Currency::UNKNOWN)
}

/// 거래소 주문 상태 코드 → TradeStatus. 모르는 코드는 Unfinished.
pub fn adapt_trade_status(status: i64) -> TradeStatus {
    match status {
        -1 => TradeStatus::Cancelled,
        0 => TradeStatus::Unfinished,
        1 => TradeStatus::PartiallyFilled,
        2 => TradeStatus::Finished,
        _ => TradeStatus::Unfinished,
    }
}

/// 계약 1장의 USD 가치. BTC 는 100 USD, LTC/ETH/ETC/BCH 는 10 USD.
pub fn contract_value(pair: CurrencyPair) -> Result<f64, ExchangeError> {
    match pair {
        CurrencyPair::BTC_USD => Ok(100.0),
        CurrencyPair::LTC_USD
        | CurrencyPair::ETH_USD
        | CurrencyPair::ETC_USD
        | CurrencyPair::BCH_USD => Ok(10.0),
        other => Err(ExchangeError::Other(format!(
            "no contract value for {other}"
        ))),
    }
}

pub fn map_ticker(pair: CurrencyPair, raw: &BaseTickerInfo) -> Ticker {
    Ticker {
        pair,
        last: lenient::parse_f64(&raw.last),
        low: lenient::parse_f64(&raw.low_24h),
        high: lenient::parse_f64(&raw.high_24h),
        vol: lenient::parse_f64(&raw.volume_24h),
        date: u64::try_from(lenient::rfc3339_millis(&raw.timestamp)).unwrap_or(0),
    }
}

fn depth_record(level: &[serde_json::Value]) -> DepthRecord {
    DepthRecord {
        price: lenient::value_f64(level.first()),
        amount: lenient::value_f64(level.get(1)),
    }
}

/// asks 는 거래소가 worst → best 순으로 주므로 뒤집어서 index 0 이 최저가가 되게 한다.
pub fn map_depth(pair: CurrencyPair, contract_type: &str, raw: &SwapInstrumentDepth) -> Depth {
    Depth {
        pair,
        contract_type: contract_type.to_string(),
        utime: lenient::rfc3339_datetime(&raw.timestamp),
        bid_list: raw.bids.iter().map(|level| depth_record(level)).collect(),
        ask_list: raw.asks.iter().rev().map(|level| depth_record(level)).collect(),
    }
}

/// 같은 통화로 매핑되는 행이 여러 개면 마지막 행이 남는다.
pub fn map_account(infos: &[SwapAccountInfo]) -> FutureAccount {
    let mut future_sub_accounts = HashMap::with_capacity(infos.len());

    for info in infos {
        let currency = currency_of_instrument(&info.instrument_id);
        future_sub_accounts.insert(
            currency,
            FutureSubAccount {
                currency,
                account_rights: lenient::parse_f64(&info.equity),
                keep_deposit: lenient::parse_f64(&info.margin),
                profit_real: lenient::parse_f64(&info.realized_pnl),
                profit_unreal: lenient::parse_f64(&info.unrealized_pnl),
                risk_rate: lenient::parse_f64(&info.margin_ratio),
            },
        );
    }

    FutureAccount {
        future_sub_accounts,
    }
}

/// 응답에는 pair/contract 가 없으므로 호출자가 넘긴 값을 채운다.
pub fn map_order(raw: &BaseOrderInfo, pair: CurrencyPair, contract_type: &str) -> FutureOrder {
    FutureOrder {
        order_id: raw.order_id.clone(),
        currency: pair,
        contract_name: contract_type.to_string(),
        amount: lenient::parse_f64(&raw.size),
        price: lenient::parse_f64(&raw.price),
        deal_amount: lenient::parse_f64(&raw.filled_qty),
        avg_price: lenient::parse_f64(&raw.price_avg),
        o_type: i32::try_from(lenient::parse_i64(&raw.order_type)).unwrap_or(0),
        status: adapt_trade_status(lenient::parse_i64(&raw.status)),
        fee: lenient::parse_f64(&raw.fee),
        order_time: lenient::rfc3339_millis(&raw.timestamp),
    }
}

/// long/short 행을 `side` 로 구분해서 하나의 포지션으로 합친다. 행 순서는 보지 않는다.
pub fn map_position(
    pair: CurrencyPair,
    contract_type: &str,
    holdings: &[SwapPositionHolding],
) -> FuturePosition {
    let mut position = FuturePosition::empty(pair, contract_type);
    if holdings.is_empty() {
        return position;
    }

    let mut buy = None;
    let mut sell = None;
    for holding in holdings {
        match holding.side.as_str() {
            "long" => buy = Some(holding),
            "short" => sell = Some(holding),
            other => {
                tracing::warn!(
                    "ignoring {} holding with unknown side {:?}",
                    holding.instrument_id,
                    other
                );
            }
        }
    }

    let empty = SwapPositionHolding::default();
    let buy = buy.unwrap_or(&empty);
    let sell = sell.unwrap_or(&empty);

    position.force_liqu_price = lenient::parse_f64(&buy.liquidation_price);
    position.buy_amount = lenient::parse_f64(&buy.position);
    position.buy_available = lenient::parse_f64(&buy.avail_position);
    position.buy_price_avg = lenient::parse_f64(&buy.avg_cost);
    position.buy_profit_real = lenient::parse_f64(&buy.realized_pnl);
    position.buy_price_cost = lenient::parse_f64(&buy.settlement_price);

    // short 쪽 값으로 덮어쓴다. long 만 있으면 0 이 된다. (DESIGN.md open question)
    position.force_liqu_price = lenient::parse_f64(&sell.liquidation_price);
    position.sell_amount = lenient::parse_f64(&sell.position);
    position.sell_available = lenient::parse_f64(&sell.avail_position);
    position.sell_price_avg = lenient::parse_f64(&sell.avg_cost);
    position.sell_profit_real = lenient::parse_f64(&sell.realized_pnl);
    position.sell_price_cost = lenient::parse_f64(&sell.settlement_price);

    position
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::okex::types::{SwapAccounts, SwapPosition};

    #[test]
    fn trade_status_is_total() {
        assert_eq!(adapt_trade_status(-1), TradeStatus::Cancelled);
        assert_eq!(adapt_trade_status(0), TradeStatus::Unfinished);
        assert_eq!(adapt_trade_status(1), TradeStatus::PartiallyFilled);
        assert_eq!(adapt_trade_status(2), TradeStatus::Finished);

        for status in [i64::MIN, -100, -2, 3, 4, 6, 42, i64::MAX] {
            assert_eq!(adapt_trade_status(status), TradeStatus::Unfinished, "status {status}");
        }
    }

    #[test]
    fn currency_table() {
        assert_eq!(currency_of_instrument("BTC-USD-SWAP"), Currency::BTC);
        assert_eq!(currency_of_instrument("XRP-USD-SWAP"), Currency::XRP);
        assert_eq!(currency_of_instrument("BTC-USDT-SWAP"), Currency::UNKNOWN);
        assert_eq!(currency_of_instrument(""), Currency::UNKNOWN);
    }

    #[test]
    fn contract_values() {
        assert_eq!(contract_value(CurrencyPair::BTC_USD).unwrap(), 100.0);
        assert_eq!(contract_value(CurrencyPair::ETH_USD).unwrap(), 10.0);
        assert_eq!(contract_value(CurrencyPair::BCH_USD).unwrap(), 10.0);
        assert!(contract_value(CurrencyPair::XRP_USD).is_err());
    }

    #[test]
    fn ticker_parses_strings_and_timestamp() {
        let raw: BaseTickerInfo = serde_json::from_str(
            r#"{
                "instrument_id":"BTC-USD-SWAP","last":"3912.1","high_24h":"3950.5",
                "low_24h":"3870.0","volume_24h":"2213123","best_bid":"3912","best_ask":"3912.2",
                "timestamp":"2019-03-13T10:54:32.316Z"
            }"#,
        )
        .unwrap();

        let ticker = map_ticker(CurrencyPair::BTC_USD, &raw);
        assert_eq!(ticker.pair, CurrencyPair::BTC_USD);
        assert_eq!(ticker.last, 3912.1);
        assert_eq!(ticker.high, 3950.5);
        assert_eq!(ticker.low, 3870.0);
        assert_eq!(ticker.vol, 2213123.0);
        assert_eq!(ticker.date, 1552474472316);
    }

    #[test]
    fn ticker_degrades_to_zero() {
        let raw: BaseTickerInfo =
            serde_json::from_str(r#"{"last":"oops","timestamp":"yesterday"}"#).unwrap();
        let ticker = map_ticker(CurrencyPair::ETH_USD, &raw);
        assert_eq!(ticker.last, 0.0);
        assert_eq!(ticker.high, 0.0);
        assert_eq!(ticker.date, 0);
    }

    #[test]
    fn depth_reverses_asks_only() {
        let raw: SwapInstrumentDepth = serde_json::from_str(
            r#"{
                "asks":[["3915.0","30","0","2"],["3914.0","20","0","1"],["3913.0","10","0","1"]],
                "bids":[["3912.0","5","0","1"],["3911.0","6","0","1"]],
                "timestamp":"2019-03-13T10:54:32.316Z"
            }"#,
        )
        .unwrap();

        let depth = map_depth(CurrencyPair::BTC_USD, BTC_USD_SWAP, &raw);
        let ask_prices: Vec<f64> = depth.ask_list.iter().map(|r| r.price).collect();
        let bid_prices: Vec<f64> = depth.bid_list.iter().map(|r| r.price).collect();

        assert_eq!(ask_prices, vec![3913.0, 3914.0, 3915.0]);
        assert_eq!(depth.ask_list[0].amount, 10.0);
        assert_eq!(bid_prices, vec![3912.0, 3911.0]);
        assert_eq!(depth.contract_type, BTC_USD_SWAP);
        assert_eq!(depth.utime.timestamp_millis(), 1552474472316);
    }

    #[test]
    fn depth_ask_list_is_exact_reverse_for_any_length() {
        for n in 0..12 {
            let asks: Vec<Vec<serde_json::Value>> = (0..n)
                .map(|i| vec![serde_json::json!(format!("{}", 100 - i)), serde_json::json!(i)])
                .collect();
            let raw = SwapInstrumentDepth {
                asks: asks.clone(),
                bids: asks.clone(),
                ..Default::default()
            };

            let depth = map_depth(CurrencyPair::BTC_USD, BTC_USD_SWAP, &raw);
            let expected: Vec<DepthRecord> = asks.iter().rev().map(|l| depth_record(l)).collect();
            let bids: Vec<DepthRecord> = asks.iter().map(|l| depth_record(l)).collect();
            assert_eq!(depth.ask_list, expected);
            assert_eq!(depth.bid_list, bids);
        }
    }

    #[test]
    fn depth_short_levels_default_to_zero() {
        let raw: SwapInstrumentDepth =
            serde_json::from_str(r#"{"asks":[["3913.0"]],"bids":[[]],"timestamp":""}"#).unwrap();
        let depth = map_depth(CurrencyPair::BTC_USD, BTC_USD_SWAP, &raw);
        assert_eq!(depth.ask_list, vec![DepthRecord { price: 3913.0, amount: 0.0 }]);
        assert_eq!(depth.bid_list, vec![DepthRecord { price: 0.0, amount: 0.0 }]);
    }

    #[test]
    fn account_scenario_btc() {
        let raw: Vec<SwapAccountInfo> = serde_json::from_str(
            r#"[{"instrument_id":"BTC-USD-SWAP","equity":"1.5","margin":"0.2","realized_pnl":"0.01","unrealized_pnl":"-0.02","margin_ratio":"3.0"}]"#,
        )
        .unwrap();

        let account = map_account(&raw);
        assert_eq!(account.future_sub_accounts.len(), 1);

        let btc = &account.future_sub_accounts[&Currency::BTC];
        assert_eq!(btc.currency, Currency::BTC);
        assert_eq!(btc.account_rights, 1.5);
        assert_eq!(btc.keep_deposit, 0.2);
        assert_eq!(btc.profit_real, 0.01);
        assert_eq!(btc.profit_unreal, -0.02);
        assert_eq!(btc.risk_rate, 3.0);
    }

    #[test]
    fn account_keeps_unknown_instruments() {
        let raw: SwapAccounts = serde_json::from_str(
            r#"{"info":[
                {"instrument_id":"ETH-USD-SWAP","equity":"10"},
                {"instrument_id":"DOGE-USD-SWAP","equity":"7"}
            ]}"#,
        )
        .unwrap();

        let account = map_account(&raw.info);
        assert_eq!(account.future_sub_accounts.len(), 2);
        assert_eq!(account.future_sub_accounts[&Currency::UNKNOWN].account_rights, 7.0);
        assert_eq!(account.future_sub_accounts[&Currency::ETH].account_rights, 10.0);
    }

    #[test]
    fn account_last_write_wins() {
        let raw: Vec<SwapAccountInfo> = serde_json::from_str(
            r#"[{"instrument_id":"BTC-USD-SWAP","equity":"1"},{"instrument_id":"BTC-USD-SWAP","equity":"2"}]"#,
        )
        .unwrap();
        let account = map_account(&raw);
        assert_eq!(account.future_sub_accounts.len(), 1);
        assert_eq!(account.future_sub_accounts[&Currency::BTC].account_rights, 2.0);
    }

    #[test]
    fn order_is_stamped_with_pair_and_contract() {
        let raw: BaseOrderInfo = serde_json::from_str(
            r#"{
                "order_id":"64-2b-2d2c8b32d-2","client_oid":"","size":"3","price":"3900.0",
                "filled_qty":"1","price_avg":"3899.5","type":"2","status":"1",
                "fee":"-0.000001","timestamp":"2019-03-13T06:43:41.000Z"
            }"#,
        )
        .unwrap();

        let order = map_order(&raw, CurrencyPair::BTC_USD, BTC_USD_SWAP);
        assert_eq!(order.order_id, "64-2b-2d2c8b32d-2");
        assert_eq!(order.currency, CurrencyPair::BTC_USD);
        assert_eq!(order.contract_name, BTC_USD_SWAP);
        assert_eq!(order.amount, 3.0);
        assert_eq!(order.price, 3900.0);
        assert_eq!(order.deal_amount, 1.0);
        assert_eq!(order.avg_price, 3899.5);
        assert_eq!(order.o_type, 2);
        assert_eq!(order.status, TradeStatus::PartiallyFilled);
        assert_eq!(order.fee, -0.000001);
        assert_eq!(order.order_time, 1552459421000);
    }

    fn holdings(json: &str) -> Vec<SwapPositionHolding> {
        let raw: SwapPosition = serde_json::from_str(json).unwrap();
        raw.holding
    }

    #[test]
    fn position_sides_are_matched_by_tag() {
        let rows = holdings(
            r#"{"margin_mode":"crossed","holding":[
                {"side":"short","position":"4","avail_position":"3","avg_cost":"4000","realized_pnl":"0.1","settlement_price":"4001","liquidation_price":"8000"},
                {"side":"long","position":"7","avail_position":"6","avg_cost":"3900","realized_pnl":"0.2","settlement_price":"3901","liquidation_price":"2000"}
            ]}"#,
        );

        let position = map_position(CurrencyPair::BTC_USD, BTC_USD_SWAP, &rows);
        assert_eq!(position.symbol, CurrencyPair::BTC_USD);
        assert_eq!(position.contract_type, BTC_USD_SWAP);

        assert_eq!(position.buy_amount, 7.0);
        assert_eq!(position.buy_available, 6.0);
        assert_eq!(position.buy_price_avg, 3900.0);
        assert_eq!(position.buy_profit_real, 0.2);
        assert_eq!(position.buy_price_cost, 3901.0);

        assert_eq!(position.sell_amount, 4.0);
        assert_eq!(position.sell_available, 3.0);
        assert_eq!(position.sell_price_avg, 4000.0);
        assert_eq!(position.sell_profit_real, 0.1);
        assert_eq!(position.sell_price_cost, 4001.0);

        assert_eq!(position.force_liqu_price, 8000.0);
    }

    #[test]
    fn long_only_position_leaves_short_side_zero() {
        let rows = holdings(
            r#"{"holding":[{"side":"long","position":"2","avail_position":"2","avg_cost":"3900","liquidation_price":"2000"}]}"#,
        );

        let position = map_position(CurrencyPair::BTC_USD, BTC_USD_SWAP, &rows);
        assert_eq!(position.buy_amount, 2.0);
        assert_eq!(position.sell_amount, 0.0);
        assert_eq!(position.sell_price_avg, 0.0);
        // short 행이 없으므로 덮어쓴 강제청산가는 0
        assert_eq!(position.force_liqu_price, 0.0);
    }

    #[test]
    fn short_only_position() {
        let rows = holdings(
            r#"{"holding":[{"side":"short","position":"5","liquidation_price":"9000"}]}"#,
        );
        let position = map_position(CurrencyPair::ETH_USD, ETH_USD_SWAP, &rows);
        assert_eq!(position.buy_amount, 0.0);
        assert_eq!(position.sell_amount, 5.0);
        assert_eq!(position.force_liqu_price, 9000.0);
    }

    #[test]
    fn empty_holdings_yield_zero_position() {
        let position = map_position(CurrencyPair::BTC_USD, BTC_USD_SWAP, &[]);
        assert_eq!(position, FuturePosition::empty(CurrencyPair::BTC_USD, BTC_USD_SWAP));
    }

    #[test]
    fn unknown_side_is_ignored() {
        let rows = holdings(r#"{"holding":[{"side":"both","position":"5"}]}"#);
        let position = map_position(CurrencyPair::BTC_USD, BTC_USD_SWAP, &rows);
        assert_eq!(position.buy_amount, 0.0);
        assert_eq!(position.sell_amount, 0.0);
    }
}
