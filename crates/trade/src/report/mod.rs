//! 조회 결과를 터미널 출력용 문자열로 만든다.

use interface::{
    Depth, FutureAccount, FutureOrder, FuturePosition, Ticker, UnfinishedOrders,
};

pub fn format_ticker(ticker: &Ticker) -> String {
    format!(
        "[{}]\n  Last: {:.4}\n  High 24h: {:.4}\n  Low 24h: {:.4}\n  Vol 24h: {:.4}\n  Date: {}\n",
        ticker.pair, ticker.last, ticker.high, ticker.low, ticker.vol, ticker.date
    )
}

pub fn format_depth(depth: &Depth) -> String {
    let mut out = format!("[{} {}] {}\n", depth.pair, depth.contract_type, depth.utime);
    // 매도호가는 나쁜 가격부터 찍어서 최우선 호가가 bid 바로 위에 오게 한다
    for ask in depth.ask_list.iter().rev() {
        out.push_str(&format!("  ask {:>14.4} {:>14.4}\n", ask.price, ask.amount));
    }
    for bid in &depth.bid_list {
        out.push_str(&format!("  bid {:>14.4} {:>14.4}\n", bid.price, bid.amount));
    }
    if let (Some(ask), Some(bid)) = (depth.ask_list.first(), depth.bid_list.first()) {
        out.push_str(&format!("  Spread: {:.4}\n", ask.price - bid.price));
    }
    out
}

pub fn format_account(account: &FutureAccount) -> String {
    let mut subs: Vec<_> = account.future_sub_accounts.values().collect();
    subs.sort_by_key(|sub| sub.currency);

    subs.into_iter()
        .map(|sub| {
            format!(
                "[{}]\n  Equity: {:.8}\n  Margin: {:.8}\n  Realized PnL: {:.8}\n  Unrealized PnL: {:.8}\n  Margin Ratio: {:.4}\n",
                sub.currency,
                sub.account_rights,
                sub.keep_deposit,
                sub.profit_real,
                sub.profit_unreal,
                sub.risk_rate
            )
        })
        .collect()
}

pub fn format_order(order: &FutureOrder) -> String {
    format!(
        "{} {} {} type={} status={:?} size={} filled={} price={} avg={} fee={} time={}\n",
        order.order_id,
        order.currency,
        order.contract_name,
        order.o_type,
        order.status,
        order.amount,
        order.deal_amount,
        order.price,
        order.avg_price,
        order.fee,
        order.order_time
    )
}

pub fn format_unfinished_orders(result: &UnfinishedOrders) -> String {
    let mut out: String = result.orders.iter().map(format_order).collect();
    out.push_str(&format!("{} orders\n", result.orders.len()));
    if let Some(diagnostic) = &result.diagnostic {
        out.push_str(&format!("partially filled orders missing: {}\n", diagnostic));
    }
    out
}

pub fn format_position(position: &FuturePosition) -> String {
    format!(
        "[{} {}]\n  Force Liquidation: {:.4}\n  Long: amount={} available={} avg={} cost={} realized={}\n  Short: amount={} available={} avg={} cost={} realized={}\n",
        position.symbol,
        position.contract_type,
        position.force_liqu_price,
        position.buy_amount,
        position.buy_available,
        position.buy_price_avg,
        position.buy_price_cost,
        position.buy_profit_real,
        position.sell_amount,
        position.sell_available,
        position.sell_price_avg,
        position.sell_price_cost,
        position.sell_profit_real
    )
}
