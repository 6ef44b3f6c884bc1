use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ExchangeError;

#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Currency {
    BTC,
    LTC,
    ETH,
    ETC,
    BCH,
    BSV,
    EOS,
    XRP,
    USD,
    /// 매핑 테이블에 없는 상품. 버리지 않고 이 버킷에 모은다.
    UNKNOWN,
}

impl Currency {
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::BTC => "BTC",
            Currency::LTC => "LTC",
            Currency::ETH => "ETH",
            Currency::ETC => "ETC",
            Currency::BCH => "BCH",
            Currency::BSV => "BSV",
            Currency::EOS => "EOS",
            Currency::XRP => "XRP",
            Currency::USD => "USD",
            Currency::UNKNOWN => "UNKNOWN",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Currency {
    type Err = ExchangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let currency = match s.trim().to_uppercase().as_str() {
            "BTC" => Currency::BTC,
            "LTC" => Currency::LTC,
            "ETH" => Currency::ETH,
            "ETC" => Currency::ETC,
            "BCH" => Currency::BCH,
            "BSV" => Currency::BSV,
            "EOS" => Currency::EOS,
            "XRP" => Currency::XRP,
            "USD" => Currency::USD,
            other => return Err(ExchangeError::Other(format!("unknown currency: {other}"))),
        };
        Ok(currency)
    }
}

/// 거래쌍 (예: BTC_USD)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CurrencyPair {
    pub base: Currency,
    pub quote: Currency,
}

impl CurrencyPair {
    pub const BTC_USD: CurrencyPair = CurrencyPair::new(Currency::BTC, Currency::USD);
    pub const LTC_USD: CurrencyPair = CurrencyPair::new(Currency::LTC, Currency::USD);
    pub const ETH_USD: CurrencyPair = CurrencyPair::new(Currency::ETH, Currency::USD);
    pub const ETC_USD: CurrencyPair = CurrencyPair::new(Currency::ETC, Currency::USD);
    pub const BCH_USD: CurrencyPair = CurrencyPair::new(Currency::BCH, Currency::USD);
    pub const BSV_USD: CurrencyPair = CurrencyPair::new(Currency::BSV, Currency::USD);
    pub const EOS_USD: CurrencyPair = CurrencyPair::new(Currency::EOS, Currency::USD);
    pub const XRP_USD: CurrencyPair = CurrencyPair::new(Currency::XRP, Currency::USD);

    pub const fn new(base: Currency, quote: Currency) -> Self {
        Self { base, quote }
    }
}

impl fmt::Display for CurrencyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.base, self.quote)
    }
}

impl FromStr for CurrencyPair {
    type Err = ExchangeError;

    /// "BTC_USD", "BTC-USD", "btc_usd" 모두 허용
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (base, quote) = s
            .split_once(['_', '-'])
            .ok_or_else(|| ExchangeError::Other(format!("invalid currency pair: {s}")))?;
        Ok(Self::new(base.parse()?, quote.parse()?))
    }
}
