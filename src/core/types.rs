use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TypesError {
    #[error("Invalid symbol: {0}")]
    InvalidSymbol(String),
    #[error("Invalid decimal: {0}")]
    InvalidDecimal(#[from] rust_decimal::Error),
    #[error("Parsing error: {0}")]
    ParseError(String),
}

/// Quote currencies recognised when splitting a concatenated pair name
const KNOWN_QUOTES: [&str; 8] = ["USDT", "USDC", "TRY", "EUR", "GBP", "BTC", "ETH", "USD"];

/// Trading pair, e.g. BTC/TRY
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Symbol {
    pub base: String,
    pub quote: String,
}

impl Symbol {
    /// Create a new symbol with validation
    pub fn new(base: impl Into<String>, quote: impl Into<String>) -> Result<Self, TypesError> {
        let base = base.into().to_uppercase();
        let quote = quote.into().to_uppercase();

        if base.is_empty() || quote.is_empty() {
            return Err(TypesError::InvalidSymbol(
                "Base and quote assets cannot be empty".to_string(),
            ));
        }

        Ok(Self { base, quote })
    }

    /// Parse `BTC_TRY`, `BTC-TRY` or `BTCTRY`
    pub fn from_string(symbol: &str) -> Result<Self, TypesError> {
        let upper = symbol.trim().to_uppercase();

        if let Some((base, quote)) = upper.split_once(['_', '-', '/']) {
            return Self::new(base, quote);
        }

        KNOWN_QUOTES
            .iter()
            .find_map(|quote| {
                upper
                    .strip_suffix(quote)
                    .filter(|base| !base.is_empty())
                    .map(|base| (base.to_string(), (*quote).to_string()))
            })
            .map_or_else(
                || {
                    Err(TypesError::InvalidSymbol(format!(
                        "Unable to parse symbol '{}'",
                        symbol
                    )))
                },
                |(base, quote)| Self::new(base, quote),
            )
    }

    /// Concatenated exchange name, e.g. `BTCTRY`
    pub fn pair(&self) -> String {
        format!("{}{}", self.base, self.quote)
    }

    /// Underscore-separated exchange name, e.g. `BTC_TRY`
    pub fn normalized(&self) -> String {
        format!("{}_{}", self.base, self.quote)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.base, self.quote)
    }
}

/// Type-safe price representation
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(#[serde(with = "rust_decimal::serde::str")] pub Decimal);

impl Price {
    pub const fn new(value: Decimal) -> Self {
        Self(value)
    }

    pub const fn value(&self) -> Decimal {
        self.0
    }
}

impl FromStr for Price {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.trim().parse()?))
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Type-safe quantity representation
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Quantity(#[serde(with = "rust_decimal::serde::str")] pub Decimal);

impl Quantity {
    pub const fn new(value: Decimal) -> Self {
        Self(value)
    }

    pub const fn value(&self) -> Decimal {
        self.0
    }
}

impl FromStr for Quantity {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.trim().parse()?))
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Type-safe volume representation
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Volume(#[serde(with = "rust_decimal::serde::str")] pub Decimal);

impl Volume {
    pub const fn new(value: Decimal) -> Self {
        Self(value)
    }

    pub const fn value(&self) -> Decimal {
        self.0
    }
}

impl fmt::Display for Volume {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Market {
    pub symbol: Symbol,
    pub status: String,
    pub base_precision: u32,
    pub quote_precision: u32,
    pub has_fraction: bool,
    pub order_methods: Vec<String>,
    pub min_qty: Option<Quantity>,
    pub max_qty: Option<Quantity>,
    pub min_price: Option<Price>,
    pub max_price: Option<Price>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderSide {
    Buy,
    Sell,
}

impl OrderSide {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Buy => "buy",
            Self::Sell => "sell",
        }
    }
}

impl FromStr for OrderSide {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "buy" => Ok(Self::Buy),
            "sell" => Ok(Self::Sell),
            other => Err(TypesError::ParseError(format!("unknown order side '{}'", other))),
        }
    }
}

impl fmt::Display for OrderSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderType {
    Market,
    Limit,
    StopMarket,
    StopLimit,
}

impl OrderType {
    /// Wire name of the order method
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Market => "market",
            Self::Limit => "limit",
            Self::StopMarket => "stopMarket",
            Self::StopLimit => "stopLimit",
        }
    }
}

impl FromStr for OrderType {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "market" => Ok(Self::Market),
            "limit" => Ok(Self::Limit),
            "stopmarket" | "stop_market" => Ok(Self::StopMarket),
            "stoplimit" | "stop_limit" => Ok(Self::StopLimit),
            other => Err(TypesError::ParseError(format!("unknown order type '{}'", other))),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderRequest {
    pub symbol: Symbol,
    pub side: OrderSide,
    pub order_type: OrderType,
    pub quantity: Quantity,
    pub price: Option<Price>,
    pub stop_price: Option<Price>,
    pub client_order_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderResponse {
    pub order_id: String,
    pub client_order_id: String,
    pub symbol: Symbol,
    pub side: OrderSide,
    pub order_type: OrderType,
    pub quantity: Quantity,
    pub price: Option<Price>,
    pub stop_price: Option<Price>,
    pub timestamp: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ticker {
    pub symbol: Symbol,
    pub price: Price,
    pub bid: Price,
    pub ask: Price,
    pub open_price: Price,
    pub high_price: Price,
    pub low_price: Price,
    pub average_price: Price,
    pub price_change: Decimal,
    pub price_change_percent: Decimal,
    pub volume: Volume,
    pub timestamp: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderBookEntry {
    pub price: Price,
    pub quantity: Quantity,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderBook {
    pub symbol: Symbol,
    pub bids: Vec<OrderBookEntry>,
    pub asks: Vec<OrderBookEntry>,
    pub timestamp: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trade {
    pub symbol: Symbol,
    pub id: String,
    pub price: Price,
    pub quantity: Quantity,
    pub time: i64,
    pub side: Option<OrderSide>,
}

/// Daily OHLC candle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Kline {
    pub symbol: Symbol,
    pub open_time: i64,
    pub open_price: Price,
    pub high_price: Price,
    pub low_price: Price,
    pub close_price: Price,
    pub average_price: Price,
    pub volume: Volume,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Balance {
    pub asset: String,
    pub free: Quantity,
    pub locked: Quantity,
    pub total: Quantity,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbol_parsing_is_separator_agnostic() {
        let underscored = Symbol::from_string("btc_try").unwrap();
        let concatenated = Symbol::from_string("BTCTRY").unwrap();
        let dashed = Symbol::from_string("BTC-TRY").unwrap();

        assert_eq!(underscored, concatenated);
        assert_eq!(dashed, concatenated);
        assert_eq!(concatenated.pair(), "BTCTRY");
        assert_eq!(concatenated.normalized(), "BTC_TRY");
        assert_eq!(concatenated.to_string(), "BTC/TRY");
    }

    #[test]
    fn test_symbol_parsing_prefers_longest_quote() {
        let symbol = Symbol::from_string("XRPUSDT").unwrap();
        assert_eq!(symbol.base, "XRP");
        assert_eq!(symbol.quote, "USDT");
    }

    #[test]
    fn test_symbol_rejects_unknown_layout() {
        assert!(Symbol::from_string("TRY").is_err());
        assert!(Symbol::from_string("FOOBAR").is_err());
        assert!(Symbol::from_string("_TRY").is_err());
    }

    #[test]
    fn test_order_side_and_type_parsing() {
        assert_eq!("SELL".parse::<OrderSide>().unwrap(), OrderSide::Sell);
        assert_eq!("stopLimit".parse::<OrderType>().unwrap(), OrderType::StopLimit);
        assert_eq!(OrderType::StopMarket.as_str(), "stopMarket");
        assert!("hold".parse::<OrderSide>().is_err());
    }
}
