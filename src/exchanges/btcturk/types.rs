use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Payload of `server/exchangeinfo`
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct BtcturkExchangeInfo {
    pub time_zone: Option<String>,
    pub server_time: Option<i64>,
    pub symbols: Vec<BtcturkSymbolInfo>,
}

/// One tradable pair in the exchange info listing
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct BtcturkSymbolInfo {
    pub id: Option<u64>,
    pub name: String,            // e.g. BTCTRY
    pub name_normalized: String, // e.g. BTC_TRY
    pub status: String,
    pub numerator: String,
    pub denominator: String,
    pub numerator_scale: u32,   // amount scale
    pub denominator_scale: u32, // price scale
    pub has_fraction: bool,
    #[serde(default)]
    pub filters: Vec<BtcturkSymbolFilter>,
    #[serde(default)]
    pub order_methods: Vec<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct BtcturkSymbolFilter {
    pub filter_type: String, // PRICE_FILTER, ...
    pub min_price: Option<String>,
    pub max_price: Option<String>,
    pub tick_size: Option<String>,
    pub min_exchange_value: Option<String>,
    pub min_amount: Option<String>,
    pub max_amount: Option<String>,
}

/// `server/time` is the one endpoint whose body is not wrapped in `data`
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct ServerTime {
    #[serde(rename = "serverTime")]
    pub server_time: i64,
    #[serde(rename = "serverTime2", default)]
    pub server_time_2: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct BtcturkTicker {
    #[serde(alias = "pairSymbol")]
    pub pair: String,
    #[serde(alias = "pairSymbolNormalized")]
    pub pair_normalized: String,
    pub timestamp: i64,
    pub last: Decimal,
    pub high: Decimal,
    pub low: Decimal,
    pub bid: Decimal,
    pub ask: Decimal,
    pub open: Decimal,
    pub volume: Decimal,
    pub average: Decimal,
    pub daily: Decimal,         // 24h price change
    pub daily_percent: Decimal, // 24h price change percent
    pub denominator_symbol: String,
    pub numerator_symbol: String,
}

/// Daily OHLC candle
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct BtcturkOhlc {
    #[serde(alias = "pairSymbol")]
    pub pair: String,
    pub time: i64,
    pub open: Decimal,
    pub high: Decimal,
    pub low: Decimal,
    pub close: Decimal,
    pub volume: Decimal,
    pub average: Decimal,
    pub daily_change_amount: Option<Decimal>,
    pub daily_change_percentage: Option<Decimal>,
}

/// Order book levels arrive as `[price, amount]` pairs
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct BtcturkOrderBook {
    pub timestamp: f64,
    pub bids: Vec<[Decimal; 2]>,
    pub asks: Vec<[Decimal; 2]>,
}

/// Public trade
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct BtcturkTrade {
    pub pair: String,
    pub pair_normalized: String,
    pub numerator: String,
    pub denominator: String,
    pub date: i64,
    pub tid: String,
    pub price: Decimal,
    pub amount: Decimal,
    pub side: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct BtcturkBalance {
    pub asset: String,
    #[serde(rename = "assetname", alias = "assetName")]
    pub asset_name: String,
    pub balance: Decimal,
    pub locked: Decimal,
    pub free: Decimal,
    pub order_fund: Option<Decimal>,
    pub request_fund: Option<Decimal>,
    pub precision: Option<u32>,
}

/// Executed trade from the user's trade history
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct UserTrade {
    pub id: u64,
    pub price: Decimal,
    pub numerator_symbol: String,
    pub denominator_symbol: String,
    pub order_type: String, // buy, sell
    pub timestamp: i64,
    pub amount: Decimal, // negative for sells
    pub fee: Decimal,
    pub tax: Decimal,
}

/// Crypto or fiat deposit/withdrawal record
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: u64,
    pub balance_type: String, // deposit, withdrawal
    pub currency_symbol: String,
    pub timestamp: i64,
    pub funds: Decimal,
    pub order_fund: Option<Decimal>,
    pub fee: Decimal,
    pub tax: Decimal,
}

/// Resting order, as listed by `openOrders` and `allOrders`
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct OpenOrder {
    pub id: u64,
    pub price: Decimal,
    pub amount: Decimal,
    pub quantity: Option<Decimal>,
    pub stop_price: Option<Decimal>,
    #[serde(alias = "pairsymbol")]
    pub pair_symbol: String,
    pub pair_symbol_normalized: String,
    #[serde(rename = "type")]
    pub order_type: String, // buy, sell
    pub method: String, // limit, stoplimit, ...
    pub order_client_id: Option<String>,
    pub time: i64,
    pub update_time: i64,
    pub status: String, // Untouched, Partial, ...
    pub left_amount: Option<Decimal>,
}

/// Open orders split by book side
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct OpenOrders {
    #[serde(default)]
    pub asks: Vec<OpenOrder>,
    #[serde(default)]
    pub bids: Vec<OpenOrder>,
}

/// Body of `POST order`
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BtcturkOrderRequest {
    pub quantity: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop_price: Option<String>,
    pub new_order_client_id: String,
    pub order_method: String, // market, limit, stopMarket, stopLimit
    pub order_type: String,   // buy, sell
    pub pair_symbol: String,
}

/// Payload returned for a submitted order
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct BtcturkOrderResponse {
    pub id: u64,
    pub datetime: i64,
    #[serde(rename = "type")]
    pub order_type: String,
    pub method: String,
    pub price: Option<Decimal>,
    pub stop_price: Option<Decimal>,
    pub quantity: Decimal,
    pub pair_symbol: String,
    pub pair_symbol_normalized: Option<String>,
    pub new_order_client_id: Option<String>,
}
