use super::types as btcturk_types;
use crate::core::errors::ExchangeError;
use crate::core::types::{
    Balance, Kline, Market, OrderBook, OrderBookEntry, OrderResponse, OrderSide, OrderType, Price,
    Quantity, Symbol, Ticker, Trade, Volume,
};
use rust_decimal::Decimal;
use std::str::FromStr;

fn symbol_from(pair: &str) -> Result<Symbol, ExchangeError> {
    Symbol::from_string(pair).map_err(|e| ExchangeError::InvalidResponseFormat(e.to_string()))
}

fn optional_decimal(value: Option<&String>) -> Option<Decimal> {
    value.and_then(|raw| Decimal::from_str(raw.trim()).ok())
}

/// Convert a BtcTurk pair listing to core market type
pub fn convert_btcturk_market(
    info: &btcturk_types::BtcturkSymbolInfo,
) -> Result<Market, ExchangeError> {
    let symbol = Symbol::new(&info.numerator, &info.denominator)
        .map_err(|e| ExchangeError::InvalidResponseFormat(e.to_string()))?;

    let price_filter = info
        .filters
        .iter()
        .find(|filter| filter.filter_type == "PRICE_FILTER");

    Ok(Market {
        symbol,
        status: info.status.clone(),
        base_precision: info.numerator_scale,
        quote_precision: info.denominator_scale,
        has_fraction: info.has_fraction,
        order_methods: info.order_methods.clone(),
        min_qty: price_filter
            .and_then(|f| optional_decimal(f.min_amount.as_ref()))
            .map(Quantity::new),
        max_qty: price_filter
            .and_then(|f| optional_decimal(f.max_amount.as_ref()))
            .map(Quantity::new),
        min_price: price_filter
            .and_then(|f| optional_decimal(f.min_price.as_ref()))
            .map(Price::new),
        max_price: price_filter
            .and_then(|f| optional_decimal(f.max_price.as_ref()))
            .map(Price::new),
    })
}

/// Convert a BtcTurk ticker to core ticker type
pub fn convert_btcturk_ticker(
    ticker: btcturk_types::BtcturkTicker,
) -> Result<Ticker, ExchangeError> {
    let symbol = Symbol::new(&ticker.numerator_symbol, &ticker.denominator_symbol)
        .or_else(|_| Symbol::from_string(&ticker.pair_normalized))
        .map_err(|e| ExchangeError::InvalidResponseFormat(e.to_string()))?;

    Ok(Ticker {
        symbol,
        price: Price::new(ticker.last),
        bid: Price::new(ticker.bid),
        ask: Price::new(ticker.ask),
        open_price: Price::new(ticker.open),
        high_price: Price::new(ticker.high),
        low_price: Price::new(ticker.low),
        average_price: Price::new(ticker.average),
        price_change: ticker.daily,
        price_change_percent: ticker.daily_percent,
        volume: Volume::new(ticker.volume),
        timestamp: ticker.timestamp,
    })
}

/// Convert a BtcTurk order book to core order book type
pub fn convert_btcturk_order_book(
    book: btcturk_types::BtcturkOrderBook,
    pair: &str,
) -> Result<OrderBook, ExchangeError> {
    let level = |[price, quantity]: [Decimal; 2]| OrderBookEntry {
        price: Price::new(price),
        quantity: Quantity::new(quantity),
    };

    Ok(OrderBook {
        symbol: symbol_from(pair)?,
        bids: book.bids.into_iter().map(level).collect(),
        asks: book.asks.into_iter().map(level).collect(),
        timestamp: book.timestamp as i64,
    })
}

/// Convert a BtcTurk public trade to core trade type
pub fn convert_btcturk_trade(trade: btcturk_types::BtcturkTrade) -> Result<Trade, ExchangeError> {
    let symbol = Symbol::new(&trade.numerator, &trade.denominator)
        .or_else(|_| Symbol::from_string(&trade.pair_normalized))
        .map_err(|e| ExchangeError::InvalidResponseFormat(e.to_string()))?;

    Ok(Trade {
        symbol,
        id: trade.tid,
        price: Price::new(trade.price),
        quantity: Quantity::new(trade.amount),
        time: trade.date,
        side: trade.side.as_deref().and_then(|side| side.parse::<OrderSide>().ok()),
    })
}

/// Convert a BtcTurk daily candle to core kline type
pub fn convert_btcturk_ohlc(candle: btcturk_types::BtcturkOhlc) -> Result<Kline, ExchangeError> {
    Ok(Kline {
        symbol: symbol_from(&candle.pair)?,
        open_time: candle.time,
        open_price: Price::new(candle.open),
        high_price: Price::new(candle.high),
        low_price: Price::new(candle.low),
        close_price: Price::new(candle.close),
        average_price: Price::new(candle.average),
        volume: Volume::new(candle.volume),
    })
}

pub fn convert_btcturk_balance(balance: btcturk_types::BtcturkBalance) -> Balance {
    Balance {
        asset: balance.asset.to_uppercase(),
        free: Quantity::new(balance.free),
        locked: Quantity::new(balance.locked),
        total: Quantity::new(balance.balance),
    }
}

/// Convert an order submission result to core order response type
pub fn convert_btcturk_order_response(
    response: btcturk_types::BtcturkOrderResponse,
    client_order_id: String,
) -> Result<OrderResponse, ExchangeError> {
    let side = response
        .order_type
        .parse::<OrderSide>()
        .map_err(|e| ExchangeError::InvalidResponseFormat(e.to_string()))?;
    let order_type = response
        .method
        .parse::<OrderType>()
        .map_err(|e| ExchangeError::InvalidResponseFormat(e.to_string()))?;

    Ok(OrderResponse {
        order_id: response.id.to_string(),
        client_order_id: response.new_order_client_id.unwrap_or(client_order_id),
        symbol: symbol_from(&response.pair_symbol)?,
        side,
        order_type,
        quantity: Quantity::new(response.quantity),
        price: response.price.map(Price::new),
        stop_price: response.stop_price.map(Price::new),
        timestamp: response.datetime,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exchanges::btcturk::types::{BtcturkOrderResponse, BtcturkTrade};

    #[test]
    fn test_trade_conversion_keeps_side_and_symbol() {
        let trade = BtcturkTrade {
            pair: "BTCTRY".to_string(),
            pair_normalized: "BTC_TRY".to_string(),
            numerator: "BTC".to_string(),
            denominator: "TRY".to_string(),
            date: 1_700_000_000_000,
            tid: "638".to_string(),
            price: Decimal::new(1_250_000, 0),
            amount: Decimal::new(5, 1),
            side: Some("sell".to_string()),
        };

        let converted = convert_btcturk_trade(trade).unwrap();
        assert_eq!(converted.symbol.pair(), "BTCTRY");
        assert_eq!(converted.side, Some(OrderSide::Sell));
        assert_eq!(converted.quantity, Quantity::new(Decimal::new(5, 1)));
    }

    #[test]
    fn test_order_response_conversion() {
        let response = BtcturkOrderResponse {
            id: 9_876_543,
            datetime: 1_700_000_000_000,
            order_type: "sell".to_string(),
            method: "stopLimit".to_string(),
            price: Some(Decimal::new(125_000_000, 2)),
            stop_price: Some(Decimal::new(124_000_000, 2)),
            quantity: Decimal::new(1, 2),
            pair_symbol: "BTC_TRY".to_string(),
            pair_symbol_normalized: Some("BTC_TRY".to_string()),
            new_order_client_id: None,
        };

        let converted = convert_btcturk_order_response(response, "cid-1".to_string()).unwrap();
        assert_eq!(converted.order_id, "9876543");
        assert_eq!(converted.client_order_id, "cid-1");
        assert_eq!(converted.order_type, OrderType::StopLimit);
        assert_eq!(converted.side, OrderSide::Sell);
        assert_eq!(converted.symbol.normalized(), "BTC_TRY");
    }
}
