use crate::core::{
    errors::ExchangeError,
    types::{Balance, Kline, Market, OrderBook, OrderRequest, OrderResponse, Ticker, Trade},
};
use async_trait::async_trait;

#[async_trait]
pub trait MarketDataSource {
    /// Get all available markets/trading pairs
    async fn get_markets(&self) -> Result<Vec<Market>, ExchangeError>;

    /// Get the 24h ticker of a single pair
    async fn get_ticker(&self, symbol: &str) -> Result<Ticker, ExchangeError>;

    /// Get the current order book of a pair
    async fn get_order_book(
        &self,
        symbol: &str,
        depth: Option<u32>,
    ) -> Result<OrderBook, ExchangeError>;

    /// Get the most recent public trades of a pair
    async fn get_recent_trades(
        &self,
        symbol: &str,
        limit: Option<u32>,
    ) -> Result<Vec<Trade>, ExchangeError>;

    /// Get daily candles of a pair
    async fn get_klines(&self, symbol: &str, limit: Option<u32>)
        -> Result<Vec<Kline>, ExchangeError>;
}

#[async_trait]
pub trait OrderPlacer {
    /// Place a new order
    async fn place_order(&self, order: OrderRequest) -> Result<OrderResponse, ExchangeError>;

    /// Cancel an order, returning the exchange's success flag
    async fn cancel_order(&self, order_id: u64) -> Result<bool, ExchangeError>;
}

#[async_trait]
pub trait AccountInfo {
    async fn get_account_balance(&self) -> Result<Vec<Balance>, ExchangeError>;
}

#[async_trait]
pub trait ExchangeConnector: MarketDataSource + OrderPlacer + AccountInfo {}
