use crate::core::errors::ExchangeError;
use crate::core::kernel::RestClient;
use crate::core::traits::MarketDataSource;
use crate::core::types::{Kline, Market, OrderBook, Ticker, Trade};
use crate::exchanges::btcturk::constants::{
    DEFAULT_OHLC_LAST, DEFAULT_ORDER_BOOK_LIMIT, DEFAULT_TRADES_LAST,
};
use crate::exchanges::btcturk::types::{BtcturkSymbolInfo, ServerTime};
use crate::exchanges::btcturk::{conversions, rest::BtcturkRest};
use async_trait::async_trait;
use tracing::{instrument, warn};

/// BtcTurk public market data
#[derive(Debug)]
pub struct MarketData<R: RestClient> {
    rest: BtcturkRest<R>,
}

impl<R: RestClient + Clone> MarketData<R> {
    pub fn new(rest: &BtcturkRest<R>) -> Self {
        Self { rest: rest.clone() }
    }
}

impl<R: RestClient> MarketData<R> {
    /// Pair listing, optionally restricted to the given pair names
    ///
    /// Names match either spelling (`BTCTRY` or `BTC_TRY`), ignoring case.
    #[instrument(skip(self), fields(exchange = "btcturk"))]
    pub async fn get_exchange_info(
        &self,
        symbols: Option<&[&str]>,
    ) -> Result<Vec<BtcturkSymbolInfo>, ExchangeError> {
        let listing = self.rest.get_exchange_info().await?.symbols;

        let Some(wanted) = symbols else {
            return Ok(listing);
        };
        let wanted: Vec<String> = wanted.iter().map(|s| s.to_uppercase()).collect();

        Ok(listing
            .into_iter()
            .filter(|info| {
                wanted.contains(&info.name.to_uppercase())
                    || wanted.contains(&info.name_normalized.to_uppercase())
            })
            .collect())
    }

    pub async fn get_server_time(&self) -> Result<ServerTime, ExchangeError> {
        self.rest.get_server_time().await
    }

    /// Tickers of one pair, or of every pair
    #[instrument(skip(self), fields(exchange = "btcturk"))]
    pub async fn get_tickers(&self, pair: Option<&str>) -> Result<Vec<Ticker>, ExchangeError> {
        self.rest
            .get_tickers(pair)
            .await?
            .into_iter()
            .map(conversions::convert_btcturk_ticker)
            .collect()
    }

    /// Daily candles, the last 10 days unless `last` says otherwise
    #[instrument(skip(self), fields(exchange = "btcturk"))]
    pub async fn get_ohlc(
        &self,
        pair: &str,
        last: Option<u32>,
    ) -> Result<Vec<Kline>, ExchangeError> {
        self.rest
            .get_ohlc(pair, last.unwrap_or(DEFAULT_OHLC_LAST))
            .await?
            .into_iter()
            .map(conversions::convert_btcturk_ohlc)
            .collect()
    }
}

#[async_trait]
impl<R: RestClient> MarketDataSource for MarketData<R> {
    async fn get_markets(&self) -> Result<Vec<Market>, ExchangeError> {
        let listing = self.get_exchange_info(None).await?;

        let mut markets = Vec::with_capacity(listing.len());
        for info in &listing {
            match conversions::convert_btcturk_market(info) {
                Ok(market) => markets.push(market),
                Err(e) => warn!(pair = %info.name, error = %e, "Skipping unparseable BtcTurk pair"),
            }
        }

        Ok(markets)
    }

    async fn get_ticker(&self, symbol: &str) -> Result<Ticker, ExchangeError> {
        self.get_tickers(Some(symbol))
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| {
                ExchangeError::InvalidResponseFormat(format!("No ticker returned for {}", symbol))
            })
    }

    #[instrument(skip(self), fields(exchange = "btcturk"))]
    async fn get_order_book(
        &self,
        symbol: &str,
        depth: Option<u32>,
    ) -> Result<OrderBook, ExchangeError> {
        let book = self
            .rest
            .get_order_book(symbol, depth.unwrap_or(DEFAULT_ORDER_BOOK_LIMIT))
            .await?;
        conversions::convert_btcturk_order_book(book, symbol)
    }

    #[instrument(skip(self), fields(exchange = "btcturk"))]
    async fn get_recent_trades(
        &self,
        symbol: &str,
        limit: Option<u32>,
    ) -> Result<Vec<Trade>, ExchangeError> {
        self.rest
            .get_trades(symbol, limit.unwrap_or(DEFAULT_TRADES_LAST))
            .await?
            .into_iter()
            .map(conversions::convert_btcturk_trade)
            .collect()
    }

    async fn get_klines(
        &self,
        symbol: &str,
        limit: Option<u32>,
    ) -> Result<Vec<Kline>, ExchangeError> {
        self.get_ohlc(symbol, limit).await
    }
}
