use crate::core::errors::ExchangeError;
use crate::core::kernel::RestClient;
use crate::core::traits::{AccountInfo, ExchangeConnector, MarketDataSource, OrderPlacer};
use crate::core::types::{
    Balance, Kline, Market, OrderBook, OrderRequest, OrderResponse, Ticker, Trade,
};
use crate::exchanges::btcturk::precision::PrecisionTable;
use crate::exchanges::btcturk::rest::BtcturkRest;
use crate::exchanges::btcturk::signer::BtcturkSigner;
use async_trait::async_trait;
use std::sync::Arc;

pub mod account;
pub mod market_data;
pub mod trading;

pub use account::{Account, HistoryQuery};
pub use market_data::MarketData;
pub use trading::{AllOrdersQuery, StopOrderMethod, Trading};

/// BtcTurk connector that composes all sub-trait implementations
///
/// The sub-components share one dispatcher, so authenticating through the
/// connector unlocks the private endpoints of all of them.
#[derive(Debug)]
pub struct BtcturkConnector<R: RestClient> {
    pub market: MarketData<R>,
    pub trading: Trading<R>,
    pub account: Account<R>,
    rest: BtcturkRest<R>,
}

impl<R: RestClient + Clone> BtcturkConnector<R> {
    /// Create a connector over an existing transport
    pub fn new(rest: R, signer: Option<Arc<BtcturkSigner>>, precision: PrecisionTable) -> Self {
        let rest = BtcturkRest::new(rest, signer);
        let precision = Arc::new(precision);

        Self {
            market: MarketData::new(&rest),
            trading: Trading::new(&rest, precision),
            account: Account::new(&rest),
            rest,
        }
    }
}

impl<R: RestClient> BtcturkConnector<R> {
    /// Verify the credentials with a signed balances call
    pub async fn authenticate(&self) -> Result<(), ExchangeError> {
        self.rest.authenticate().await
    }

    pub fn is_authenticated(&self) -> bool {
        self.rest.is_authenticated()
    }

    pub fn has_credentials(&self) -> bool {
        self.rest.has_credentials()
    }

    pub fn precision(&self) -> &PrecisionTable {
        self.trading.precision()
    }

    /// Underlying dispatcher, for endpoints without a typed wrapper
    pub fn rest(&self) -> &BtcturkRest<R> {
        &self.rest
    }
}

#[async_trait]
impl<R: RestClient> AccountInfo for BtcturkConnector<R> {
    async fn get_account_balance(&self) -> Result<Vec<Balance>, ExchangeError> {
        self.account.get_account_balance().await
    }
}

#[async_trait]
impl<R: RestClient> MarketDataSource for BtcturkConnector<R> {
    async fn get_markets(&self) -> Result<Vec<Market>, ExchangeError> {
        self.market.get_markets().await
    }

    async fn get_ticker(&self, symbol: &str) -> Result<Ticker, ExchangeError> {
        self.market.get_ticker(symbol).await
    }

    async fn get_order_book(
        &self,
        symbol: &str,
        depth: Option<u32>,
    ) -> Result<OrderBook, ExchangeError> {
        self.market.get_order_book(symbol, depth).await
    }

    async fn get_recent_trades(
        &self,
        symbol: &str,
        limit: Option<u32>,
    ) -> Result<Vec<Trade>, ExchangeError> {
        self.market.get_recent_trades(symbol, limit).await
    }

    async fn get_klines(
        &self,
        symbol: &str,
        limit: Option<u32>,
    ) -> Result<Vec<Kline>, ExchangeError> {
        self.market.get_klines(symbol, limit).await
    }
}

#[async_trait]
impl<R: RestClient> OrderPlacer for BtcturkConnector<R> {
    async fn place_order(&self, order: OrderRequest) -> Result<OrderResponse, ExchangeError> {
        self.trading.place_order(order).await
    }

    async fn cancel_order(&self, order_id: u64) -> Result<bool, ExchangeError> {
        self.trading.cancel_order(order_id).await
    }
}

impl<R: RestClient> ExchangeConnector for BtcturkConnector<R> {}
