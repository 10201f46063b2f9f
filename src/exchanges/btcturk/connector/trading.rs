use crate::core::errors::ExchangeError;
use crate::core::kernel::RestClient;
use crate::core::traits::OrderPlacer;
use crate::core::types::{OrderRequest, OrderResponse, OrderSide, OrderType};
use crate::exchanges::btcturk::connector::account::{borrow_params, resolve_window};
use crate::exchanges::btcturk::constants::DEFAULT_ALL_ORDERS_LIMIT;
use crate::exchanges::btcturk::precision::{format_unit, DecimalInput, PrecisionTable};
use crate::exchanges::btcturk::types::{BtcturkOrderRequest, OpenOrder, OpenOrders};
use crate::exchanges::btcturk::{conversions, rest::BtcturkRest};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, instrument};
use uuid::Uuid;

/// Trigger behaviour of a stop order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopOrderMethod {
    StopLimit,
    StopMarket,
}

impl From<StopOrderMethod> for OrderType {
    fn from(method: StopOrderMethod) -> Self {
        match method {
            StopOrderMethod::StopLimit => Self::StopLimit,
            StopOrderMethod::StopMarket => Self::StopMarket,
        }
    }
}

/// Filter for the `allOrders` endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllOrdersQuery {
    /// Return orders with an id greater than or equal to this one; 0 for all
    pub order_id: u64,
    pub pair_symbol: Option<String>,
    pub start_date: Option<i64>,
    pub end_date: Option<i64>,
    pub page: Option<u32>,
    pub limit: u32,
}

impl Default for AllOrdersQuery {
    fn default() -> Self {
        Self {
            order_id: 0,
            pair_symbol: None,
            start_date: None,
            end_date: None,
            page: None,
            limit: DEFAULT_ALL_ORDERS_LIMIT,
        }
    }
}

impl AllOrdersQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub const fn from_order_id(mut self, order_id: u64) -> Self {
        self.order_id = order_id;
        self
    }

    pub fn pair_symbol(mut self, pair: impl Into<String>) -> Self {
        self.pair_symbol = Some(pair.into());
        self
    }

    pub const fn start_date(mut self, millis: i64) -> Self {
        self.start_date = Some(millis);
        self
    }

    pub const fn end_date(mut self, millis: i64) -> Self {
        self.end_date = Some(millis);
        self
    }

    pub const fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    pub const fn limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    pub(crate) fn to_params(&self) -> Vec<(&'static str, String)> {
        let (start_date, end_date) = resolve_window(self.start_date, self.end_date);
        // The endpoint filters on id > orderId
        let order_id = self.order_id.saturating_sub(1);

        let mut params = vec![("orderId", order_id.to_string())];
        if let Some(pair) = &self.pair_symbol {
            params.push(("pairSymbol", pair.clone()));
        }
        params.push(("startDate", start_date.to_string()));
        params.push(("endDate", end_date.to_string()));
        if let Some(page) = self.page {
            params.push(("page", page.to_string()));
        }
        params.push(("limit", self.limit.to_string()));
        params
    }
}

/// BtcTurk order entry and order queries
#[derive(Debug)]
pub struct Trading<R: RestClient> {
    rest: BtcturkRest<R>,
    precision: Arc<PrecisionTable>,
}

impl<R: RestClient + Clone> Trading<R> {
    pub fn new(rest: &BtcturkRest<R>, precision: Arc<PrecisionTable>) -> Self {
        Self {
            rest: rest.clone(),
            precision,
        }
    }
}

impl<R: RestClient> Trading<R> {
    pub fn precision(&self) -> &PrecisionTable {
        &self.precision
    }

    /// Market order; sells are sized in the base asset, buys in the quote asset
    #[instrument(skip(self, quantity), fields(exchange = "btcturk", pair = %pair, side = %side))]
    pub async fn submit_market_order<Q: DecimalInput + Sync + ?Sized>(
        &self,
        quantity: &Q,
        side: OrderSide,
        pair: &str,
        client_order_id: Option<String>,
    ) -> Result<OrderResponse, ExchangeError> {
        self.rest.ensure_authenticated()?;
        let entry = self.precision.lookup(pair)?;

        let order = BtcturkOrderRequest {
            quantity: format_unit(quantity, entry.market_quantity_scale(side))?,
            price: None,
            stop_price: None,
            new_order_client_id: client_order_id.unwrap_or_else(new_client_order_id),
            order_method: OrderType::Market.as_str().to_string(),
            order_type: side.as_str().to_string(),
            pair_symbol: pair.to_string(),
        };

        self.submit(order).await
    }

    /// Limit order; quantity at the amount scale, price at the price scale
    #[instrument(
        skip(self, quantity, price),
        fields(exchange = "btcturk", pair = %pair, side = %side)
    )]
    pub async fn submit_limit_order<Q, P>(
        &self,
        quantity: &Q,
        price: &P,
        side: OrderSide,
        pair: &str,
        client_order_id: Option<String>,
    ) -> Result<OrderResponse, ExchangeError>
    where
        Q: DecimalInput + Sync + ?Sized,
        P: DecimalInput + Sync + ?Sized,
    {
        self.rest.ensure_authenticated()?;
        let entry = self.precision.lookup(pair)?;

        let order = BtcturkOrderRequest {
            quantity: format_unit(quantity, entry.amount_scale)?,
            price: Some(format_unit(price, entry.effective_price_scale())?),
            stop_price: None,
            new_order_client_id: client_order_id.unwrap_or_else(new_client_order_id),
            order_method: OrderType::Limit.as_str().to_string(),
            order_type: side.as_str().to_string(),
            pair_symbol: pair.to_string(),
        };

        self.submit(order).await
    }

    /// Stop-limit or stop-market order
    #[allow(clippy::too_many_arguments)]
    #[instrument(
        skip(self, stop_price, quantity, price),
        fields(exchange = "btcturk", pair = %pair, side = %side, method = ?method)
    )]
    pub async fn submit_stop_order<S, Q, P>(
        &self,
        stop_price: &S,
        quantity: &Q,
        price: &P,
        side: OrderSide,
        method: StopOrderMethod,
        pair: &str,
        client_order_id: Option<String>,
    ) -> Result<OrderResponse, ExchangeError>
    where
        S: DecimalInput + Sync + ?Sized,
        Q: DecimalInput + Sync + ?Sized,
        P: DecimalInput + Sync + ?Sized,
    {
        self.rest.ensure_authenticated()?;
        let entry = self.precision.lookup(pair)?;
        let price_scale = entry.effective_price_scale();

        let order = BtcturkOrderRequest {
            quantity: format_unit(quantity, entry.amount_scale)?,
            price: Some(format_unit(price, price_scale)?),
            stop_price: Some(format_unit(stop_price, price_scale)?),
            new_order_client_id: client_order_id.unwrap_or_else(new_client_order_id),
            order_method: OrderType::from(method).as_str().to_string(),
            order_type: side.as_str().to_string(),
            pair_symbol: pair.to_string(),
        };

        self.submit(order).await
    }

    async fn submit(&self, order: BtcturkOrderRequest) -> Result<OrderResponse, ExchangeError> {
        debug!(
            quantity = %order.quantity,
            price = ?order.price,
            stop_price = ?order.stop_price,
            "Submitting BtcTurk order"
        );
        let client_order_id = order.new_order_client_id.clone();
        let response = self.rest.place_order(&order).await?;
        conversions::convert_btcturk_order_response(response, client_order_id)
    }

    /// Open orders, for one pair or all pairs
    #[instrument(skip(self), fields(exchange = "btcturk"))]
    pub async fn get_open_orders(&self, pair: Option<&str>) -> Result<OpenOrders, ExchangeError> {
        self.rest.get_open_orders(pair).await
    }

    /// Order history within a time window, 30 days by default
    #[instrument(skip(self), fields(exchange = "btcturk"))]
    pub async fn get_all_orders(
        &self,
        query: AllOrdersQuery,
    ) -> Result<Vec<OpenOrder>, ExchangeError> {
        let params = query.to_params();
        self.rest.get_all_orders(&borrow_params(&params)).await
    }

    /// Cancel an order, returning the exchange's success flag
    #[instrument(skip(self), fields(exchange = "btcturk"))]
    pub async fn cancel(&self, order_id: u64) -> Result<bool, ExchangeError> {
        self.rest.cancel_order(order_id).await
    }
}

fn new_client_order_id() -> String {
    Uuid::new_v4().to_string()
}

#[async_trait]
impl<R: RestClient> OrderPlacer for Trading<R> {
    async fn place_order(&self, order: OrderRequest) -> Result<OrderResponse, ExchangeError> {
        let pair = order.symbol.normalized();
        let quantity = order.quantity;
        let require = |price: Option<crate::core::types::Price>, what: &str| {
            price.ok_or_else(|| {
                ExchangeError::InvalidOrder(format!(
                    "{} order on {} requires a {}",
                    order.order_type.as_str(),
                    pair,
                    what
                ))
            })
        };

        match order.order_type {
            OrderType::Market => {
                self.submit_market_order(&quantity, order.side, &pair, order.client_order_id)
                    .await
            }
            OrderType::Limit => {
                let price = require(order.price, "price")?;
                self.submit_limit_order(&quantity, &price, order.side, &pair, order.client_order_id)
                    .await
            }
            OrderType::StopLimit | OrderType::StopMarket => {
                let stop_price = require(order.stop_price, "stop price")?;
                let price = require(order.price.or(order.stop_price), "price")?;
                let method = if order.order_type == OrderType::StopLimit {
                    StopOrderMethod::StopLimit
                } else {
                    StopOrderMethod::StopMarket
                };
                self.submit_stop_order(
                    &stop_price,
                    &quantity,
                    &price,
                    order.side,
                    method,
                    &pair,
                    order.client_order_id,
                )
                .await
            }
        }
    }

    async fn cancel_order(&self, order_id: u64) -> Result<bool, ExchangeError> {
        self.cancel(order_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_orders_params_shift_order_id() {
        let params = AllOrdersQuery::new()
            .from_order_id(1000)
            .pair_symbol("BTC_TRY")
            .start_date(1)
            .end_date(2)
            .to_params();

        assert_eq!(params[0], ("orderId", "999".to_string()));
        assert!(params.contains(&("pairSymbol", "BTC_TRY".to_string())));
        assert!(params.contains(&("limit", "100".to_string())));
        assert!(!params.iter().any(|(k, _)| *k == "page"));
    }

    #[test]
    fn test_all_orders_params_zero_order_id() {
        let params = AllOrdersQuery::new().page(2).limit(10).to_params();

        assert_eq!(params[0], ("orderId", "0".to_string()));
        assert!(params.contains(&("page", "2".to_string())));
        assert!(params.contains(&("limit", "10".to_string())));
        assert!(!params.iter().any(|(k, _)| *k == "pairSymbol"));
    }

    #[test]
    fn test_client_order_ids_are_unique_uuids() {
        let first = new_client_order_id();
        let second = new_client_order_id();

        assert_ne!(first, second);
        assert!(Uuid::parse_str(&first).is_ok());
    }
}
