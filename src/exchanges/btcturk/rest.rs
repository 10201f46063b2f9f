use crate::core::errors::ExchangeError;
use crate::core::kernel::{current_timestamp_millis, NonceSource, RestClient, RestRequest};
use crate::exchanges::btcturk::auth::{describe_clock_skew, is_nonce_error, AuthState};
use crate::exchanges::btcturk::classifier::{classify, ClassifiedResponse, RequestKind};
use crate::exchanges::btcturk::constants::{PRIVATE_PREFIX, PUBLIC_PREFIX, TRANSACTIONS_PREFIX};
use crate::exchanges::btcturk::signer::BtcturkSigner;
use crate::exchanges::btcturk::types::{
    BtcturkBalance, BtcturkExchangeInfo, BtcturkOhlc, BtcturkOrderBook, BtcturkOrderRequest,
    BtcturkOrderResponse, BtcturkTicker, BtcturkTrade, OpenOrder, OpenOrders, ServerTime,
    Transaction, UserTrade,
};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, instrument, warn};

/// BtcTurk REST dispatcher
///
/// Composes endpoint paths, signs private calls with per-request headers,
/// sends them through the transport and classifies the responses. Clones
/// share the signer, the nonce source and the authentication state.
pub struct BtcturkRest<R: RestClient> {
    rest_client: R,
    signer: Option<Arc<BtcturkSigner>>,
    nonce: Arc<NonceSource>,
    auth: AuthState,
}

impl<R: RestClient + Clone> Clone for BtcturkRest<R> {
    fn clone(&self) -> Self {
        Self {
            rest_client: self.rest_client.clone(),
            signer: self.signer.clone(),
            nonce: Arc::clone(&self.nonce),
            auth: self.auth.clone(),
        }
    }
}

impl<R: RestClient> std::fmt::Debug for BtcturkRest<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BtcturkRest")
            .field("has_signer", &self.signer.is_some())
            .field("authenticated", &self.auth.is_authenticated())
            .finish_non_exhaustive()
    }
}

impl<R: RestClient> BtcturkRest<R> {
    pub fn new(rest_client: R, signer: Option<Arc<BtcturkSigner>>) -> Self {
        Self {
            rest_client,
            signer,
            nonce: Arc::new(NonceSource::new()),
            auth: AuthState::new(),
        }
    }

    pub fn auth_state(&self) -> &AuthState {
        &self.auth
    }

    pub fn is_authenticated(&self) -> bool {
        self.auth.is_authenticated()
    }

    pub fn has_credentials(&self) -> bool {
        self.signer.is_some()
    }

    /// Precondition of every private call
    pub fn ensure_authenticated(&self) -> Result<(), ExchangeError> {
        if self.auth.is_authenticated() {
            Ok(())
        } else {
            Err(ExchangeError::NotAuthenticated)
        }
    }

    fn signer(&self) -> Result<&BtcturkSigner, ExchangeError> {
        self.signer.as_deref().ok_or_else(|| {
            ExchangeError::InvalidCredentials("No API credentials configured".to_string())
        })
    }

    /// Send a composed request and classify the response
    async fn dispatch(
        &self,
        request: RestRequest,
        kind: RequestKind,
    ) -> Result<ClassifiedResponse, ExchangeError> {
        let method = request.method.clone();
        let endpoint = request.endpoint.clone();
        let response = self.rest_client.send(request).await?;

        classify(response.status, &response.body, kind).map_err(|outcome| {
            warn!(
                %method,
                endpoint = %endpoint,
                status = outcome.status(),
                message = outcome.message(),
                "BtcTurk request failed"
            );
            ExchangeError::from(outcome)
        })
    }

    /// Attach fresh authentication headers and send
    ///
    /// The signature covers only the key and nonce, so query and body are
    /// sent as composed.
    async fn dispatch_signed(
        &self,
        request: RestRequest,
        kind: RequestKind,
    ) -> Result<ClassifiedResponse, ExchangeError> {
        let signer = self.signer()?;
        let nonce = self.nonce.next()?;
        let headers = signer.auth_headers(nonce)?;

        debug!(nonce, endpoint = %request.endpoint, "Signed BtcTurk request");

        self.dispatch(request.with_headers(headers), kind).await
    }

    /// GET on the public (`/api/v2/`) family
    pub async fn get_public(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<ClassifiedResponse, ExchangeError> {
        let request =
            RestRequest::new(Method::GET, format!("{}{}", PUBLIC_PREFIX, path)).with_query(params);
        self.dispatch(request, RequestKind::Read).await
    }

    /// Signed GET on the private (`/api/v1/`) family
    pub async fn get_private(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<ClassifiedResponse, ExchangeError> {
        self.ensure_authenticated()?;
        let request =
            RestRequest::new(Method::GET, format!("{}{}", PRIVATE_PREFIX, path)).with_query(params);
        self.dispatch_signed(request, RequestKind::Read).await
    }

    /// Signed GET on the transaction history family
    pub async fn get_transactions(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<ClassifiedResponse, ExchangeError> {
        self.ensure_authenticated()?;
        let request = RestRequest::new(Method::GET, format!("{}{}", TRANSACTIONS_PREFIX, path))
            .with_query(params);
        self.dispatch_signed(request, RequestKind::Read).await
    }

    /// Signed POST with a JSON body on the private family
    pub async fn post_private<B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<ClassifiedResponse, ExchangeError> {
        self.ensure_authenticated()?;
        let body = serde_json::to_vec(body).map_err(|e| {
            ExchangeError::SerializationError(format!("Failed to encode request body: {}", e))
        })?;
        let request =
            RestRequest::new(Method::POST, format!("{}{}", PRIVATE_PREFIX, path)).with_body(body);
        self.dispatch_signed(request, RequestKind::Write).await
    }

    /// Signed DELETE on the private family
    pub async fn delete_private(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<ClassifiedResponse, ExchangeError> {
        self.ensure_authenticated()?;
        let request = RestRequest::new(Method::DELETE, format!("{}{}", PRIVATE_PREFIX, path))
            .with_query(params);
        self.dispatch_signed(request, RequestKind::Write).await
    }

    /// Check the credentials against the balances endpoint with a signed request
    ///
    /// On success the client becomes authenticated. A rejected nonce gets a
    /// best-effort clock skew report attached to the error.
    #[instrument(skip(self), fields(exchange = "btcturk"))]
    pub async fn authenticate(&self) -> Result<(), ExchangeError> {
        let request = RestRequest::new(Method::GET, format!("{}users/balances", PRIVATE_PREFIX));

        match self.dispatch_signed(request, RequestKind::Read).await {
            Ok(_) => {
                self.auth.mark_authenticated();
                debug!("BtcTurk authentication succeeded");
                Ok(())
            }
            Err(err @ ExchangeError::InvalidCredentials(_)) => Err(err),
            Err(err) => {
                let status = err.status();
                let message = match err {
                    ExchangeError::AuthenticationError { message, .. }
                    | ExchangeError::InvalidParameter { message, .. }
                    | ExchangeError::NotFound { message, .. }
                    | ExchangeError::UnprocessableRequest { message, .. }
                    | ExchangeError::RateLimited { message, .. }
                    | ExchangeError::ServerError { message, .. }
                    | ExchangeError::UnknownStatus { message, .. } => message,
                    other => other.to_string(),
                };

                let clock_skew = if is_nonce_error(&message) {
                    self.clock_skew_report().await
                } else {
                    None
                };

                warn!(%message, ?clock_skew, "BtcTurk authentication failed");
                Err(ExchangeError::AuthenticationError {
                    message,
                    status,
                    clock_skew,
                })
            }
        }
    }

    async fn clock_skew_report(&self) -> Option<String> {
        let server = self.get_server_time().await.ok()?;
        let local = current_timestamp_millis().ok()?;
        let local = i64::try_from(local).ok()?;
        Some(describe_clock_skew(local, server.server_time))
    }

    fn decode<T: DeserializeOwned>(value: Value, what: &str) -> Result<T, ExchangeError> {
        serde_json::from_value(value).map_err(|e| {
            ExchangeError::DeserializationError(format!("Failed to parse BtcTurk {}: {}", what, e))
        })
    }

    // Public endpoints

    /// Pair listing with scales, filters and order methods
    pub async fn get_exchange_info(&self) -> Result<BtcturkExchangeInfo, ExchangeError> {
        let response = self.get_public("server/exchangeinfo", &[]).await?;
        Self::decode(response.data, "exchange info")
    }

    pub async fn get_server_time(&self) -> Result<ServerTime, ExchangeError> {
        let response = self.get_public("server/time", &[]).await?;
        Self::decode(response.body, "server time")
    }

    /// Tickers of one pair, or of every pair when `pair` is `None`
    pub async fn get_tickers(
        &self,
        pair: Option<&str>,
    ) -> Result<Vec<BtcturkTicker>, ExchangeError> {
        let params = pair.map_or_else(Vec::new, |pair| vec![("pairSymbol", pair)]);
        let response = self.get_public("ticker", &params).await?;
        Self::decode(response.data, "ticker")
    }

    pub async fn get_ohlc(&self, pair: &str, last: u32) -> Result<Vec<BtcturkOhlc>, ExchangeError> {
        let last = last.to_string();
        let response = self
            .get_public("ohlc", &[("pairSymbol", pair), ("last", last.as_str())])
            .await?;
        Self::decode(response.data, "ohlc")
    }

    pub async fn get_order_book(
        &self,
        pair: &str,
        limit: u32,
    ) -> Result<BtcturkOrderBook, ExchangeError> {
        let limit = limit.to_string();
        let response = self
            .get_public("orderbook", &[("pairSymbol", pair), ("limit", limit.as_str())])
            .await?;
        Self::decode(response.data, "order book")
    }

    pub async fn get_trades(
        &self,
        pair: &str,
        last: u32,
    ) -> Result<Vec<BtcturkTrade>, ExchangeError> {
        let last = last.to_string();
        let response = self
            .get_public("trades", &[("pairSymbol", pair), ("last", last.as_str())])
            .await?;
        Self::decode(response.data, "trades")
    }

    // Private endpoints

    pub async fn get_balances(&self) -> Result<Vec<BtcturkBalance>, ExchangeError> {
        let response = self.get_private("users/balances", &[]).await?;
        Self::decode(response.data, "balances")
    }

    pub async fn get_trade_history(
        &self,
        params: &[(&str, &str)],
    ) -> Result<Vec<UserTrade>, ExchangeError> {
        let response = self.get_transactions("trade", params).await?;
        Self::decode(response.data, "trade history")
    }

    pub async fn get_crypto_history(
        &self,
        params: &[(&str, &str)],
    ) -> Result<Vec<Transaction>, ExchangeError> {
        let response = self.get_transactions("crypto", params).await?;
        Self::decode(response.data, "crypto history")
    }

    pub async fn get_fiat_history(
        &self,
        params: &[(&str, &str)],
    ) -> Result<Vec<Transaction>, ExchangeError> {
        let response = self.get_transactions("fiat", params).await?;
        Self::decode(response.data, "fiat history")
    }

    pub async fn get_open_orders(&self, pair: Option<&str>) -> Result<OpenOrders, ExchangeError> {
        let params = pair.map_or_else(Vec::new, |pair| vec![("pairSymbol", pair)]);
        let response = self.get_private("openOrders", &params).await?;
        if response.data.is_null() {
            return Ok(OpenOrders::default());
        }
        Self::decode(response.data, "open orders")
    }

    pub async fn get_all_orders(
        &self,
        params: &[(&str, &str)],
    ) -> Result<Vec<OpenOrder>, ExchangeError> {
        let response = self.get_private("allOrders", params).await?;
        Self::decode(response.data, "orders")
    }

    pub async fn place_order(
        &self,
        order: &BtcturkOrderRequest,
    ) -> Result<BtcturkOrderResponse, ExchangeError> {
        let response = self.post_private("order", order).await?;
        Self::decode(response.data, "order response")
    }

    /// Cancel an order, returning the body's success flag
    pub async fn cancel_order(&self, order_id: u64) -> Result<bool, ExchangeError> {
        let id = order_id.to_string();
        let response = self.delete_private("order", &[("id", id.as_str())]).await?;
        Ok(response.success)
    }
}
