use crate::core::errors::ExchangeError;
use crate::core::kernel::RestClient;
use crate::core::traits::AccountInfo;
use crate::core::types::Balance;
use crate::exchanges::btcturk::constants::{
    CRYPTO_SYMBOLS, CURRENCY_SYMBOLS, DEFAULT_HISTORY_DAYS, DEPOSIT_OR_WITHDRAWAL, TRADE_TYPES,
};
use crate::exchanges::btcturk::types::{Transaction, UserTrade};
use crate::exchanges::btcturk::{conversions, rest::BtcturkRest};
use async_trait::async_trait;
use chrono::{Duration, Utc};
use tracing::instrument;

/// Filter for the trade, crypto and fiat history endpoints
///
/// Unset fields fall back to per-endpoint defaults; the window defaults to
/// the last 30 days ending now.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HistoryQuery {
    /// `buy`/`sell` for trades, `deposit`/`withdrawal` for transfers
    pub types: Option<Vec<String>>,
    /// Asset symbols, e.g. `btc`, `try`
    pub symbols: Option<Vec<String>>,
    /// Window start, Unix milliseconds
    pub start_date: Option<i64>,
    /// Window end, Unix milliseconds
    pub end_date: Option<i64>,
}

impl HistoryQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn types<S: Into<String>>(mut self, types: impl IntoIterator<Item = S>) -> Self {
        self.types = Some(types.into_iter().map(Into::into).collect());
        self
    }

    pub fn symbols<S: Into<String>>(mut self, symbols: impl IntoIterator<Item = S>) -> Self {
        self.symbols = Some(symbols.into_iter().map(Into::into).collect());
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

    /// Query pairs with defaults applied; list values become repeated keys
    pub(crate) fn to_params(
        &self,
        type_key: &'static str,
        symbol_key: &'static str,
        default_types: &[&str],
        default_symbols: &[&str],
    ) -> Vec<(&'static str, String)> {
        let (start_date, end_date) = resolve_window(self.start_date, self.end_date);

        let mut params = Vec::new();
        match &self.types {
            Some(types) => params.extend(types.iter().map(|t| (type_key, t.clone()))),
            None => params.extend(default_types.iter().map(|t| (type_key, (*t).to_string()))),
        }
        match &self.symbols {
            Some(symbols) => params.extend(symbols.iter().map(|s| (symbol_key, s.to_lowercase()))),
            None => params.extend(default_symbols.iter().map(|s| (symbol_key, (*s).to_string()))),
        }
        params.push(("startDate", start_date.to_string()));
        params.push(("endDate", end_date.to_string()));
        params
    }
}

/// Fill in a missing window bound: end defaults to now, start to 30 days back
pub(crate) fn resolve_window(start_date: Option<i64>, end_date: Option<i64>) -> (i64, i64) {
    let now = Utc::now();
    let start = start_date
        .unwrap_or_else(|| (now - Duration::days(DEFAULT_HISTORY_DAYS)).timestamp_millis());
    let end = end_date.unwrap_or_else(|| now.timestamp_millis());
    (start, end)
}

pub(crate) fn borrow_params<'a>(params: &'a [(&'static str, String)]) -> Vec<(&'a str, &'a str)> {
    params.iter().map(|(k, v)| (*k, v.as_str())).collect()
}

/// BtcTurk balances and transfer history
#[derive(Debug)]
pub struct Account<R: RestClient> {
    rest: BtcturkRest<R>,
}

impl<R: RestClient + Clone> Account<R> {
    pub fn new(rest: &BtcturkRest<R>) -> Self {
        Self { rest: rest.clone() }
    }
}

impl<R: RestClient> Account<R> {
    /// Balances, optionally restricted to the given assets (case-insensitive)
    #[instrument(skip(self), fields(exchange = "btcturk"))]
    pub async fn get_balances(
        &self,
        assets: Option<&[&str]>,
    ) -> Result<Vec<Balance>, ExchangeError> {
        let balances = self.rest.get_balances().await?;
        let wanted: Option<Vec<String>> =
            assets.map(|assets| assets.iter().map(|a| a.to_uppercase()).collect());

        Ok(balances
            .into_iter()
            .filter(|balance| {
                wanted
                    .as_ref()
                    .map_or(true, |wanted| wanted.contains(&balance.asset.to_uppercase()))
            })
            .map(conversions::convert_btcturk_balance)
            .collect())
    }

    /// Executed trades; defaults to buys and sells of every listed crypto asset
    #[instrument(skip(self), fields(exchange = "btcturk"))]
    pub async fn get_trade_history(
        &self,
        query: HistoryQuery,
    ) -> Result<Vec<UserTrade>, ExchangeError> {
        let params = query.to_params("type", "symbol", &TRADE_TYPES, &CRYPTO_SYMBOLS);
        self.rest.get_trade_history(&borrow_params(&params)).await
    }

    /// Crypto deposits and withdrawals of every listed crypto asset by default
    #[instrument(skip(self), fields(exchange = "btcturk"))]
    pub async fn get_crypto_history(
        &self,
        query: HistoryQuery,
    ) -> Result<Vec<Transaction>, ExchangeError> {
        let params = query.to_params("type", "symbol", &DEPOSIT_OR_WITHDRAWAL, &CRYPTO_SYMBOLS);
        self.rest.get_crypto_history(&borrow_params(&params)).await
    }

    /// Fiat deposits and withdrawals, TRY by default
    #[instrument(skip(self), fields(exchange = "btcturk"))]
    pub async fn get_fiat_history(
        &self,
        query: HistoryQuery,
    ) -> Result<Vec<Transaction>, ExchangeError> {
        let params = query.to_params(
            "balanceTypes",
            "currencySymbols",
            &DEPOSIT_OR_WITHDRAWAL,
            &CURRENCY_SYMBOLS,
        );
        self.rest.get_fiat_history(&borrow_params(&params)).await
    }
}

#[async_trait]
impl<R: RestClient> AccountInfo for Account<R> {
    async fn get_account_balance(&self) -> Result<Vec<Balance>, ExchangeError> {
        self.get_balances(None).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DAY_MILLIS: i64 = 24 * 60 * 60 * 1000;

    #[test]
    fn test_default_window_is_thirty_days() {
        let (start, end) = resolve_window(None, None);
        assert_eq!(end - start, DEFAULT_HISTORY_DAYS * DAY_MILLIS);
    }

    #[test]
    fn test_explicit_window_is_kept() {
        assert_eq!(resolve_window(Some(1), Some(2)), (1, 2));
        let (start, end) = resolve_window(Some(5 * DAY_MILLIS), None);
        assert_eq!(start, 5 * DAY_MILLIS);
        assert!(end > start);
    }

    #[test]
    fn test_default_trade_history_params() {
        let params = HistoryQuery::new()
            .start_date(10)
            .end_date(20)
            .to_params("type", "symbol", &TRADE_TYPES, &CRYPTO_SYMBOLS);

        let types: Vec<_> = params
            .iter()
            .filter(|(k, _)| *k == "type")
            .map(|(_, v)| v.as_str())
            .collect();
        let symbols = params.iter().filter(|(k, _)| *k == "symbol").count();

        assert_eq!(types, vec!["buy", "sell"]);
        assert_eq!(symbols, CRYPTO_SYMBOLS.len());
        assert!(params.contains(&("startDate", "10".to_string())));
        assert!(params.contains(&("endDate", "20".to_string())));
    }

    #[test]
    fn test_explicit_symbols_override_defaults() {
        let params = HistoryQuery::new()
            .types(["deposit"])
            .symbols(["TRY"])
            .to_params(
                "balanceTypes",
                "currencySymbols",
                &DEPOSIT_OR_WITHDRAWAL,
                &CURRENCY_SYMBOLS,
            );

        assert_eq!(params[0], ("balanceTypes", "deposit".to_string()));
        assert_eq!(params[1], ("currencySymbols", "try".to_string()));
        assert_eq!(params.len(), 4);
    }
}
