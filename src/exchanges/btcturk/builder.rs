use crate::core::config::ExchangeConfig;
use crate::core::errors::ExchangeError;
use crate::core::kernel::{ReqwestRest, RestClient, RestClientBuilder, RestClientConfig};
use crate::exchanges::btcturk::connector::BtcturkConnector;
use crate::exchanges::btcturk::constants::{DEFAULT_BASE_URL, EXCHANGE_NAME};
use crate::exchanges::btcturk::precision::PrecisionTable;
use crate::exchanges::btcturk::rest::BtcturkRest;
use crate::exchanges::btcturk::signer::BtcturkSigner;
use std::sync::Arc;
use tracing::{info, instrument};

/// Where the connector's precision table comes from
#[derive(Debug, Clone, Default)]
pub enum PrecisionSource {
    /// Fetch `server/exchangeinfo` while building
    #[default]
    Fetch,
    /// Use the compiled table of long-standing pairs
    Builtin,
    /// Use a caller-provided table
    Table(PrecisionTable),
}

/// Builder for creating BtcTurk connectors
#[derive(Debug)]
pub struct BtcturkBuilder {
    config: ExchangeConfig,
    precision: PrecisionSource,
    authenticate: bool,
    user_agent: Option<String>,
}

impl BtcturkBuilder {
    pub fn new(config: ExchangeConfig) -> Self {
        Self {
            config,
            precision: PrecisionSource::Fetch,
            authenticate: true,
            user_agent: None,
        }
    }

    pub fn with_precision(mut self, precision: PrecisionSource) -> Self {
        self.precision = precision;
        self
    }

    /// Whether to authenticate during `build` when credentials are present
    pub fn with_authenticate(mut self, authenticate: bool) -> Self {
        self.authenticate = authenticate;
        self
    }

    pub fn with_user_agent(mut self, user_agent: String) -> Self {
        self.user_agent = Some(user_agent);
        self
    }

    /// Build the HTTP transport from the configuration
    pub fn build_rest(&self) -> Result<ReqwestRest, ExchangeError> {
        let base_url = self
            .config
            .base_url
            .clone()
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let mut rest_config = RestClientConfig::new(base_url, EXCHANGE_NAME.to_string())
            .with_timeout(self.config.timeout_seconds);
        if let Some(user_agent) = &self.user_agent {
            rest_config = rest_config.with_user_agent(user_agent.clone());
        }

        RestClientBuilder::new(rest_config).build()
    }

    /// Build a connector over the reqwest transport
    pub async fn build(self) -> Result<BtcturkConnector<ReqwestRest>, ExchangeError> {
        let rest = self.build_rest()?;
        self.build_with_rest(rest).await
    }

    /// Build a connector over any transport
    #[instrument(skip(self, rest), fields(exchange = "btcturk"))]
    pub async fn build_with_rest<R: RestClient + Clone>(
        self,
        rest: R,
    ) -> Result<BtcturkConnector<R>, ExchangeError> {
        let signer = signer_from_config(&self.config)?;

        let precision = match self.precision {
            PrecisionSource::Fetch => {
                let info = BtcturkRest::new(rest.clone(), None).get_exchange_info().await?;
                PrecisionTable::from_exchange_info(&info)
            }
            PrecisionSource::Builtin => PrecisionTable::builtin(),
            PrecisionSource::Table(table) => table,
        };
        info!(entries = precision.len(), "Loaded BtcTurk precision table");

        let connector = BtcturkConnector::new(rest, signer, precision);
        if self.authenticate && connector.has_credentials() {
            connector.authenticate().await?;
        }

        Ok(connector)
    }
}

fn signer_from_config(
    config: &ExchangeConfig,
) -> Result<Option<Arc<BtcturkSigner>>, ExchangeError> {
    if !config.has_credentials() {
        return Ok(None);
    }
    let signer = BtcturkSigner::new(config.api_key().to_string(), config.secret_key())?;
    Ok(Some(Arc::new(signer)))
}

/// Create a BtcTurk connector: fetch the precision table and, when the
/// configuration carries credentials, authenticate
pub async fn build_connector(
    config: ExchangeConfig,
) -> Result<BtcturkConnector<ReqwestRest>, ExchangeError> {
    BtcturkBuilder::new(config).build().await
}

/// Create a BtcTurk connector with a known precision table, without network access
pub fn build_connector_with_precision(
    config: ExchangeConfig,
    precision: PrecisionTable,
) -> Result<BtcturkConnector<ReqwestRest>, ExchangeError> {
    let builder = BtcturkBuilder::new(config);
    let rest = builder.build_rest()?;
    let signer = signer_from_config(&builder.config)?;
    Ok(BtcturkConnector::new(rest, signer, precision))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_read_only_connector() {
        let connector =
            build_connector_with_precision(ExchangeConfig::read_only(), PrecisionTable::builtin())
                .unwrap();

        assert!(!connector.has_credentials());
        assert!(!connector.is_authenticated());
        assert!(connector.precision().contains("BTC_TRY"));
    }

    #[test]
    fn test_build_with_credentials_is_not_yet_authenticated() {
        let config = ExchangeConfig::new("public".to_string(), "c2VjcmV0LWJ5dGVz".to_string());
        let connector = build_connector_with_precision(config, PrecisionTable::builtin()).unwrap();

        assert!(connector.has_credentials());
        assert!(!connector.is_authenticated());
    }

    #[test]
    fn test_bad_secret_fails_at_build_time() {
        let config = ExchangeConfig::new("public".to_string(), "***".to_string());
        let result = build_connector_with_precision(config, PrecisionTable::builtin());

        assert!(matches!(result, Err(ExchangeError::InvalidCredentials(_))));
    }

    #[test]
    fn test_rest_uses_configured_base_url_and_timeout() {
        let config = ExchangeConfig::read_only()
            .base_url("http://localhost:8080".to_string())
            .timeout_seconds(3);
        let rest = BtcturkBuilder::new(config).build_rest().unwrap();

        assert_eq!(rest.config().base_url, "http://localhost:8080");
        assert_eq!(rest.config().timeout_seconds, 3);
        assert_eq!(rest.config().exchange_name, "btcturk");
    }
}
