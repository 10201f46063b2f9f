/// Transport kernel shared by exchange connectors
///
/// The kernel contains only exchange-agnostic pieces:
///
/// - `RestClient`: raw HTTP transport (method, path, query, headers, body in;
///   status and body out), with `ReqwestRest` as the production implementation
/// - `hmac_sha256_base64`: keyed hashing for request signatures
/// - `NonceSource`: strictly increasing millisecond nonces
///
/// Exchange-specific signing, response classification and decoding live in
/// the exchange modules.
///
/// # Basic REST client
/// ```rust,no_run
/// use btcturk_connector::core::kernel::*;
/// use reqwest::Method;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let rest_config = RestClientConfig::new(
///     "https://api.btcturk.com".to_string(),
///     "btcturk".to_string(),
/// )
/// .with_timeout(10);
/// let rest = RestClientBuilder::new(rest_config).build()?;
///
/// let request = RestRequest::new(Method::GET, "/api/v2/server/time");
/// let response = rest.send(request).await?;
/// println!("{} {}", response.status, response.body);
/// # Ok(())
/// # }
/// ```
pub mod rest;
pub mod signer;

pub use rest::{
    RawResponse, ReqwestRest, RestClient, RestClientBuilder, RestClientConfig, RestRequest,
};
pub use signer::{current_timestamp_millis, hmac_sha256_base64, NonceSource};
