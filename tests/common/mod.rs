#![allow(dead_code)]

use async_trait::async_trait;
use btcturk_connector::core::config::ExchangeConfig;
use btcturk_connector::core::errors::ExchangeError;
use btcturk_connector::core::kernel::{RawResponse, RestClient, RestRequest};
use btcturk_connector::exchanges::btcturk::{
    BtcturkBuilder, BtcturkConnector, PrecisionSource, PrecisionTable,
};
use reqwest::Method;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

pub const PUBLIC_KEY: &str = "test-public-key";
// base64("test-secret-bytes")
pub const SECRET_KEY: &str = "dGVzdC1zZWNyZXQtYnl0ZXM=";

pub const BALANCES_BODY: &str = r#"{
    "success": true, "message": null, "code": 0,
    "data": [
        {"asset": "TRY", "assetname": "Türk Lirası", "balance": "1500.25", "locked": "500",
         "free": "1000.25", "orderFund": "500", "requestFund": "0", "precision": 2},
        {"asset": "BTC", "assetname": "Bitcoin", "balance": "0.5", "locked": "0",
         "free": "0.5", "orderFund": "0", "requestFund": "0", "precision": 8},
        {"asset": "ETH", "assetname": "Ethereum", "balance": "0", "locked": "0",
         "free": "0", "orderFund": "0", "requestFund": "0", "precision": 8}
    ]
}"#;

#[derive(Debug, Default)]
struct MockState {
    routes: HashMap<(Method, String), RawResponse>,
    requests: Vec<RestRequest>,
}

/// In-memory transport that replays canned responses and records requests
#[derive(Debug, Clone, Default)]
pub struct MockRest {
    state: Arc<Mutex<MockState>>,
}

impl MockRest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn route(self, method: Method, endpoint: &str, status: u16, body: &str) -> Self {
        self.set_route(method, endpoint, status, body);
        self
    }

    pub fn set_route(&self, method: Method, endpoint: &str, status: u16, body: &str) {
        self.state
            .lock()
            .unwrap()
            .routes
            .insert((method, endpoint.to_string()), RawResponse::new(status, body));
    }

    /// Route the authentication check to a successful balances response
    pub fn with_balances(self) -> Self {
        self.route(Method::GET, "/api/v1/users/balances", 200, BALANCES_BODY)
    }

    pub fn requests(&self) -> Vec<RestRequest> {
        self.state.lock().unwrap().requests.clone()
    }

    pub fn call_count(&self) -> usize {
        self.state.lock().unwrap().requests.len()
    }

    pub fn last_request(&self) -> RestRequest {
        self.requests()
            .pop()
            .expect("no request has been sent")
    }

    pub fn requests_to(&self, endpoint: &str) -> Vec<RestRequest> {
        self.requests()
            .into_iter()
            .filter(|request| request.endpoint == endpoint)
            .collect()
    }
}

#[async_trait]
impl RestClient for MockRest {
    async fn send(&self, request: RestRequest) -> Result<RawResponse, ExchangeError> {
        let mut state = self.state.lock().unwrap();
        let key = (request.method.clone(), request.endpoint.clone());
        let response = state.routes.get(&key).cloned().unwrap_or_else(|| {
            RawResponse::new(404, r#"{"success":false,"message":"no route","code":404}"#)
        });
        state.requests.push(request);
        Ok(response)
    }
}

pub fn credentials() -> ExchangeConfig {
    ExchangeConfig::new(PUBLIC_KEY.to_string(), SECRET_KEY.to_string())
}

/// Connector over the mock with the builtin precision table, not authenticated
pub fn connector(mock: &MockRest) -> BtcturkConnector<MockRest> {
    let signer = btcturk_connector::exchanges::btcturk::BtcturkSigner::new(
        PUBLIC_KEY.to_string(),
        SECRET_KEY,
    )
    .unwrap();
    BtcturkConnector::new(
        mock.clone(),
        Some(Arc::new(signer)),
        PrecisionTable::builtin(),
    )
}

/// Connector over the mock that has already passed authentication
pub async fn authenticated_connector(mock: &MockRest) -> BtcturkConnector<MockRest> {
    mock.set_route(Method::GET, "/api/v1/users/balances", 200, BALANCES_BODY);
    BtcturkBuilder::new(credentials())
        .with_precision(PrecisionSource::Builtin)
        .build_with_rest(mock.clone())
        .await
        .unwrap()
}

/// Query values sent under `key`, in order
pub fn query_values<'a>(request: &'a RestRequest, key: &str) -> Vec<&'a str> {
    request
        .query
        .iter()
        .filter(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
        .collect()
}

pub fn json_body(request: &RestRequest) -> serde_json::Value {
    serde_json::from_slice(request.body.as_deref().unwrap_or_default()).unwrap()
}
