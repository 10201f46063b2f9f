mod common;

use btcturk_connector::core::errors::ExchangeError;
use btcturk_connector::core::traits::OrderPlacer;
use btcturk_connector::core::types::{
    OrderRequest, OrderSide, OrderType, Price, Quantity, Symbol,
};
use btcturk_connector::exchanges::btcturk::{
    AllOrdersQuery, BtcturkBuilder, PrecisionEntry, PrecisionSource, PrecisionTable,
    StopOrderMethod,
};
use common::{authenticated_connector, connector, credentials, json_body, query_values, MockRest};
use reqwest::Method;
use rust_decimal::Decimal;
use std::str::FromStr;

const ORDER_RESPONSE: &str = r#"{
    "success": true, "message": "SUCCESS", "code": 0,
    "data": {
        "id": 9932534, "datetime": 1700000000000, "type": "sell", "method": "market",
        "price": "0", "quantity": "0.12345678", "pairSymbol": "BTCTRY",
        "pairSymbolNormalized": "BTC_TRY", "newOrderClientId": "my-order-1"
    }
}"#;

fn dec(value: &str) -> Decimal {
    Decimal::from_str(value).unwrap()
}

async fn trading_mock() -> (MockRest, btcturk_connector::BtcturkConnector<MockRest>) {
    let mock = MockRest::new();
    let connector = authenticated_connector(&mock).await;
    mock.set_route(Method::POST, "/api/v1/order", 200, ORDER_RESPONSE);
    (mock, connector)
}

#[tokio::test]
async fn test_authenticate_then_market_sell_truncates_quantity() {
    let mock = MockRest::new()
        .with_balances()
        .route(Method::POST, "/api/v1/order", 200, ORDER_RESPONSE);
    let connector = connector(&mock);

    connector.authenticate().await.unwrap();
    let response = connector
        .trading
        .submit_market_order(
            "0.123456789",
            OrderSide::Sell,
            "BTC_TRY",
            Some("my-order-1".to_string()),
        )
        .await
        .unwrap();

    let request = mock.last_request();
    assert_eq!(request.method, Method::POST);
    assert_eq!(request.endpoint, "/api/v1/order");

    let body = json_body(&request);
    assert_eq!(body["quantity"], "0.12345678");
    assert_eq!(body["orderMethod"], "market");
    assert_eq!(body["orderType"], "sell");
    assert_eq!(body["pairSymbol"], "BTC_TRY");
    assert_eq!(body["newOrderClientId"], "my-order-1");
    assert!(body.get("price").is_none());
    assert!(body.get("stopPrice").is_none());

    assert_eq!(response.order_id, "9932534");
    assert_eq!(response.client_order_id, "my-order-1");
    assert_eq!(response.symbol, Symbol::new("BTC", "TRY").unwrap());
    assert_eq!(response.side, OrderSide::Sell);
    assert_eq!(response.order_type, OrderType::Market);
    assert_eq!(response.quantity.value(), dec("0.12345678"));
}

#[tokio::test]
async fn test_market_buy_is_sized_at_price_scale() {
    let (mock, connector) = trading_mock().await;

    connector
        .trading
        .submit_market_order(&dec("1000.129"), OrderSide::Buy, "BTCTRY", None)
        .await
        .unwrap();

    let body = json_body(&mock.last_request());
    assert_eq!(body["quantity"], "1000.12");
    assert_eq!(body["pairSymbol"], "BTCTRY");

    let client_id = body["newOrderClientId"].as_str().unwrap();
    assert!(uuid::Uuid::parse_str(client_id).is_ok());
}

#[tokio::test]
async fn test_limit_order_formats_price_and_quantity() {
    let (mock, connector) = trading_mock().await;

    connector
        .trading
        .submit_limit_order("0.1", &1_250_000.555_f64, OrderSide::Buy, "BTC_TRY", None)
        .await
        .unwrap();

    let body = json_body(&mock.last_request());
    assert_eq!(body["quantity"], "0.10000000");
    assert_eq!(body["price"], "1250000.55");
    assert_eq!(body["orderMethod"], "limit");
    assert_eq!(body["orderType"], "buy");
}

#[tokio::test]
async fn test_stop_limit_order_formats_both_prices() {
    let (mock, connector) = trading_mock().await;

    connector
        .trading
        .submit_stop_order(
            "1200000.999",
            "0.5",
            "1190000.001",
            OrderSide::Sell,
            StopOrderMethod::StopLimit,
            "BTC_TRY",
            None,
        )
        .await
        .unwrap();

    let body = json_body(&mock.last_request());
    assert_eq!(body["stopPrice"], "1200000.99");
    assert_eq!(body["price"], "1190000.00");
    assert_eq!(body["quantity"], "0.50000000");
    assert_eq!(body["orderMethod"], "stopLimit");
}

#[tokio::test]
async fn test_pair_without_fractional_prices_uses_whole_numbers() {
    let mut table = PrecisionTable::new();
    table.insert("SHIB_TRY", PrecisionEntry::new(4, 0, false));

    let mock = MockRest::new()
        .with_balances()
        .route(Method::POST, "/api/v1/order", 200, ORDER_RESPONSE);
    let connector = BtcturkBuilder::new(credentials())
        .with_precision(PrecisionSource::Table(table))
        .build_with_rest(mock.clone())
        .await
        .unwrap();

    connector
        .trading
        .submit_limit_order("1500000.9", "0.0009", OrderSide::Buy, "shib_try", None)
        .await
        .unwrap();

    let body = json_body(&mock.last_request());
    assert_eq!(body["quantity"], "1500000");
    assert_eq!(body["price"], "0");
}

#[tokio::test]
async fn test_unknown_symbol_is_rejected_locally() {
    let (mock, connector) = trading_mock().await;
    let calls = mock.call_count();

    let err = connector
        .trading
        .submit_limit_order("1", "1", OrderSide::Buy, "FOO_BAR", None)
        .await
        .unwrap_err();

    assert!(matches!(err, ExchangeError::UnknownSymbol(_)));
    assert!(err.is_local());
    assert_eq!(mock.call_count(), calls);
}

#[tokio::test]
async fn test_invalid_numeric_input_is_rejected_locally() {
    let (mock, connector) = trading_mock().await;
    let calls = mock.call_count();

    let err = connector
        .trading
        .submit_market_order("one", OrderSide::Sell, "BTC_TRY", None)
        .await
        .unwrap_err();
    assert!(matches!(err, ExchangeError::InvalidNumericInput(_)));

    let err = connector
        .trading
        .submit_market_order(&f64::NAN, OrderSide::Sell, "BTC_TRY", None)
        .await
        .unwrap_err();
    assert!(matches!(err, ExchangeError::InvalidNumericInput(_)));

    assert_eq!(mock.call_count(), calls);
}

#[tokio::test]
async fn test_rejected_order_surfaces_server_message() {
    let (mock, connector) = trading_mock().await;
    mock.set_route(
        Method::POST,
        "/api/v1/order",
        200,
        r#"{"success":false,"message":"FAILED_MIN_TOTAL_AMOUNT","code":1118}"#,
    );

    let err = connector
        .trading
        .submit_limit_order("0.00001", "10", OrderSide::Buy, "BTC_TRY", None)
        .await
        .unwrap_err();

    match err {
        ExchangeError::InvalidParameter { message, .. } => {
            assert_eq!(message, "FAILED_MIN_TOTAL_AMOUNT");
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_place_order_through_trait() {
    let (mock, connector) = trading_mock().await;

    let order = OrderRequest {
        symbol: Symbol::new("ETH", "TRY").unwrap(),
        side: OrderSide::Sell,
        order_type: OrderType::Limit,
        quantity: Quantity::new(dec("1.123456789")),
        price: Some(Price::new(dec("95000.129"))),
        stop_price: None,
        client_order_id: None,
    };
    connector.place_order(order).await.unwrap();

    let body = json_body(&mock.last_request());
    assert_eq!(body["pairSymbol"], "ETH_TRY");
    assert_eq!(body["quantity"], "1.12345678");
    assert_eq!(body["price"], "95000.12");
}

#[tokio::test]
async fn test_place_limit_order_without_price_fails() {
    let (mock, connector) = trading_mock().await;
    let calls = mock.call_count();

    let order = OrderRequest {
        symbol: Symbol::new("BTC", "TRY").unwrap(),
        side: OrderSide::Buy,
        order_type: OrderType::Limit,
        quantity: Quantity::new(dec("1")),
        price: None,
        stop_price: None,
        client_order_id: None,
    };
    let err = connector.place_order(order).await.unwrap_err();

    assert!(matches!(err, ExchangeError::InvalidOrder(_)));
    assert_eq!(mock.call_count(), calls);
}

#[tokio::test]
async fn test_stop_market_order_falls_back_to_stop_price() {
    let (mock, connector) = trading_mock().await;

    let order = OrderRequest {
        symbol: Symbol::new("BTC", "TRY").unwrap(),
        side: OrderSide::Sell,
        order_type: OrderType::StopMarket,
        quantity: Quantity::new(dec("0.25")),
        price: None,
        stop_price: Some(Price::new(dec("1100000"))),
        client_order_id: None,
    };
    connector.place_order(order).await.unwrap();

    let body = json_body(&mock.last_request());
    assert_eq!(body["orderMethod"], "stopMarket");
    assert_eq!(body["stopPrice"], "1100000.00");
    assert_eq!(body["price"], "1100000.00");
}

#[tokio::test]
async fn test_cancel_order_returns_success_flag() {
    let (mock, connector) = trading_mock().await;
    mock.set_route(
        Method::DELETE,
        "/api/v1/order",
        200,
        r#"{"success":true,"message":"SUCCESS","code":0}"#,
    );

    let cancelled = connector.cancel_order(9932534).await.unwrap();

    assert!(cancelled);
    let request = mock.last_request();
    assert_eq!(request.method, Method::DELETE);
    assert_eq!(query_values(&request, "id"), vec!["9932534"]);
    assert!(request.body.is_none());
}

#[tokio::test]
async fn test_all_orders_requests_ids_from_the_given_one() {
    let (mock, connector) = trading_mock().await;
    mock.set_route(
        Method::GET,
        "/api/v1/allOrders",
        200,
        r#"{"success":true,"message":null,"code":0,"data":[
            {"id":1000,"price":"1250000","amount":"0.1","quantity":"0.1","stopPrice":"0",
             "pairsymbol":"BTCTRY","pairSymbolNormalized":"BTC_TRY","type":"buy","method":"limit",
             "orderClientId":"abc","time":1700000000000,"updateTime":1700000001000,
             "status":"Filled","leftAmount":"0"}
        ]}"#,
    );

    let orders = connector
        .trading
        .get_all_orders(AllOrdersQuery::new().from_order_id(1000).pair_symbol("BTC_TRY"))
        .await
        .unwrap();

    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0].id, 1000);
    assert_eq!(orders[0].pair_symbol, "BTCTRY");
    assert_eq!(orders[0].status, "Filled");

    let request = mock.last_request();
    assert_eq!(query_values(&request, "orderId"), vec!["999"]);
    assert_eq!(query_values(&request, "pairSymbol"), vec!["BTC_TRY"]);
    assert_eq!(query_values(&request, "limit"), vec!["100"]);
}
