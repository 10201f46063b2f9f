pub mod auth;
pub mod classifier;
pub mod constants;
pub mod conversions;
pub mod precision;
pub mod signer;
pub mod types;

pub mod builder;
pub mod connector;
pub mod rest;

// Re-export main components
pub use auth::AuthState;
pub use builder::{build_connector, build_connector_with_precision, BtcturkBuilder, PrecisionSource};
pub use classifier::{classify, ClassifiedResponse, ErrorOutcome, RequestKind};
pub use connector::{
    Account, AllOrdersQuery, BtcturkConnector, HistoryQuery, MarketData, StopOrderMethod, Trading,
};
pub use precision::{format_unit, DecimalInput, PrecisionEntry, PrecisionTable};
pub use rest::BtcturkRest;
pub use signer::{sign, BtcturkSigner};
pub use types::{
    BtcturkBalance, BtcturkExchangeInfo, BtcturkOhlc, BtcturkOrderBook, BtcturkOrderRequest,
    BtcturkOrderResponse, BtcturkSymbolInfo, BtcturkTicker, BtcturkTrade, OpenOrder, OpenOrders,
    ServerTime, Transaction, UserTrade,
};
