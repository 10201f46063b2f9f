/// Default REST host
pub const DEFAULT_BASE_URL: &str = "https://api.btcturk.com";

/// Public market data endpoints
pub const PUBLIC_PREFIX: &str = "/api/v2/";

/// Signed account and trading endpoints
pub const PRIVATE_PREFIX: &str = "/api/v1/";

/// Signed deposit, withdrawal and trade history endpoints
pub const TRANSACTIONS_PREFIX: &str = "/api/v1/users/transactions/";

pub const EXCHANGE_NAME: &str = "btcturk";

/// Default look-back window of the history endpoints
pub const DEFAULT_HISTORY_DAYS: i64 = 30;

pub const DEFAULT_OHLC_LAST: u32 = 10;
pub const DEFAULT_ORDER_BOOK_LIMIT: u32 = 100;
pub const DEFAULT_TRADES_LAST: u32 = 50;
pub const DEFAULT_ALL_ORDERS_LIMIT: u32 = 100;

/// Crypto assets queried by default in trade and crypto history
pub const CRYPTO_SYMBOLS: [&str; 11] = [
    "btc", "eos", "eth", "dash", "atom", "usdt", "ltc", "xlm", "xrp", "neo", "link",
];

/// Fiat currencies queried by default in fiat history
pub const CURRENCY_SYMBOLS: [&str; 1] = ["try"];

pub const TRADE_TYPES: [&str; 2] = ["buy", "sell"];

pub const DEPOSIT_OR_WITHDRAWAL: [&str; 2] = ["deposit", "withdrawal"];

/// Compiled scale limits as (pair, price scale, amount scale)
///
/// Used when the exchange info endpoint is not consulted. Only covers the
/// pairs listed here; newer pairs need a fetched table.
pub const BUILTIN_SCALES: [(&str, u32, u32); 33] = [
    ("BTCTRY", 2, 8),
    ("ETHBTC", 5, 8),
    ("ETHTRY", 2, 8),
    ("XRPTRY", 3, 4),
    ("LTCTRY", 1, 8),
    ("USDTTRY", 3, 2),
    ("BTCUSDT", 0, 8),
    ("ETHUSDT", 1, 8),
    ("XRPUSDT", 4, 4),
    ("LTCUSDT", 2, 8),
    ("XLMTRY", 4, 4),
    ("LTCBTC", 6, 8),
    ("XRPBTC", 8, 4),
    ("XLMBTC", 8, 4),
    ("XLMUSDT", 5, 4),
    ("NEOTRY", 2, 4),
    ("NEOBTC", 6, 8),
    ("NEOUSDT", 2, 4),
    ("EOSTRY", 2, 2),
    ("EOSUSDT", 3, 2),
    ("EOSBTC", 7, 4),
    ("DASHTRY", 1, 8),
    ("DASHBTC", 5, 8),
    ("DASHUSDT", 1, 8),
    ("LINKTRY", 2, 2),
    ("LINKUSDT", 3, 2),
    ("LINKBTC", 7, 4),
    ("ATOMTRY", 2, 2),
    ("ATOMUSDT", 3, 2),
    ("ATOMBTC", 7, 4),
    ("XTZTRY", 2, 2),
    ("XTZUSDT", 3, 2),
    ("XTZBTC", 7, 4),
];
