use btcturk_connector::core::config::ExchangeConfig;
use btcturk_connector::core::traits::{AccountInfo, MarketDataSource};
use btcturk_connector::exchanges::btcturk::{build_connector, HistoryQuery};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    // Credentials are optional; without them only public endpoints are used
    let config =
        ExchangeConfig::from_env("BTCTURK").unwrap_or_else(|_| ExchangeConfig::read_only());
    let connector = build_connector(config).await?;

    let time = connector.market.get_server_time().await?;
    println!("Server time: {} ({})", time.server_time, time.server_time_2);

    let ticker = connector.get_ticker("BTC_TRY").await?;
    println!(
        "{} last {} bid {} ask {} (24h {}%)",
        ticker.symbol, ticker.price, ticker.bid, ticker.ask, ticker.price_change_percent
    );

    let book = connector.get_order_book("BTC_TRY", Some(5)).await?;
    for (bid, ask) in book.bids.iter().zip(book.asks.iter()) {
        println!("  {} @ {}    {} @ {}", bid.quantity, bid.price, ask.quantity, ask.price);
    }

    if connector.is_authenticated() {
        for balance in connector.get_account_balance().await? {
            if !balance.total.value().is_zero() {
                println!("{}: {} free, {} locked", balance.asset, balance.free, balance.locked);
            }
        }

        let trades = connector
            .account
            .get_trade_history(HistoryQuery::new().symbols(["btc"]))
            .await?;
        println!("{} BTC trades in the last 30 days", trades.len());
    }

    Ok(())
}
