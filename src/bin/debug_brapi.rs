// src/bin/debug_brapi.rs
use fii_dashboard::services::brapi;

#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error + Send + Sync>> {
    env_logger::init();
    let client = reqwest::Client::new();
    let token = std::env::var("BRAPI_TOKEN").ok();

    let listing = brapi::fetch_listing(&client, brapi::DEFAULT_BASE_URL, token.as_deref()).await?;
    println!("Listed instruments: {}", listing.stocks.len());

    let quote = brapi::fetch_fund_quote(
        &client,
        brapi::DEFAULT_BASE_URL,
        token.as_deref(),
        "MXRF11",
        "1mo",
    )
    .await?;
    println!("MXRF11 quote: {} ({:+.2}%)", quote.price, quote.change_percent);

    let history = brapi::fetch_price_history(
        &client,
        brapi::DEFAULT_BASE_URL,
        token.as_deref(),
        "MXRF11",
        "1mo",
    )
    .await?;
    println!("MXRF11 1mo history points: {}", history.len());
    Ok(())
}
