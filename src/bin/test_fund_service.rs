// src/bin/test_fund_service.rs
use fii_dashboard::models::HistoryPeriod;
use fii_dashboard::services::fund_quotes::{FundQuoteService, QuoteServiceConfig};

#[tokio::main]
async fn main() {
    env_logger::init();
    let service = FundQuoteService::new(QuoteServiceConfig::from_env());

    let funds = service.list_all_funds().await;
    println!(
        "Funds listed: {} (backup mode: {})",
        funds.len(),
        service.backup_mode_active()
    );

    if let Some(details) = service.get_fund_details("MXRF11").await {
        println!(
            "MXRF11: price {:.2}, yield {:.2}%, {} dividend points",
            details.price,
            details.dividend_yield * 100.0,
            details.dividend_history.len()
        );
    }

    let history = service
        .get_price_history("HGLG11", HistoryPeriod::ThreeMonths)
        .await;
    println!("HGLG11 3-month history: {} points", history.len());
}
