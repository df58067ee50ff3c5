// src/handlers/funds.rs
use log::{error, info};
use serde::Deserialize;
use std::sync::Arc;
use warp::reply::Json;
use warp::Rejection;

use crate::models::HistoryPeriod;
use crate::services::fund_quotes::FundQuoteService;

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    pub period: Option<String>,
}

pub async fn list_funds(service: Arc<FundQuoteService>) -> Result<Json, Rejection> {
    info!("Handling request to list funds");
    let funds = service.list_all_funds().await;
    info!(
        "Returning {} funds (backup mode: {})",
        funds.len(),
        service.backup_mode_active()
    );
    Ok(warp::reply::json(&funds))
}

pub async fn fund_details(
    ticker: String,
    service: Arc<FundQuoteService>,
) -> Result<Json, Rejection> {
    info!("Handling request for details of {}", ticker);
    match service.get_fund_details(&ticker).await {
        Some(details) => Ok(warp::reply::json(&details)),
        None => {
            error!("No details resolved for {}", ticker);
            Err(warp::reject::not_found())
        }
    }
}

pub async fn price_history(
    ticker: String,
    query: HistoryQuery,
    service: Arc<FundQuoteService>,
) -> Result<Json, Rejection> {
    let period = HistoryPeriod::parse(query.period.as_deref().unwrap_or("1 Mês"));
    info!("Handling history request for {} ({:?})", ticker, period);
    let points = service.get_price_history(&ticker, period).await;
    Ok(warp::reply::json(&points))
}
