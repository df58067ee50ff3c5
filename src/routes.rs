// src/routes.rs
use std::convert::Infallible;
use std::sync::Arc;

use log::info;
use warp::reject::Rejection;
use warp::{Filter, Reply};

use crate::handlers::error::ApiError;
use crate::handlers::{funds, premium};
use crate::services::fund_quotes::FundQuoteService;

// Add recovery handling for our custom errors
async fn handle_rejection(err: Rejection) -> Result<impl Reply, Infallible> {
    let (code, message) = if err.is_not_found() {
        (warp::http::StatusCode::NOT_FOUND, "Not Found".to_string())
    } else if let Some(api_error) = err.find::<ApiError>() {
        (api_error.status, api_error.message.clone())
    } else {
        (
            warp::http::StatusCode::INTERNAL_SERVER_ERROR,
            "Internal Server Error".to_string(),
        )
    };

    Ok(warp::reply::with_status(
        warp::reply::json(&serde_json::json!({
            "error": message,
        })),
        code,
    ))
}

pub fn routes(
    service: Arc<FundQuoteService>,
    jwt_secret: String,
) -> impl Filter<Extract = impl Reply, Error = Infallible> + Clone {
    info!("Configuring routes...");

    let service_filter = warp::any().map(move || service.clone());
    let premium = premium::require_premium(jwt_secret);

    let funds_route = warp::path!("api" / "v1" / "funds")
        .and(warp::get())
        .and(service_filter.clone())
        .and_then(funds::list_funds);

    let details_route = warp::path!("api" / "v1" / "funds" / String)
        .and(warp::get())
        .and(premium.clone())
        .and(service_filter.clone())
        .and_then(funds::fund_details);

    let history_route = warp::path!("api" / "v1" / "funds" / String / "history")
        .and(warp::get())
        .and(premium)
        .and(warp::query::<funds::HistoryQuery>())
        .and(service_filter)
        .and_then(funds::price_history);

    info!("All routes configured successfully.");

    funds_route
        .or(details_route)
        .or(history_route)
        .recover(handle_rejection)
}
