use dotenv::dotenv;
use log::{info, warn};
use std::env;
use std::net::SocketAddr;
use std::sync::Arc;
use warp::Filter;

use fii_dashboard::routes;
use fii_dashboard::services::fund_quotes::{FundQuoteService, QuoteServiceConfig};

#[tokio::main]
async fn main() {
    dotenv().ok();

    // Initialize the logger
    env_logger::init();
    info!("Logger initialized. Starting the application...");

    let port_str = env::var("PORT").unwrap_or_else(|_| {
        warn!("$PORT not set, defaulting to 3030");
        "3030".to_string()
    });

    let port: u16 = port_str.parse().expect("PORT must be a number");
    info!("Using PORT: {}", port);

    let jwt_secret = env::var("JWT_SECRET").unwrap_or_else(|_| {
        warn!("$JWT_SECRET not set, using the development secret");
        "dev-secret".to_string()
    });

    let config = QuoteServiceConfig::from_env();
    if config.api_token.is_none() {
        warn!("$BRAPI_TOKEN not set, provider calls go out unauthenticated");
    }
    let service = Arc::new(FundQuoteService::new(config));

    let addr: SocketAddr = ([0, 0, 0, 0], port).into();
    info!("Will bind to: {}", addr);

    // Set up CORS
    let cors = warp::cors()
        .allow_any_origin()
        .allow_header("content-type")
        .allow_header("authorization")
        .allow_methods(vec!["GET"]);

    // Set up routes
    let api = routes::routes(service, jwt_secret).with(cors);
    info!("Routes configured successfully with CORS.");

    // Start the server
    info!("Starting server on {}", addr);
    warp::serve(api).run(addr).await;
}
