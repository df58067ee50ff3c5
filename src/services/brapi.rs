// src/services/brapi.rs
use chrono::DateTime;
use log::{debug, info};
use reqwest::Client;
use serde::Deserialize;

use crate::models::{FundQuote, PricePoint};
use crate::BoxError;

pub const DEFAULT_BASE_URL: &str = "https://brapi.dev";

/// One instrument from the listing endpoint.
#[derive(Debug, Deserialize)]
pub struct ListedStock {
    pub stock: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub close: Option<f64>,
    #[serde(default)]
    pub change: Option<f64>,
    #[serde(rename = "dividendsPerShare", default)]
    pub dividends_per_share: Option<f64>,
    #[serde(rename = "dividendYield", default)]
    pub dividend_yield: Option<f64>,
    #[serde(rename = "priceToBook", default)]
    pub price_to_book: Option<f64>,
    #[serde(rename = "marketCap", default)]
    pub market_cap: Option<f64>,
    #[serde(default)]
    pub sector: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ListResponse {
    #[serde(default)]
    pub stocks: Vec<ListedStock>,
}

#[derive(Debug, Deserialize)]
pub struct QuoteResponse {
    #[serde(default)]
    pub results: Vec<QuoteResult>,
}

#[derive(Debug, Deserialize)]
pub struct QuoteResult {
    pub symbol: String,
    #[serde(rename = "longName", default)]
    pub long_name: Option<String>,
    #[serde(rename = "shortName", default)]
    pub short_name: Option<String>,
    #[serde(rename = "regularMarketPrice", default)]
    pub regular_market_price: Option<f64>,
    #[serde(rename = "regularMarketChangePercent", default)]
    pub regular_market_change_percent: Option<f64>,
    #[serde(rename = "dividendsPerShare", default)]
    pub dividends_per_share: Option<f64>,
    #[serde(rename = "dividendYield", default)]
    pub dividend_yield: Option<f64>,
    #[serde(rename = "priceToBook", default)]
    pub price_to_book: Option<f64>,
    #[serde(rename = "marketCap", default)]
    pub market_cap: Option<f64>,
    #[serde(default)]
    pub sector: Option<String>,
    #[serde(rename = "historicalDataPrice", default)]
    pub historical: Vec<HistoricalPrice>,
}

#[derive(Debug, Deserialize)]
pub struct HistoricalPrice {
    pub date: i64,
    #[serde(default)]
    pub close: Option<f64>,
}

// The token travels in the query string, so URLs must stay out of the logs.
fn with_token(mut url: String, token: Option<&str>) -> String {
    if let Some(token) = token {
        url.push_str("&token=");
        url.push_str(token);
    }
    url
}

/// Fetch the full instrument listing.
pub async fn fetch_listing(
    client: &Client,
    base_url: &str,
    token: Option<&str>,
) -> Result<ListResponse, BoxError> {
    let url = with_token(
        format!("{}/api/quote/list?type=fund&limit=2000", base_url),
        token,
    );
    info!("Fetching fund listing from provider at {}", base_url);

    let response = client.get(&url).send().await?.error_for_status()?;
    let listing = response.json::<ListResponse>().await?;
    debug!("Provider listing returned {} instruments", listing.stocks.len());
    Ok(listing)
}

async fn fetch_quote_payload(
    client: &Client,
    base_url: &str,
    token: Option<&str>,
    ticker: &str,
    range: &str,
) -> Result<QuoteResult, BoxError> {
    let url = with_token(
        format!(
            "{}/api/quote/{}?range={}&interval=1d&fundamental=true",
            base_url, ticker, range
        ),
        token,
    );
    info!("Fetching quote for {} (range {})", ticker, range);

    let response = client.get(&url).send().await?.error_for_status()?;
    let payload = response.json::<QuoteResponse>().await?;
    payload
        .results
        .into_iter()
        .next()
        .ok_or_else(|| format!("Empty results array in quote response for {}", ticker).into())
}

/// Fetch the per-ticker fundamentals as a `FundQuote`.
pub async fn fetch_fund_quote(
    client: &Client,
    base_url: &str,
    token: Option<&str>,
    ticker: &str,
    range: &str,
) -> Result<FundQuote, BoxError> {
    let result = fetch_quote_payload(client, base_url, token, ticker, range).await?;
    quote_from_result(result)
}

/// Fetch the per-ticker daily closes, oldest first.
pub async fn fetch_price_history(
    client: &Client,
    base_url: &str,
    token: Option<&str>,
    ticker: &str,
    range: &str,
) -> Result<Vec<PricePoint>, BoxError> {
    let result = fetch_quote_payload(client, base_url, token, ticker, range).await?;
    let mut points: Vec<PricePoint> = result
        .historical
        .into_iter()
        .filter_map(|p| {
            let price = p.close?;
            let date = DateTime::from_timestamp(p.date, 0)?.date_naive();
            Some(PricePoint { date, price })
        })
        .collect();
    points.sort_by_key(|p| p.date);
    Ok(points)
}

pub fn quote_from_listing(stock: ListedStock) -> FundQuote {
    let ticker = stock.stock.trim().to_ascii_uppercase();
    let name = stock.name.unwrap_or_else(|| ticker.clone());
    FundQuote {
        price: stock.close.unwrap_or_default(),
        change_percent: stock.change.unwrap_or_default(),
        last_dividend: stock.dividends_per_share.unwrap_or_default(),
        // provider reports yield as a percentage
        dividend_yield: stock.dividend_yield.unwrap_or_default() / 100.0,
        patrimony: stock.market_cap.unwrap_or_default(),
        p_vp: stock.price_to_book.unwrap_or_default(),
        category: stock.sector.unwrap_or_default(),
        manager: String::new(),
        description: format!("Fundo imobiliário {}", name),
        ticker,
        name,
    }
}

pub fn quote_from_result(result: QuoteResult) -> Result<FundQuote, BoxError> {
    // A 200 without a market price is a malformed payload, not a quote.
    let price = result
        .regular_market_price
        .ok_or("Quote response missing regularMarketPrice")?;
    let ticker = result.symbol.trim().to_ascii_uppercase();
    let name = result
        .long_name
        .or(result.short_name)
        .unwrap_or_else(|| ticker.clone());
    Ok(FundQuote {
        price,
        change_percent: result.regular_market_change_percent.unwrap_or_default(),
        last_dividend: result.dividends_per_share.unwrap_or_default(),
        dividend_yield: result.dividend_yield.unwrap_or_default() / 100.0,
        patrimony: result.market_cap.unwrap_or_default(),
        p_vp: result.price_to_book.unwrap_or_default(),
        category: result.sector.unwrap_or_default(),
        manager: String::new(),
        description: format!("Fundo imobiliário {}", name),
        ticker,
        name,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const LISTING_JSON: &str = r#"{
        "stocks": [
            {
                "stock": "mxrf11",
                "name": "Maxi Renda FII",
                "close": 10.45,
                "change": 0.38,
                "dividendsPerShare": 0.10,
                "dividendYield": 11.5,
                "priceToBook": 1.02,
                "marketCap": 2800000000.0,
                "sector": "Recebíveis"
            },
            { "stock": "PETR4", "name": "Petrobras" }
        ]
    }"#;

    #[test]
    fn listing_maps_with_zero_defaults() {
        let listing: ListResponse = serde_json::from_str(LISTING_JSON).unwrap();
        assert_eq!(listing.stocks.len(), 2);

        let mxrf = quote_from_listing(listing.stocks.into_iter().next().unwrap());
        assert_eq!(mxrf.ticker, "MXRF11");
        assert_eq!(mxrf.price, 10.45);
        assert!((mxrf.dividend_yield - 0.115).abs() < 1e-9);
    }

    #[test]
    fn omitted_numerics_default_to_zero() {
        let listing: ListResponse = serde_json::from_str(LISTING_JSON).unwrap();
        let petr = quote_from_listing(listing.stocks.into_iter().nth(1).unwrap());
        assert_eq!(petr.price, 0.0);
        assert_eq!(petr.last_dividend, 0.0);
        assert_eq!(petr.p_vp, 0.0);
    }

    #[test]
    fn quote_without_price_is_malformed() {
        let payload: QuoteResponse =
            serde_json::from_str(r#"{"results": [{"symbol": "MXRF11"}]}"#).unwrap();
        let result = payload.results.into_iter().next().unwrap();
        assert!(quote_from_result(result).is_err());
    }
}
