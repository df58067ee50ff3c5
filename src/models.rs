// src/models.rs
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// One tradable fund as shown on the dashboard listing.
///
/// Numeric fields default to zero when the provider omits them, so downstream
/// arithmetic never has to deal with nulls. `dividend_yield` is a ratio
/// (0.104), never a pre-multiplied percentage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FundQuote {
    pub ticker: String,
    pub name: String,
    pub price: f64,
    pub change_percent: f64,
    pub last_dividend: f64,
    pub dividend_yield: f64,
    pub patrimony: f64,
    pub p_vp: f64,
    pub category: String,
    pub manager: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub price: f64,
}

/// Monthly distribution, `month` formatted as "YYYY-MM".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DividendPoint {
    pub month: String,
    pub value: f64,
}

/// Display-only allocation slice. Percentages are not required to sum to 100.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompositionSlice {
    pub label: String,
    pub percentage: f64,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FundDetails {
    pub ticker: String,
    pub name: String,
    pub price: f64,
    pub change_percent: f64,
    pub last_dividend: f64,
    pub dividend_yield: f64,
    pub patrimony: f64,
    pub p_vp: f64,
    pub category: String,
    pub manager: String,
    pub description: String,
    pub price_history: Vec<PricePoint>,
    pub dividend_history: Vec<DividendPoint>,
    pub composition: Vec<CompositionSlice>,
    pub last_update: DateTime<Utc>,
    pub asset_value: f64,
    pub liquid_patrimony: f64,
    pub daily_liquidity: f64,
    pub market_value: f64,
}

impl FundDetails {
    /// Assemble details from a base quote. The trailing convenience fields
    /// duplicate quote data in the shape the dashboard widgets expect.
    pub fn from_quote(
        quote: FundQuote,
        price_history: Vec<PricePoint>,
        dividend_history: Vec<DividendPoint>,
        composition: Vec<CompositionSlice>,
        last_update: DateTime<Utc>,
    ) -> Self {
        FundDetails {
            asset_value: quote.price,
            liquid_patrimony: quote.patrimony,
            daily_liquidity: quote.patrimony * 0.001,
            market_value: quote.patrimony * quote.p_vp,
            ticker: quote.ticker,
            name: quote.name,
            price: quote.price,
            change_percent: quote.change_percent,
            last_dividend: quote.last_dividend,
            dividend_yield: quote.dividend_yield,
            patrimony: quote.patrimony,
            p_vp: quote.p_vp,
            category: quote.category,
            manager: quote.manager,
            description: quote.description,
            price_history,
            dividend_history,
            composition,
            last_update,
        }
    }
}

/// Chart window requested by the dashboard. Labels arrive in the Portuguese
/// form the frontend shows, plus the short aliases used in query strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryPeriod {
    OneMonth,
    ThreeMonths,
    SixMonths,
    OneYear,
    Max,
}

impl HistoryPeriod {
    /// Unrecognized labels resolve to the smallest window rather than erroring.
    pub fn parse(label: &str) -> Self {
        match label.trim() {
            "1 Mês" | "1 Mes" | "1M" | "1m" | "1mo" => HistoryPeriod::OneMonth,
            "3 Meses" | "3M" | "3m" | "3mo" => HistoryPeriod::ThreeMonths,
            "6 Meses" | "6M" | "6m" | "6mo" => HistoryPeriod::SixMonths,
            "1 Ano" | "1A" | "1a" | "1y" | "12m" => HistoryPeriod::OneYear,
            "Máximo" | "Maximo" | "MAX" | "max" => HistoryPeriod::Max,
            _ => HistoryPeriod::OneMonth,
        }
    }

    pub fn day_count(&self) -> i64 {
        match self {
            HistoryPeriod::OneMonth => 30,
            HistoryPeriod::ThreeMonths => 90,
            HistoryPeriod::SixMonths => 180,
            HistoryPeriod::OneYear => 365,
            HistoryPeriod::Max => 365,
        }
    }

    /// Range parameter understood by the market-data provider.
    pub fn provider_range(&self) -> &'static str {
        match self {
            HistoryPeriod::OneMonth => "1mo",
            HistoryPeriod::ThreeMonths => "3mo",
            HistoryPeriod::SixMonths => "6mo",
            HistoryPeriod::OneYear => "1y",
            HistoryPeriod::Max => "max",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_display_labels() {
        assert_eq!(HistoryPeriod::parse("1 Mês"), HistoryPeriod::OneMonth);
        assert_eq!(HistoryPeriod::parse("3 Meses"), HistoryPeriod::ThreeMonths);
        assert_eq!(HistoryPeriod::parse("6 Meses"), HistoryPeriod::SixMonths);
        assert_eq!(HistoryPeriod::parse("1 Ano"), HistoryPeriod::OneYear);
        assert_eq!(HistoryPeriod::parse("Máximo"), HistoryPeriod::Max);
    }

    #[test]
    fn parses_short_aliases() {
        assert_eq!(HistoryPeriod::parse("1mo"), HistoryPeriod::OneMonth);
        assert_eq!(HistoryPeriod::parse("3m"), HistoryPeriod::ThreeMonths);
        assert_eq!(HistoryPeriod::parse("6M"), HistoryPeriod::SixMonths);
        assert_eq!(HistoryPeriod::parse("1y"), HistoryPeriod::OneYear);
        assert_eq!(HistoryPeriod::parse("max"), HistoryPeriod::Max);
    }

    #[test]
    fn unknown_label_falls_back_to_one_month() {
        assert_eq!(HistoryPeriod::parse("2 Semanas"), HistoryPeriod::OneMonth);
        assert_eq!(HistoryPeriod::parse(""), HistoryPeriod::OneMonth);
    }

    #[test]
    fn day_counts_match_windows() {
        assert_eq!(HistoryPeriod::OneMonth.day_count(), 30);
        assert_eq!(HistoryPeriod::ThreeMonths.day_count(), 90);
        assert_eq!(HistoryPeriod::SixMonths.day_count(), 180);
        assert_eq!(HistoryPeriod::OneYear.day_count(), 365);
    }

    #[test]
    fn details_derive_convenience_fields_from_quote() {
        let quote = FundQuote {
            ticker: "TEST11".to_string(),
            name: "Fundo Teste".to_string(),
            price: 100.0,
            change_percent: 1.2,
            last_dividend: 0.9,
            dividend_yield: 0.108,
            patrimony: 2_000_000_000.0,
            p_vp: 0.95,
            category: "Logística".to_string(),
            manager: "Teste Asset".to_string(),
            description: String::new(),
        };
        let details =
            FundDetails::from_quote(quote, Vec::new(), Vec::new(), Vec::new(), Utc::now());
        assert_eq!(details.asset_value, 100.0);
        assert_eq!(details.liquid_patrimony, 2_000_000_000.0);
        assert_eq!(details.market_value, 2_000_000_000.0 * 0.95);
        assert_eq!(details.daily_liquidity, 2_000_000_000.0 * 0.001);
    }
}
