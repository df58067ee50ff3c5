// src/services/synthetic.rs
//
// Pure generators for the synthetic data the service serves in backup mode.
// Every function takes the RNG as a parameter so callers can seed it.

use chrono::{Datelike, Duration, NaiveDate};
use rand::Rng;

use crate::models::{DividendPoint, FundQuote, PricePoint};

pub const FILLER_CATEGORIES: &[&str] = &[
    "Recebíveis",
    "Logística",
    "Lajes Corporativas",
    "Shoppings",
    "Fundo de Fundos",
    "Híbrido",
];

pub const FILLER_MANAGERS: &[&str] = &[
    "BTG Pactual",
    "XP Asset",
    "Kinea",
    "CSHG",
    "Vinci Partners",
    "RBR Asset",
    "Hedge Investments",
];

/// Padding entries used to bring a fund list up to its target size. They
/// carry no informational value; categories and managers rotate round-robin
/// and the numbers are drawn from plausible ranges.
pub fn filler_funds(count: usize, rng: &mut impl Rng) -> Vec<FundQuote> {
    (0..count)
        .map(|i| {
            let ticker = format!("F{:03}11", i);
            let price = rng.gen_range(8.0..250.0);
            let last_dividend = price * rng.gen_range(0.005..0.011);
            FundQuote {
                name: format!("Fundo Imobiliário {}", ticker),
                price,
                change_percent: rng.gen_range(-3.0..3.0),
                last_dividend,
                dividend_yield: last_dividend * 12.0 / price,
                patrimony: rng.gen_range(5.0e7..3.0e9),
                p_vp: rng.gen_range(0.7..1.3),
                category: FILLER_CATEGORIES[i % FILLER_CATEGORIES.len()].to_string(),
                manager: FILLER_MANAGERS[i % FILLER_MANAGERS.len()].to_string(),
                description: format!(
                    "Cota {} listada em bolsa, carteira diversificada de ativos imobiliários.",
                    ticker
                ),
                ticker,
            }
        })
        .collect()
}

/// One point per calendar day from `days` back through `end` inclusive,
/// each price within 5% of the base price.
pub fn jittered_history(
    base_price: f64,
    days: i64,
    end: NaiveDate,
    rng: &mut impl Rng,
) -> Vec<PricePoint> {
    (0..=days)
        .rev()
        .map(|offset| PricePoint {
            date: end - Duration::days(offset),
            price: base_price * rng.gen_range(0.95..=1.05),
        })
        .collect()
}

/// Twelve monthly distributions ending in `end`'s month, most recent last,
/// each within 10% of the fund's last dividend.
pub fn dividend_history(
    last_dividend: f64,
    end: NaiveDate,
    rng: &mut impl Rng,
) -> Vec<DividendPoint> {
    let mut year = end.year();
    let mut month = end.month();
    let mut points = Vec::with_capacity(12);
    for _ in 0..12 {
        points.push(DividendPoint {
            month: format!("{:04}-{:02}", year, month),
            value: last_dividend * rng.gen_range(0.9..=1.1),
        });
        if month == 1 {
            month = 12;
            year -= 1;
        } else {
            month -= 1;
        }
    }
    points.reverse();
    points
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn filler_is_deterministic_for_a_fixed_seed() {
        let mut a = StdRng::seed_from_u64(42);
        let mut b = StdRng::seed_from_u64(42);
        assert_eq!(filler_funds(25, &mut a), filler_funds(25, &mut b));
    }

    #[test]
    fn filler_tickers_are_unique_and_end_in_share_suffix() {
        let mut rng = StdRng::seed_from_u64(1);
        let funds = filler_funds(100, &mut rng);
        assert_eq!(funds.len(), 100);
        let mut tickers: Vec<&str> = funds.iter().map(|f| f.ticker.as_str()).collect();
        tickers.dedup();
        assert_eq!(tickers.len(), 100);
        assert!(tickers.iter().all(|t| t.ends_with("11") && t.len() == 6));
    }

    #[test]
    fn filler_yield_is_consistent_with_dividend_and_price() {
        let mut rng = StdRng::seed_from_u64(2);
        for fund in filler_funds(50, &mut rng) {
            let implied = fund.last_dividend * 12.0 / fund.price;
            assert!((fund.dividend_yield - implied).abs() < 1e-9);
        }
    }

    #[test]
    fn one_month_history_is_31_ascending_points_within_bounds() {
        let mut rng = StdRng::seed_from_u64(3);
        let end = NaiveDate::from_ymd_opt(2026, 8, 6).unwrap();
        let points = jittered_history(100.0, 30, end, &mut rng);
        assert_eq!(points.len(), 31);
        assert_eq!(points.last().unwrap().date, end);
        assert!(points.windows(2).all(|w| w[0].date < w[1].date));
        assert!(points.iter().all(|p| p.price >= 95.0 && p.price <= 105.0));
    }

    #[test]
    fn dividend_history_spans_twelve_months_most_recent_last() {
        let mut rng = StdRng::seed_from_u64(4);
        let end = NaiveDate::from_ymd_opt(2026, 2, 15).unwrap();
        let points = dividend_history(1.0, end, &mut rng);
        assert_eq!(points.len(), 12);
        assert_eq!(points.last().unwrap().month, "2026-02");
        assert_eq!(points.first().unwrap().month, "2025-03");
        assert!(points.iter().all(|p| p.value >= 0.9 && p.value <= 1.1));
    }
}
