//! Commodity quote entity model and DTOs.

use agripress_core::trend::Trend;
use agripress_core::types::{DbId, Timestamp};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A quote row from the `quotes` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Quote {
    pub id: DbId,
    pub soy: Decimal,
    pub rice: Decimal,
    pub corn: Decimal,
    pub recorded_at: Timestamp,
}

/// The most recent quote with per-commodity direction against the sample
/// before it.
#[derive(Debug, Clone, Serialize)]
pub struct QuoteWithTrend {
    #[serde(flatten)]
    pub quote: Quote,
    pub soy_trend: Trend,
    pub rice_trend: Trend,
    pub corn_trend: Trend,
}

impl QuoteWithTrend {
    /// Classify each commodity of `latest` against `previous`.
    ///
    /// With no previous sample every trend is `Stable`.
    pub fn from_samples(latest: Quote, previous: Option<&Quote>) -> Self {
        match previous {
            Some(prev) => Self {
                soy_trend: Trend::classify(latest.soy, prev.soy),
                rice_trend: Trend::classify(latest.rice, prev.rice),
                corn_trend: Trend::classify(latest.corn, prev.corn),
                quote: latest,
            },
            None => Self {
                quote: latest,
                soy_trend: Trend::Stable,
                rice_trend: Trend::Stable,
                corn_trend: Trend::Stable,
            },
        }
    }
}

/// DTO for registering a new quote sample.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateQuote {
    pub soy: Decimal,
    pub rice: Decimal,
    pub corn: Decimal,
}

/// DTO for correcting an existing sample. All three values are required,
/// matching the full-value update the admin UI submits.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateQuote {
    pub soy: Decimal,
    pub rice: Decimal,
    pub corn: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use std::str::FromStr;

    fn quote(id: i64, soy: &str, rice: &str, corn: &str) -> Quote {
        Quote {
            id,
            soy: Decimal::from_str(soy).unwrap(),
            rice: Decimal::from_str(rice).unwrap(),
            corn: Decimal::from_str(corn).unwrap(),
            recorded_at: Utc::now(),
        }
    }

    #[test]
    fn trends_classified_per_commodity() {
        let latest = quote(2, "12.00", "8.00", "10.00");
        let previous = quote(1, "10.00", "10.00", "10.00");

        let with_trend = QuoteWithTrend::from_samples(latest, Some(&previous));
        assert_eq!(with_trend.soy_trend, Trend::Up);
        assert_eq!(with_trend.rice_trend, Trend::Down);
        assert_eq!(with_trend.corn_trend, Trend::Stable);
    }

    #[test]
    fn single_sample_is_stable_across_the_board() {
        let latest = quote(1, "12.00", "8.00", "10.00");

        let with_trend = QuoteWithTrend::from_samples(latest, None);
        assert_eq!(with_trend.soy_trend, Trend::Stable);
        assert_eq!(with_trend.rice_trend, Trend::Stable);
        assert_eq!(with_trend.corn_trend, Trend::Stable);
    }
}
