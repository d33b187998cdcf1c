//! Directional classification of commodity price movements.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Direction of a commodity price between the two most recent quotes.
///
/// Serialized lowercase (`"up"`, `"down"`, `"stable"`) for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
    Stable,
}

impl Trend {
    /// Compare the newest value against the previous one.
    ///
    /// Exact decimal comparison, no epsilon: equal values are `Stable`.
    pub fn classify(current: Decimal, previous: Decimal) -> Self {
        use std::cmp::Ordering;
        match current.cmp(&previous) {
            Ordering::Greater => Trend::Up,
            Ordering::Less => Trend::Down,
            Ordering::Equal => Trend::Stable,
        }
    }
}

impl Default for Trend {
    /// With no previous sample there is nothing to compare against.
    fn default() -> Self {
        Trend::Stable
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn equal_values_are_stable() {
        assert_eq!(Trend::classify(dec("10.00"), dec("10.00")), Trend::Stable);
    }

    #[test]
    fn higher_current_is_up() {
        assert_eq!(Trend::classify(dec("12.00"), dec("10.00")), Trend::Up);
    }

    #[test]
    fn lower_current_is_down() {
        assert_eq!(Trend::classify(dec("8.00"), dec("10.00")), Trend::Down);
    }

    #[test]
    fn comparison_ignores_trailing_zeros() {
        // 10.0 and 10.00 are the same decimal value, not an epsilon match.
        assert_eq!(Trend::classify(dec("10.0"), dec("10.00")), Trend::Stable);
    }

    #[test]
    fn one_cent_difference_is_enough() {
        assert_eq!(Trend::classify(dec("10.01"), dec("10.00")), Trend::Up);
        assert_eq!(Trend::classify(dec("9.99"), dec("10.00")), Trend::Down);
    }

    #[test]
    fn serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Trend::Up).unwrap(), "\"up\"");
        assert_eq!(serde_json::to_string(&Trend::Down).unwrap(), "\"down\"");
        assert_eq!(serde_json::to_string(&Trend::Stable).unwrap(), "\"stable\"");
    }

    #[test]
    fn default_is_stable() {
        assert_eq!(Trend::default(), Trend::Stable);
    }
}
