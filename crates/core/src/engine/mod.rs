//! Wedding budget allocation and recommendation engine
//!
//! Turns one [`crate::BudgetInput`] into a full [`crate::BudgetBreakdown`]:
//! factor-weighted and normalized category allocations, ranked advice and
//! savings estimates with a bounded random component.

mod allocation;
mod breakdown;
mod confidence;
mod factors;
mod recommend;
mod savings;
mod tables;

pub use breakdown::BudgetEngine;
pub use confidence::{BASE_CONFIDENCE, MAX_CONFIDENCE};
pub use factors::{
    is_peak_month, seasonal_factor, FactorResolver, ResolvedFactors, Season, DEFAULT_STYLE_FACTOR,
    OFF_SEASON_FACTOR, PEAK_SEASON_FACTOR,
};
pub use savings::{
    FixedRateSource, SavingsRateSource, SeededRateSource, ThreadRngRateSource, SAVINGS_RATE_MAX,
    SAVINGS_RATE_MIN,
};
pub use tables::{BudgetTables, CategoryDefinition, RegionalFactor, StyleFactor};

use rust_decimal::{Decimal, RoundingStrategy};

/// Pre-normalization boost applied to prioritized categories.
pub const PRIORITY_BOOST: f64 = 1.3;

/// Guest count at which guest-sensitive categories neither grow nor shrink.
pub const GUEST_COUNT_BASELINE: f64 = 100.0;

/// Divisor turning guests-above-baseline into a weight adjustment.
pub const GUEST_SENSITIVITY_SCALE: f64 = 1000.0;

/// Tolerance when checking that normalized percentages sum to one.
pub const DISTRIBUTION_EPSILON: f64 = 1e-9;

/// Rounds to whole currency units, halves away from zero.
pub(crate) fn round_currency(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// Rounded currency share of `total`. `fraction` must be finite; the
/// conversion falls back to zero otherwise.
pub(crate) fn currency_share(total: Decimal, fraction: f64) -> Decimal {
    round_currency(total * Decimal::from_f64_retain(fraction).unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::{currency_share, round_currency};

    #[test]
    fn rounds_halves_away_from_zero() {
        assert_eq!(round_currency(Decimal::new(45, 1)), Decimal::from(5u32));
        assert_eq!(round_currency(Decimal::new(44, 1)), Decimal::from(4u32));
        assert_eq!(round_currency(Decimal::new(-45, 1)), Decimal::from(-5i32));
    }

    #[test]
    fn shares_are_rounded_to_whole_units() {
        assert_eq!(currency_share(Decimal::from(30_000u32), 0.15), Decimal::from(4_500u32));
        assert_eq!(currency_share(Decimal::from(999u32), 0.1), Decimal::from(100u32));
    }
}
