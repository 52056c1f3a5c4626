use chrono::Datelike;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_decimal::Decimal;

use crate::domain::budget::{BudgetInput, CategoryAllocation, SavingsSuggestion};

use super::factors::is_peak_month;
use super::tables::BudgetTables;
use super::{currency_share, GUEST_COUNT_BASELINE};

/// Lower bound of the per-category savings rate draw.
pub const SAVINGS_RATE_MIN: f64 = 0.10;
/// Exclusive upper bound of the per-category savings rate draw.
pub const SAVINGS_RATE_MAX: f64 = 0.20;

/// How many of the largest non-priority categories get a trim suggestion.
const TRIM_CANDIDATES: usize = 3;
/// Guest counts above this trigger the guest-list suggestion.
const GUEST_TRIM_THRESHOLD: u32 = 120;
/// Estimated saving per guest removed, in currency units.
const PER_GUEST_SAVING: i64 = 150;
/// Share of the total saved by moving out of the peak months.
const OFF_SEASON_RATE: f64 = 0.15;
/// Share of the total saved by avoiding a Saturday date.
const WEEKDAY_RATE: f64 = 0.10;

/// Supplies the bounded random rates behind per-category savings estimates.
///
/// This is the engine's only non-deterministic input. Production callers use
/// [`ThreadRngRateSource`]; reproducible runs inject [`SeededRateSource`] or
/// [`FixedRateSource`].
pub trait SavingsRateSource {
    /// Next rate, expected within `[SAVINGS_RATE_MIN, SAVINGS_RATE_MAX)`.
    fn next_rate(&mut self) -> f64;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct ThreadRngRateSource;

impl SavingsRateSource for ThreadRngRateSource {
    fn next_rate(&mut self) -> f64 {
        rand::thread_rng().gen_range(SAVINGS_RATE_MIN..SAVINGS_RATE_MAX)
    }
}

#[derive(Clone, Debug)]
pub struct SeededRateSource {
    rng: StdRng,
}

impl SeededRateSource {
    pub fn new(seed: u64) -> Self {
        Self { rng: StdRng::seed_from_u64(seed) }
    }
}

impl SavingsRateSource for SeededRateSource {
    fn next_rate(&mut self) -> f64 {
        self.rng.gen_range(SAVINGS_RATE_MIN..SAVINGS_RATE_MAX)
    }
}

/// Always returns the same rate. Intended for tests and worked examples.
#[derive(Clone, Copy, Debug)]
pub struct FixedRateSource(pub f64);

impl SavingsRateSource for FixedRateSource {
    fn next_rate(&mut self) -> f64 {
        self.0
    }
}

/// Builds the savings list: trims for the three largest non-priority
/// categories, then the guest-list, off-season and weekday rules.
///
/// Estimates are illustrative and may double-count a category; they are not
/// a mutually exclusive plan.
pub fn estimate_savings(
    tables: &BudgetTables,
    input: &BudgetInput,
    allocations: &[CategoryAllocation],
    rates: &mut dyn SavingsRateSource,
) -> Vec<SavingsSuggestion> {
    let mut suggestions = Vec::new();

    let mut candidates: Vec<&CategoryAllocation> =
        allocations.iter().filter(|allocation| !allocation.is_priority).collect();
    // Stable sort: equal amounts keep table order.
    candidates.sort_by(|a, b| b.amount.cmp(&a.amount));

    for allocation in candidates.into_iter().take(TRIM_CANDIDATES) {
        let Some(tip) = tables
            .category(allocation.category)
            .and_then(|definition| definition.saving_tips.first())
        else {
            continue;
        };

        let rate = rates.next_rate();
        suggestions.push(SavingsSuggestion {
            title: format!("Save on {}", allocation.name),
            description: tip.clone(),
            potential_savings: currency_share(allocation.amount, rate),
            category: allocation.name.clone(),
        });
    }

    if input.guest_count > GUEST_TRIM_THRESHOLD {
        let excess = i64::from(input.guest_count) - GUEST_COUNT_BASELINE as i64;
        suggestions.push(SavingsSuggestion {
            title: "Optimize Guest Count".to_string(),
            description: "Each guest beyond 100 adds roughly 150 in catering, rentals and \
                          stationery. A shorter list is the fastest saving there is."
                .to_string(),
            potential_savings: Decimal::from(excess * PER_GUEST_SAVING),
            category: "Catering & Drinks".to_string(),
        });
    }

    if is_peak_month(input.wedding_date.month()) {
        suggestions.push(SavingsSuggestion {
            title: "Consider Off-Season Date".to_string(),
            description: "Venues and photographers drop their rates between November and \
                          April; the same wedding costs around 15 percent less."
                .to_string(),
            potential_savings: currency_share(input.total_budget, OFF_SEASON_RATE),
            category: "Venue & Location".to_string(),
        });
    }

    suggestions.push(SavingsSuggestion {
        title: "Friday or Sunday Wedding".to_string(),
        description: "Saturday carries the highest venue premium of the week; moving one day \
                      either side typically saves 10 percent of the total."
            .to_string(),
        potential_savings: currency_share(input.total_budget, WEEKDAY_RATE),
        category: "Venue & Location".to_string(),
    });

    suggestions
}
