use chrono::{Datelike, NaiveDate};

use super::tables::{BudgetTables, RegionalFactor};
use crate::domain::budget::{BudgetInput, WeddingStyle};

/// Multiplier for dates inside the May through October booking window.
pub const PEAK_SEASON_FACTOR: f64 = 1.15;
/// Multiplier for off-season dates.
pub const OFF_SEASON_FACTOR: f64 = 0.9;
/// Applied when the style table has no row for the requested style.
pub const DEFAULT_STYLE_FACTOR: f64 = 1.0;

/// Meteorological season buckets used for season-specific advice.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Season {
    Spring,
    Summer,
    Fall,
    Winter,
}

impl Season {
    pub fn from_date(date: NaiveDate) -> Self {
        Self::from_month(date.month())
    }

    /// `month` is 1-based as in [`chrono::Datelike::month`].
    pub fn from_month(month: u32) -> Self {
        match month {
            3..=5 => Season::Spring,
            6..=8 => Season::Summer,
            9..=11 => Season::Fall,
            _ => Season::Winter,
        }
    }
}

pub fn is_peak_month(month: u32) -> bool {
    (5..=10).contains(&month)
}

pub fn seasonal_factor(date: NaiveDate) -> f64 {
    if is_peak_month(date.month()) {
        PEAK_SEASON_FACTOR
    } else {
        OFF_SEASON_FACTOR
    }
}

/// Resolves free-text location and style inputs against the loaded tables.
pub struct FactorResolver<'a> {
    tables: &'a BudgetTables,
}

impl<'a> FactorResolver<'a> {
    pub fn new(tables: &'a BudgetTables) -> Self {
        Self { tables }
    }

    /// Ordered scan over the region table. The first region with an alias
    /// contained in the lowercased location wins; anything unmatched,
    /// including an empty location, resolves to the neutral row.
    pub fn regional(&self, location: &str) -> RegionalFactor {
        let haystack = location.to_lowercase();
        self.tables
            .regions
            .iter()
            .find(|region| {
                region.aliases.iter().any(|alias| haystack.contains(&alias.to_lowercase()))
            })
            .cloned()
            .unwrap_or_else(RegionalFactor::neutral)
    }

    pub fn style(&self, style: WeddingStyle) -> f64 {
        self.tables
            .styles
            .iter()
            .find(|factor| factor.style == style)
            .map(|factor| factor.factor)
            .unwrap_or(DEFAULT_STYLE_FACTOR)
    }

    pub fn resolve(&self, input: &BudgetInput) -> ResolvedFactors {
        ResolvedFactors {
            region: self.regional(&input.location),
            style: self.style(input.style),
            seasonal: seasonal_factor(input.wedding_date),
        }
    }
}

/// Everything one allocation pass needs to know about the input's context.
#[derive(Clone, Debug)]
pub struct ResolvedFactors {
    pub region: RegionalFactor,
    pub style: f64,
    pub seasonal: f64,
}
