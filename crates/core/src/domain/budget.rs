use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::category::CategoryId;
use crate::errors::InputError;

/// Closed set of wedding styles with table-driven cost factors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeddingStyle {
    Modern,
    Rustic,
    Classic,
    Boho,
    Vintage,
    Outdoor,
}

impl WeddingStyle {
    pub const ALL: [WeddingStyle; 6] = [
        WeddingStyle::Modern,
        WeddingStyle::Rustic,
        WeddingStyle::Classic,
        WeddingStyle::Boho,
        WeddingStyle::Vintage,
        WeddingStyle::Outdoor,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            WeddingStyle::Modern => "modern",
            WeddingStyle::Rustic => "rustic",
            WeddingStyle::Classic => "classic",
            WeddingStyle::Boho => "boho",
            WeddingStyle::Vintage => "vintage",
            WeddingStyle::Outdoor => "outdoor",
        }
    }
}

impl fmt::Display for WeddingStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for WeddingStyle {
    type Err = InputError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase();
        WeddingStyle::ALL
            .iter()
            .copied()
            .find(|style| style.key() == normalized)
            .ok_or_else(|| InputError::UnknownStyle(value.to_string()))
    }
}

/// Relative weight of a recommendation when only a subset is shown.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Impact {
    High,
    Medium,
    Low,
}

impl Impact {
    /// Sort key for display ordering. Lower ranks surface first.
    pub fn rank(&self) -> u8 {
        match self {
            Impact::High => 0,
            Impact::Medium => 1,
            Impact::Low => 2,
        }
    }
}

impl fmt::Display for Impact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Impact::High => "high",
            Impact::Medium => "medium",
            Impact::Low => "low",
        };
        f.write_str(label)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartnerNames {
    pub partner_one: Option<String>,
    pub partner_two: Option<String>,
}

impl PartnerNames {
    /// True when both names were supplied and neither is the empty string.
    pub fn both_present(&self) -> bool {
        let filled = |name: &Option<String>| name.as_deref().is_some_and(|n| !n.is_empty());
        filled(&self.partner_one) && filled(&self.partner_two)
    }
}

/// Everything the engine needs to plan one wedding budget.
///
/// `validate` is an advisory gate for interactive callers; the engine itself
/// accepts any input and stays total over it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BudgetInput {
    pub guest_count: u32,
    pub location: String,
    pub wedding_date: NaiveDate,
    pub style: WeddingStyle,
    pub total_budget: Decimal,
    #[serde(default)]
    pub priorities: Vec<CategoryId>,
    #[serde(default)]
    pub partner_names: PartnerNames,
}

impl BudgetInput {
    pub const MAX_PRIORITIES: usize = 5;
    pub const MIN_TOTAL_BUDGET: Decimal = Decimal::ONE_THOUSAND;

    pub fn new(
        guest_count: u32,
        location: impl Into<String>,
        wedding_date: NaiveDate,
        style: WeddingStyle,
        total_budget: Decimal,
    ) -> Self {
        Self {
            guest_count,
            location: location.into(),
            wedding_date,
            style,
            total_budget,
            priorities: Vec::new(),
            partner_names: PartnerNames::default(),
        }
    }

    pub fn with_priorities(mut self, priorities: Vec<CategoryId>) -> Self {
        self.priorities = priorities;
        self
    }

    pub fn with_partner_names(
        mut self,
        partner_one: Option<String>,
        partner_two: Option<String>,
    ) -> Self {
        self.partner_names = PartnerNames { partner_one, partner_two };
        self
    }

    /// Checks the input against planning-form limits.
    ///
    /// Priorities keep their caller order; duplicates are rejected rather
    /// than deduplicated so the caller learns about the mistake.
    pub fn validate(&self, today: NaiveDate) -> Result<(), InputError> {
        if self.guest_count == 0 {
            return Err(InputError::NoGuests);
        }

        if self.total_budget < Self::MIN_TOTAL_BUDGET {
            return Err(InputError::BudgetTooSmall { minimum: Self::MIN_TOTAL_BUDGET });
        }

        if self.wedding_date < today {
            return Err(InputError::DateInPast { date: self.wedding_date });
        }

        if self.priorities.len() > Self::MAX_PRIORITIES {
            return Err(InputError::TooManyPriorities {
                count: self.priorities.len(),
                max: Self::MAX_PRIORITIES,
            });
        }

        for (index, category) in self.priorities.iter().enumerate() {
            if self.priorities[..index].contains(category) {
                return Err(InputError::DuplicatePriority { category: *category });
            }
        }

        Ok(())
    }
}

/// One category's slice of the plan after factor weighting and normalization.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CategoryAllocation {
    pub category: CategoryId,
    pub name: String,
    /// Normalized share of the total budget in `[0, 1]`.
    pub percentage: f64,
    /// Rounded currency amount. Rounding drift is deliberately not
    /// redistributed, so amounts can miss the total by a few units.
    pub amount: Decimal,
    pub is_priority: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub title: String,
    pub description: String,
    pub impact: Impact,
    /// Display label of the category the advice concerns.
    pub category: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SavingsSuggestion {
    pub title: String,
    pub description: String,
    pub potential_savings: Decimal,
    pub category: String,
}

/// Complete result of one engine run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BudgetBreakdown {
    pub total_budget: Decimal,
    pub allocations: Vec<CategoryAllocation>,
    pub recommendations: Vec<Recommendation>,
    pub savings_suggestions: Vec<SavingsSuggestion>,
    pub total_potential_savings: Decimal,
    /// Heuristic confidence in the plan, always within `[70, 95]`.
    pub confidence_score: u8,
    pub regional_factor: f64,
    pub seasonal_factor: f64,
}

impl BudgetBreakdown {
    /// Highest-impact recommendations first, ties kept in generation order.
    pub fn top_recommendations(&self, limit: usize) -> Vec<&Recommendation> {
        let mut ranked: Vec<&Recommendation> = self.recommendations.iter().collect();
        ranked.sort_by_key(|recommendation| recommendation.impact.rank());
        ranked.truncate(limit);
        ranked
    }
}
