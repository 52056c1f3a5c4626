use crate::domain::budget::{BudgetInput, CategoryAllocation};

use super::factors::ResolvedFactors;
use super::tables::{BudgetTables, CategoryDefinition};
use super::{currency_share, GUEST_COUNT_BASELINE, GUEST_SENSITIVITY_SCALE, PRIORITY_BOOST};

/// Weighs every category, normalizes the shares and prices them.
///
/// Output order is table order. Amounts are rounded independently, so their
/// sum can drift from the total by up to one unit per category; the drift is
/// deliberately not redistributed.
pub fn allocate(
    tables: &BudgetTables,
    input: &BudgetInput,
    factors: &ResolvedFactors,
) -> Vec<CategoryAllocation> {
    let weights: Vec<f64> = tables
        .categories
        .iter()
        .map(|definition| weighted_percent(definition, input, factors))
        .collect();
    // Positive by table validation: every base percent and factor is > 0.
    let total_weight: f64 = weights.iter().sum();

    tables
        .categories
        .iter()
        .zip(weights)
        .map(|(definition, weight)| {
            let percentage = weight / total_weight;
            CategoryAllocation {
                category: definition.id,
                name: definition.name.clone(),
                percentage,
                amount: currency_share(input.total_budget, percentage),
                is_priority: input.priorities.contains(&definition.id),
            }
        })
        .collect()
}

/// Pre-normalization weight for one category: base percent, priority boost,
/// then each factor the row opts into.
pub(super) fn weighted_percent(
    definition: &CategoryDefinition,
    input: &BudgetInput,
    factors: &ResolvedFactors,
) -> f64 {
    let mut percent = definition.base_percent;

    if input.priorities.contains(&definition.id) {
        percent *= PRIORITY_BOOST;
    }
    if definition.guest_count_sensitive {
        percent *=
            1.0 + (f64::from(input.guest_count) - GUEST_COUNT_BASELINE) / GUEST_SENSITIVITY_SCALE;
    }
    if definition.region_sensitive {
        percent *= factors.region.factor;
    }
    if definition.style_sensitive {
        percent *= factors.style;
    }
    if definition.season_sensitive {
        percent *= factors.seasonal;
    }

    percent
}
