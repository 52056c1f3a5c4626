use rust_decimal::Decimal;

use crate::domain::budget::{BudgetBreakdown, BudgetInput};

use super::allocation::allocate;
use super::confidence::confidence_score;
use super::factors::FactorResolver;
use super::recommend::generate_recommendations;
use super::savings::{estimate_savings, SavingsRateSource, ThreadRngRateSource};
use super::tables::BudgetTables;

/// Facade over the allocation, recommendation, savings and confidence
/// stages.
///
/// `compute` is synchronous and total: any well-typed input yields a
/// breakdown. Saving estimates carry the only randomness; everything else
/// is deterministic for a given table set.
pub struct BudgetEngine {
    tables: BudgetTables,
}

impl BudgetEngine {
    pub fn new() -> Self {
        Self::with_tables(BudgetTables::builtin())
    }

    /// Runs on caller-supplied tables. Tables from outside the crate should
    /// go through [`BudgetTables::validate`] first; the engine itself does
    /// not re-check them.
    pub fn with_tables(tables: BudgetTables) -> Self {
        Self { tables }
    }

    pub fn tables(&self) -> &BudgetTables {
        &self.tables
    }

    pub fn compute(&self, input: &BudgetInput) -> BudgetBreakdown {
        self.compute_with_rates(input, &mut ThreadRngRateSource)
    }

    /// Same as [`BudgetEngine::compute`] with the savings rate source
    /// injected, which makes the whole run reproducible.
    pub fn compute_with_rates(
        &self,
        input: &BudgetInput,
        rates: &mut dyn SavingsRateSource,
    ) -> BudgetBreakdown {
        let factors = FactorResolver::new(&self.tables).resolve(input);
        let allocations = allocate(&self.tables, input, &factors);
        let recommendations = generate_recommendations(&self.tables, input);
        let savings_suggestions = estimate_savings(&self.tables, input, &allocations, rates);
        let total_potential_savings: Decimal =
            savings_suggestions.iter().map(|suggestion| suggestion.potential_savings).sum();

        BudgetBreakdown {
            total_budget: input.total_budget,
            allocations,
            recommendations,
            savings_suggestions,
            total_potential_savings,
            confidence_score: confidence_score(input),
            regional_factor: factors.region.factor,
            seasonal_factor: factors.seasonal,
        }
    }
}

impl Default for BudgetEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    use crate::domain::budget::{BudgetInput, WeddingStyle};
    use crate::domain::category::CategoryId;
    use crate::engine::savings::{FixedRateSource, SeededRateSource};
    use crate::engine::tables::BudgetTables;
    use crate::engine::DISTRIBUTION_EPSILON;

    use super::BudgetEngine;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
    }

    fn vienna_summer() -> BudgetInput {
        BudgetInput::new(
            200,
            "Vienna",
            date(2025, 7, 15),
            WeddingStyle::Classic,
            Decimal::from(30_000u32),
        )
        .with_priorities(vec![CategoryId::Venue])
    }

    #[test]
    fn vienna_summer_scenario_resolves_all_expected_factors() {
        let engine = BudgetEngine::new();
        let breakdown = engine.compute_with_rates(&vienna_summer(), &mut FixedRateSource(0.15));

        assert!((breakdown.regional_factor - 1.25).abs() < 1e-9);
        assert!((breakdown.seasonal_factor - 1.15).abs() < 1e-9);
        assert_eq!(breakdown.total_budget, Decimal::from(30_000u32));
        assert_eq!(breakdown.confidence_score, 75);

        let venue = breakdown
            .allocations
            .iter()
            .find(|allocation| allocation.category == CategoryId::Venue)
            .expect("venue allocation");
        assert!(venue.is_priority);
        assert!(breakdown
            .allocations
            .iter()
            .all(|allocation| allocation.percentage <= venue.percentage));

        assert!(breakdown.recommendations.iter().any(|r| r.title == "Tiered Catering"));
        let last = breakdown.recommendations.last().expect("non-empty");
        assert_eq!(last.title, "Strategic Budget Allocation");
        assert!(last.description.contains("Venue & Location"));

        let off_season = breakdown
            .savings_suggestions
            .iter()
            .find(|suggestion| suggestion.title == "Consider Off-Season Date")
            .expect("July is peak season");
        assert_eq!(off_season.potential_savings, Decimal::from(4_500u32));

        let guest_trim = breakdown
            .savings_suggestions
            .iter()
            .find(|suggestion| suggestion.title == "Optimize Guest Count")
            .expect("200 guests exceed the threshold");
        assert_eq!(guest_trim.potential_savings, Decimal::from(15_000u32));
    }

    #[test]
    fn total_savings_is_the_sum_of_all_suggestions() {
        let engine = BudgetEngine::new();
        let breakdown = engine.compute_with_rates(&vienna_summer(), &mut FixedRateSource(0.12));

        let expected: Decimal = breakdown
            .savings_suggestions
            .iter()
            .map(|suggestion| suggestion.potential_savings)
            .sum();
        assert_eq!(breakdown.total_potential_savings, expected);
        assert!(breakdown.total_potential_savings > Decimal::ZERO);
    }

    #[test]
    fn percentages_sum_to_one_across_varied_inputs() {
        let engine = BudgetEngine::new();
        let inputs = [
            vienna_summer(),
            BudgetInput::new(
                30,
                "",
                date(2026, 1, 31),
                WeddingStyle::Outdoor,
                Decimal::from(5_000u32),
            ),
            BudgetInput::new(
                400,
                "Zurich Seefeld",
                date(2026, 10, 3),
                WeddingStyle::Vintage,
                Decimal::from(120_000u32),
            )
            .with_priorities(vec![
                CategoryId::Catering,
                CategoryId::Music,
                CategoryId::Photography,
            ]),
        ];

        for input in inputs {
            let breakdown = engine.compute_with_rates(&input, &mut FixedRateSource(0.1));
            let sum: f64 =
                breakdown.allocations.iter().map(|allocation| allocation.percentage).sum();
            assert!((sum - 1.0).abs() < DISTRIBUTION_EPSILON, "sum {sum}");

            let amounts: Decimal =
                breakdown.allocations.iter().map(|allocation| allocation.amount).sum();
            let slack = Decimal::from(breakdown.allocations.len());
            assert!((amounts - input.total_budget).abs() <= slack);
        }
    }

    #[test]
    fn repeated_runs_only_differ_in_savings_estimates() {
        let engine = BudgetEngine::new();
        let input = vienna_summer();

        let first = engine.compute(&input);
        let second = engine.compute(&input);

        assert_eq!(first.allocations, second.allocations);
        assert_eq!(first.recommendations, second.recommendations);
        assert_eq!(first.confidence_score, second.confidence_score);
    }

    #[test]
    fn seeded_runs_are_fully_reproducible() {
        let engine = BudgetEngine::new();
        let input = vienna_summer();

        let first = engine.compute_with_rates(&input, &mut SeededRateSource::new(42));
        let second = engine.compute_with_rates(&input, &mut SeededRateSource::new(42));

        assert_eq!(first, second);
    }

    #[test]
    fn custom_tables_drive_the_whole_pipeline() {
        let toml = r#"
[[categories]]
id = "venue"
name = "Venue"
base_percent = 70.0
region_sensitive = true
recommendations = ["Book early."]
saving_tips = ["Marry off-site."]

[[categories]]
id = "cake"
name = "Cake"
base_percent = 30.0

[[regions]]
region = "Vienna"
factor = 1.25
description = "Capital pricing"
aliases = ["vienna"]

[[styles]]
style = "modern"
factor = 1.1
description = "Design premium"
"#;
        let tables = BudgetTables::from_toml_str(toml, std::path::Path::new("inline.toml"))
            .expect("custom tables parse");
        let engine = BudgetEngine::with_tables(tables);

        let input = BudgetInput::new(
            90,
            "Vienna",
            date(2026, 6, 20),
            WeddingStyle::Modern,
            Decimal::from(10_000u32),
        );
        let breakdown = engine.compute_with_rates(&input, &mut FixedRateSource(0.1));

        assert_eq!(breakdown.allocations.len(), 2);
        let sum: f64 = breakdown.allocations.iter().map(|a| a.percentage).sum();
        assert!((sum - 1.0).abs() < DISTRIBUTION_EPSILON);
        assert!((breakdown.regional_factor - 1.25).abs() < 1e-9);
    }
}
