use std::fs;
use std::path::Path;

use bridget_core::config::{AppConfig, LoadOptions};
use bridget_core::domain::budget::{BudgetBreakdown, BudgetInput};
use bridget_core::engine::{BudgetEngine, SeededRateSource};
use chrono::Local;

use crate::commands::CommandResult;

pub fn run(input_path: &Path, json_output: bool, top: usize, seed: Option<u64>) -> CommandResult {
    let config = match AppConfig::load(LoadOptions::default()) {
        Ok(config) => config,
        Err(error) => {
            return CommandResult::failure(
                "plan",
                "config_validation",
                format!("configuration issue: {error}"),
                2,
            );
        }
    };

    let tables = match config.load_tables() {
        Ok(tables) => tables,
        Err(error) => {
            return CommandResult::failure("plan", "tables_validation", error.to_string(), 2);
        }
    };

    let raw = match fs::read_to_string(input_path) {
        Ok(raw) => raw,
        Err(error) => {
            return CommandResult::failure(
                "plan",
                "input_io",
                format!("failed to read `{}`: {error}", input_path.display()),
                3,
            );
        }
    };

    let input: BudgetInput = match toml::from_str(&raw) {
        Ok(input) => input,
        Err(error) => {
            return CommandResult::failure(
                "plan",
                "input_parse",
                format!("invalid wedding input: {error}"),
                2,
            );
        }
    };

    if let Err(error) = input.validate(Local::now().date_naive()) {
        return CommandResult::failure("plan", "input_validation", error.to_string(), 2);
    }

    let engine = BudgetEngine::with_tables(tables);
    let breakdown = match seed {
        Some(seed) => engine.compute_with_rates(&input, &mut SeededRateSource::new(seed)),
        None => engine.compute(&input),
    };

    tracing::info!(
        event_name = "cli.plan.computed",
        guest_count = input.guest_count,
        categories = breakdown.allocations.len(),
        confidence_score = breakdown.confidence_score,
        "budget plan computed"
    );

    if json_output {
        let output = serde_json::to_string_pretty(&breakdown).unwrap_or_else(|error| {
            format!(
                "{{\"command\":\"plan\",\"status\":\"error\",\"error\":\"{}\"}}",
                escape_json(&error.to_string())
            )
        });
        return CommandResult { exit_code: 0, output };
    }

    let output = render_report(&input, &breakdown, top, &config.display.currency);
    CommandResult { exit_code: 0, output }
}

fn render_report(
    input: &BudgetInput,
    breakdown: &BudgetBreakdown,
    top: usize,
    currency: &str,
) -> String {
    let mut lines = Vec::new();

    let partners = (&input.partner_names.partner_one, &input.partner_names.partner_two);
    if let (Some(one), Some(two)) = partners {
        if !one.is_empty() && !two.is_empty() {
            lines.push(format!("plan for {one} & {two}"));
        }
    }

    let place = if input.location.trim().is_empty() {
        String::new()
    } else {
        format!(" in {}", input.location)
    };
    lines.push(format!(
        "wedding on {}{place}: {} guests, {} style",
        input.wedding_date, input.guest_count, input.style
    ));
    lines.push(format!(
        "total budget {} {currency} | regional factor {:.2} | seasonal factor {:.2} | confidence {}%",
        breakdown.total_budget,
        breakdown.regional_factor,
        breakdown.seasonal_factor,
        breakdown.confidence_score,
    ));

    lines.push(String::new());
    lines.push("allocations:".to_string());
    for allocation in &breakdown.allocations {
        let marker = if allocation.is_priority { "  [priority]" } else { "" };
        lines.push(format!(
            "- {:<24} {:>5.1}%  {:>8} {currency}{marker}",
            allocation.name,
            allocation.percentage * 100.0,
            allocation.amount.to_string(),
        ));
    }

    let ranked = breakdown.top_recommendations(top);
    if !ranked.is_empty() {
        lines.push(String::new());
        lines.push("top recommendations:".to_string());
        for recommendation in ranked {
            lines.push(format!(
                "- [{}] {} ({})",
                recommendation.impact, recommendation.title, recommendation.category
            ));
            lines.push(format!("  {}", recommendation.description));
        }
    }

    if !breakdown.savings_suggestions.is_empty() {
        lines.push(String::new());
        lines.push("savings suggestions:".to_string());
        for suggestion in &breakdown.savings_suggestions {
            lines.push(format!(
                "- {}: {} {currency}",
                suggestion.title, suggestion.potential_savings
            ));
            lines.push(format!("  {}", suggestion.description));
        }
        lines.push(format!(
            "potential savings identified: {} {currency}",
            breakdown.total_potential_savings
        ));
    }

    lines.join("\n")
}

fn escape_json(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

#[cfg(test)]
mod tests {
    use bridget_core::domain::budget::WeddingStyle;
    use bridget_core::domain::category::CategoryId;
    use bridget_core::engine::FixedRateSource;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    use super::*;

    fn vienna_input() -> BudgetInput {
        BudgetInput::new(
            200,
            "Vienna",
            NaiveDate::from_ymd_opt(2025, 7, 15).expect("valid date"),
            WeddingStyle::Classic,
            Decimal::from(30_000u32),
        )
        .with_priorities(vec![CategoryId::Venue])
    }

    fn breakdown_for(input: &BudgetInput) -> BudgetBreakdown {
        BudgetEngine::new().compute_with_rates(input, &mut FixedRateSource(0.15))
    }

    #[test]
    fn report_lists_every_allocation_with_priority_marker() {
        let input = vienna_input();
        let breakdown = breakdown_for(&input);
        let report = render_report(&input, &breakdown, 3, "EUR");

        for allocation in &breakdown.allocations {
            assert!(report.contains(&allocation.name), "missing {}", allocation.name);
        }
        let venue_line = report
            .lines()
            .find(|line| line.contains("Venue & Location") && line.starts_with('-'))
            .expect("venue allocation line");
        assert!(venue_line.ends_with("[priority]"));
        assert!(report.contains("regional factor 1.25"));
        assert!(report.contains("confidence 75%"));
    }

    #[test]
    fn report_caps_recommendations_at_top() {
        let input = vienna_input();
        let breakdown = breakdown_for(&input);
        let report = render_report(&input, &breakdown, 2, "EUR");

        let shown = report.lines().filter(|line| line.starts_with("- [")).count();
        assert_eq!(shown, 2);
    }

    #[test]
    fn report_skips_location_when_blank() {
        let mut input = vienna_input();
        input.location = "  ".to_string();
        let breakdown = breakdown_for(&input);
        let report = render_report(&input, &breakdown, 3, "EUR");

        let header = report.lines().find(|line| line.starts_with("wedding on")).expect("header");
        assert!(!header.contains(" in "));
        assert!(report.contains("regional factor 1.00"));
    }

    #[test]
    fn report_names_both_partners_when_present() {
        let input =
            vienna_input().with_partner_names(Some("Anna".to_string()), Some("Max".to_string()));
        let breakdown = breakdown_for(&input);
        let report = render_report(&input, &breakdown, 3, "EUR");

        assert!(report.starts_with("plan for Anna & Max"));
    }
}
