use anyhow::Context;
use bridget_core::config::{AppConfig, LoadOptions};
use bridget_core::domain::budget::{BudgetInput, WeddingStyle};
use bridget_core::domain::category::CategoryId;
use bridget_core::engine::{
    BudgetEngine, BudgetTables, FixedRateSource, BASE_CONFIDENCE, DISTRIBUTION_EPSILON,
    MAX_CONFIDENCE,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::commands::CommandResult;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
enum CheckStatus {
    Pass,
    Fail,
    Skipped,
}

#[derive(Debug, Serialize)]
struct DoctorCheck {
    name: &'static str,
    status: CheckStatus,
    details: String,
}

#[derive(Debug, Serialize)]
struct DoctorReport {
    overall_status: CheckStatus,
    summary: String,
    checks: Vec<DoctorCheck>,
}

pub fn run(json_output: bool) -> CommandResult {
    let report = build_report();
    let failed = report.overall_status == CheckStatus::Fail;

    let output = if json_output {
        serde_json::to_string_pretty(&report).unwrap_or_else(|error| {
            format!(
                "{{\"overall_status\":\"fail\",\"summary\":\"doctor serialization failed\",\"error\":\"{}\"}}",
                escape_json(&error.to_string())
            )
        })
    } else {
        render_human(&report)
    };

    CommandResult { exit_code: if failed { 2 } else { 0 }, output }
}

fn build_report() -> DoctorReport {
    let mut checks = Vec::new();

    let config = match AppConfig::load(LoadOptions::default()) {
        Ok(config) => {
            checks.push(DoctorCheck {
                name: "config_validation",
                status: CheckStatus::Pass,
                details: "configuration loaded and validated".to_string(),
            });
            Some(config)
        }
        Err(error) => {
            checks.push(DoctorCheck {
                name: "config_validation",
                status: CheckStatus::Fail,
                details: error.to_string(),
            });
            None
        }
    };

    let tables = match &config {
        Some(config) => match load_validated_tables(config) {
            Ok(tables) => {
                checks.push(DoctorCheck {
                    name: "tables_validation",
                    status: CheckStatus::Pass,
                    details: format!(
                        "{} categories, {} regions, {} styles",
                        tables.categories.len(),
                        tables.regions.len(),
                        tables.styles.len()
                    ),
                });
                Some(tables)
            }
            Err(details) => {
                checks.push(DoctorCheck {
                    name: "tables_validation",
                    status: CheckStatus::Fail,
                    details,
                });
                None
            }
        },
        None => {
            checks.push(skipped("tables_validation"));
            None
        }
    };

    match tables {
        Some(tables) => match self_check(tables) {
            Ok(details) => checks.push(DoctorCheck {
                name: "engine_self_check",
                status: CheckStatus::Pass,
                details,
            }),
            Err(error) => checks.push(DoctorCheck {
                name: "engine_self_check",
                status: CheckStatus::Fail,
                details: format!("{error:#}"),
            }),
        },
        None => checks.push(skipped("engine_self_check")),
    }

    let all_pass = checks.iter().all(|check| check.status == CheckStatus::Pass);
    let overall_status = if all_pass { CheckStatus::Pass } else { CheckStatus::Fail };
    let summary = if all_pass {
        "doctor: all readiness checks passed".to_string()
    } else {
        "doctor: one or more readiness checks failed".to_string()
    };

    DoctorReport { overall_status, summary, checks }
}

fn load_validated_tables(config: &AppConfig) -> Result<BudgetTables, String> {
    let tables = config.load_tables().map_err(|error| error.to_string())?;
    tables.validate().map_err(|error| error.to_string())?;
    Ok(tables)
}

/// Runs the engine over a canned wedding and asserts the properties that
/// hold for any table set: a normalized distribution, bounded rounding
/// drift and a bounded confidence score.
fn self_check(tables: BudgetTables) -> anyhow::Result<String> {
    let wedding_date =
        NaiveDate::from_ymd_opt(2030, 6, 15).context("self-check date out of range")?;
    let budget = Decimal::from(20_000u32);
    let input = BudgetInput::new(150, "Vienna", wedding_date, WeddingStyle::Classic, budget)
        .with_priorities(vec![CategoryId::Venue]);

    let engine = BudgetEngine::with_tables(tables);
    let breakdown = engine.compute_with_rates(&input, &mut FixedRateSource(0.15));

    let percent_sum: f64 =
        breakdown.allocations.iter().map(|allocation| allocation.percentage).sum();
    anyhow::ensure!(
        (percent_sum - 1.0).abs() <= DISTRIBUTION_EPSILON,
        "allocation percentages sum to {percent_sum}, expected 1.0"
    );

    let amount_total: Decimal =
        breakdown.allocations.iter().map(|allocation| allocation.amount).sum();
    let drift = (amount_total - breakdown.total_budget).abs();
    anyhow::ensure!(
        drift <= Decimal::from(breakdown.allocations.len()),
        "rounded amounts drift {drift} away from the total"
    );

    anyhow::ensure!(
        (BASE_CONFIDENCE..=MAX_CONFIDENCE).contains(&breakdown.confidence_score),
        "confidence score {} outside [{BASE_CONFIDENCE}, {MAX_CONFIDENCE}]",
        breakdown.confidence_score
    );
    anyhow::ensure!(!breakdown.recommendations.is_empty(), "no recommendations generated");

    Ok(format!(
        "computed {} allocations at confidence {}",
        breakdown.allocations.len(),
        breakdown.confidence_score
    ))
}

fn skipped(name: &'static str) -> DoctorCheck {
    DoctorCheck {
        name,
        status: CheckStatus::Skipped,
        details: "skipped because an earlier check failed".to_string(),
    }
}

fn render_human(report: &DoctorReport) -> String {
    let mut lines = Vec::new();
    lines.push(report.summary.clone());

    for check in &report.checks {
        let marker = match check.status {
            CheckStatus::Pass => "ok",
            CheckStatus::Fail => "fail",
            CheckStatus::Skipped => "skip",
        };
        lines.push(format!("- [{marker}] {}: {}", check.name, check.details));
    }

    lines.join("\n")
}

fn escape_json(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}
