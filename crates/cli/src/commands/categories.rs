use bridget_core::config::{AppConfig, LoadOptions};
use bridget_core::engine::BudgetTables;
use serde::Serialize;

use crate::commands::CommandResult;

pub fn run(json_output: bool) -> CommandResult {
    let config = match AppConfig::load(LoadOptions::default()) {
        Ok(config) => config,
        Err(error) => {
            return CommandResult::failure(
                "categories",
                "config_validation",
                format!("configuration issue: {error}"),
                2,
            );
        }
    };

    let tables = match config.load_tables() {
        Ok(tables) => tables,
        Err(error) => {
            return CommandResult::failure("categories", "tables_validation", error.to_string(), 2);
        }
    };

    let output = if json_output { render_json(&tables) } else { render_text(&tables) };
    CommandResult { exit_code: 0, output }
}

fn render_json(tables: &BudgetTables) -> String {
    #[derive(Serialize)]
    struct CategoryRow<'a> {
        id: &'a str,
        name: &'a str,
        base_percent: f64,
        guest_count_sensitive: bool,
        region_sensitive: bool,
        style_sensitive: bool,
        season_sensitive: bool,
        recommendations: usize,
        saving_tips: usize,
    }

    let rows: Vec<CategoryRow<'_>> = tables
        .categories
        .iter()
        .map(|definition| CategoryRow {
            id: definition.id.key(),
            name: &definition.name,
            base_percent: definition.base_percent,
            guest_count_sensitive: definition.guest_count_sensitive,
            region_sensitive: definition.region_sensitive,
            style_sensitive: definition.style_sensitive,
            season_sensitive: definition.season_sensitive,
            recommendations: definition.recommendations.len(),
            saving_tips: definition.saving_tips.len(),
        })
        .collect();

    serde_json::to_string_pretty(&rows).unwrap_or_else(|error| {
        format!(
            "{{\"command\":\"categories\",\"status\":\"error\",\"error\":\"{}\"}}",
            error.to_string().replace('\\', "\\\\").replace('"', "\\\"")
        )
    })
}

fn render_text(tables: &BudgetTables) -> String {
    let mut lines = vec![format!(
        "category table ({} rows, base shares before normalization):",
        tables.categories.len()
    )];

    for definition in &tables.categories {
        let mut flags = Vec::new();
        if definition.guest_count_sensitive {
            flags.push("guests");
        }
        if definition.region_sensitive {
            flags.push("region");
        }
        if definition.style_sensitive {
            flags.push("style");
        }
        if definition.season_sensitive {
            flags.push("season");
        }
        let flags = if flags.is_empty() { "-".to_string() } else { flags.join("|") };

        lines.push(format!(
            "- {:<11} {:<24} {:>5.1}%  {flags}",
            definition.id.key(),
            definition.name,
            definition.base_percent,
        ));
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_table_lists_all_builtin_rows() {
        let tables = BudgetTables::builtin();
        let text = render_text(&tables);

        assert!(text.starts_with("category table (10 rows"));
        assert_eq!(text.lines().filter(|line| line.starts_with("- ")).count(), 10);
        assert!(text.contains("Venue & Location"));
        assert!(text.contains("guests|region|style|season"));
    }

    #[test]
    fn json_table_round_trips_row_fields() {
        let tables = BudgetTables::builtin();
        let parsed: serde_json::Value =
            serde_json::from_str(&render_json(&tables)).expect("valid json");

        let rows = parsed.as_array().expect("array of rows");
        assert_eq!(rows.len(), 10);
        assert_eq!(rows[0]["id"], "venue");
        assert_eq!(rows[0]["base_percent"], 25.0);
        assert_eq!(rows[0]["region_sensitive"], true);
    }
}
