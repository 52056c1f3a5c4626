use chrono::{Local, Months};

/// Starter input aimed one year out so it passes validation as printed.
pub fn run() -> String {
    let today = Local::now().date_naive();
    let date = today.checked_add_months(Months::new(12)).unwrap_or(today);

    format!(
        r#"# Wedding input for `bridget plan --input wedding.toml`.
# Keep the date quoted. Styles: modern, rustic, classic, boho, vintage, outdoor.
guest_count = 120
location = "Vienna"
wedding_date = "{date}"
style = "classic"
total_budget = 25000

# Up to five distinct categories; ids come from `bridget categories`.
priorities = ["venue", "photography"]

[partner_names]
partner_one = "Alex"
partner_two = "Sam"
"#
    )
}

#[cfg(test)]
mod tests {
    use bridget_core::domain::budget::BudgetInput;
    use chrono::Local;

    use super::*;

    #[test]
    fn sample_parses_and_validates_as_printed() {
        let input: BudgetInput = toml::from_str(&run()).expect("sample should parse");

        input.validate(Local::now().date_naive()).expect("sample should validate");
        assert_eq!(input.guest_count, 120);
        assert_eq!(input.priorities.len(), 2);
        assert!(input.partner_names.both_present());
    }
}
