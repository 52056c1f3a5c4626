use crate::domain::budget::BudgetInput;

/// Score before any completeness bonus.
pub const BASE_CONFIDENCE: u8 = 70;
/// Hard ceiling; the scorer never reports more than this.
pub const MAX_CONFIDENCE: u8 = 95;

const LOCATION_BONUS: u8 = 5;
const PRIORITY_BONUS: u8 = 5;
const PARTNER_BONUS: u8 = 2;
/// Priority lists at least this long count as a thought-through ranking.
const DETAILED_PRIORITIES: usize = 3;

/// Input-completeness heuristic. More supplied detail means tighter factor
/// resolution, so the score grows with each optional field and never drops
/// below [`BASE_CONFIDENCE`].
pub fn confidence_score(input: &BudgetInput) -> u8 {
    let mut score = BASE_CONFIDENCE;

    if !input.location.is_empty() {
        score += LOCATION_BONUS;
    }
    if input.priorities.len() >= DETAILED_PRIORITIES {
        score += PRIORITY_BONUS;
    }
    if input.partner_names.both_present() {
        score += PARTNER_BONUS;
    }

    score.min(MAX_CONFIDENCE)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    use crate::domain::budget::{BudgetInput, WeddingStyle};
    use crate::domain::category::CategoryId;

    use super::{confidence_score, BASE_CONFIDENCE, MAX_CONFIDENCE};

    fn bare_input() -> BudgetInput {
        BudgetInput::new(
            80,
            "",
            NaiveDate::from_ymd_opt(2026, 5, 9).expect("valid date"),
            WeddingStyle::Boho,
            Decimal::from(15_000u32),
        )
    }

    #[test]
    fn bare_inputs_score_the_base() {
        assert_eq!(confidence_score(&bare_input()), BASE_CONFIDENCE);
    }

    #[test]
    fn each_optional_detail_raises_the_score() {
        let mut input = bare_input();
        let base = confidence_score(&input);

        input.location = "Salzburg".to_string();
        let with_location = confidence_score(&input);
        assert_eq!(with_location, base + 5);

        input.priorities =
            vec![CategoryId::Venue, CategoryId::Photography, CategoryId::Flowers];
        let with_priorities = confidence_score(&input);
        assert_eq!(with_priorities, with_location + 5);

        input = input.with_partner_names(Some("Mara".to_string()), Some("Jon".to_string()));
        assert_eq!(confidence_score(&input), with_priorities + 2);
    }

    #[test]
    fn two_priorities_do_not_earn_the_ranking_bonus() {
        let input = bare_input().with_priorities(vec![CategoryId::Venue, CategoryId::Music]);
        assert_eq!(confidence_score(&input), BASE_CONFIDENCE);
    }

    #[test]
    fn one_missing_partner_name_earns_nothing() {
        let input = bare_input().with_partner_names(Some("Mara".to_string()), None);
        assert_eq!(confidence_score(&input), BASE_CONFIDENCE);

        let empty_second =
            bare_input().with_partner_names(Some("Mara".to_string()), Some(String::new()));
        assert_eq!(confidence_score(&empty_second), BASE_CONFIDENCE);
    }

    #[test]
    fn score_is_always_within_the_published_window() {
        let mut fully_specified = bare_input()
            .with_priorities(vec![
                CategoryId::Venue,
                CategoryId::Catering,
                CategoryId::Photography,
                CategoryId::Music,
                CategoryId::Flowers,
            ])
            .with_partner_names(Some("Mara".to_string()), Some("Jon".to_string()));
        fully_specified.location = "Vienna".to_string();

        let score = confidence_score(&fully_specified);
        assert!((BASE_CONFIDENCE..=MAX_CONFIDENCE).contains(&score));
        assert_eq!(score, 82);
    }
}
