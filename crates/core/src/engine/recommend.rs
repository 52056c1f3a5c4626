use crate::domain::budget::{BudgetInput, Impact, Recommendation};

use super::factors::Season;
use super::tables::BudgetTables;

/// Guest counts above this get the tiered-catering advice.
const LARGE_GUEST_LIST: u32 = 150;

/// Concatenates the four rule sets in fixed order: style, season, guest
/// count, then priorities, with the strategic catch-all always last. The
/// list is emission-ordered, not ranked; display layers sort by impact via
/// [`crate::BudgetBreakdown::top_recommendations`].
pub fn generate_recommendations(tables: &BudgetTables, input: &BudgetInput) -> Vec<Recommendation> {
    let mut recommendations = Vec::new();

    recommendations.push(style_recommendation(input));
    recommendations.push(season_recommendation(Season::from_date(input.wedding_date)));

    if input.guest_count > LARGE_GUEST_LIST {
        recommendations.push(Recommendation {
            title: "Tiered Catering".to_string(),
            description: "With a list this size, serve a full dinner to the wedding party and \
                          close family, and a relaxed buffet for the wider circle."
                .to_string(),
            impact: Impact::Medium,
            category: "Catering & Drinks".to_string(),
        });
    }

    for priority in &input.priorities {
        let Some(definition) = tables.category(*priority) else { continue };
        let Some(advice) = definition.recommendations.first() else { continue };
        recommendations.push(Recommendation {
            title: format!("Prioritize {}", definition.name),
            description: advice.clone(),
            impact: Impact::High,
            category: definition.name.clone(),
        });
    }

    recommendations.push(strategic_catch_all(tables, input));
    recommendations
}

fn style_recommendation(input: &BudgetInput) -> Recommendation {
    use crate::domain::budget::WeddingStyle;

    let (title, description, impact, category) = match input.style {
        WeddingStyle::Modern => (
            "Modern Lines Need Light",
            "Spend on architectural venues and lighting design; minimal decor only works when \
             the space itself performs.",
            Impact::Medium,
            "Decoration & Rentals",
        ),
        WeddingStyle::Rustic => (
            "Lean Into the Setting",
            "A barn or vineyard brings its own character, so shift budget from decor toward \
             food and drink quality.",
            Impact::Medium,
            "Venue & Location",
        ),
        WeddingStyle::Classic => (
            "Invest in the Room",
            "Classic weddings live from the ballroom and live music; both book out first and \
             carry premiums.",
            Impact::High,
            "Venue & Location",
        ),
        WeddingStyle::Boho => (
            "Let the Outdoors Decorate",
            "Open-air settings and loose wildflowers replace formal arrangements at a fraction \
             of the cost.",
            Impact::Medium,
            "Flowers & Bouquets",
        ),
        WeddingStyle::Vintage => (
            "Source Heirlooms Early",
            "Antique rentals and heirloom pieces take months to find; start sourcing before \
             the decor budget is fixed.",
            Impact::Medium,
            "Decoration & Rentals",
        ),
        WeddingStyle::Outdoor => (
            "Plan the Weather Exit",
            "Budget for tenting or an indoor fallback from day one; last-minute weather cover \
             costs triple.",
            Impact::High,
            "Venue & Location",
        ),
    };

    Recommendation {
        title: title.to_string(),
        description: description.to_string(),
        impact,
        category: category.to_string(),
    }
}

fn season_recommendation(season: Season) -> Recommendation {
    let (title, description, impact, category) = match season {
        Season::Summer => (
            "Keep Guests Cool",
            "Plan shade, fans and chilled water for a summer afternoon; heat shapes the day \
             more than any playlist.",
            Impact::Medium,
            "Venue & Location",
        ),
        Season::Fall => (
            "Use the Golden Hour",
            "Autumn light fades early; schedule portraits before the ceremony to catch it.",
            Impact::Low,
            "Photography & Film",
        ),
        Season::Winter => (
            "Warmth Over Flowers",
            "Candlelight and heated interiors carry a winter wedding; cut the floral budget, \
             not the heating.",
            Impact::Medium,
            "Decoration & Rentals",
        ),
        Season::Spring => (
            "Book Blooms in Season",
            "Spring is peak flower season; local tulips and ranunculus cost half of imported \
             stems.",
            Impact::Low,
            "Flowers & Bouquets",
        ),
    };

    Recommendation {
        title: title.to_string(),
        description: description.to_string(),
        impact,
        category: category.to_string(),
    }
}

/// Always last. Tolerates an empty priority list by joining zero labels.
fn strategic_catch_all(tables: &BudgetTables, input: &BudgetInput) -> Recommendation {
    let labels: Vec<&str> = input
        .priorities
        .iter()
        .filter_map(|priority| {
            tables.category(*priority).map(|definition| definition.name.as_str())
        })
        .collect();

    Recommendation {
        title: "Strategic Budget Allocation".to_string(),
        description: format!(
            "Concentrate spending on what matters most to you: {}. Trim the remaining \
             categories to protect the total.",
            labels.join(", ")
        ),
        impact: Impact::High,
        category: "Overall Budget".to_string(),
    }
}
