//! Lookup tables driving allocation, recommendations and savings.
//!
//! The engine ships a built-in dataset tuned for central-European city
//! weddings; deployments can swap in their own tables from TOML without
//! touching engine code.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::budget::WeddingStyle;
use crate::domain::category::CategoryId;
use crate::errors::TablesError;

/// One spend category row: base share plus the factor switches that apply.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CategoryDefinition {
    pub id: CategoryId,
    pub name: String,
    /// Pre-normalization share. Rows do not need to sum to 100; the
    /// allocator normalizes whatever the table provides.
    pub base_percent: f64,
    #[serde(default)]
    pub guest_count_sensitive: bool,
    #[serde(default)]
    pub region_sensitive: bool,
    #[serde(default)]
    pub style_sensitive: bool,
    #[serde(default)]
    pub season_sensitive: bool,
    #[serde(default)]
    pub recommendations: Vec<String>,
    #[serde(default)]
    pub saving_tips: Vec<String>,
}

/// Cost multiplier for a recognized region, matched by alias substring.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RegionalFactor {
    pub region: String,
    pub factor: f64,
    pub description: String,
    /// Lowercase fragments searched for inside the free-text location.
    /// Scan order is table order; the first region with a hit wins.
    pub aliases: Vec<String>,
}

impl RegionalFactor {
    /// Fallback applied when no alias matches the location.
    pub fn neutral() -> Self {
        Self {
            region: "Other".to_string(),
            factor: 1.0,
            description: "No regional adjustment".to_string(),
            aliases: Vec::new(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StyleFactor {
    pub style: WeddingStyle,
    pub factor: f64,
    pub description: String,
}

/// Complete table set consumed by [`crate::BudgetEngine`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BudgetTables {
    pub categories: Vec<CategoryDefinition>,
    pub regions: Vec<RegionalFactor>,
    pub styles: Vec<StyleFactor>,
}

#[derive(Debug, Clone, Copy)]
struct CategorySeed {
    id: CategoryId,
    name: &'static str,
    base_percent: f64,
    guest_count_sensitive: bool,
    region_sensitive: bool,
    style_sensitive: bool,
    season_sensitive: bool,
    recommendations: &'static [&'static str],
    saving_tips: &'static [&'static str],
}

const CATEGORY_SEEDS: &[CategorySeed] = &[
    CategorySeed {
        id: CategoryId::Venue,
        name: "Venue & Location",
        base_percent: 25.0,
        guest_count_sensitive: true,
        region_sensitive: true,
        style_sensitive: true,
        season_sensitive: true,
        recommendations: &[
            "Book the venue 12 to 18 months ahead; popular locations fill their peak weekends first.",
            "Ask whether tables, chairs and linens are included before comparing venue quotes.",
            "Visit your shortlist at the same hour as the ceremony to judge light and noise.",
        ],
        saving_tips: &[
            "Holding ceremony and reception at one site saves a second venue fee and transfers.",
            "Community halls and restaurants with character undercut dedicated wedding venues.",
        ],
    },
    CategorySeed {
        id: CategoryId::Catering,
        name: "Catering & Drinks",
        base_percent: 22.0,
        guest_count_sensitive: true,
        region_sensitive: true,
        style_sensitive: false,
        season_sensitive: false,
        recommendations: &[
            "Plan one main, one vegetarian option and a late-night snack rather than an oversized buffet.",
            "Confirm corkage terms early; bringing your own wine is the biggest catering lever.",
        ],
        saving_tips: &[
            "Serve beer, wine and one signature drink instead of a full open bar.",
            "A brunch or afternoon reception costs well under a seated dinner.",
        ],
    },
    CategorySeed {
        id: CategoryId::Photography,
        name: "Photography & Film",
        base_percent: 11.0,
        guest_count_sensitive: false,
        region_sensitive: true,
        style_sensitive: true,
        season_sensitive: false,
        recommendations: &[
            "Ask for a complete gallery from one real wedding; portfolio highlights hide the average shot.",
            "Book coverage from preparations through the first dance, not the whole night.",
        ],
        saving_tips: &[
            "Eight hours of coverage instead of twelve rarely misses a moment guests remember.",
            "Order the printed album after the first anniversary, when studios run quieter.",
        ],
    },
    CategorySeed {
        id: CategoryId::Attire,
        name: "Attire & Beauty",
        base_percent: 8.0,
        guest_count_sensitive: false,
        region_sensitive: false,
        style_sensitive: true,
        season_sensitive: false,
        recommendations: &[
            "Schedule final fittings four to six weeks out so alterations are not rushed.",
            "Sample sales and trunk shows run months ahead of the season you marry in.",
        ],
        saving_tips: &[
            "Renting a suit or buying off the rack saves most of the tailoring premium.",
            "Borrow accessories; veils and jewelry are worn for one day.",
        ],
    },
    CategorySeed {
        id: CategoryId::Flowers,
        name: "Flowers & Bouquets",
        base_percent: 8.0,
        guest_count_sensitive: false,
        region_sensitive: false,
        style_sensitive: true,
        season_sensitive: true,
        recommendations: &[
            "Choose blooms that are in season on your date; imported stems double the floral bill.",
            "One statement installation photographs better than many small arrangements.",
        ],
        saving_tips: &[
            "Reuse ceremony arrangements at the reception; the florist only needs to move them.",
            "Greenery-heavy designs take far less labor than dense flower walls.",
        ],
    },
    CategorySeed {
        id: CategoryId::Music,
        name: "Music & Entertainment",
        base_percent: 7.0,
        guest_count_sensitive: true,
        region_sensitive: false,
        style_sensitive: true,
        season_sensitive: false,
        recommendations: &[
            "Check the venue's sound limits before booking a live band.",
            "Send the DJ a short do-not-play list; it shapes the night more than requests do.",
        ],
        saving_tips: &[
            "Book the band for the peak three hours and run playlists either side.",
            "Conservatory ensembles play ceremonies at a fraction of agency rates.",
        ],
    },
    CategorySeed {
        id: CategoryId::Decor,
        name: "Decoration & Rentals",
        base_percent: 6.0,
        guest_count_sensitive: true,
        region_sensitive: false,
        style_sensitive: true,
        season_sensitive: false,
        recommendations: &[
            "Pick two accent colors and repeat them; scattered themes read as clutter.",
            "Light the room before you decorate it; uplighting changes more than centerpieces.",
        ],
        saving_tips: &[
            "Rent candleholders and vases instead of buying sixty of each.",
            "Resell decor in wedding groups afterwards; much of the spend comes back.",
        ],
    },
    CategorySeed {
        id: CategoryId::Stationery,
        name: "Invitations & Stationery",
        base_percent: 4.0,
        guest_count_sensitive: true,
        region_sensitive: false,
        style_sensitive: false,
        season_sensitive: false,
        recommendations: &[
            "Send save-the-dates six months out and invitations at three.",
            "Order ten percent more invitations than households; reprints cost more than extras.",
        ],
        saving_tips: &[
            "Digital RSVPs remove the stamped return envelope entirely.",
            "Print a bought template at a local shop rather than commissioning a studio.",
        ],
    },
    CategorySeed {
        id: CategoryId::Transport,
        name: "Transport & Logistics",
        base_percent: 4.0,
        guest_count_sensitive: true,
        region_sensitive: true,
        style_sensitive: false,
        season_sensitive: false,
        recommendations: &[
            "Arrange guest shuttles when ceremony and reception sit more than fifteen minutes apart.",
            "Classic car hire books out a year ahead in peak season.",
        ],
        saving_tips: &[
            "One larger coach beats several minivans for guest transfer.",
            "Keep ceremony and party at the same site and skip transfers altogether.",
        ],
    },
    CategorySeed {
        id: CategoryId::Cake,
        name: "Cake & Sweets",
        base_percent: 4.0,
        guest_count_sensitive: true,
        region_sensitive: false,
        style_sensitive: false,
        season_sensitive: false,
        recommendations: &[
            "Taste before you book; most bakers bundle a tasting with the deposit.",
            "A semi-naked cake holds up better than heavy fondant in warm months.",
        ],
        saving_tips: &[
            "A small display tier plus kitchen sheet cake serves the same slices for less.",
            "A patisserie dessert table costs a third of a tiered showpiece.",
        ],
    },
];

#[derive(Debug, Clone, Copy)]
struct RegionSeed {
    region: &'static str,
    factor: f64,
    description: &'static str,
    aliases: &'static [&'static str],
}

const REGION_SEEDS: &[RegionSeed] = &[
    RegionSeed {
        region: "Vienna",
        factor: 1.25,
        description: "Capital pricing with strong venue demand",
        aliases: &["vienna", "wien"],
    },
    RegionSeed {
        region: "Salzburg",
        factor: 1.18,
        description: "Festival-city premium, strongest in summer",
        aliases: &["salzburg"],
    },
    RegionSeed {
        region: "Munich",
        factor: 1.22,
        description: "Large-city rates across most vendors",
        aliases: &["munich", "münchen", "muenchen"],
    },
    RegionSeed {
        region: "Zurich",
        factor: 1.35,
        description: "Swiss price level, highest in the dataset",
        aliases: &["zurich", "zürich", "zuerich"],
    },
    RegionSeed {
        region: "Berlin",
        factor: 1.15,
        description: "Capital demand softened by venue variety",
        aliases: &["berlin"],
    },
    RegionSeed {
        region: "Graz",
        factor: 1.05,
        description: "Mid-size city, slightly above rural rates",
        aliases: &["graz"],
    },
    RegionSeed {
        region: "Linz",
        factor: 1.02,
        description: "Close to the baseline cost level",
        aliases: &["linz"],
    },
];

#[derive(Debug, Clone, Copy)]
struct StyleSeed {
    style: WeddingStyle,
    factor: f64,
    description: &'static str,
}

const STYLE_SEEDS: &[StyleSeed] = &[
    StyleSeed {
        style: WeddingStyle::Modern,
        factor: 1.1,
        description: "Design venues and statement lighting carry a premium",
    },
    StyleSeed {
        style: WeddingStyle::Rustic,
        factor: 0.95,
        description: "Barns and DIY decor trim vendor spend",
    },
    StyleSeed {
        style: WeddingStyle::Classic,
        factor: 1.15,
        description: "Ballrooms, formal service and live ensembles",
    },
    StyleSeed {
        style: WeddingStyle::Boho,
        factor: 0.9,
        description: "Open-air settings and loose wildflower arrangements",
    },
    StyleSeed {
        style: WeddingStyle::Vintage,
        factor: 1.05,
        description: "Antique rentals and heirloom details add sourcing cost",
    },
    StyleSeed {
        style: WeddingStyle::Outdoor,
        factor: 0.85,
        description: "Natural backdrops replace much of the decor budget",
    },
];

impl BudgetTables {
    /// Built-in dataset. Always passes [`BudgetTables::validate`].
    pub fn builtin() -> Self {
        let categories = CATEGORY_SEEDS
            .iter()
            .map(|seed| CategoryDefinition {
                id: seed.id,
                name: seed.name.to_string(),
                base_percent: seed.base_percent,
                guest_count_sensitive: seed.guest_count_sensitive,
                region_sensitive: seed.region_sensitive,
                style_sensitive: seed.style_sensitive,
                season_sensitive: seed.season_sensitive,
                recommendations: seed.recommendations.iter().map(|s| s.to_string()).collect(),
                saving_tips: seed.saving_tips.iter().map(|s| s.to_string()).collect(),
            })
            .collect();

        let regions = REGION_SEEDS
            .iter()
            .map(|seed| RegionalFactor {
                region: seed.region.to_string(),
                factor: seed.factor,
                description: seed.description.to_string(),
                aliases: seed.aliases.iter().map(|s| s.to_string()).collect(),
            })
            .collect();

        let styles = STYLE_SEEDS
            .iter()
            .map(|seed| StyleFactor {
                style: seed.style,
                factor: seed.factor,
                description: seed.description.to_string(),
            })
            .collect();

        Self { categories, regions, styles }
    }

    /// Parses a table set from TOML and validates it. `origin` is only used
    /// for error context.
    pub fn from_toml_str(content: &str, origin: &Path) -> Result<Self, TablesError> {
        let tables: BudgetTables = toml::from_str(content)
            .map_err(|source| TablesError::Parse { path: origin.to_path_buf(), source })?;
        tables.validate()?;
        Ok(tables)
    }

    pub fn load(path: &Path) -> Result<Self, TablesError> {
        let content = fs::read_to_string(path)
            .map_err(|source| TablesError::Read { path: path.to_path_buf(), source })?;
        Self::from_toml_str(&content, path)
    }

    pub fn category(&self, id: CategoryId) -> Option<&CategoryDefinition> {
        self.categories.iter().find(|definition| definition.id == id)
    }

    /// Structural checks for swapped-in tables. Base percents do not need to
    /// sum to 100 and styles may be missing; both are handled downstream.
    pub fn validate(&self) -> Result<(), TablesError> {
        if self.categories.is_empty() {
            return Err(TablesError::Validation("categories must not be empty".to_string()));
        }

        for (index, definition) in self.categories.iter().enumerate() {
            if self.categories[..index].iter().any(|other| other.id == definition.id) {
                return Err(TablesError::Validation(format!(
                    "category {} is defined more than once",
                    definition.id
                )));
            }
            if definition.name.trim().is_empty() {
                return Err(TablesError::Validation(format!(
                    "category {} must have a display name",
                    definition.id
                )));
            }
            if !definition.base_percent.is_finite() || definition.base_percent <= 0.0 {
                return Err(TablesError::Validation(format!(
                    "category {} must have a positive base percent",
                    definition.id
                )));
            }
        }

        for region in &self.regions {
            if region.region.trim().is_empty() {
                return Err(TablesError::Validation("region labels must not be empty".to_string()));
            }
            if !region.factor.is_finite() || region.factor <= 0.0 {
                return Err(TablesError::Validation(format!(
                    "region {} must have a positive factor",
                    region.region
                )));
            }
            if region.aliases.is_empty()
                || region.aliases.iter().any(|alias| alias.trim().is_empty())
            {
                return Err(TablesError::Validation(format!(
                    "region {} needs at least one non-empty alias",
                    region.region
                )));
            }
        }

        for (index, style) in self.styles.iter().enumerate() {
            if self.styles[..index].iter().any(|other| other.style == style.style) {
                return Err(TablesError::Validation(format!(
                    "style {} is defined more than once",
                    style.style
                )));
            }
            if !style.factor.is_finite() || style.factor <= 0.0 {
                return Err(TablesError::Validation(format!(
                    "style {} must have a positive factor",
                    style.style
                )));
            }
        }

        Ok(())
    }
}

impl Default for BudgetTables {
    fn default() -> Self {
        Self::builtin()
    }
}
