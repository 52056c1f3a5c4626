pub mod config;
pub mod domain;
pub mod engine;
pub mod errors;

pub use config::{
    AppConfig, ConfigError, ConfigOverrides, DisplayConfig, EngineConfig, LoadOptions, LogFormat,
    LoggingConfig,
};
pub use domain::budget::{
    BudgetBreakdown, BudgetInput, CategoryAllocation, Impact, PartnerNames, Recommendation,
    SavingsSuggestion, WeddingStyle,
};
pub use domain::category::CategoryId;
pub use engine::{
    BudgetEngine, BudgetTables, CategoryDefinition, FactorResolver, FixedRateSource,
    RegionalFactor, ResolvedFactors, SavingsRateSource, Season, SeededRateSource, StyleFactor,
    ThreadRngRateSource,
};
pub use errors::{InputError, TablesError};
