use std::path::PathBuf;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::domain::category::CategoryId;

/// Rejections produced by [`crate::BudgetInput::validate`] and the
/// `FromStr` parsers for closed input enums.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum InputError {
    #[error("guest count must be at least 1")]
    NoGuests,
    #[error("total budget must be at least {minimum}")]
    BudgetTooSmall { minimum: Decimal },
    #[error("wedding date {date} is in the past")]
    DateInPast { date: NaiveDate },
    #[error("at most {max} priority categories are supported, got {count}")]
    TooManyPriorities { count: usize, max: usize },
    #[error("priority category {category} is listed more than once")]
    DuplicatePriority { category: CategoryId },
    #[error("unknown category {0:?}")]
    UnknownCategory(String),
    #[error("unknown wedding style {0:?}")]
    UnknownStyle(String),
}

/// Failures while loading or checking a lookup-table set.
#[derive(Debug, Error)]
pub enum TablesError {
    #[error("failed to read tables file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse tables file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid tables: {0}")]
    Validation(String),
}
