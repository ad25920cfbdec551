//! Validated query inputs and engine results.
//!
//! Raw request fields are turned into these types at the service boundary, so
//! the engine only ever sees inputs that already satisfy its preconditions.

use super::tokenizer::{fold, tokenize_keyword};
use crate::config::YearBounds;
use crate::error::QueryError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Physics,
    Chemistry,
    Medicine,
    Literature,
    Peace,
    Economics,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Physics,
        Category::Chemistry,
        Category::Peace,
        Category::Medicine,
        Category::Literature,
        Category::Economics,
    ];

    /// Folded form, as used for index keys.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Physics => "physics",
            Category::Chemistry => "chemistry",
            Category::Medicine => "medicine",
            Category::Literature => "literature",
            Category::Peace => "peace",
            Category::Economics => "economics",
        }
    }

    /// Display form for menus.
    pub fn label(&self) -> &'static str {
        match self {
            Category::Physics => "Physics",
            Category::Chemistry => "Chemistry",
            Category::Medicine => "Medicine",
            Category::Literature => "Literature",
            Category::Peace => "Peace",
            Category::Economics => "Economics",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = QueryError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let folded = fold(raw);
        Category::ALL
            .into_iter()
            .find(|category| category.as_str() == folded)
            .ok_or_else(|| QueryError::invalid_argument(format!("unrecognized category '{}'", raw)))
    }
}

/// Inclusive year range that lies within the configured bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearRange {
    start: i32,
    end: i32,
}

impl YearRange {
    pub fn new(start: i32, end: i32, bounds: &YearBounds) -> Result<Self, QueryError> {
        if start > end {
            return Err(QueryError::invalid_range(format!(
                "start year {} is after end year {}",
                start, end
            )));
        }
        if !bounds.contains(start) || !bounds.contains(end) {
            return Err(QueryError::invalid_range(format!(
                "years must be between {} and {}",
                bounds.min, bounds.max
            )));
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> i32 {
        self.start
    }

    pub fn end(&self) -> i32 {
        self.end
    }
}

/// Non-empty rationale keyword.
///
/// Surrounding whitespace is stripped before matching, so `"peace "` is the
/// keyword `peace` and also matches inside `"peaceful"`. Inner whitespace is kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keyword {
    folded: String,
    tokens: Vec<String>,
}

impl Keyword {
    pub fn parse(raw: &str) -> Result<Self, QueryError> {
        let folded = fold(raw);
        if folded.is_empty() {
            return Err(QueryError::invalid_argument("keyword must not be empty"));
        }
        let tokens = tokenize_keyword(&folded);
        Ok(Self { folded, tokens })
    }

    pub fn folded(&self) -> &str {
        &self.folded
    }

    /// Alphanumeric runs of the keyword, longest first. May be empty for punctuation-only keywords.
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }
}

/// Name query. Both parts are compared exactly (after folding); at most one may be empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FullName {
    firstname: String,
    surname: String,
}

impl FullName {
    pub fn parse(firstname: &str, surname: &str) -> Result<Self, QueryError> {
        let firstname = fold(firstname);
        let surname = fold(surname);
        if firstname.is_empty() && surname.is_empty() {
            return Err(QueryError::invalid_argument(
                "at least one of firstname or surname is required",
            ));
        }
        Ok(Self { firstname, surname })
    }

    pub fn firstname(&self) -> &str {
        &self.firstname
    }

    pub fn surname(&self) -> &str {
        &self.surname
    }
}

pub const NO_MOTIVATION: &str = "No motivation provided";

/// One prize held by a looked-up recipient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AwardDetail {
    pub year: i32,
    pub category: String,
    pub motivation: String,
}
