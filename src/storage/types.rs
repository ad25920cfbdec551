use serde::{Deserialize, Serialize};
use std::fmt;

/// Dense identifier of a record inside one `RecordStore`.
///
/// Ids are only meaningful for the store that issued them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RecordId(pub u32);

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Address of one recipient: the owning record plus its position in `recipients`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RecipientRef {
    pub record: RecordId,
    pub position: u32,
}

/// A single award, e.g. Physics 2021.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AwardRecord {
    pub year: i32,
    /// Category label exactly as ingested ("physics", "Physics", ...).
    pub category: String,
    /// May be empty when the award was withheld.
    #[serde(default)]
    pub recipients: Vec<Recipient>,
}

impl AwardRecord {
    /// Identity key: lowercased category and year.
    pub fn key(&self) -> (String, i32) {
        (self.category.trim().to_lowercase(), self.year)
    }
}

/// One awardee. Organizations usually carry only a `firstname`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Recipient {
    #[serde(default)]
    pub firstname: String,
    #[serde(default)]
    pub surname: String,
    #[serde(default)]
    pub rationale: String,
}

impl Recipient {
    pub fn new(firstname: &str, surname: &str, rationale: &str) -> Self {
        Self {
            firstname: firstname.to_string(),
            surname: surname.to_string(),
            rationale: rationale.to_string(),
        }
    }
}
