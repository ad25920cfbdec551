//! Wire shapes of the prize feed.
//!
//! Only the fields the query engine needs are modelled; everything else in the
//! feed is ignored on deserialization.

use serde::{Deserialize, Deserializer};

#[derive(Debug, Deserialize)]
pub struct PrizeFeed {
    #[serde(default)]
    pub prizes: Vec<PrizeEntry>,
}

#[derive(Debug, Deserialize)]
pub struct PrizeEntry {
    /// The feed ships years as strings ("2021"); numbers are accepted too.
    #[serde(deserialize_with = "year_from_string_or_number")]
    pub year: i32,
    pub category: String,
    /// Absent when the prize was not awarded that year.
    #[serde(default)]
    pub laureates: Vec<LaureateEntry>,
}

#[derive(Debug, Deserialize)]
pub struct LaureateEntry {
    #[serde(default)]
    pub firstname: Option<String>,
    #[serde(default)]
    pub surname: Option<String>,
    #[serde(default)]
    pub motivation: Option<String>,
}

fn year_from_string_or_number<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawYear {
        Number(i32),
        Text(String),
    }

    match RawYear::deserialize(deserializer)? {
        RawYear::Number(year) => Ok(year),
        RawYear::Text(text) => text
            .trim()
            .parse()
            .map_err(|_| serde::de::Error::custom(format!("invalid year '{}'", text))),
    }
}
