use super::types::{LaureateEntry, PrizeEntry, PrizeFeed};
use crate::config::{DataSource, YearBounds};
use crate::storage::memory::RecordStore;
use crate::storage::types::{AwardRecord, Recipient};
use anyhow::{Context, Result};
use std::path::Path;
use std::time::Duration;

const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Runs a full ingest pass and returns the populated store.
pub async fn load_store(source: &DataSource, bounds: &YearBounds) -> Result<RecordStore> {
    let feed = match source {
        DataSource::Url(url) => fetch_prize_feed(url).await?,
        DataSource::File(path) => read_prize_feed(path)?,
    };

    let total = feed.prizes.len();
    let records = into_records(feed, bounds);
    let store = RecordStore::from_records(records);

    tracing::info!(
        "Ingested {} of {} prizes ({} recipients) within {}..={}",
        store.len(),
        total,
        store.recipient_count(),
        bounds.min,
        bounds.max
    );
    Ok(store)
}

pub async fn fetch_prize_feed(url: &str) -> Result<PrizeFeed> {
    tracing::info!("Fetching prize feed from {}", url);
    let response = reqwest::Client::new()
        .get(url)
        .timeout(FETCH_TIMEOUT)
        .send()
        .await
        .with_context(|| format!("failed to download prize feed from {}", url))?
        .error_for_status()
        .with_context(|| format!("prize feed request to {} was rejected", url))?;

    let feed = response
        .json::<PrizeFeed>()
        .await
        .context("prize feed is not valid JSON")?;
    Ok(feed)
}

pub fn read_prize_feed(path: &Path) -> Result<PrizeFeed> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read prize feed {}", path.display()))?;
    parse_prize_feed(&text).with_context(|| format!("invalid prize feed {}", path.display()))
}

pub fn parse_prize_feed(text: &str) -> Result<PrizeFeed> {
    Ok(serde_json::from_str(text)?)
}

/// Converts feed entries to records, keeping only years within `bounds`.
pub fn into_records(feed: PrizeFeed, bounds: &YearBounds) -> Vec<AwardRecord> {
    feed.prizes
        .into_iter()
        .filter(|prize| bounds.contains(prize.year))
        .map(into_record)
        .collect()
}

fn into_record(prize: PrizeEntry) -> AwardRecord {
    AwardRecord {
        year: prize.year,
        category: prize.category,
        recipients: prize.laureates.into_iter().map(into_recipient).collect(),
    }
}

fn into_recipient(laureate: LaureateEntry) -> Recipient {
    Recipient {
        firstname: laureate.firstname.unwrap_or_default(),
        surname: laureate.surname.unwrap_or_default(),
        rationale: laureate
            .motivation
            .as_deref()
            .map(unquote)
            .unwrap_or_default(),
    }
}

/// The feed wraps motivations in literal double quotes.
fn unquote(text: &str) -> String {
    let trimmed = text.trim();
    trimmed
        .strip_prefix('"')
        .and_then(|inner| inner.strip_suffix('"'))
        .unwrap_or(trimmed)
        .to_string()
}
