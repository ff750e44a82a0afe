//! CSV ingestion (§6): the canonical column order is `timestamp, platform,
//! action, actor, target, amount, txHash, blockNumber, meta, actorCreatedAt,
//! followerCount, followingCount, bio, location, verified, links,
//! targetType`, but columns are matched by header name so reordered or
//! narrower files still parse.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use sybil_types::{Error, Event, Result};

use crate::normalize;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CsvRow {
    timestamp: String,
    platform: String,
    action: String,
    actor: String,
    target: String,
    #[serde(default)]
    amount: Option<String>,
    #[serde(default)]
    tx_hash: Option<String>,
    #[serde(default)]
    block_number: Option<String>,
    #[serde(default)]
    meta: Option<String>,
    #[serde(default)]
    actor_created_at: Option<String>,
    #[serde(default)]
    follower_count: Option<String>,
    #[serde(default)]
    following_count: Option<String>,
    #[serde(default)]
    bio: Option<String>,
    #[serde(default)]
    location: Option<String>,
    #[serde(default)]
    verified: Option<String>,
    #[serde(default)]
    links: Option<String>,
    #[serde(default)]
    target_type: Option<String>,
}

fn non_empty(s: Option<String>) -> Option<String> {
    s.filter(|v| !v.trim().is_empty())
}

impl CsvRow {
    fn into_event(self) -> Event {
        Event {
            timestamp: normalize::parse_timestamp(&self.timestamp),
            platform: self.platform,
            action: self.action,
            actor: self.actor,
            target: self.target,
            bio: non_empty(self.bio),
            links: self
                .links
                .as_deref()
                .map(normalize::parse_links)
                .unwrap_or_default(),
            follower_count: non_empty(self.follower_count).and_then(|s| s.parse().ok()),
            following_count: non_empty(self.following_count).and_then(|s| s.parse().ok()),
            actor_created_at: non_empty(self.actor_created_at)
                .as_deref()
                .and_then(normalize::parse_timestamp),
            verified: non_empty(self.verified).as_deref().and_then(normalize::parse_bool),
            location: non_empty(self.location),
            amount: non_empty(self.amount).and_then(|s| s.parse().ok()),
            tx_hash: non_empty(self.tx_hash),
            block_number: non_empty(self.block_number).and_then(|s| s.parse().ok()),
            meta: non_empty(self.meta).and_then(|s| serde_json::from_str(&s).ok()),
            target_type: non_empty(self.target_type),
        }
    }
}

/// Parses CSV text (with a header row) into events. Rows that are missing a
/// required column are a hard `Error::Csv`; everything else degrades per §7.
pub fn read_str(content: &str) -> Result<Vec<Event>> {
    let mut reader = ::csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(content.as_bytes());

    let mut events = Vec::new();
    for record in reader.deserialize() {
        let row: CsvRow = record?;
        events.push(row.into_event());
    }
    Ok(events)
}

pub fn read_file(path: impl AsRef<Path>) -> Result<Vec<Event>> {
    let mut content = String::new();
    std::fs::File::open(path)
        .map_err(Error::from)?
        .read_to_string(&mut content)
        .map_err(Error::from)?;
    read_str(&content)
}
