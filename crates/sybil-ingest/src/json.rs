//! JSON ingestion (§6): a top-level array of event records. `Event`'s own
//! `Deserialize` impl already speaks the wire's camelCase field names and
//! accepts `links` as either an array or a bare string, so this module is a
//! thin read-and-parse shell.

use std::path::Path;

use sybil_types::{Error, Event, Result};

pub fn read_str(content: &str) -> Result<Vec<Event>> {
    serde_json::from_str(content).map_err(Error::from)
}

pub fn read_file(path: impl AsRef<Path>) -> Result<Vec<Event>> {
    let content = std::fs::read_to_string(path).map_err(Error::from)?;
    read_str(&content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_array_of_events() {
        let json = r#"[
            {"timestamp":"2024-01-01T00:00:00Z","platform":"p","action":"follow","actor":"a","target":"b"},
            {"timestamp":null,"platform":"p","action":"like","actor":"b","target":"c","followerCount":5}
        ]"#;
        let events = read_str(json).unwrap();
        assert_eq!(events.len(), 2);
        assert!(events[0].is_time_valid());
        assert!(!events[1].is_time_valid());
        assert_eq!(events[1].follower_count, Some(5));
    }

    #[test]
    fn rejects_non_array_top_level() {
        assert!(read_str(r#"{"not":"an array"}"#).is_err());
    }
}
