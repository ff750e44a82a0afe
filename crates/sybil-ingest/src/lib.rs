//! Ingestion layer (§6): turns CSV/JSON source files into `sybil_types::Event`
//! records ready for `sybil_engine::analyze`. Pure parsing and per-field
//! normalization, no network or process I/O beyond reading the given path.

mod csv;
mod json;
mod normalize;

use std::path::Path;

use sybil_types::{Event, Result};

/// Reads events from a file, dispatching on its extension (`.csv` vs anything
/// else, which is treated as JSON). Unknown extensions fall back to JSON
/// since that is the denser wire format most providers emit by default.
pub fn read_events(path: impl AsRef<Path>) -> Result<Vec<Event>> {
    let path = path.as_ref();
    let is_csv = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("csv"))
        .unwrap_or(false);

    if is_csv {
        csv::read_file(path)
    } else {
        json::read_file(path)
    }
}

pub fn read_csv_str(content: &str) -> Result<Vec<Event>> {
    csv::read_str(content)
}

pub fn read_json_str(content: &str) -> Result<Vec<Event>> {
    json::read_str(content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn read_events_dispatches_on_extension() {
        let mut csv_file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(
            csv_file,
            "timestamp,platform,action,actor,target,amount,txHash,blockNumber,meta,actorCreatedAt,followerCount,followingCount,bio,location,verified,links,targetType"
        )
        .unwrap();
        writeln!(csv_file, "2024-01-01T00:00:00Z,p,follow,a,b,,,,,,,,,,,,").unwrap();
        let events = read_events(csv_file.path()).unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].actor, "a");

        let mut json_file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(
            json_file,
            r#"[{{"timestamp":null,"platform":"p","action":"follow","actor":"a","target":"b"}}]"#
        )
        .unwrap();
        let events = read_events(json_file.path()).unwrap();
        assert_eq!(events.len(), 1);
    }
}
