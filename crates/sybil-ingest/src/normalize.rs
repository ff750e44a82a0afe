//! Per-field normalization shared by the CSV and JSON readers (§6).

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use regex::Regex;

/// `"true"|"1"|"yes"` -> `true`; `"false"|"0"|"no"` -> `false`; anything
/// else is unspecified (§6 "Boolean coercion").
pub fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
    }
}

/// ISO-8601 instants parsed in UTC; anything else yields `None` (the caller
/// treats the event as time-invalid, per §6/§7).
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    // A handful of reference datasets carry a space instead of `T` and no
    // offset; treat that as UTC rather than reject it outright.
    const NAIVE_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];
    for fmt in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }
    None
}

fn link_split_regex() -> Regex {
    Regex::new(r"[\s,]+").expect("static regex")
}

/// The CSV `links` column accepts JSON-array text or whitespace/comma
/// separated URLs (§6).
pub fn parse_links(raw: &str) -> Vec<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }
    if trimmed.starts_with('[') {
        if let Ok(list) = serde_json::from_str::<Vec<String>>(trimmed) {
            return list;
        }
    }
    link_split_regex()
        .split(trimmed)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bool_coercion_recognizes_documented_tokens() {
        assert_eq!(parse_bool("Yes"), Some(true));
        assert_eq!(parse_bool("0"), Some(false));
        assert_eq!(parse_bool("maybe"), None);
    }

    #[test]
    fn timestamp_parses_rfc3339_and_rejects_garbage() {
        assert!(parse_timestamp("2024-01-01T00:00:00Z").is_some());
        assert!(parse_timestamp("not-a-date").is_none());
    }

    #[test]
    fn links_splits_whitespace_and_commas() {
        let links = parse_links("https://a.test, https://b.test https://c.test");
        assert_eq!(
            links,
            vec!["https://a.test", "https://b.test", "https://c.test"]
        );
    }

    #[test]
    fn links_accepts_json_array_text() {
        let links = parse_links(r#"["https://a.test","https://b.test"]"#);
        assert_eq!(links, vec!["https://a.test", "https://b.test"]);
    }
}
