use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A single interaction record.
///
/// `timestamp` is `None` when the source record carried an unparseable
/// instant. A time-invalid event is still added to the node/edge set and
/// counts toward totals, it is only excluded from the temporal detectors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub timestamp: Option<DateTime<Utc>>,
    pub platform: String,
    pub action: String,
    pub actor: String,
    pub target: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Vec::is_empty",
        deserialize_with = "links_from_str_or_seq"
    )]
    pub links: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub follower_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub following_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actor_created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verified: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tx_hash: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_number: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_type: Option<String>,
}

impl Event {
    /// Construct a minimal event with only the required fields set.
    pub fn new(
        timestamp: Option<DateTime<Utc>>,
        platform: impl Into<String>,
        action: impl Into<String>,
        actor: impl Into<String>,
        target: impl Into<String>,
    ) -> Self {
        Self {
            timestamp,
            platform: platform.into(),
            action: action.into(),
            actor: actor.into(),
            target: target.into(),
            bio: None,
            links: Vec::new(),
            follower_count: None,
            following_count: None,
            actor_created_at: None,
            verified: None,
            location: None,
            amount: None,
            tx_hash: None,
            block_number: None,
            meta: None,
            target_type: None,
        }
    }

    pub fn is_time_valid(&self) -> bool {
        self.timestamp.is_some()
    }

    /// True for transfers whose actor/target both look like EVM addresses
    /// (`^0x[0-9a-f]{40}$`, case-insensitive).
    pub fn is_hex_wallet_transfer(&self) -> bool {
        self.action == "transfer" && is_hex_wallet(&self.actor) && is_hex_wallet(&self.target)
    }
}

/// `links` may arrive as a JSON array (the typical wire form) or, per §3
/// ("a string to be parsed"), as a single raw string — whitespace/comma
/// splitting of that string is an ingestion-time concern (§6), so here a
/// bare string is kept as a single-element list.
fn links_from_str_or_seq<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StrOrSeq {
        Seq(Vec<String>),
        Str(String),
    }

    match Option::<StrOrSeq>::deserialize(deserializer)? {
        None => Ok(Vec::new()),
        Some(StrOrSeq::Seq(v)) => Ok(v),
        Some(StrOrSeq::Str(s)) if s.is_empty() => Ok(Vec::new()),
        Some(StrOrSeq::Str(s)) => Ok(vec![s]),
    }
}

pub(crate) fn is_hex_wallet(s: &str) -> bool {
    let s = s.as_bytes();
    if s.len() != 42 || s[0] != b'0' || (s[1] != b'x' && s[1] != b'X') {
        return false;
    }
    s[2..].iter().all(|b| b.is_ascii_hexdigit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_wallet_detects_case_insensitive() {
        assert!(is_hex_wallet("0xABCDEF0123456789abcdef0123456789ABCDEF01"));
        assert!(!is_hex_wallet("0xshort"));
        assert!(!is_hex_wallet("not-hex-at-all-not-hex-at-all-not-hex-01"));
    }

    #[test]
    fn time_invalid_event_still_constructs() {
        let e = Event::new(None, "x", "follow", "a", "b");
        assert!(!e.is_time_valid());
    }

    #[test]
    fn json_wire_format_uses_camel_case() {
        let mut e = Event::new(None, "p", "follow", "a", "b");
        e.follower_count = Some(10);
        e.tx_hash = Some("0xabc".into());
        let json = serde_json::to_value(&e).unwrap();
        assert_eq!(json["followerCount"], 10);
        assert_eq!(json["txHash"], "0xabc");
        assert!(json.get("follower_count").is_none());
    }

    #[test]
    fn links_accepts_bare_string_and_array() {
        let arr: Event = serde_json::from_value(serde_json::json!({
            "timestamp": null, "platform": "p", "action": "post", "actor": "a", "target": "b",
            "links": ["https://x.test"]
        }))
        .unwrap();
        assert_eq!(arr.links, vec!["https://x.test".to_string()]);

        let single: Event = serde_json::from_value(serde_json::json!({
            "timestamp": null, "platform": "p", "action": "post", "actor": "a", "target": "b",
            "links": "https://x.test"
        }))
        .unwrap();
        assert_eq!(single.links, vec!["https://x.test".to_string()]);
    }
}
