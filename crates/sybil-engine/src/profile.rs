//! Profile Aggregator (§4.1) — folds per-actor profile fields across the
//! log (last-write-wins except links, which are unioned), and derives the
//! link/bio indexes the behavioral detectors build on.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};
use regex::Regex;
use sybil_types::Event;

use crate::links::normalize_link;

/// A single actor's folded profile, plus engine bookkeeping (first-seen
/// timestamp, used by the novelty detector).
#[derive(Debug, Clone, Default)]
pub struct ActorProfile {
    pub bio: Option<String>,
    pub follower_count: Option<u64>,
    pub following_count: Option<u64>,
    pub actor_created_at: Option<DateTime<Utc>>,
    pub verified: Option<bool>,
    pub links: Vec<String>,
    pub first_seen: Option<DateTime<Utc>>,
}

pub struct ProfileIndex {
    pub profiles: HashMap<String, ActorProfile>,
    /// Normalized (lowercased, whitespace-collapsed) bio per actor.
    pub normalized_bio_by_actor: HashMap<String, String>,
    /// How many distinct actors share each exact normalized bio.
    pub bio_count: HashMap<String, u64>,
    /// For each actor, the sublist of its links that also appear in at
    /// least one other actor's link list.
    pub shared_links_by_actor: HashMap<String, Vec<String>>,
}

impl ProfileIndex {
    pub fn profile(&self, actor: &str) -> Option<&ActorProfile> {
        self.profiles.get(actor)
    }
}

fn bio_url_regex() -> Regex {
    Regex::new(r"https?://\S+").expect("static regex")
}

fn normalize_bio(bio: &str) -> String {
    bio.to_lowercase().split_whitespace().collect::<Vec<_>>().join(" ")
}

pub fn aggregate(logs: &[Event]) -> ProfileIndex {
    let url_re = bio_url_regex();
    let mut profiles: HashMap<String, ActorProfile> = HashMap::new();
    let mut link_dedup: HashMap<String, HashSet<String>> = HashMap::new();

    for event in logs {
        let profile = profiles.entry(event.actor.clone()).or_default();
        // first_seen tracks the earliest sighting regardless of log order,
        // so novelty scoring stays stable under permutation (§8).
        if let Some(ts) = event.timestamp {
            profile.first_seen = Some(profile.first_seen.map_or(ts, |cur| cur.min(ts)));
        }

        if let Some(bio) = &event.bio {
            profile.bio = Some(bio.clone());
        }
        if let Some(fc) = event.follower_count {
            profile.follower_count = Some(fc);
        }
        if let Some(fg) = event.following_count {
            profile.following_count = Some(fg);
        }
        if let Some(created) = event.actor_created_at {
            profile.actor_created_at = Some(created);
        }
        if let Some(v) = event.verified {
            profile.verified = Some(v);
        }

        let dedup = link_dedup.entry(event.actor.clone()).or_default();
        for raw in &event.links {
            if let Some(normalized) = normalize_link(raw) {
                if dedup.insert(normalized.clone()) {
                    profile.links.push(normalized);
                }
            }
        }
    }

    // Links embedded in bio text are merged into the explicit list.
    for profile in profiles.values_mut() {
        if let Some(bio) = profile.bio.clone() {
            for found in url_re.find_iter(&bio) {
                if let Some(normalized) = normalize_link(found.as_str()) {
                    if !profile.links.contains(&normalized) {
                        profile.links.push(normalized);
                    }
                }
            }
        }
    }

    let mut normalized_bio_by_actor = HashMap::new();
    let mut bio_count: HashMap<String, u64> = HashMap::new();
    for (actor, profile) in &profiles {
        if let Some(bio) = &profile.bio {
            let normalized = normalize_bio(bio);
            if !normalized.is_empty() {
                *bio_count.entry(normalized.clone()).or_insert(0) += 1;
                normalized_bio_by_actor.insert(actor.clone(), normalized);
            }
        }
    }

    let mut link_owners: HashMap<&str, u32> = HashMap::new();
    for profile in profiles.values() {
        for link in &profile.links {
            *link_owners.entry(link.as_str()).or_insert(0) += 1;
        }
    }

    let mut shared_links_by_actor = HashMap::new();
    for (actor, profile) in &profiles {
        let shared: Vec<String> = profile
            .links
            .iter()
            .filter(|l| link_owners.get(l.as_str()).copied().unwrap_or(0) >= 2)
            .cloned()
            .collect();
        shared_links_by_actor.insert(actor.clone(), shared);
    }

    ProfileIndex {
        profiles,
        normalized_bio_by_actor,
        bio_count,
        shared_links_by_actor,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ev(actor: &str, bio: Option<&str>, links: Vec<&str>) -> Event {
        let mut e = Event::new(None, "p", "post", actor, "t");
        e.bio = bio.map(String::from);
        e.links = links.into_iter().map(String::from).collect();
        e
    }

    #[test]
    fn bio_links_merge_with_explicit_links() {
        let logs = vec![ev("a", Some("hi join https://bit.ly/x"), vec![])];
        let idx = aggregate(&logs);
        let p = idx.profile("a").unwrap();
        assert_eq!(p.links, vec!["https://bit.ly/x".to_string()]);
    }

    #[test]
    fn shared_links_detected_across_actors() {
        let logs = vec![
            ev("a", None, vec!["https://x.test/p"]),
            ev("b", None, vec!["https://x.test/p"]),
            ev("c", None, vec!["https://y.test/q"]),
        ];
        let idx = aggregate(&logs);
        assert_eq!(idx.shared_links_by_actor["a"], vec!["https://x.test/p"]);
        assert!(idx.shared_links_by_actor["c"].is_empty());
    }

    #[test]
    fn bio_count_tracks_exact_duplicates() {
        let logs = vec![
            ev("a", Some("Hi  there"), vec![]),
            ev("b", Some("hi there"), vec![]),
            ev("c", Some("something else"), vec![]),
        ];
        let idx = aggregate(&logs);
        assert_eq!(idx.bio_count["hi there"], 2);
        assert_eq!(idx.bio_count["something else"], 1);
    }
}
