//! Cross-platform activity (§4.6): actors active on two or more distinct
//! platforms.

use std::collections::{HashMap, HashSet};

use sybil_types::Event;

pub fn compute(logs: &[Event]) -> HashMap<String, Vec<String>> {
    let mut platforms_by_actor: HashMap<&str, HashSet<&str>> = HashMap::new();
    for event in logs {
        platforms_by_actor
            .entry(&event.actor)
            .or_default()
            .insert(&event.platform);
    }

    platforms_by_actor
        .into_iter()
        .filter(|(_, platforms)| platforms.len() >= 2)
        .map(|(actor, platforms)| {
            let mut list: Vec<String> = platforms.into_iter().map(String::from).collect();
            list.sort();
            (actor.to_string(), list)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ev(actor: &str, platform: &str) -> Event {
        Event::new(None, platform, "like", actor, "t")
    }

    #[test]
    fn single_platform_actor_is_not_listed() {
        let logs = vec![ev("a", "twitter"), ev("a", "twitter")];
        assert!(compute(&logs).is_empty());
    }

    #[test]
    fn two_platform_actor_is_listed() {
        let logs = vec![ev("a", "twitter"), ev("a", "discord")];
        let result = compute(&logs);
        assert_eq!(result["a"], vec!["discord".to_string(), "twitter".to_string()]);
    }
}
