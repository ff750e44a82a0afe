//! Bio similarity (§4.6): how many other actors share an actor's exact
//! normalized bio text.

use std::collections::HashMap;

use crate::profile::ProfileIndex;

pub fn compute(profiles: &ProfileIndex) -> HashMap<String, f64> {
    profiles
        .normalized_bio_by_actor
        .iter()
        .map(|(actor, normalized)| {
            let k = profiles.bio_count.get(normalized).copied().unwrap_or(1);
            let score = (((k as f64) - 1.0) / 5.0).clamp(0.0, 1.0);
            (actor.clone(), score)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use sybil_types::Event;

    fn ev(actor: &str, bio: &str) -> Event {
        let mut e = Event::new(None, "p", "post", actor, "t");
        e.bio = Some(bio.to_string());
        e
    }

    #[test]
    fn unique_bio_scores_zero() {
        let logs = vec![ev("a", "just a person")];
        let idx = crate::profile::aggregate(&logs);
        let scores = compute(&idx);
        assert_eq!(scores["a"], 0.0);
    }

    #[test]
    fn six_identical_bios_saturate_score() {
        let logs: Vec<_> = (0..6).map(|i| ev(&format!("actor{i}"), "join the airdrop now")).collect();
        let idx = crate::profile::aggregate(&logs);
        let scores = compute(&idx);
        assert_eq!(scores["actor0"], 1.0);
    }
}
