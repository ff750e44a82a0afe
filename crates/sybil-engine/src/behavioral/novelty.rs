//! Novelty (§4.6): accounts first observed within a week of their claimed
//! creation date.

use std::collections::HashMap;

use crate::profile::ProfileIndex;

pub fn compute(profiles: &ProfileIndex) -> HashMap<String, f64> {
    profiles
        .profiles
        .iter()
        .filter_map(|(actor, profile)| {
            let first_seen = profile.first_seen?;
            let created_at = profile.actor_created_at?;
            let age_days = (first_seen - created_at).num_seconds() as f64 / 86_400.0;
            let score = if (0.0..7.0).contains(&age_days) { 1.0 } else { 0.0 };
            Some((actor.clone(), score))
        })
        .collect()
}
