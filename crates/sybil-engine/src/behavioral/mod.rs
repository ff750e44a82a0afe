//! Behavioral Detectors (§4.6) — per-actor signals derived purely from the
//! event log and the profile/graph built upstream: entropy, circadian
//! rhythm, n-gram repetition, sessions, shared funders, cross-platform
//! activity, transaction-amount fraud, reciprocity, bio similarity, handle
//! pattern, and novelty.

mod bio;
mod cross_platform;
mod entropy;
mod fraud;
mod funders;
mod handles;
mod ngram;
mod novelty;
mod reciprocity;
mod sessions;

use std::collections::HashMap;

use sybil_types::{Event, Settings};

use crate::graph::Graph;
use crate::profile::ProfileIndex;

pub use entropy::EntropyStats;
pub use ngram::NgramStats;
pub use reciprocity::ReciprocityStats;
pub use sessions::SessionStats;

/// Actors who received transfers from a funder also seen funding at least
/// one other actor. The name is legacy (§9 "shared wallets" semantic drift):
/// it tracks shared senders, not identical wallet addresses.
pub fn detect_shared_wallets(logs: &[Event]) -> HashMap<String, Vec<String>> {
    funders::compute(logs)
}

/// Actors seen on two or more distinct platforms, each mapped to its sorted
/// platform list.
pub fn detect_cross_app_linking(logs: &[Event]) -> HashMap<String, Vec<String>> {
    cross_platform::compute(logs)
}

/// Per-actor session segmentation at gaps larger than `session_gap_ms`.
pub fn detect_session_metrics(logs: &[Event], session_gap_ms: i64) -> HashMap<String, SessionStats> {
    sessions::compute_with_gap(logs, session_gap_ms)
}

/// Per-actor coefficient-of-variation fraud score over `amount`-bearing events.
pub fn detect_fraudulent_transactions(logs: &[Event]) -> HashMap<String, f64> {
    fraud::compute(logs)
}

#[derive(Debug, Clone, Default)]
pub struct BehavioralProfile {
    pub entropy: EntropyStats,
    pub ngram: NgramStats,
    pub sessions: SessionStats,
    pub reciprocity: ReciprocityStats,
    pub churn_score: u64,
    pub shared_wallets: Vec<String>,
    pub cross_app_platforms: Vec<String>,
    pub fraud_tx_score: f64,
    pub bio_similarity_score: f64,
    pub handle_pattern_score: f64,
    pub new_account_score: f64,
}

pub fn analyze(
    logs: &[Event],
    settings: &Settings,
    graph: &Graph,
    profiles: &ProfileIndex,
) -> HashMap<String, BehavioralProfile> {
    let entropy = entropy::compute(logs);
    let ngram = ngram::compute(logs, settings);
    let sessions = sessions::compute(logs, settings);
    let reciprocity = reciprocity::compute(graph);
    let shared_wallets = funders::compute(logs);
    let cross_app = cross_platform::compute(logs);
    let fraud = fraud::compute(logs);
    let bio_similarity = bio::compute(profiles);
    let handles = handles::compute(logs);
    let novelty = novelty::compute(profiles);

    let mut churn_counts: HashMap<&str, u64> = HashMap::new();
    for event in logs {
        if settings.churn_actions.contains(&event.action) {
            *churn_counts.entry(&event.actor).or_insert(0) += 1;
        }
    }

    let mut out: HashMap<String, BehavioralProfile> = HashMap::new();
    for &actor_idx in &graph.actor_order {
        let actor = graph.interner.id(actor_idx).to_string();
        let profile = BehavioralProfile {
            entropy: entropy.get(&actor).copied().unwrap_or_default(),
            ngram: ngram.get(&actor).copied().unwrap_or_default(),
            sessions: sessions.get(&actor).copied().unwrap_or_default(),
            reciprocity: reciprocity.get(&actor).copied().unwrap_or_default(),
            churn_score: churn_counts.get(actor.as_str()).copied().unwrap_or(0),
            shared_wallets: shared_wallets.get(&actor).cloned().unwrap_or_default(),
            cross_app_platforms: cross_app.get(&actor).cloned().unwrap_or_default(),
            fraud_tx_score: fraud.get(&actor).copied().unwrap_or(0.0),
            bio_similarity_score: bio_similarity.get(&actor).copied().unwrap_or(0.0),
            handle_pattern_score: handles
                .get(&actor)
                .map(|h| h.handle_pattern_score)
                .unwrap_or(0.0),
            new_account_score: novelty.get(&actor).copied().unwrap_or(0.0),
        };
        out.insert(actor, profile);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use sybil_types::Settings;

    fn ev(actor: &str, action: &str, target: &str) -> Event {
        Event::new(None, "p", action, actor, target)
    }

    #[test]
    fn churn_score_counts_configured_actions_only() {
        let settings = Settings::default();
        let logs = vec![
            ev("a", "unfollow", "b"),
            ev("a", "unlike", "c"),
            ev("a", "follow", "d"),
        ];
        let graph = crate::graph::build(&logs, &settings);
        let profiles = crate::profile::aggregate(&logs);
        let result = analyze(&logs, &settings, &graph, &profiles);
        assert_eq!(result["a"].churn_score, 2);
    }
}
