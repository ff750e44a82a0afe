//! Action n-gram repetition (§4.6): how dominant an actor's single most
//! common sliding n-gram of action names is.

use std::collections::HashMap;

use sybil_types::{Event, Settings};

#[derive(Debug, Clone, Copy, Default)]
pub struct NgramStats {
    pub top_action_ngram_count: u64,
    pub action_sequence_repeat_score: f64,
}

pub fn compute(logs: &[Event], settings: &Settings) -> HashMap<String, NgramStats> {
    let n = settings.action_ngram_size;
    let mut by_actor: HashMap<&str, Vec<(Option<i64>, &str)>> = HashMap::new();
    for event in logs {
        by_actor
            .entry(&event.actor)
            .or_default()
            .push((event.timestamp.map(|t| t.timestamp_millis()), &event.action));
    }

    let mut out = HashMap::new();
    for (actor, mut events) in by_actor {
        events.sort_by_key(|(ts, _)| ts.unwrap_or(i64::MIN));
        let actions: Vec<&str> = events.iter().map(|(_, a)| *a).collect();

        if actions.len() < n + 2 {
            out.insert(actor.to_string(), NgramStats::default());
            continue;
        }

        let mut gram_counts: HashMap<Vec<&str>, u64> = HashMap::new();
        let total_ngrams = actions.len() - n + 1;
        for window in actions.windows(n) {
            *gram_counts.entry(window.to_vec()).or_insert(0) += 1;
        }
        let top_count = gram_counts.values().copied().max().unwrap_or(0);
        let score = if total_ngrams > 0 {
            (top_count as f64 / total_ngrams as f64).clamp(0.0, 1.0)
        } else {
            0.0
        };

        out.insert(
            actor.to_string(),
            NgramStats {
                top_action_ngram_count: top_count,
                action_sequence_repeat_score: score,
            },
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ev(actor: &str, action: &str) -> Event {
        Event::new(None, "p", action, actor, "t")
    }

    #[test]
    fn repeated_follow_unfollow_pair_scores_high() {
        let settings = Settings::default(); // action_ngram_size = 3
        let mut logs = Vec::new();
        for _ in 0..10 {
            logs.push(ev("bot", "follow"));
            logs.push(ev("bot", "unfollow"));
            logs.push(ev("bot", "like"));
        }
        let stats = compute(&logs, &settings);
        let bot = &stats["bot"];
        assert!(bot.action_sequence_repeat_score > 0.5, "got {}", bot.action_sequence_repeat_score);
    }

    #[test]
    fn short_history_scores_zero() {
        let settings = Settings::default();
        let logs = vec![ev("a", "follow"), ev("a", "like")];
        let stats = compute(&logs, &settings);
        assert_eq!(stats["a"].action_sequence_repeat_score, 0.0);
    }
}
