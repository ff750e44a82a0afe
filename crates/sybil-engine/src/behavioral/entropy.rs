//! Target entropy and circadian rhythm (§4.6).

use std::collections::HashMap;

use chrono::Timelike;
use sybil_types::Event;

#[derive(Debug, Clone, Copy, Default)]
pub struct EntropyStats {
    pub total_actions: u64,
    pub unique_targets: u64,
    pub low_diversity_score: f64,
    pub target_entropy: f64,
    pub low_entropy_score: f64,
    pub hour_entropy: f64,
    pub active_hours: u32,
    pub circadian_score: f64,
}

fn shannon_entropy(counts: &HashMap<&str, u64>, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    counts
        .values()
        .map(|&c| {
            let p = c as f64 / total as f64;
            if p > 0.0 {
                -p * p.ln()
            } else {
                0.0
            }
        })
        .sum()
}

pub fn compute(logs: &[Event]) -> HashMap<String, EntropyStats> {
    let mut targets_by_actor: HashMap<&str, HashMap<&str, u64>> = HashMap::new();
    let mut hours_by_actor: HashMap<&str, [u64; 24]> = HashMap::new();
    let mut totals: HashMap<&str, u64> = HashMap::new();

    for event in logs {
        *targets_by_actor
            .entry(&event.actor)
            .or_default()
            .entry(&event.target)
            .or_insert(0) += 1;
        *totals.entry(&event.actor).or_insert(0) += 1;
        if let Some(ts) = event.timestamp {
            hours_by_actor.entry(&event.actor).or_insert([0; 24])[ts.hour() as usize] += 1;
        }
    }

    let mut out = HashMap::new();
    for (actor, total) in &totals {
        let target_counts = &targets_by_actor[actor];
        let unique_targets = target_counts.len() as u64;
        let low_diversity_score = if *total > 0 {
            1.0 - unique_targets as f64 / *total as f64
        } else {
            0.0
        };

        let target_entropy = if unique_targets >= 2 {
            let h = shannon_entropy(target_counts, *total);
            (h / (unique_targets as f64).ln()).clamp(0.0, 1.0)
        } else {
            0.0
        };
        let low_entropy_score = 1.0 - target_entropy;

        let hours = hours_by_actor.get(actor).copied().unwrap_or([0; 24]);
        let active_hours = hours.iter().filter(|&&c| c > 0).count() as u32;
        let hour_total: u64 = hours.iter().sum();
        let hour_entropy = if hour_total > 0 {
            let h: f64 = hours
                .iter()
                .filter(|&&c| c > 0)
                .map(|&c| {
                    let p = c as f64 / hour_total as f64;
                    -p * p.ln()
                })
                .sum();
            (h / 24f64.ln()).clamp(0.0, 1.0)
        } else {
            0.0
        };

        let wide = active_hours >= 20 && *total >= 200;
        let narrow = active_hours <= 2 && *total >= 100;
        let circadian_score = if wide {
            1.0
        } else if narrow {
            0.8
        } else {
            0.0
        };

        out.insert(
            actor.to_string(),
            EntropyStats {
                total_actions: *total,
                unique_targets,
                low_diversity_score,
                target_entropy,
                low_entropy_score,
                hour_entropy,
                active_hours,
                circadian_score,
            },
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    fn ev_at(t: Option<chrono::DateTime<Utc>>, actor: &str, target: &str) -> Event {
        Event::new(t, "p", "like", actor, target)
    }

    #[test]
    fn single_target_scores_zero_entropy() {
        let logs = vec![
            ev_at(None, "a", "x"),
            ev_at(None, "a", "x"),
            ev_at(None, "a", "x"),
        ];
        let stats = compute(&logs);
        let a = &stats["a"];
        assert_eq!(a.target_entropy, 0.0);
        assert_eq!(a.low_entropy_score, 1.0);
    }

    #[test]
    fn diverse_targets_score_high_entropy() {
        let logs: Vec<_> = (0..10)
            .map(|i| ev_at(None, "a", &format!("t{i}")))
            .collect();
        let stats = compute(&logs);
        let a = &stats["a"];
        assert!(a.target_entropy > 0.9, "got {}", a.target_entropy);
    }

    #[test]
    fn narrow_circadian_window_is_flagged() {
        let base = Utc.with_ymd_and_hms(2024, 1, 1, 3, 0, 0).unwrap();
        let logs: Vec<_> = (0..120)
            .map(|i| ev_at(Some(base + Duration::seconds(i)), "bot", "t"))
            .collect();
        let stats = compute(&logs);
        let bot = &stats["bot"];
        assert_eq!(bot.active_hours, 1);
        assert_eq!(bot.circadian_score, 0.8);
    }
}
