//! Per-actor velocity (longest run within a sliding window) and rapid rate
//! (max actions in any 1-minute bucket) — §4.5.

use std::collections::HashMap;

use sybil_types::{Event, Settings};

#[derive(Debug, Clone, Copy, Default)]
pub struct VelocityStats {
    pub max_actions_per_velocity_window: u64,
    pub max_per_second: f64,
    pub velocity_score: f64,
    pub max_actions_per_minute: u64,
    pub rapid_action_score: f64,
}

pub fn compute(logs: &[Event], settings: &Settings) -> HashMap<String, VelocityStats> {
    let mut by_actor: HashMap<&str, Vec<i64>> = HashMap::new();
    for event in logs {
        let Some(ts) = event.timestamp else { continue };
        by_actor.entry(&event.actor).or_default().push(ts.timestamp_millis());
    }

    let window_ms = (settings.velocity_window_seconds as i64) * 1000;
    let mut out = HashMap::new();

    for (actor, mut times) in by_actor {
        times.sort_unstable();

        let max_window_population = if window_ms > 0 {
            sliding_window_max(&times, window_ms)
        } else {
            0
        };

        let max_per_second = if settings.velocity_window_seconds > 0 {
            max_window_population as f64 / settings.velocity_window_seconds as f64
        } else {
            0.0
        };

        let velocity_score = if settings.velocity_max_actions_in_window > 0 {
            ((max_window_population as f64 - settings.velocity_max_actions_in_window as f64)
                / settings.velocity_max_actions_in_window as f64)
                .clamp(0.0, 1.0)
        } else {
            0.0
        };

        let max_actions_per_minute = max_per_minute_bucket(&times);
        let rapid_action_score = if settings.rapid_actions_per_minute_threshold > 0 {
            ((max_actions_per_minute as f64 - settings.rapid_actions_per_minute_threshold as f64)
                / settings.rapid_actions_per_minute_threshold as f64)
                .clamp(0.0, 1.0)
        } else {
            0.0
        };

        out.insert(
            actor.to_string(),
            VelocityStats {
                max_actions_per_velocity_window: max_window_population,
                max_per_second,
                velocity_score,
                max_actions_per_minute,
                rapid_action_score,
            },
        );
    }

    out
}

fn sliding_window_max(sorted_times_ms: &[i64], window_ms: i64) -> u64 {
    let mut left = 0usize;
    let mut best = 0u64;
    for right in 0..sorted_times_ms.len() {
        while sorted_times_ms[right] - sorted_times_ms[left] > window_ms {
            left += 1;
        }
        best = best.max((right - left + 1) as u64);
    }
    best
}

fn max_per_minute_bucket(sorted_times_ms: &[i64]) -> u64 {
    let mut counts: HashMap<i64, u64> = HashMap::new();
    for &t in sorted_times_ms {
        let bucket = t.div_euclid(60_000);
        *counts.entry(bucket).or_insert(0) += 1;
    }
    counts.values().copied().max().unwrap_or(0)
}
