//! Sliding-window bursts (§4.5): per `(action, target)` key, the dominant
//! window whose Poisson z-score against the key's dataset-wide rate clears
//! 2.5.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};
use sybil_types::{Event, Settings, Wave, WaveMethod};

const Z_THRESHOLD: f64 = 2.5;
const MAX_BURSTS: usize = 250;
const EPS: f64 = 1e-9;

struct Candidate {
    window_start_ms: i64,
    count: usize,
    unique_actors: usize,
    actors: Vec<String>,
}

/// Finds the best sliding window for a single `(action, target)` key's
/// chronologically-sorted `(timestamp_ms, actor)` events.
fn best_window(events: &[(i64, String)], window_ms: i64, min_count: usize, min_actors: usize) -> Option<Candidate> {
    let mut left = 0usize;
    let mut counts: HashMap<&str, usize> = HashMap::new();
    let mut best: Option<Candidate> = None;

    for right in 0..events.len() {
        let right_actor = events[right].1.as_str();
        *counts.entry(right_actor).or_insert(0) += 1;

        while events[right].0 - events[left].0 > window_ms {
            let actor = events[left].1.as_str();
            if let Some(c) = counts.get_mut(actor) {
                *c -= 1;
                if *c == 0 {
                    counts.remove(actor);
                }
            }
            left += 1;
        }

        let count = right - left + 1;
        let unique_actors = counts.len();
        if count >= min_count && unique_actors >= min_actors {
            let is_better = match &best {
                None => true,
                Some(b) => count > b.count,
            };
            if is_better {
                let actors: Vec<String> = events[left..=right]
                    .iter()
                    .map(|(_, a)| a.clone())
                    .collect();
                best = Some(Candidate {
                    window_start_ms: events[left].0,
                    count,
                    unique_actors,
                    actors,
                });
            }
        }
    }

    best
}

/// Returns the emitted bursts plus, for each contributing actor, the set of
/// window keys (`"{windowStartMs}:{action}:{target}:window"`) it took part in.
pub fn detect(
    logs: &[Event],
    settings: &Settings,
) -> (Vec<Wave>, HashMap<String, HashSet<String>>) {
    let window_ms = (settings.burst_window_seconds as i64) * 1000;
    if window_ms <= 0 {
        return (Vec::new(), HashMap::new());
    }

    let mut by_key: HashMap<(String, String), Vec<(i64, String)>> = HashMap::new();
    let mut global_min: Option<i64> = None;
    let mut global_max: Option<i64> = None;

    for event in logs {
        let Some(ts) = event.timestamp else { continue };
        let ms = ts.timestamp_millis();
        global_min = Some(global_min.map_or(ms, |m: i64| m.min(ms)));
        global_max = Some(global_max.map_or(ms, |m: i64| m.max(ms)));
        by_key
            .entry((event.action.clone(), event.target.clone()))
            .or_default()
            .push((ms, event.actor.clone()));
    }

    let dataset_span_ms = match (global_min, global_max) {
        (Some(lo), Some(hi)) if hi > lo => (hi - lo) as f64,
        _ => 0.0,
    };

    let mut raw_bursts: Vec<(f64, Wave, Vec<String>)> = Vec::new();

    let mut keys: Vec<_> = by_key.into_iter().collect();
    keys.sort_by(|a, b| a.0.cmp(&b.0));

    for ((action, target), mut events) in keys {
        if events.len() < settings.burst_min_count {
            continue;
        }
        events.sort_by_key(|(ms, _)| *ms);

        let Some(candidate) = best_window(
            &events,
            window_ms,
            settings.burst_min_count,
            settings.burst_min_actors,
        ) else {
            continue;
        };

        if dataset_span_ms <= 0.0 {
            continue;
        }
        let rate = events.len() as f64 / dataset_span_ms;
        let expected = rate * window_ms as f64;
        let z = (candidate.count as f64 - expected) / expected.max(EPS).sqrt();
        if z < Z_THRESHOLD {
            continue;
        }

        let mut actors = candidate.actors.clone();
        actors.sort();
        actors.dedup();

        let window_start = ms_to_datetime(candidate.window_start_ms);
        let window_end = ms_to_datetime(candidate.window_start_ms + window_ms);
        let key_string = format!(
            "{}:{}:{}:window",
            candidate.window_start_ms, action, target
        );

        raw_bursts.push((
            z,
            Wave {
                window_start,
                window_end,
                action,
                target,
                actors,
                z_score: z,
                method: WaveMethod::Window,
            },
            vec![key_string],
        ));
        let _ = candidate.unique_actors;
    }

    raw_bursts.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));
    raw_bursts.truncate(MAX_BURSTS);

    let mut waves = Vec::with_capacity(raw_bursts.len());
    let mut per_actor_keys: HashMap<String, HashSet<String>> = HashMap::new();
    for (_, wave, keys) in raw_bursts {
        for actor in &wave.actors {
            for k in &keys {
                per_actor_keys.entry(actor.clone()).or_default().insert(k.clone());
            }
        }
        waves.push(wave);
    }

    (waves, per_actor_keys)
}

fn ms_to_datetime(ms: i64) -> DateTime<Utc> {
    chrono::DateTime::from_timestamp_millis(ms).unwrap_or_else(|| chrono::DateTime::UNIX_EPOCH)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Duration};

    fn ev_at(t: DateTime<Utc>, actor: &str, action: &str, target: &str) -> Event {
        Event::new(Some(t), "p", action, actor, target)
    }

    #[test]
    fn detects_unfollow_burst_against_shared_target() {
        let mut settings = Settings::default();
        settings.burst_window_seconds = 120;
        settings.burst_min_count = 3;
        settings.burst_min_actors = 3;

        let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 30, 0).unwrap();
        let mut logs = Vec::new();
        // Sparse organic background for (unfollow, target1) across the day
        // so the dataset span is large relative to the burst window.
        for i in 0..5 {
            logs.push(ev_at(
                base - Duration::hours(i + 1),
                &format!("bg{}", i),
                "unfollow",
                "target1",
            ));
        }
        // Coordinated burst: 10 actors x 3 events within 120s.
        for actor_i in 0..10 {
            for k in 0..3 {
                logs.push(ev_at(
                    base + Duration::seconds(actor_i * 2 + k),
                    &format!("farm{}", actor_i),
                    "unfollow",
                    "target1",
                ));
            }
        }
        let (waves, per_actor) = detect(&logs, &settings);
        assert!(!waves.is_empty(), "expected at least one burst");
        let w = &waves[0];
        assert_eq!(w.method, WaveMethod::Window);
        assert!(w.actors.len() >= 10);
        assert!(w.z_score >= 2.5);
        assert!(per_actor.contains_key("farm0"));
    }

    #[test]
    fn weak_signal_below_z_threshold_is_not_emitted() {
        let mut settings = Settings::default();
        settings.burst_min_count = 2;
        settings.burst_min_actors = 2;
        settings.burst_window_seconds = 3600;

        let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        // Evenly spaced events: no window concentrates more than the global
        // average, so z should stay below 2.5 and nothing is emitted.
        let mut logs = Vec::new();
        for i in 0..20 {
            logs.push(ev_at(
                base + Duration::hours(i),
                &format!("actor{}", i % 5),
                "like",
                "postA",
            ));
        }
        let (waves, _) = detect(&logs, &settings);
        assert!(waves.is_empty());
    }
}
