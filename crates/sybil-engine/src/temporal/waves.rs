//! Fixed-bin waves (§4.5): `(binStart, action, target) -> (count, actorSet)`.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, TimeZone, Utc};
use sybil_types::{Event, Settings, Wave, WaveMethod};

struct BinBucket {
    window_start: DateTime<Utc>,
    action: String,
    target: String,
    count: u64,
    actors: HashSet<String>,
}

/// Returns the emitted waves plus, for each contributing actor, the set of
/// bin keys (`"{binStart}:{action}:{target}"`) it took part in — used by
/// `burst_actions` (§4.5's "Per-actor bursty-action count").
pub fn detect(logs: &[Event], settings: &Settings) -> (Vec<Wave>, HashMap<String, HashSet<String>>) {
    let bin_width = settings.time_bin_seconds() as i64;
    if bin_width <= 0 {
        return (Vec::new(), HashMap::new());
    }

    let mut buckets: HashMap<(i64, String, String), BinBucket> = HashMap::new();

    for event in logs {
        let Some(ts) = event.timestamp else { continue };
        let epoch = ts.timestamp();
        let bin_start_epoch = epoch.div_euclid(bin_width) * bin_width;
        let key = (bin_start_epoch, event.action.clone(), event.target.clone());
        let bucket = buckets.entry(key).or_insert_with(|| BinBucket {
            window_start: Utc.timestamp_opt(bin_start_epoch, 0).unwrap(),
            action: event.action.clone(),
            target: event.target.clone(),
            count: 0,
            actors: HashSet::new(),
        });
        bucket.count += 1;
        bucket.actors.insert(event.actor.clone());
    }

    let mut waves = Vec::new();
    let mut per_actor_keys: HashMap<String, HashSet<String>> = HashMap::new();

    let mut entries: Vec<_> = buckets.into_values().collect();
    entries.sort_by(|a, b| {
        a.window_start
            .cmp(&b.window_start)
            .then(a.action.cmp(&b.action))
            .then(a.target.cmp(&b.target))
    });

    for bucket in entries {
        if bucket.count < settings.wave_min_count as u64
            || bucket.actors.len() < settings.wave_min_actors
        {
            continue;
        }

        let key_string = format!(
            "{}:{}:{}",
            bucket.window_start.timestamp(),
            bucket.action,
            bucket.target
        );
        let mut actors: Vec<String> = bucket.actors.iter().cloned().collect();
        actors.sort();

        for actor in &actors {
            per_actor_keys
                .entry(actor.clone())
                .or_default()
                .insert(key_string.clone());
        }

        waves.push(Wave {
            window_start: bucket.window_start,
            window_end: bucket.window_start + chrono::Duration::seconds(bin_width),
            action: bucket.action,
            target: bucket.target,
            actors,
            z_score: bucket.count as f64 / (settings.wave_min_count.max(1)) as f64,
            method: WaveMethod::Bin,
        });
    }

    (waves, per_actor_keys)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn ev_at(t: DateTime<Utc>, actor: &str, action: &str, target: &str) -> Event {
        Event::new(Some(t), "p", action, actor, target)
    }

    #[test]
    fn emits_wave_when_count_and_actors_clear_thresholds() {
        let settings = Settings::default();
        let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let mut logs = Vec::new();
        for i in 0..settings.wave_min_count {
            logs.push(ev_at(
                base + Duration::seconds(i as i64),
                &format!("actor{}", i % settings.wave_min_actors.max(1)),
                "unfollow",
                "target1",
            ));
        }
        let (waves, _) = detect(&logs, &settings);
        assert_eq!(waves.len(), 1);
        assert_eq!(waves[0].method, WaveMethod::Bin);
    }

    #[test]
    fn time_invalid_events_are_excluded() {
        let settings = Settings::default();
        let logs = vec![Event::new(None, "p", "follow", "a", "b")];
        let (waves, keys) = detect(&logs, &settings);
        assert!(waves.is_empty());
        assert!(keys.is_empty());
    }
}
