//! Temporal Detectors (§4.5) — fixed-bin waves, sliding-window bursts,
//! per-actor velocity and rapid-rate.

mod bursts;
mod velocity;
mod waves;

use std::collections::{HashMap, HashSet};

use sybil_types::{Event, Settings, Wave};

pub use velocity::VelocityStats;

pub struct TemporalResult {
    pub waves: Vec<Wave>,
    pub burst_actions: HashMap<String, u64>,
    pub velocity: HashMap<String, VelocityStats>,
}

pub fn analyze(logs: &[Event], settings: &Settings) -> TemporalResult {
    let (bin_waves, bin_keys) = waves::detect(logs, settings);
    let (window_waves, window_keys) = bursts::detect(logs, settings);

    let mut combined_keys: HashMap<String, HashSet<String>> = bin_keys;
    for (actor, keys) in window_keys {
        combined_keys.entry(actor).or_default().extend(keys);
    }
    let burst_actions = combined_keys
        .into_iter()
        .map(|(actor, keys)| (actor, keys.len() as u64))
        .collect();

    let mut all_waves = bin_waves;
    all_waves.extend(window_waves);

    let velocity = velocity::compute(logs, settings);

    TemporalResult {
        waves: all_waves,
        burst_actions,
        velocity,
    }
}
