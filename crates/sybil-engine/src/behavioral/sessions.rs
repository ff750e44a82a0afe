//! Session segmentation (§4.6): splits an actor's timeline at gaps larger
//! than `sessionGapMinutes` and summarizes the resulting sessions.

use std::collections::HashMap;

use sybil_types::{Event, Settings};

#[derive(Debug, Clone, Copy, Default)]
pub struct SessionStats {
    pub session_count: u64,
    pub avg_session_minutes: f64,
    pub avg_gap_minutes: f64,
    pub max_gap_minutes: f64,
    pub botty_session_score: f64,
}

pub fn compute(logs: &[Event], settings: &Settings) -> HashMap<String, SessionStats> {
    let gap_ms = (settings.session_gap_seconds() as i64) * 1000;
    compute_with_gap(logs, gap_ms)
}

/// Same as [`compute`] but takes the session-gap threshold directly in
/// milliseconds, for callers outside the engine pipeline (§6 auxiliary
/// helper `detectSessionMetrics(logs, sessionGapMs)`).
pub fn compute_with_gap(logs: &[Event], gap_ms: i64) -> HashMap<String, SessionStats> {
    let mut by_actor: HashMap<&str, Vec<i64>> = HashMap::new();
    for event in logs {
        if let Some(ts) = event.timestamp {
            by_actor.entry(&event.actor).or_default().push(ts.timestamp_millis());
        }
    }

    let mut out = HashMap::new();
    for (actor, mut times) in by_actor {
        times.sort_unstable();

        let mut session_spans: Vec<(i64, i64)> = Vec::new();
        let mut gaps_ms: Vec<i64> = Vec::new();
        let mut session_start = times[0];
        let mut prev = times[0];

        for &t in &times[1..] {
            let gap = t - prev;
            if gap > gap_ms {
                session_spans.push((session_start, prev));
                gaps_ms.push(gap);
                session_start = t;
            }
            prev = t;
        }
        session_spans.push((session_start, prev));

        let session_count = session_spans.len() as u64;
        let avg_session_minutes = session_spans
            .iter()
            .map(|(s, e)| (e - s) as f64 / 60_000.0)
            .sum::<f64>()
            / session_count as f64;
        let avg_gap_minutes = if gaps_ms.is_empty() {
            0.0
        } else {
            gaps_ms.iter().map(|&g| g as f64 / 60_000.0).sum::<f64>() / gaps_ms.len() as f64
        };
        let max_gap_minutes = gaps_ms
            .iter()
            .map(|&g| g as f64 / 60_000.0)
            .fold(0.0, f64::max);

        let short_sessions = if avg_session_minutes <= 1.0 {
            1.0
        } else if avg_session_minutes <= 5.0 {
            0.5
        } else {
            0.0
        };
        let many_sessions = (session_count as f64 / 10.0).min(1.0);
        let botty_session_score = short_sessions * many_sessions;

        out.insert(
            actor.to_string(),
            SessionStats {
                session_count,
                avg_session_minutes,
                avg_gap_minutes,
                max_gap_minutes,
                botty_session_score,
            },
        );
    }
    out
}
