use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Engine configuration. All fields have defaults tuned against the
/// coordinated-farm and rapid-action generator scenarios used to validate
/// the detectors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Flagging threshold over `sybilScore`, in `[0, 1]`.
    pub threshold: f64,
    /// Components smaller than this are dropped from `clusters`.
    pub min_cluster_size: usize,
    /// Fixed-bin width, in minutes.
    pub time_bin_minutes: u32,
    /// Minimum event count for a fixed-bin wave.
    pub wave_min_count: usize,
    /// Minimum unique actor count for a fixed-bin wave.
    pub wave_min_actors: usize,
    /// Actions that materialize a graph edge.
    pub positive_actions: BTreeSet<String>,
    /// Actions counted as churn/reversal signals.
    pub churn_actions: BTreeSet<String>,
    /// Actions-per-minute cutoff for the rapid-action flag.
    pub rapid_actions_per_minute_threshold: u32,
    /// Minimum total actions before entropy scores contribute to the composite.
    pub entropy_min_total_actions: usize,
    /// Sliding-window width for burst detection, in seconds.
    pub burst_window_seconds: u64,
    /// Minimum event count for a sliding-window burst.
    pub burst_min_count: usize,
    /// Minimum unique actor count for a sliding-window burst.
    pub burst_min_actors: usize,
    /// Sliding-window width for velocity detection, in seconds.
    pub velocity_window_seconds: u64,
    /// Window population above which the velocity score saturates.
    pub velocity_max_actions_in_window: usize,
    /// Gap, in minutes, that splits an actor's timeline into sessions.
    pub session_gap_minutes: u32,
    /// n-gram length for the action-sequence repetition score, in `[2, 5]`.
    pub action_ngram_size: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            threshold: 0.6,
            min_cluster_size: 3,
            time_bin_minutes: 10,
            wave_min_count: 5,
            wave_min_actors: 3,
            positive_actions: ["follow", "like", "upvote", "tap", "transfer"]
                .into_iter()
                .map(String::from)
                .collect(),
            churn_actions: ["unfollow", "unlike"].into_iter().map(String::from).collect(),
            rapid_actions_per_minute_threshold: 20,
            entropy_min_total_actions: 5,
            burst_window_seconds: 120,
            burst_min_count: 3,
            burst_min_actors: 3,
            velocity_window_seconds: 60,
            velocity_max_actions_in_window: 10,
            session_gap_minutes: 30,
            action_ngram_size: 3,
        }
    }
}

impl Settings {
    /// Validate the documented ranges. `analyze` does not call this itself
    /// (§7: the engine is total on syntactically valid input) — it is for
    /// callers that load settings from an untrusted source, e.g. the CLI's
    /// `sybil.toml` overlay.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.threshold) {
            return Err(Error::InvalidSettings(format!(
                "threshold must be in [0,1], got {}",
                self.threshold
            )));
        }
        if self.min_cluster_size < 2 {
            return Err(Error::InvalidSettings(
                "min_cluster_size must be >= 2".into(),
            ));
        }
        if self.time_bin_minutes < 1 {
            return Err(Error::InvalidSettings("time_bin_minutes must be >= 1".into()));
        }
        if !(2..=5).contains(&self.action_ngram_size) {
            return Err(Error::InvalidSettings(
                "action_ngram_size must be in [2,5]".into(),
            ));
        }
        Ok(())
    }

    pub fn time_bin_seconds(&self) -> u64 {
        self.time_bin_minutes as u64 * 60
    }

    pub fn session_gap_seconds(&self) -> u64 {
        self.session_gap_minutes as u64 * 60
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        Settings::default().validate().expect("defaults must validate");
    }

    #[test]
    fn rejects_out_of_range_threshold() {
        let mut s = Settings::default();
        s.threshold = 1.5;
        assert!(s.validate().is_err());
    }

    #[test]
    fn rejects_tiny_cluster_size() {
        let mut s = Settings::default();
        s.min_cluster_size = 1;
        assert!(s.validate().is_err());
    }
}
