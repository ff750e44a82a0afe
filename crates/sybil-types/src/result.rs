use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A node suitable for graph visualization (§4.2).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: String,
    pub label: String,
}

/// A directed positive-action edge (§4.2). Multi-edges are preserved: the
/// same `(from, to)` pair may appear more than once if the actor repeated
/// the action against the same target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub from: String,
    pub to: String,
    pub action: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphElements {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

/// A connected component of the undirected positive-action graph with
/// `members.len() >= settings.min_cluster_size` (§4.3).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cluster {
    pub id: u64,
    pub members: Vec<String>,
    pub density: f64,
    pub conductance: f64,
    pub external_edges: u64,
}

/// Which temporal detector produced a `Wave` (§4.5 / GLOSSARY).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WaveMethod {
    Bin,
    Window,
}

/// A coordinated-timing signal: either a fixed-bin wave or a sliding-window
/// burst (§4.5).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Wave {
    pub window_start: DateTime<Utc>,
    pub window_end: DateTime<Utc>,
    pub action: String,
    pub target: String,
    pub actors: Vec<String>,
    pub z_score: f64,
    pub method: WaveMethod,
}

/// Per-actor report. Field names serialize as camelCase via `rename_all`
/// so serialized `AnalysisResult`s stay compatible with non-Rust consumers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scorecard {
    pub actor: String,

    // headline metric
    pub sybil_score: f64,
    pub reasons: Vec<String>,

    // link/profile signals
    pub links: Vec<String>,
    pub suspicious_links: Vec<String>,
    pub shared_links: Vec<String>,
    pub profile_anomaly_score: f64,
    pub phishing_link_score: f64,
    pub link_diversity: f64,
    pub bio_similarity_score: f64,
    pub handle_pattern_score: f64,
    pub new_account_score: f64,

    // structural signals
    pub cluster_id: Option<u64>,
    pub cluster_isolation_score: f64,
    pub pagerank: f64,
    pub eigen_centrality: f64,
    pub betweenness: f64,
    pub reciprocal_rate: f64,
    pub mutual_positive: u64,

    // temporal signals
    pub burst_actions: u64,
    pub coordination_score: f64,
    pub max_actions_per_minute: u64,
    pub rapid_action_score: f64,
    pub max_actions_per_velocity_window: u64,
    pub max_per_second: f64,
    pub velocity_score: f64,

    // behavioral signals
    pub total_actions: u64,
    pub unique_targets: u64,
    pub low_diversity_score: f64,
    pub target_entropy: f64,
    pub low_entropy_score: f64,
    pub hour_entropy: f64,
    pub active_hours: u32,
    pub circadian_score: f64,
    pub top_action_ngram_count: u64,
    pub action_sequence_repeat_score: f64,
    pub session_count: u64,
    pub avg_session_minutes: f64,
    pub avg_gap_minutes: f64,
    pub max_gap_minutes: f64,
    pub botty_session_score: f64,
    pub churn_score: u64,
    pub shared_wallets: Vec<String>,
    pub shared_wallet_score: f64,
    pub cross_app_platforms: Vec<String>,
    pub cross_app_score: f64,
    pub fraud_tx_score: f64,
}

/// The return value of `analyze` (§3).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub elements: GraphElements,
    pub clusters: Vec<Cluster>,
    pub waves: Vec<Wave>,
    pub scorecards: Vec<Scorecard>,
}

/// Stages the optional progress callback may be invoked with (§5).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Start,
    Profiles,
    Graph,
    Clusters,
    Waves,
    Scorecards,
    Done,
}
