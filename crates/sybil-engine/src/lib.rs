//! Pure analysis engine: builds the interaction graph, connected components,
//! centrality scores, temporal waves/bursts, behavioral signals, and the
//! final per-actor scorecards from a raw event log.
//!
//! `analyze` has no I/O and is total on any syntactically valid input (§7):
//! it never panics and never returns an error.

mod behavioral;
mod centrality;
mod components;
mod graph;
mod links;
mod profile;
mod scorer;
mod temporal;

use std::collections::HashMap;

use sybil_types::{AnalysisResult, Event, Settings, Stage};

pub use behavioral::{
    detect_cross_app_linking, detect_fraudulent_transactions, detect_session_metrics,
    detect_shared_wallets,
};

/// Optional progress callback, invoked once per stage in order (§5).
pub type ProgressCallback<'a> = dyn FnMut(Stage, u8) + 'a;

pub fn analyze(logs: &[Event], settings: &Settings) -> AnalysisResult {
    analyze_with_progress(logs, settings, None)
}

pub fn analyze_with_progress(
    logs: &[Event],
    settings: &Settings,
    mut on_progress: Option<&mut ProgressCallback>,
) -> AnalysisResult {
    let mut report = |stage: Stage, pct: u8| {
        if let Some(cb) = on_progress.as_deref_mut() {
            cb(stage, pct);
        }
    };

    report(Stage::Start, 0);

    let profiles = profile::aggregate(logs);
    report(Stage::Profiles, 15);

    let graph = graph::build(logs, settings);
    report(Stage::Graph, 35);

    let components = components::analyze(&graph, settings);
    report(Stage::Clusters, 50);

    let centrality = centrality::compute(&graph);
    let temporal = temporal::analyze(logs, settings);
    report(Stage::Waves, 70);

    let behavioral = behavioral::analyze(logs, settings, &graph, &profiles);

    let mut total_actions_by_actor: HashMap<String, u64> = HashMap::new();
    for event in logs {
        *total_actions_by_actor.entry(event.actor.clone()).or_insert(0) += 1;
    }

    let scorecards = scorer::build(
        settings,
        &graph,
        &components,
        &centrality,
        &temporal,
        &profiles,
        &behavioral,
        &total_actions_by_actor,
    );
    report(Stage::Scorecards, 90);

    let result = AnalysisResult {
        elements: graph.elements,
        clusters: components.clusters,
        waves: temporal.waves,
        scorecards,
    };
    report(Stage::Done, 100);
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ev(actor: &str, action: &str, target: &str) -> Event {
        Event::new(None, "p", action, actor, target)
    }

    #[test]
    fn empty_input_yields_empty_result() {
        let settings = Settings::default();
        let result = analyze(&[], &settings);
        assert!(result.elements.nodes.is_empty());
        assert!(result.clusters.is_empty());
        assert!(result.waves.is_empty());
        assert!(result.scorecards.is_empty());
    }

    #[test]
    fn scorecard_emitted_per_distinct_actor() {
        let settings = Settings::default();
        let logs = vec![ev("a", "follow", "b"), ev("b", "follow", "a"), ev("c", "like", "a")];
        let result = analyze(&logs, &settings);
        let actors: std::collections::HashSet<_> =
            result.scorecards.iter().map(|s| s.actor.as_str()).collect();
        assert_eq!(actors, ["a", "b", "c"].into_iter().collect());
    }

    #[test]
    fn progress_callback_sees_all_stages_in_order() {
        let settings = Settings::default();
        let logs = vec![ev("a", "follow", "b")];
        let mut seen = Vec::new();
        let mut cb = |stage: Stage, _pct: u8| seen.push(stage);
        analyze_with_progress(&logs, &settings, Some(&mut cb));
        assert_eq!(
            seen,
            vec![
                Stage::Start,
                Stage::Profiles,
                Stage::Graph,
                Stage::Clusters,
                Stage::Waves,
                Stage::Scorecards,
                Stage::Done,
            ]
        );
    }
}
