//! Pure view-model builder for the terminal report: turns an
//! `AnalysisResult` into printable rows without touching a terminal. The
//! handler owns I/O; this module only shapes data.

use sybil_types::{AnalysisResult, Cluster, Scorecard, Wave};

pub struct Report {
    pub total_actors: usize,
    pub flagged_actors: usize,
    pub top_scorecards: Vec<Scorecard>,
    pub clusters: Vec<Cluster>,
    pub waves: Vec<Wave>,
}

/// Builds the report view model, sorting scorecards by `sybilScore`
/// descending and keeping only `top` of them (after the optional
/// `min_score` filter).
pub fn build(result: &AnalysisResult, min_score: Option<f64>, top: usize) -> Report {
    let mut scorecards: Vec<Scorecard> = result.scorecards.clone();
    scorecards.sort_by(|a, b| b.sybil_score.partial_cmp(&a.sybil_score).unwrap());

    let flagged_actors = scorecards.iter().filter(|s| !s.reasons.is_empty()).count();

    let top_scorecards = scorecards
        .into_iter()
        .filter(|s| min_score.map(|m| s.sybil_score >= m).unwrap_or(true))
        .take(top)
        .collect();

    Report {
        total_actors: result.scorecards.len(),
        flagged_actors,
        top_scorecards,
        clusters: result.clusters.clone(),
        waves: result.waves.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sybil_types::GraphElements;

    fn scorecard(actor: &str, score: f64) -> Scorecard {
        Scorecard {
            actor: actor.to_string(),
            sybil_score: score,
            ..Default::default()
        }
    }

    #[test]
    fn sorts_by_score_descending_and_caps_at_top() {
        let result = AnalysisResult {
            elements: GraphElements::default(),
            clusters: Vec::new(),
            waves: Vec::new(),
            scorecards: vec![scorecard("a", 0.2), scorecard("b", 0.9), scorecard("c", 0.5)],
        };
        let report = build(&result, None, 2);
        assert_eq!(report.top_scorecards.len(), 2);
        assert_eq!(report.top_scorecards[0].actor, "b");
        assert_eq!(report.top_scorecards[1].actor, "c");
    }

    #[test]
    fn min_score_filters_before_take() {
        let result = AnalysisResult {
            elements: GraphElements::default(),
            clusters: Vec::new(),
            waves: Vec::new(),
            scorecards: vec![scorecard("a", 0.2), scorecard("b", 0.9)],
        };
        let report = build(&result, Some(0.5), 10);
        assert_eq!(report.top_scorecards.len(), 1);
        assert_eq!(report.top_scorecards[0].actor, "b");
    }
}
