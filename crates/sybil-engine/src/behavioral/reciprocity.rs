//! Reciprocity (§4.6): how much of an actor's positive-action out-set
//! points back at them.

use std::collections::HashMap;

use crate::graph::Graph;

#[derive(Debug, Clone, Copy, Default)]
pub struct ReciprocityStats {
    pub mutual_positive: u64,
    pub reciprocal_rate: f64,
}

pub fn compute(graph: &Graph) -> HashMap<String, ReciprocityStats> {
    let mut out = HashMap::new();
    for &actor_idx in &graph.actor_order {
        let out_set = &graph.directed_out_set[actor_idx as usize];
        if out_set.is_empty() {
            continue;
        }
        let mutual = out_set
            .iter()
            .filter(|&&target_idx| {
                graph
                    .directed_out_set
                    .get(target_idx as usize)
                    .is_some_and(|s| s.contains(&actor_idx))
            })
            .count() as u64;
        let rate = mutual as f64 / out_set.len() as f64;
        out.insert(
            graph.interner.id(actor_idx).to_string(),
            ReciprocityStats {
                mutual_positive: mutual,
                reciprocal_rate: rate,
            },
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use sybil_types::{Event, Settings};

    fn ev(actor: &str, action: &str, target: &str) -> Event {
        Event::new(None, "p", action, actor, target)
    }

    #[test]
    fn mutual_follow_scores_full_reciprocity() {
        let settings = Settings::default();
        let logs = vec![ev("a", "follow", "b"), ev("b", "follow", "a")];
        let graph = crate::graph::build(&logs, &settings);
        let stats = compute(&graph);
        assert_eq!(stats["a"].mutual_positive, 1);
        assert_eq!(stats["a"].reciprocal_rate, 1.0);
    }

    #[test]
    fn one_way_follow_scores_zero_reciprocity() {
        let settings = Settings::default();
        let logs = vec![ev("a", "follow", "b")];
        let graph = crate::graph::build(&logs, &settings);
        let stats = compute(&graph);
        assert_eq!(stats["a"].mutual_positive, 0);
        assert_eq!(stats["a"].reciprocal_rate, 0.0);
    }
}
