//! Graph Builder (§4.2) — materializes the directed positive-action graph
//! plus a simple undirected projection used by the structural algorithms.

use std::collections::{HashMap, HashSet};

use sybil_types::{Edge, Event, GraphElements, Node, Settings};

/// Maps string identifiers to dense `u32` indices, assigned on first sighting
/// (Design Notes: "adjacency is stored as `actorIndex -> [actorIndex]` via an
/// interning table from string to 32-bit index").
#[derive(Debug, Default)]
pub struct Interner {
    index_of: HashMap<String, u32>,
    ids: Vec<String>,
}

impl Interner {
    pub fn intern(&mut self, s: &str) -> u32 {
        if let Some(&idx) = self.index_of.get(s) {
            return idx;
        }
        let idx = self.ids.len() as u32;
        self.ids.push(s.to_string());
        self.index_of.insert(s.to_string(), idx);
        idx
    }

    pub fn get(&self, s: &str) -> Option<u32> {
        self.index_of.get(s).copied()
    }

    pub fn id(&self, idx: u32) -> &str {
        &self.ids[idx as usize]
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// The positive-action graph: a directed multigraph for centrality, and its
/// simple (deduplicated) undirected projection for components/conductance/
/// eigenvector/betweenness.
pub struct Graph {
    pub interner: Interner,
    /// Directed multi-edge out-adjacency, indexed by node.
    pub directed_out: Vec<Vec<u32>>,
    /// Deduplicated directed out-neighbors, indexed by node (used by reciprocity).
    pub directed_out_set: Vec<HashSet<u32>>,
    /// Simple (deduplicated) undirected adjacency, indexed by node.
    pub undirected_adj: Vec<HashSet<u32>>,
    pub elements: GraphElements,
    /// Node indices that appeared at least once as an event's `actor`,
    /// in order of first appearance. Scorecards are produced for these.
    pub actor_order: Vec<u32>,
}

impl Graph {
    pub fn node_count(&self) -> usize {
        self.interner.len()
    }
}

fn ensure_capacity(
    interner: &Interner,
    directed_out: &mut Vec<Vec<u32>>,
    directed_out_set: &mut Vec<HashSet<u32>>,
    undirected_adj: &mut Vec<HashSet<u32>>,
    nodes: &mut Vec<Node>,
) {
    while directed_out.len() < interner.len() {
        directed_out.push(Vec::new());
        directed_out_set.push(HashSet::new());
        undirected_adj.push(HashSet::new());
        let id = interner.id((directed_out.len() - 1) as u32).to_string();
        nodes.push(Node {
            id: id.clone(),
            label: id,
        });
    }
}

pub fn build(logs: &[Event], settings: &Settings) -> Graph {
    let mut interner = Interner::default();
    let mut directed_out: Vec<Vec<u32>> = Vec::new();
    let mut directed_out_set: Vec<HashSet<u32>> = Vec::new();
    let mut undirected_adj: Vec<HashSet<u32>> = Vec::new();
    let mut nodes = Vec::new();
    let mut edges = Vec::new();
    let mut actor_order = Vec::new();
    let mut seen_actor: HashSet<u32> = HashSet::new();

    for event in logs {
        let actor_idx = interner.intern(&event.actor);
        let target_idx = interner.intern(&event.target);
        ensure_capacity(&interner, &mut directed_out, &mut directed_out_set, &mut undirected_adj, &mut nodes);

        if seen_actor.insert(actor_idx) {
            actor_order.push(actor_idx);
        }

        if settings.positive_actions.contains(&event.action) {
            directed_out[actor_idx as usize].push(target_idx);
            directed_out_set[actor_idx as usize].insert(target_idx);
            undirected_adj[actor_idx as usize].insert(target_idx);
            undirected_adj[target_idx as usize].insert(actor_idx);
            edges.push(Edge {
                from: event.actor.clone(),
                to: event.target.clone(),
                action: event.action.clone(),
            });
        }
    }

    Graph {
        interner,
        directed_out,
        directed_out_set,
        undirected_adj,
        elements: GraphElements { nodes, edges },
        actor_order,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sybil_types::Event;

    fn ev(actor: &str, action: &str, target: &str) -> Event {
        Event::new(None, "p", action, actor, target)
    }

    #[test]
    fn edge_count_matches_positive_action_count() {
        let settings = Settings::default();
        let logs = vec![
            ev("a", "follow", "b"),
            ev("a", "comment", "b"),
            ev("b", "follow", "a"),
        ];
        let g = build(&logs, &settings);
        assert_eq!(g.elements.edges.len(), 2);
        assert_eq!(g.node_count(), 2);
    }

    #[test]
    fn node_order_is_first_sighting() {
        let settings = Settings::default();
        let logs = vec![ev("z", "follow", "a"), ev("a", "follow", "m")];
        let g = build(&logs, &settings);
        assert_eq!(g.elements.nodes[0].id, "z");
        assert_eq!(g.elements.nodes[1].id, "a");
        assert_eq!(g.elements.nodes[2].id, "m");
    }

    #[test]
    fn undirected_adjacency_is_deduplicated() {
        let settings = Settings::default();
        let logs = vec![ev("a", "follow", "b"), ev("a", "follow", "b")];
        let g = build(&logs, &settings);
        let a = g.interner.get("a").unwrap();
        let b = g.interner.get("b").unwrap();
        assert_eq!(g.undirected_adj[a as usize].len(), 1);
        assert_eq!(g.undirected_adj[b as usize].len(), 1);
        assert_eq!(g.directed_out[a as usize].len(), 2);
    }
}
