//! Component & Structure Analyzer (§4.3) — undirected connected components
//! with density/conductance, discovered by iterative DFS.

use sybil_types::{Cluster, Settings};

use crate::graph::Graph;

/// Per-actor structural facts needed by the scorer (§4.7's
/// `clusterIsolationScore`), keyed by node index.
#[derive(Debug, Clone, Copy, Default)]
pub struct NodeStructure {
    pub cluster_id: Option<u64>,
    /// Number of neighbors the node has *within* its qualifying cluster.
    pub degree_in_cluster: u32,
    /// Size of the qualifying cluster the node belongs to.
    pub cluster_size: u32,
}

pub struct Components {
    pub clusters: Vec<Cluster>,
    pub structure: Vec<NodeStructure>,
}

/// Iterative DFS over the simple undirected adjacency; rejects components
/// smaller than `settings.min_cluster_size`.
pub fn analyze(graph: &Graph, settings: &Settings) -> Components {
    let n = graph.node_count();
    let mut visited = vec![false; n];
    let mut clusters = Vec::new();
    let mut structure = vec![NodeStructure::default(); n];
    let mut next_cluster_id: u64 = 0;

    for start in 0..n {
        if visited[start] {
            continue;
        }
        // Iterative DFS to discover the component reachable from `start`.
        let mut members = Vec::new();
        let mut stack = vec![start as u32];
        visited[start] = true;
        while let Some(v) = stack.pop() {
            members.push(v);
            for &w in &graph.undirected_adj[v as usize] {
                if !visited[w as usize] {
                    visited[w as usize] = true;
                    stack.push(w);
                }
            }
        }

        if members.len() < settings.min_cluster_size {
            continue;
        }

        members.sort_unstable();
        let member_set: std::collections::HashSet<u32> = members.iter().copied().collect();

        let mut internal_edges: u64 = 0;
        let mut external_edges: u64 = 0;
        for &v in &members {
            let in_cluster = graph.undirected_adj[v as usize]
                .iter()
                .filter(|w| member_set.contains(w))
                .count() as u32;
            let out_cluster =
                graph.undirected_adj[v as usize].len() as u32 - in_cluster;
            internal_edges += in_cluster as u64;
            external_edges += out_cluster as u64;
            structure[v as usize] = NodeStructure {
                cluster_id: Some(next_cluster_id),
                degree_in_cluster: in_cluster,
                cluster_size: members.len() as u32,
            };
        }
        internal_edges /= 2;

        let size = members.len() as u64;
        let max_edges = size * (size.saturating_sub(1)) / 2;
        let density = if max_edges == 0 {
            0.0
        } else {
            internal_edges as f64 / max_edges as f64
        };
        let denom = internal_edges + external_edges;
        let conductance = if denom == 0 {
            0.0
        } else {
            external_edges as f64 / denom as f64
        };

        clusters.push(Cluster {
            id: next_cluster_id,
            members: members
                .iter()
                .map(|&idx| graph.interner.id(idx).to_string())
                .collect(),
            density,
            conductance,
            external_edges,
        });
        next_cluster_id += 1;
    }

    Components { clusters, structure }
}

impl Components {
    pub fn cluster_isolation_score(&self, node_idx: u32) -> f64 {
        let s = self.structure[node_idx as usize];
        match s.cluster_id {
            Some(_) if s.cluster_size > 0 => {
                1.0 - (s.degree_in_cluster as f64 / s.cluster_size as f64)
            }
            _ => 0.0,
        }
    }

    pub fn cluster_id_of(&self, node_idx: u32) -> Option<u64> {
        self.structure[node_idx as usize].cluster_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph;
    use sybil_types::Event;

    fn ev(actor: &str, action: &str, target: &str) -> Event {
        Event::new(None, "p", action, actor, target)
    }

    #[test]
    fn pure_isolation_clique_has_density_one() {
        // S2: 5 actors mutually following each other.
        let mut settings = Settings::default();
        settings.min_cluster_size = 2;
        let members = ["a", "b", "c", "d", "e"];
        let mut logs = Vec::new();
        for &x in &members {
            for &y in &members {
                if x != y {
                    logs.push(ev(x, "follow", y));
                }
            }
        }
        let g = graph::build(&logs, &settings);
        let comps = analyze(&g, &settings);
        assert_eq!(comps.clusters.len(), 1);
        let c = &comps.clusters[0];
        assert_eq!(c.members.len(), 5);
        assert_eq!(c.density, 1.0);
        assert_eq!(c.conductance, 0.0);
        assert_eq!(c.external_edges, 0);

        let idx = g.interner.get("a").unwrap();
        let score = comps.cluster_isolation_score(idx);
        assert!((score - 0.2).abs() < 1e-9);
    }

    #[test]
    fn components_below_min_size_are_dropped() {
        let mut settings = Settings::default();
        settings.min_cluster_size = 3;
        let logs = vec![ev("a", "follow", "b")];
        let g = graph::build(&logs, &settings);
        let comps = analyze(&g, &settings);
        assert!(comps.clusters.is_empty());
    }
}
