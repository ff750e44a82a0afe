//! Undirected eigenvector centrality via power iteration (§4.4).

use crate::graph::Graph;

const ITERATIONS: usize = 20;

/// `v <- A*v` for `ITERATIONS` rounds, L2-normalized after each round. The
/// initial vector is all-ones. Returns one score per node index.
pub fn compute(graph: &Graph) -> Vec<f64> {
    let n = graph.node_count();
    if n == 0 {
        return Vec::new();
    }

    let mut v = vec![1.0; n];
    for _ in 0..ITERATIONS {
        let mut next = vec![0.0; n];
        for (u, neighbors) in graph.undirected_adj.iter().enumerate() {
            for &w in neighbors {
                next[u] += v[w as usize];
            }
        }
        let norm = next.iter().map(|x| x * x).sum::<f64>().sqrt();
        if norm > 0.0 {
            for x in next.iter_mut() {
                *x /= norm;
            }
        }
        v = next;
    }

    v
}
