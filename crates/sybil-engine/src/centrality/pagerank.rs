//! Directed PageRank with dangling-mass redistribution (§4.4).

use crate::graph::Graph;

const ITERATIONS: usize = 20;
const DAMPING: f64 = 0.85;

/// Returns one score per node index, in `[0, 1]`-ish PageRank mass (sums to
/// ~1 across all nodes, not individually clamped — the scorer applies its
/// own `>0.01` reason threshold directly to this raw mass).
pub fn compute(graph: &Graph) -> Vec<f64> {
    let n = graph.node_count();
    if n == 0 {
        return Vec::new();
    }

    let out_degree: Vec<usize> = graph.directed_out.iter().map(|v| v.len()).collect();
    let mut rank = vec![1.0 / n as f64; n];

    for _ in 0..ITERATIONS {
        let dangling_mass: f64 = (0..n)
            .filter(|&v| out_degree[v] == 0)
            .map(|v| rank[v])
            .sum();

        let mut next = vec![(1.0 - DAMPING) / n as f64; n];
        let redistributed = DAMPING * dangling_mass / n as f64;
        for v in next.iter_mut() {
            *v += redistributed;
        }

        for u in 0..n {
            if out_degree[u] == 0 {
                continue;
            }
            let share = DAMPING * rank[u] / out_degree[u] as f64;
            for &v in &graph.directed_out[u] {
                next[v as usize] += share;
            }
        }

        rank = next;
    }

    rank
}
