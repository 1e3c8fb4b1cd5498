/*!
# Graph Generators

Directed graph generators for experiments and tests: Erdős–Rényi digraphs
and complete digraphs (directed cliques). Node attributes are fixed to `u32`
(the node's label) and edge weights to `f32`.

The random generator is seeded so runs are reproducible. Invalid parameters
(probability outside [0, 1], zero nodes) are rejected with
`KmtmError::InvalidArgument`.

# Examples

```rust
use kmtm::core::generators::erdos_renyi_digraph;

let graph = erdos_renyi_digraph(100, 0.05, 42).expect("valid parameters");
assert_eq!(graph.node_count(), 100);
```
*/

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::core::error::KmtmError;
use crate::core::types::Digraph;

/// Generates a directed Erdős–Rényi graph G(n, p).
///
/// Each ordered pair (u, v) with u ≠ v becomes an edge independently with
/// probability `p`. There are no self-loops.
///
/// # Arguments
///
/// * `n` - The number of nodes (must be > 0).
/// * `p` - The probability of edge creation (must be in [0.0, 1.0]).
/// * `seed` - The seed for the random number generator.
pub fn erdos_renyi_digraph(n: usize, p: f64, seed: u64) -> Result<Digraph<u32, f32>, KmtmError> {
    if n == 0 {
        return Err(KmtmError::invalid_argument(
            "Number of nodes must be greater than zero.",
        ));
    }
    if !(0.0..=1.0).contains(&p) {
        return Err(KmtmError::invalid_argument(
            "Probability p must be in the range [0.0, 1.0].",
        ));
    }

    let mut graph = Digraph::with_capacity(n, 0);
    let mut nodes = Vec::with_capacity(n);
    for i in 0..n {
        nodes.push(graph.add_node(i as u32));
    }
    let mut rng = StdRng::seed_from_u64(seed);
    for i in 0..n {
        for j in 0..n {
            if i != j && rng.random_bool(p) {
                graph.add_edge(nodes[i], nodes[j], 1.0);
            }
        }
    }
    Ok(graph)
}

/// Generates a complete digraph (directed clique) on `n` nodes.
///
/// Every ordered pair (u, v) with u ≠ v is an edge.
///
/// # Arguments
///
/// * `n` - The number of nodes (must be > 0).
pub fn complete_digraph(n: usize) -> Result<Digraph<u32, f32>, KmtmError> {
    if n == 0 {
        return Err(KmtmError::invalid_argument(
            "Number of nodes must be greater than zero.",
        ));
    }
    let mut graph = Digraph::with_capacity(n, n * n.saturating_sub(1));
    let mut nodes = Vec::with_capacity(n);
    for i in 0..n {
        nodes.push(graph.add_node(i as u32));
    }
    for i in 0..n {
        for j in 0..n {
            if i != j {
                graph.add_edge(nodes[i], nodes[j], 1.0);
            }
        }
    }
    Ok(graph)
}
