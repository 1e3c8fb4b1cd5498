/*!
# Telephone Broadcast Simulator

Final stage of the pipeline: count the rounds the telephone model needs on
the stitched multicast tree. Each round every informed node forwards to at
most one still-uninformed child (in the tree's successor order), all
forwards land simultaneously, and the process stops once every reachable
target is informed or a full round passes without progress.

The simulation is bounded three ways: a wall-clock timeout, a hard round
cap, and a step cap on the depth computation (stitched paths can overlap
into shapes that make the depth walk expensive). A breached bound is
reported as a dedicated error variant rather than a sentinel value.
*/

use std::collections::{BTreeSet, HashMap};
use std::error::Error;
use std::fmt;
use std::time::{Duration, Instant};

use crate::core::types::NodeId;
use crate::tree::MulticastTree;

/// Resource bounds for a simulation run.
#[derive(Debug, Clone)]
pub struct BroadcastLimits {
    /// Wall-clock budget for the whole simulation.
    pub timeout: Duration,
    /// Maximum number of telephone rounds.
    pub max_rounds: usize,
    /// Maximum number of stack steps for the depth computation.
    pub max_depth_steps: usize,
}

impl Default for BroadcastLimits {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
            max_rounds: 1000,
            max_depth_steps: 1_000_000,
        }
    }
}

/// A breached resource bound.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BroadcastError {
    /// The wall-clock budget ran out.
    Timeout { elapsed: Duration },
    /// The round cap was reached with targets still uninformed.
    RoundCapExceeded { rounds: usize },
    /// The depth computation exhausted its step budget.
    DepthCapExceeded { steps: usize },
}

impl fmt::Display for BroadcastError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            BroadcastError::Timeout { elapsed } => {
                write!(f, "broadcast simulation timed out after {:?}", elapsed)
            }
            BroadcastError::RoundCapExceeded { rounds } => {
                write!(f, "broadcast round cap reached after {} rounds", rounds)
            }
            BroadcastError::DepthCapExceeded { steps } => {
                write!(f, "depth computation stopped after {} steps", steps)
            }
        }
    }
}

impl Error for BroadcastError {}

/// Depth of every node reachable from the root, by iterative DFS.
///
/// Mirrors the stitched tree's possible overlaps: nodes reachable along
/// several paths are revisited and keep the depth of the last visit, which
/// is what the step cap is for.
fn compute_depths(
    tree: &MulticastTree,
    root: NodeId,
    start: Instant,
    limits: &BroadcastLimits,
) -> Result<HashMap<NodeId, usize>, BroadcastError> {
    let mut depths = HashMap::new();
    let mut stack = vec![(root, 0usize)];
    let mut steps = 0usize;

    while let Some((node, depth)) = stack.pop() {
        if steps >= limits.max_depth_steps {
            return Err(BroadcastError::DepthCapExceeded { steps });
        }
        let elapsed = start.elapsed();
        if elapsed >= limits.timeout {
            return Err(BroadcastError::Timeout { elapsed });
        }
        steps += 1;
        depths.insert(node, depth);
        // reversed so the leftmost child is processed first
        for &child in tree.children(node).iter().rev() {
            stack.push((child, depth + 1));
        }
    }
    Ok(depths)
}

/// Simulates the telephone broadcast on a multicast tree and returns the
/// number of rounds executed.
///
/// Targets not present in the tree are ignored. The simulation ends when
/// every remaining target is informed, returning the rounds used; a full
/// round without any new informed node also ends it (some target is
/// unreachable), and that final round is included in the count.
///
/// Hand-off chains are short-circuited: when every node forwards to at
/// most one child and all targets are leaves at one common depth `d`, the
/// process provably takes exactly `d` rounds and `d` is returned without
/// running the loop.
///
/// # Errors
///
/// [`BroadcastError`] when a resource bound from `limits` is breached
/// while targets are still owed; finishing exactly at a bound is success.
pub fn simulate_broadcast_rounds(
    tree: &MulticastTree,
    root: NodeId,
    terminals: &BTreeSet<NodeId>,
    limits: &BroadcastLimits,
) -> Result<usize, BroadcastError> {
    let start = Instant::now();

    let valid: BTreeSet<NodeId> = terminals
        .iter()
        .copied()
        .filter(|t| tree.contains_node(*t))
        .collect();
    let mut informed: BTreeSet<NodeId> = BTreeSet::from([root]);
    let mut remaining: BTreeSet<NodeId> = valid.difference(&informed).copied().collect();
    if remaining.is_empty() {
        return Ok(0);
    }

    let depths = compute_depths(tree, root, start, limits)?;

    // Hand-off chain shortcut: exact only when no node fans out.
    let chain_like = tree.node_ids().all(|n| tree.out_degree(n) <= 1);
    if chain_like && valid.iter().all(|&t| tree.out_degree(t) == 0) {
        let mut target_depth = None;
        let mut uniform = true;
        for t in &valid {
            match (depths.get(t), target_depth) {
                (Some(&d), None) => target_depth = Some(d),
                (Some(&d), Some(prev)) if d == prev => {}
                _ => {
                    uniform = false;
                    break;
                }
            }
        }
        if uniform {
            if let Some(d) = target_depth {
                return Ok(d);
            }
        }
    }

    let mut rounds = 0usize;
    while !remaining.is_empty() {
        let elapsed = start.elapsed();
        if elapsed >= limits.timeout {
            return Err(BroadcastError::Timeout { elapsed });
        }
        if rounds >= limits.max_rounds {
            return Err(BroadcastError::RoundCapExceeded { rounds });
        }
        rounds += 1;

        // Forwards resolve against the round-start snapshot, so they all
        // land simultaneously.
        let mut newly_informed: BTreeSet<NodeId> = BTreeSet::new();
        for &u in &informed {
            for &v in tree.children(u) {
                if !informed.contains(&v) {
                    newly_informed.insert(v);
                    break;
                }
            }
        }

        if newly_informed.is_empty() {
            // a target is unreachable; the idle round still counts
            return Ok(rounds);
        }
        for v in &newly_informed {
            remaining.remove(v);
        }
        informed.extend(newly_informed);
    }

    Ok(rounds)
}

#[cfg(test)]
mod tests {
    use super::{BroadcastError, BroadcastLimits, simulate_broadcast_rounds};
    use crate::core::types::{Digraph, NodeId};
    use crate::tree::MulticastTree;
    use std::collections::BTreeSet;

    fn mint_ids(n: usize) -> Vec<NodeId> {
        let mut g = Digraph::<u32, f32>::new();
        (0..n).map(|i| g.add_node(i as u32)).collect()
    }

    #[test]
    fn test_uneven_arms_finish_together() {
        // 0 -> 1 -> 2 and 0 -> 3: round 1 starts the long arm, round 2
        // serves both ends at once
        let ids = mint_ids(4);
        let mut tree = MulticastTree::new(ids[0]);
        tree.add_edge(ids[0], ids[1]);
        tree.add_edge(ids[1], ids[2]);
        tree.add_edge(ids[0], ids[3]);

        let terminals = BTreeSet::from([ids[2], ids[3]]);
        let rounds =
            simulate_broadcast_rounds(&tree, ids[0], &terminals, &BroadcastLimits::default());
        assert_eq!(rounds, Ok(2));
    }

    #[test]
    fn test_mid_chain_target_runs_the_loop() {
        // the target forwards onward, so it is no leaf and the hand-off
        // shortcut must stay out of the way
        let ids = mint_ids(4);
        let mut tree = MulticastTree::new(ids[0]);
        for pair in ids.windows(2) {
            tree.add_edge(pair[0], pair[1]);
        }

        let terminals = BTreeSet::from([ids[2]]);
        let rounds =
            simulate_broadcast_rounds(&tree, ids[0], &terminals, &BroadcastLimits::default());
        assert_eq!(rounds, Ok(2));
    }

    #[test]
    fn test_targets_entirely_outside_tree() {
        let ids = mint_ids(4);
        let mut tree = MulticastTree::new(ids[0]);
        tree.add_edge(ids[0], ids[1]);

        let terminals = BTreeSet::from([ids[2], ids[3]]);
        let rounds =
            simulate_broadcast_rounds(&tree, ids[0], &terminals, &BroadcastLimits::default());
        assert_eq!(rounds, Ok(0));
    }

    #[test]
    fn test_star_hits_round_cap() {
        // four spokes need four rounds; a cap of two fires mid-broadcast
        let ids = mint_ids(5);
        let mut tree = MulticastTree::new(ids[0]);
        for &spoke in &ids[1..] {
            tree.add_edge(ids[0], spoke);
        }

        let terminals: BTreeSet<NodeId> = ids[1..].iter().copied().collect();
        let limits = BroadcastLimits {
            max_rounds: 2,
            ..BroadcastLimits::default()
        };
        assert_eq!(
            simulate_broadcast_rounds(&tree, ids[0], &terminals, &limits),
            Err(BroadcastError::RoundCapExceeded { rounds: 2 })
        );
    }

    #[test]
    fn test_depth_step_budget_of_zero() {
        let ids = mint_ids(2);
        let mut tree = MulticastTree::new(ids[0]);
        tree.add_edge(ids[0], ids[1]);

        let terminals = BTreeSet::from([ids[1]]);
        let limits = BroadcastLimits {
            max_depth_steps: 0,
            ..BroadcastLimits::default()
        };
        assert_eq!(
            simulate_broadcast_rounds(&tree, ids[0], &terminals, &limits),
            Err(BroadcastError::DepthCapExceeded { steps: 0 })
        );
    }
}
