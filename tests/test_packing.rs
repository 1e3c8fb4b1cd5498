use kmtm::core::types::{Digraph, NodeId};
use kmtm::packing::{greedy_packing, rho};
use std::collections::BTreeSet;

/// Builds a directed path 0 -> 1 -> ... -> n-1.
fn build_directed_path(n: usize) -> (Digraph<u32, f32>, Vec<NodeId>) {
    let mut g = Digraph::new();
    let ids: Vec<_> = (0..n).map(|i| g.add_node(i as u32)).collect();
    for w in ids.windows(2) {
        g.add_edge(w[0], w[1], 1.0);
    }
    (g, ids)
}

#[test]
fn test_simple_path_single_terminal() {
    // path 0→1→2→3→4, root 0, terminals {2,3,4}, k=1, depth 2: exactly one
    // pack holding a single early terminal
    let (g, ids) = build_directed_path(5);
    let terminals = BTreeSet::from([ids[2], ids[3], ids[4]]);
    let packs = greedy_packing(&g, ids[0], &terminals, 1, 2).unwrap();

    assert_eq!(packs.len(), 1);
    assert_eq!(packs[0].len(), 1);
    assert!(packs[0][0] == ids[2] || packs[0][0] == ids[3]);
}

#[test]
fn test_path_with_larger_demand() {
    let (g, ids) = build_directed_path(6);
    let terminals = BTreeSet::from([ids[2], ids[3], ids[4], ids[5]]);
    let packs = greedy_packing(&g, ids[0], &terminals, 4, 3).unwrap();

    assert!(!packs.is_empty());
    // the first pack grabs a depth-3 ball, so at least rho(4)=2 terminals
    assert!(packs[0].len() >= 2);
}

#[test]
fn test_packs_are_terminal_disjoint() {
    //     0
    //    / \
    //   1   2
    //  /     \
    // 3       4
    let mut g = Digraph::<u32, f32>::new();
    let ids: Vec<_> = (0..5).map(|i| g.add_node(i)).collect();
    g.add_edge(ids[0], ids[1], 1.0);
    g.add_edge(ids[1], ids[3], 1.0);
    g.add_edge(ids[0], ids[2], 1.0);
    g.add_edge(ids[2], ids[4], 1.0);

    let terminals = BTreeSet::from([ids[3], ids[4]]);
    let packs = greedy_packing(&g, ids[0], &terminals, 2, 2).unwrap();

    assert_eq!(packs.len(), 2);
    let mut seen: BTreeSet<NodeId> = BTreeSet::new();
    for pack in &packs {
        assert!(!pack.is_empty());
        for &t in pack {
            assert!(seen.insert(t), "terminal appears in two packs");
            assert!(terminals.contains(&t));
        }
    }
}

#[test]
fn test_pack_count_never_exceeds_rho() {
    let (g, ids) = build_directed_path(30);
    let terminals: BTreeSet<_> = ids[1..].iter().copied().collect();
    for k in [1, 2, 5, 9, 16, 29] {
        let packs = greedy_packing(&g, ids[0], &terminals, k, 2).unwrap();
        assert!(packs.len() <= rho(k), "k={k} produced {} packs", packs.len());
    }
}

#[test]
fn test_identical_input_identical_output() {
    let (g, ids) = build_directed_path(12);
    let terminals: BTreeSet<_> = ids[3..].iter().copied().collect();
    let first = greedy_packing(&g, ids[0], &terminals, 6, 3).unwrap();
    let second = greedy_packing(&g, ids[0], &terminals, 6, 3).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_invalid_instances_are_rejected() {
    let (g, ids) = build_directed_path(4);
    let terminals = BTreeSet::from([ids[2]]);

    assert!(greedy_packing(&g, ids[0], &terminals, 0, 2).is_err());
    assert!(greedy_packing(&g, ids[0], &terminals, 1, 0).is_err());
    assert!(greedy_packing(&g, ids[0], &terminals, 2, 2).is_err());
    assert!(greedy_packing(&g, ids[0], &BTreeSet::from([ids[0]]), 1, 2).is_err());
}
