/*!
# Lazy Greedy Selection

Greedy maximum coverage accelerated with a max-heap of stale gain
estimates. Marginal gains only shrink as the covered set grows
(submodularity), so a popped key whose estimate still matches its true
gain must be the best remaining key and can be taken without scanning the
rest. Selections are identical to the eager greedy rule, so the ½
guarantee carries over.
*/

use std::cmp::Reverse;
use std::collections::{BTreeMap, BTreeSet, BinaryHeap};

/// Lazy-greedy ½-approximation for partition-matroid coverage.
///
/// The heap holds `(estimated_gain, key)` entries where the estimate is an
/// upper bound on the key's true marginal gain. Popping the maximum, the
/// key is selected outright when its estimate is still exact and its
/// part's budget allows; an overstated estimate is refreshed and pushed
/// back; keys with exhausted budget or zero gain are discarded. Ties on
/// gain pop the smallest key first.
///
/// See [`pmcover_half`](crate::cover::greedy::pmcover_half) for the
/// instance conventions; results and guarantees match.
pub fn pmcover_lazy<A, C, T>(
    sets: &BTreeMap<(A, C), BTreeSet<T>>,
    budgets: &BTreeMap<A, usize>,
    k_rem: usize,
) -> Vec<(A, C)>
where
    A: Ord + Clone,
    C: Ord + Clone,
    T: Ord + Clone,
{
    let mut covered: BTreeSet<T> = BTreeSet::new();
    let mut selected: Vec<(A, C)> = Vec::new();
    let mut used: BTreeMap<A, usize> = BTreeMap::new();

    let mut heap: BinaryHeap<(usize, Reverse<(A, C)>)> = sets
        .iter()
        .map(|(key, items)| (items.len(), Reverse(key.clone())))
        .collect();

    while covered.len() < k_rem {
        let Some((estimate, Reverse(key))) = heap.pop() else {
            break;
        };
        let spent = used.get(&key.0).copied().unwrap_or(0);
        let budget = budgets.get(&key.0).copied().unwrap_or(0);
        if spent >= budget {
            continue;
        }
        let gain = sets[&key].difference(&covered).count();
        if gain == estimate {
            *used.entry(key.0.clone()).or_insert(0) += 1;
            covered.extend(sets[&key].iter().cloned());
            selected.push(key);
        } else if gain > 0 {
            heap.push((gain, Reverse(key)));
        }
    }

    selected
}

#[cfg(test)]
mod tests {
    use super::pmcover_lazy;
    use crate::cover::greedy::pmcover_half;
    use std::collections::{BTreeMap, BTreeSet};

    fn instance(
        entries: &[((&'static str, u32), &[u32])],
        budgets: &[(&'static str, usize)],
    ) -> (
        BTreeMap<(&'static str, u32), BTreeSet<u32>>,
        BTreeMap<&'static str, usize>,
    ) {
        let sets = entries
            .iter()
            .map(|(key, items)| (*key, items.iter().copied().collect()))
            .collect();
        let budgets = budgets.iter().copied().collect();
        (sets, budgets)
    }

    #[test]
    fn test_budgets_are_respected() {
        let (sets, budgets) = instance(
            &[(("a", 1), &[1]), (("a", 2), &[2]), (("b", 3), &[3])],
            &[("a", 1), ("b", 1)],
        );
        let chosen = pmcover_lazy(&sets, &budgets, 3);
        assert!(chosen.iter().filter(|(a, _)| *a == "a").count() <= 1);
        assert!(chosen.iter().filter(|(a, _)| *a == "b").count() <= 1);
    }

    #[test]
    fn test_stale_estimate_is_refreshed_not_selected() {
        let (sets, budgets) = instance(
            &[
                (("a", 1), &[1, 2, 3]),
                (("b", 2), &[2, 3]),
                (("b", 3), &[4]),
            ],
            &[("a", 1), ("b", 2)],
        );
        // after (a,1) lands, (b,2)'s cached gain of 2 is stale: its true
        // gain is zero, so it must be dropped rather than taken
        let chosen = pmcover_lazy(&sets, &budgets, 4);
        assert_eq!(chosen, vec![("a", 1), ("b", 3)]);
    }

    #[test]
    fn test_exhausted_heap_ends_the_search() {
        // three clones of one set: the first pick covers everything, the
        // other two surface with zero gain and drain off the heap
        let (sets, budgets) = instance(
            &[
                (("a", 1), &[1, 2]),
                (("a", 2), &[1, 2]),
                (("a", 3), &[1, 2]),
            ],
            &[("a", 3)],
        );
        let chosen = pmcover_lazy(&sets, &budgets, 3);
        assert_eq!(chosen.len(), 1);
        let covered: BTreeSet<u32> =
            chosen.iter().flat_map(|k| sets[k].iter().copied()).collect();
        assert_eq!(covered, BTreeSet::from([1, 2]));
    }

    #[test]
    fn test_empty_instance() {
        let sets: BTreeMap<(&str, u32), BTreeSet<u32>> = BTreeMap::new();
        let budgets: BTreeMap<&str, usize> = BTreeMap::new();
        assert!(pmcover_lazy(&sets, &budgets, 0).is_empty());
        assert!(pmcover_lazy(&sets, &budgets, 3).is_empty());
    }

    #[test]
    fn test_matches_eager_coverage() {
        let (sets, budgets) = instance(
            &[
                (("x", 1), &[1, 2, 3]),
                (("x", 2), &[3, 4]),
                (("y", 5), &[2, 4, 6]),
                (("y", 6), &[6, 7]),
                (("z", 7), &[8]),
            ],
            &[("x", 1), ("y", 2), ("z", 1)],
        );
        let eager = pmcover_half(&sets, &budgets, 8);
        let lazy = pmcover_lazy(&sets, &budgets, 8);
        let cov = |sel: &[(&str, u32)]| -> BTreeSet<u32> {
            sel.iter().flat_map(|k| sets[k].iter().copied()).collect()
        };
        assert_eq!(cov(&eager).len(), cov(&lazy).len());
    }
}
