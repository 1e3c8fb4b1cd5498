/*!
# Eager Greedy Selection

Plain greedy maximum coverage under partition-matroid budgets: repeatedly
take the eligible key with the largest marginal gain until the residual
demand is met or no key adds anything. Achieves at least half the optimal
coverage.
*/

use std::collections::{BTreeMap, BTreeSet};

/// Greedy ½-approximation for partition-matroid coverage.
///
/// Keys are pairs `(a, c)` partitioned by their first coordinate; at most
/// `budgets[a]` keys may be chosen per part. Parts absent from the budget
/// map have budget zero. Each step selects the key with the largest number
/// of still-uncovered elements, breaking ties toward the smallest key, and
/// stops once `k_rem` elements are covered or the best marginal gain is
/// zero (a key already selected has zero gain, so nothing is ever selected
/// twice).
///
/// # Arguments
///
/// * `sets` - Coverage per key.
/// * `budgets` - Per-part selection budget.
/// * `k_rem` - Number of elements still to cover.
///
/// # Returns
///
/// The selected keys in selection order. Covering fewer than `k_rem`
/// elements is an expected outcome the caller observes from the result.
pub fn pmcover_half<A, C, T>(
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

    while covered.len() < k_rem {
        let mut best: Option<(&(A, C), usize)> = None;

        for (key, items) in sets {
            let spent = used.get(&key.0).copied().unwrap_or(0);
            if spent >= budgets.get(&key.0).copied().unwrap_or(0) {
                continue;
            }
            let gain = items.difference(&covered).count();
            if gain > best.map_or(0, |(_, g)| g) {
                best = Some((key, gain));
            }
        }

        match best {
            Some((key, _)) => {
                *used.entry(key.0.clone()).or_insert(0) += 1;
                covered.extend(sets[key].iter().cloned());
                selected.push(key.clone());
            }
            None => break,
        }
    }

    selected
}

#[cfg(test)]
mod tests {
    use super::pmcover_half;
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
    fn test_largest_marginal_gain_wins_each_step() {
        let (sets, budgets) = instance(
            &[
                (("a", 1), &[1, 2, 3]),
                (("b", 2), &[3, 4]),
                (("b", 3), &[5]),
            ],
            &[("a", 1), ("b", 1)],
        );
        // step 1 takes the 3-gain key, step 2 ties at gain 1 and falls to
        // the smaller key; both budgets are then spent short of the demand
        let chosen = pmcover_half(&sets, &budgets, 5);
        assert_eq!(chosen, vec![("a", 1), ("b", 2)]);
        let covered: BTreeSet<u32> = chosen.iter().flat_map(|k| sets[k].iter().copied()).collect();
        assert_eq!(covered, BTreeSet::from([1, 2, 3, 4]));
    }

    #[test]
    fn test_stops_when_no_gain_remains() {
        let (sets, budgets) = instance(&[(("a", 1), &[1, 2]), (("a", 2), &[1, 2])], &[("a", 2)]);
        let chosen = pmcover_half(&sets, &budgets, 4);
        // the second key adds nothing once the first is in
        assert_eq!(chosen, vec![("a", 1)]);
    }

    #[test]
    fn test_missing_budget_entry_means_zero() {
        let (sets, budgets) = instance(&[(("a", 1), &[1]), (("b", 2), &[2])], &[("b", 3)]);
        let chosen = pmcover_half(&sets, &budgets, 2);
        assert_eq!(chosen, vec![("b", 2)]);
    }

    #[test]
    fn test_zero_demand_selects_nothing() {
        let (sets, budgets) = instance(&[(("a", 1), &[1])], &[("a", 1)]);
        assert!(pmcover_half(&sets, &budgets, 0).is_empty());
    }

    #[test]
    fn test_rerun_is_identical() {
        let (sets, budgets) = instance(
            &[
                (("x", 1), &[1, 2, 3]),
                (("x", 2), &[3, 4]),
                (("y", 5), &[2, 4, 6]),
                (("y", 6), &[6, 7]),
            ],
            &[("x", 2), ("y", 1)],
        );
        let a = pmcover_half(&sets, &budgets, 7);
        let b = pmcover_half(&sets, &budgets, 7);
        assert_eq!(a, b);
    }
}
