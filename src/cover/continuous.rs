/*!
# Continuous Greedy Selection

The (1 − 1/e)-approximation for partition-matroid coverage: continuous
greedy on the multilinear extension of the coverage function, followed by a
rounding pass on the fractional solution.

The gradient of the multilinear extension is estimated by Monte Carlo:
random key subsets are drawn with each key's current fractional value as
its inclusion probability, and each key is scored by the coverage it adds
to (or holds within) the sample. The step direction is the greedy
projection of that gradient into the matroid polytope.

The algorithm is randomized; callers pass a seed and identical seeds give
identical selections.
*/

use std::cmp::Reverse;
use std::collections::{BTreeMap, BTreeSet};

use ordered_float::OrderedFloat;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Coverage of the sampled keys, with one key optionally forced in or out.
fn sampled_coverage<T: Ord>(
    sets: &[&BTreeSet<T>],
    sample: &[bool],
    forced_in: Option<usize>,
    forced_out: Option<usize>,
) -> usize {
    let mut union: BTreeSet<&T> = BTreeSet::new();
    for (j, items) in sets.iter().enumerate() {
        let included = (sample[j] || forced_in == Some(j)) && forced_out != Some(j);
        if included {
            union.extend(items.iter());
        }
    }
    union.len()
}

/// Continuous greedy + rounding, a (1 − 1/e)-approximation for
/// partition-matroid coverage.
///
/// Runs `iters` continuous-greedy rounds with step 1/`iters`; each round
/// estimates every key's gradient from `samples` Monte Carlo draws and
/// raises the fractional value of the best keys each part's budget admits.
/// The rounding pass then selects keys by descending fractional value,
/// respecting budgets, until `k_rem` elements are covered or the keys run
/// out. `iters` and `samples` are clamped to at least 1.
///
/// Given the same instance and `seed` the selection is reproducible; see
/// [`pmcover_half`](crate::cover::greedy::pmcover_half) for the instance
/// conventions.
///
/// # Complexity
///
/// O(`iters` · `samples` · m² · s̄) where m is the number of keys and s̄
/// the average coverage-set size, dominated by the sampled coverage
/// evaluations.
pub fn pmcover_continuous<A, C, T>(
    sets: &BTreeMap<(A, C), BTreeSet<T>>,
    budgets: &BTreeMap<A, usize>,
    k_rem: usize,
    iters: usize,
    samples: usize,
    seed: u64,
) -> Vec<(A, C)>
where
    A: Ord + Clone,
    C: Ord + Clone,
    T: Ord + Clone,
{
    let keys: Vec<&(A, C)> = sets.keys().collect();
    let key_sets: Vec<&BTreeSet<T>> = sets.values().collect();
    let m = keys.len();
    if m == 0 {
        return Vec::new();
    }

    let iters = iters.max(1);
    let samples = samples.max(1);
    let dt = 1.0 / iters as f64;
    let mut rng = StdRng::seed_from_u64(seed);
    let mut x = vec![0.0f64; m];

    for _ in 0..iters {
        // Monte Carlo gradient estimate per key
        let mut grad = vec![0.0f64; m];
        for (i, g) in grad.iter_mut().enumerate() {
            let mut gain_sum = 0.0;
            for _ in 0..samples {
                let sample: Vec<bool> = x.iter().map(|&p| rng.random_bool(p)).collect();
                let with = sampled_coverage(&key_sets, &sample, Some(i), None);
                let without = sampled_coverage(&key_sets, &sample, None, Some(i));
                gain_sum += (with - without) as f64;
            }
            *g = gain_sum / samples as f64;
        }

        // Greedy projection into the matroid polytope: budgets admit the
        // steepest keys, one step each.
        let mut order: Vec<usize> = (0..m).collect();
        order.sort_by_key(|&i| Reverse(OrderedFloat(grad[i])));
        let mut used: BTreeMap<&A, usize> = BTreeMap::new();
        for i in order {
            let part = &keys[i].0;
            let spent = used.get(part).copied().unwrap_or(0);
            if spent < budgets.get(part).copied().unwrap_or(0) {
                x[i] = (x[i] + dt).min(1.0);
                *used.entry(part).or_insert(0) += 1;
            }
        }
    }

    // Rounding: take keys by descending fractional value under the budgets
    // until the demand is met.
    let mut order: Vec<usize> = (0..m).collect();
    order.sort_by_key(|&i| Reverse(OrderedFloat(x[i])));
    let mut selected: Vec<(A, C)> = Vec::new();
    let mut covered: BTreeSet<&T> = BTreeSet::new();
    let mut used: BTreeMap<&A, usize> = BTreeMap::new();
    for i in order {
        if covered.len() >= k_rem {
            break;
        }
        let part = &keys[i].0;
        let spent = used.get(part).copied().unwrap_or(0);
        if spent < budgets.get(part).copied().unwrap_or(0) {
            covered.extend(key_sets[i].iter());
            *used.entry(part).or_insert(0) += 1;
            selected.push(keys[i].clone());
        }
    }

    selected
}
