//! Train/test split policy for small, imbalanced labeled sets
//!
//! A fixed 25% hold-out breaks down on small datasets: it can leave a class
//! out of training entirely, or be impossible to stratify when a class has a
//! single example. [`decide_split`] picks the hold-out fraction and whether to
//! stratify from the class counts alone; [`train_test_split`] applies the
//! decision with a seeded shuffle so identical data always splits identically.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

/// Hold-out fraction used when the dataset is large enough
pub const DEFAULT_TEST_FRACTION: f64 = 0.25;

/// Hold-out fraction used when 25% cannot cover every class
pub const FALLBACK_TEST_FRACTION: f64 = 0.5;

/// Seed for every shuffle in the split
pub const DEFAULT_SPLIT_SEED: u64 = 42;

/// How the labeled data will be partitioned
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SplitDecision {
    pub test_fraction: f64,
    pub stratify: bool,
}

/// Row indices of each partition
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SplitIndices {
    pub train: Vec<usize>,
    pub test: Vec<usize>,
}

/// Count examples per label, largest class first (ties by label).
pub fn class_counts(labels: &[String]) -> Vec<(String, usize)> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for label in labels {
        *counts.entry(label.as_str()).or_insert(0) += 1;
    }
    let mut sorted: Vec<(String, usize)> = counts
        .into_iter()
        .map(|(label, count)| (label.to_string(), count))
        .collect();
    sorted.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    sorted
}

fn floor_share(n_samples: usize, fraction: f64) -> usize {
    (n_samples as f64 * fraction).floor() as usize
}

/// Choose the hold-out fraction and stratification from class counts.
///
/// - 25% by default, raised to 50% when `floor(n * 0.25) < n_classes`
/// - stratify only when every class has at least 2 examples and
///   `floor(n * fraction) >= n_classes`
pub fn decide_split(class_counts: &[(String, usize)]) -> SplitDecision {
    let n_classes = class_counts.len();
    let n_samples: usize = class_counts.iter().map(|(_, c)| c).sum();

    let mut test_fraction = DEFAULT_TEST_FRACTION;
    if floor_share(n_samples, test_fraction) < n_classes {
        test_fraction = FALLBACK_TEST_FRACTION;
    }

    let min_count = class_counts.iter().map(|(_, c)| *c).min().unwrap_or(0);
    let stratify = min_count >= 2 && floor_share(n_samples, test_fraction) >= n_classes;

    SplitDecision {
        test_fraction,
        stratify,
    }
}

/// Number of rows held out: `ceil(n * fraction)`, always leaving one row to train on.
pub fn test_size(n_samples: usize, fraction: f64) -> usize {
    let n_test = (n_samples as f64 * fraction).ceil() as usize;
    n_test.min(n_samples.saturating_sub(1))
}

/// Partition row indices according to a split decision.
///
/// Stratified splits keep every class in both partitions, apportioning the
/// hold-out by class size (largest remainder). Both index lists come back
/// sorted.
pub fn train_test_split(labels: &[String], decision: &SplitDecision, seed: u64) -> SplitIndices {
    let n_samples = labels.len();
    let n_test = test_size(n_samples, decision.test_fraction);
    let mut rng = StdRng::seed_from_u64(seed);

    let mut split = if decision.stratify && n_test > 0 {
        stratified_split(labels, n_test, &mut rng)
    } else {
        let mut permutation: Vec<usize> = (0..n_samples).collect();
        permutation.shuffle(&mut rng);
        let train = permutation.split_off(n_test);
        SplitIndices {
            train,
            test: permutation,
        }
    };

    split.train.sort_unstable();
    split.test.sort_unstable();
    split
}

fn stratified_split(labels: &[String], n_test: usize, rng: &mut StdRng) -> SplitIndices {
    let mut by_class: BTreeMap<&str, Vec<usize>> = BTreeMap::new();
    for (idx, label) in labels.iter().enumerate() {
        by_class.entry(label.as_str()).or_default().push(idx);
    }

    let counts: Vec<usize> = by_class.values().map(Vec::len).collect();
    let allocation = allocate_test_counts(&counts, n_test);

    let mut split = SplitIndices::default();
    for (mut indices, take) in by_class.into_values().zip(allocation) {
        indices.shuffle(rng);
        let rest = indices.split_off(take);
        split.test.extend(indices);
        split.train.extend(rest);
    }
    split
}

/// Per-class hold-out sizes summing to `n_test`, each within `1..=count - 1`.
///
/// Falls back to the nearest feasible total when the bounds cannot meet
/// `n_test` exactly.
pub fn allocate_test_counts(counts: &[usize], n_test: usize) -> Vec<usize> {
    let n_samples: usize = counts.iter().sum();
    if n_samples == 0 {
        return vec![0; counts.len()];
    }

    let exact: Vec<f64> = counts
        .iter()
        .map(|&c| n_test as f64 * c as f64 / n_samples as f64)
        .collect();
    let lower = |c: usize| usize::from(c >= 2);
    let upper = |c: usize| c.saturating_sub(1);

    let mut alloc: Vec<usize> = exact
        .iter()
        .zip(counts)
        .map(|(e, &c)| (e.floor() as usize).clamp(lower(c), upper(c).max(lower(c))))
        .collect();

    let mut total: usize = alloc.iter().sum();
    while total < n_test {
        let pick = best_index(&exact, &alloc, |k| alloc[k] < upper(counts[k]), Ordering::Greater);
        match pick {
            Some(k) => alloc[k] += 1,
            None => break,
        }
        total += 1;
    }
    while total > n_test {
        let pick = best_index(&exact, &alloc, |k| alloc[k] > lower(counts[k]), Ordering::Less);
        match pick {
            Some(k) => alloc[k] -= 1,
            None => break,
        }
        total -= 1;
    }

    alloc
}

/// First index (among eligible ones) whose shortfall `exact - alloc` is
/// extreme in the requested direction.
fn best_index<F>(exact: &[f64], alloc: &[usize], eligible: F, want: Ordering) -> Option<usize>
where
    F: Fn(usize) -> bool,
{
    let mut best: Option<(usize, f64)> = None;
    for k in (0..exact.len()).filter(|&k| eligible(k)) {
        let shortfall = exact[k] - alloc[k] as f64;
        match best {
            None => best = Some((k, shortfall)),
            Some((_, current)) => {
                if shortfall.partial_cmp(&current) == Some(want) {
                    best = Some((k, shortfall));
                }
            }
        }
    }
    best.map(|(k, _)| k)
}
