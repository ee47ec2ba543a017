//! Parent selection.
//!
//! Two schemes drive reproduction:
//!
//! - [`rank_selection`] forms the mating pool. Individuals are sorted by
//!   descending fitness and drawn with probability proportional to `1/rank`,
//!   so fitness values spanning orders of magnitude cannot swamp the pool.
//! - [`proportional_index`] picks the second parent for crossover with
//!   probability proportional to raw fitness (roulette wheel).

use rand::Rng;

/// Selection probabilities for ranks `1..=n`, proportional to `1/rank`.
///
/// Entry `i` belongs to rank `i + 1`. The result sums to 1 and is strictly
/// decreasing for `n >= 2`.
///
/// # Examples
///
/// ```
/// use truss_ga::ga::rank_probabilities;
///
/// let p = rank_probabilities(3);
/// assert!((p.iter().sum::<f64>() - 1.0).abs() < 1e-12);
/// assert!(p[0] > p[1] && p[1] > p[2]);
/// ```
pub fn rank_probabilities(n: usize) -> Vec<f64> {
    let weights: Vec<f64> = (1..=n).map(|rank| 1.0 / rank as f64).collect();
    let total: f64 = weights.iter().sum();
    weights.into_iter().map(|w| w / total).collect()
}

/// Indices sorted by descending fitness.
///
/// Ties keep population order. NaN compares as equal.
pub fn rank_order(fitness: &[f64]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..fitness.len()).collect();
    order.sort_by(|&a, &b| {
        fitness[b]
            .partial_cmp(&fitness[a])
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    order
}

/// Draws `count` population indices with replacement, weighted by `1/rank`.
///
/// # Panics
/// Panics if `fitness` is empty and `count > 0`.
pub fn rank_selection<R: Rng>(fitness: &[f64], count: usize, rng: &mut R) -> Vec<usize> {
    if count == 0 {
        return Vec::new();
    }
    assert!(!fitness.is_empty(), "cannot select from empty population");

    let order = rank_order(fitness);
    let mut cumulative = Vec::with_capacity(order.len());
    let mut acc = 0.0;
    for p in rank_probabilities(order.len()) {
        acc += p;
        cumulative.push(acc);
    }
    let total = acc;

    (0..count)
        .map(|_| {
            let threshold = rng.random_range(0.0..total);
            let rank = cumulative
                .partition_point(|&c| c <= threshold)
                .min(order.len() - 1);
            order[rank]
        })
        .collect()
}

/// Roulette-wheel draw: index `i` with probability `weights[i] / sum`.
///
/// Negative and non-finite weights count as zero. When no weight is
/// positive the draw is uniform.
///
/// # Panics
/// Panics if `weights` is empty.
pub fn proportional_index<R: Rng>(weights: &[f64], rng: &mut R) -> usize {
    assert!(!weights.is_empty(), "cannot select from empty pool");
    let n = weights.len();

    let usable = |w: f64| if w.is_finite() && w > 0.0 { w } else { 0.0 };
    let total: f64 = weights.iter().map(|&w| usable(w)).sum();
    if total <= 0.0 || !total.is_finite() {
        return rng.random_range(0..n);
    }

    let threshold = rng.random_range(0.0..total);
    let mut cumulative = 0.0;
    for (i, &w) in weights.iter().enumerate() {
        cumulative += usable(w);
        if cumulative > threshold {
            return i;
        }
    }

    // Rounding can leave the threshold just past the final sum.
    weights
        .iter()
        .rposition(|&w| usable(w) > 0.0)
        .unwrap_or(n - 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    // ---- Rank probabilities ----

    #[test]
    fn test_rank_probabilities_sum_to_one() {
        for n in [1, 2, 5, 600] {
            let p = rank_probabilities(n);
            assert_eq!(p.len(), n);
            assert!((p.iter().sum::<f64>() - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_rank_probabilities_harmonic() {
        let p = rank_probabilities(4);
        // H_4 = 25/12
        assert!((p[0] - 12.0 / 25.0).abs() < 1e-12);
        assert!((p[3] - 3.0 / 25.0).abs() < 1e-12);
    }

    #[test]
    fn test_rank_probabilities_empty() {
        assert!(rank_probabilities(0).is_empty());
    }

    // ---- Rank order ----

    #[test]
    fn test_rank_order_descending_stable() {
        let order = rank_order(&[1.0, 5.0, 3.0, 5.0]);
        assert_eq!(order, vec![1, 3, 2, 0]);
    }

    // ---- Rank selection ----

    #[test]
    fn test_rank_selection_favours_best() {
        let mut rng = StdRng::seed_from_u64(42);
        let fitness = [0.5, 9.0, 2.0, 0.1, 4.0];
        let picks = rank_selection(&fitness, 20_000, &mut rng);

        let mut counts = [0usize; 5];
        for idx in picks {
            counts[idx] += 1;
        }
        // Best is index 1, worst is index 3.
        assert!(counts[1] > counts[4]);
        assert!(counts[4] > counts[3]);
        assert!(counts.iter().all(|&c| c > 0));
    }

    #[test]
    fn test_rank_selection_count() {
        let mut rng = StdRng::seed_from_u64(3);
        let picks = rank_selection(&[1.0, 2.0, 3.0], 7, &mut rng);
        assert_eq!(picks.len(), 7);
        assert!(picks.iter().all(|&i| i < 3));
    }

    #[test]
    fn test_rank_selection_all_zero_fitness_still_fills_pool() {
        let mut rng = StdRng::seed_from_u64(3);
        let picks = rank_selection(&[0.0; 10], 10, &mut rng);
        assert_eq!(picks.len(), 10);
    }

    #[test]
    fn test_rank_selection_single() {
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(rank_selection(&[3.0], 4, &mut rng), vec![0; 4]);
    }

    // ---- Proportional ----

    #[test]
    fn test_proportional_skips_zero_weight() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..1000 {
            let idx = proportional_index(&[0.0, 1.0, 0.0, 3.0], &mut rng);
            assert!(idx == 1 || idx == 3);
        }
    }

    #[test]
    fn test_proportional_ratio() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut counts = [0usize; 2];
        for _ in 0..20_000 {
            counts[proportional_index(&[1.0, 3.0], &mut rng)] += 1;
        }
        let ratio = counts[1] as f64 / counts[0] as f64;
        assert!(ratio > 2.5 && ratio < 3.5, "ratio {ratio}");
    }

    #[test]
    fn test_proportional_uniform_fallback() {
        let mut rng = StdRng::seed_from_u64(8);
        let mut seen = [false; 3];
        for _ in 0..200 {
            seen[proportional_index(&[0.0, -1.0, f64::NAN], &mut rng)] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }
}
