//! Weighted selection without replacement.

use crate::models::{Candidate, Winner};
use rand::Rng;

/// Select up to `count` winners from `pool` using the thread RNG.
///
/// See [`select_with`] for the selection rules.
pub fn select(pool: &[Candidate], count: usize) -> Vec<Winner> {
    let mut rng = rand::thread_rng();
    select_with(pool, count, || rng.gen::<f64>())
}

/// Select up to `count` winners from `pool`, drawing uniform values in `[0, 1)` from `next`.
///
/// 1. Keep only candidates with weight > 0.
/// 2. Repeat `min(count, eligible)` times: scale `next()` by the remaining total weight and
///    take the first candidate whose cumulative weight exceeds it.
/// 3. Remove the picked candidate so nobody wins twice in one call.
///
/// Returns fewer winners than requested (never an error) when the pool runs out.
pub fn select_with<F>(pool: &[Candidate], count: usize, mut next: F) -> Vec<Winner>
where
    F: FnMut() -> f64,
{
    let mut remaining: Vec<&Candidate> = pool.iter().filter(|c| c.is_eligible()).collect();
    let rounds = count.min(remaining.len());
    let mut winners = Vec::with_capacity(rounds);

    for _ in 0..rounds {
        let total: u64 = remaining.iter().map(|c| u64::from(c.weight)).sum();
        let idx = pick_index(&remaining, total, next());
        let picked = remaining.remove(idx);
        winners.push(Winner::from(picked));
    }

    winners
}

/// Index of the candidate hit by `unit * total` on the cumulative weight line.
/// Out-of-range `unit` or float rounding at the top lands on the last candidate.
fn pick_index(remaining: &[&Candidate], total: u64, unit: f64) -> usize {
    let last = remaining.len() - 1;
    if !(0.0..1.0).contains(&unit) {
        return last;
    }
    let target = unit * total as f64;
    let mut cumulative = 0u64;
    for (i, c) in remaining.iter().enumerate() {
        cumulative += u64::from(c.weight);
        if cumulative as f64 > target {
            return i;
        }
    }
    last
}
