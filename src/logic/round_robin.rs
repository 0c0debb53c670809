//! Single round-robin schedule (circle method).

use crate::models::{Fixture, Position};

/// Number of fixtures in a single round robin of `n` participants.
pub fn fixture_count(n: usize) -> usize {
    n * n.saturating_sub(1) / 2
}

/// Fixtures grouped by round, for positions `0..n`.
///
/// 1. Round `n` up to even; the extra slot is a bye when `n` is odd.
/// 2. For `size - 1` rounds pair ring slot `k` with slot `size - 1 - k`.
/// 3. After each round keep slot 0 fixed and rotate the rest by one.
///
/// Pairings against the bye are dropped. Output only depends on `n`.
pub fn generate_rounds(n: usize) -> Vec<Vec<Fixture>> {
    if n < 2 {
        return Vec::new();
    }
    let size = n + n % 2;
    let mut ring: Vec<Position> = (0..size).collect();
    let mut rounds = Vec::with_capacity(size - 1);

    for _ in 0..size - 1 {
        let round: Vec<Fixture> = (0..size / 2)
            .map(|k| (ring[k], ring[size - 1 - k]))
            .filter(|&(home, away)| home < n && away < n)
            .map(|(home, away)| Fixture::new(home, away))
            .collect();
        rounds.push(round);
        ring[1..].rotate_right(1);
    }

    rounds
}

/// All fixtures in round order: every pair of `0..n` exactly once.
pub fn generate_fixtures(n: usize) -> Vec<Fixture> {
    generate_rounds(n).into_iter().flatten().collect()
}
