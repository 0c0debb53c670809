//! Running a draw across all prizes: nobody wins two prizes in one session.

use crate::logic::weighted_draw::select_with;
use crate::models::{Candidate, Draw, DrawError, DrawState, PrizeId, PrizeResult};
use chrono::Utc;
use rand::Rng;

/// Run the whole draw with the thread RNG. See [`run_draw_with`].
pub fn run_draw(draw: &mut Draw) -> Result<(), DrawError> {
    let mut rng = rand::thread_rng();
    run_draw_with(draw, || rng.gen::<f64>())
}

/// Draw every prize in configured order.
///
/// Before each prize the pool is rebuilt from the draw's candidates minus everyone already
/// selected for an earlier prize. Previous results are replaced; state becomes `Drawn`.
pub fn run_draw_with<F>(draw: &mut Draw, mut next: F) -> Result<(), DrawError>
where
    F: FnMut() -> f64,
{
    if draw.prizes.is_empty() {
        return Err(DrawError::NoPrizes);
    }
    if draw.eligible_count() == 0 {
        return Err(DrawError::NoEligibleCandidates);
    }

    let mut taken: Vec<String> = Vec::new();
    let mut results = Vec::with_capacity(draw.prizes.len());
    for prize in &draw.prizes {
        let pool = pool_excluding(&draw.candidates, &taken);
        let winners = select_with(&pool, prize.winner_count as usize, &mut next);
        taken.extend(winners.iter().map(|w| w.name.to_ascii_lowercase()));
        if winners.len() < prize.winner_count as usize {
            log::debug!(
                "Prize '{}' wanted {} winners, pool only had {}",
                prize.name,
                prize.winner_count,
                winners.len()
            );
        }
        results.push(PrizeResult {
            prize_id: prize.id,
            prize_name: prize.name.clone(),
            winners,
        });
    }

    draw.results = results;
    draw.state = DrawState::Drawn;
    draw.drawn_at = Some(Utc::now());
    log::info!(
        "Draw {} completed: {} prizes, {} winners",
        draw.id,
        draw.results.len(),
        taken.len()
    );
    Ok(())
}

/// Redraw one prize with the thread RNG. See [`redraw_prize_with`].
pub fn redraw_prize(draw: &mut Draw, prize_id: PrizeId) -> Result<(), DrawError> {
    let mut rng = rand::thread_rng();
    redraw_prize_with(draw, prize_id, || rng.gen::<f64>())
}

/// Re-select the winners of a single prize (Drawn only).
///
/// Winners of every other prize stay excluded; this prize's previous winners are back in the pool.
pub fn redraw_prize_with<F>(draw: &mut Draw, prize_id: PrizeId, next: F) -> Result<(), DrawError>
where
    F: FnMut() -> f64,
{
    if draw.state != DrawState::Drawn {
        return Err(DrawError::InvalidState);
    }
    let prize = draw
        .prize(prize_id)
        .cloned()
        .ok_or(DrawError::PrizeNotFound(prize_id))?;

    let taken = draw.winner_names_except(Some(prize_id));
    let pool = pool_excluding(&draw.candidates, &taken);
    let winners = select_with(&pool, prize.winner_count as usize, next);
    log::info!(
        "Draw {}: redrew prize '{}' ({} winners)",
        draw.id,
        prize.name,
        winners.len()
    );

    let result = PrizeResult {
        prize_id,
        prize_name: prize.name,
        winners,
    };
    match draw.results.iter_mut().find(|r| r.prize_id == prize_id) {
        Some(existing) => *existing = result,
        None => draw.results.push(result),
    }
    draw.drawn_at = Some(Utc::now());
    Ok(())
}

/// Fresh candidate list without anyone whose (case-folded) name is in `taken`.
fn pool_excluding(candidates: &[Candidate], taken: &[String]) -> Vec<Candidate> {
    candidates
        .iter()
        .filter(|c| !taken.contains(&c.name.to_ascii_lowercase()))
        .cloned()
        .collect()
}
