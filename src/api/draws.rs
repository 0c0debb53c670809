//! Draw endpoints and the standalone schedule endpoint.

use super::{bad_request, lock_error, not_found, AppState, Entry};
use crate::logic::{generate_rounds, parse_candidates_csv, redraw_prize, run_draw};
use crate::models::{CandidateId, Draw, DrawError, DrawId, PrizeId, DEFAULT_WEIGHT};
use actix_web::{
    delete, get, post, put,
    web::{Json, Path, Query},
    HttpResponse,
};
use serde::Deserialize;

#[derive(Deserialize)]
pub(super) struct CreateDrawBody {
    #[serde(default)]
    title: String,
}

#[derive(Deserialize)]
pub(super) struct AddPrizeBody {
    name: String,
    #[serde(default = "default_winner_count")]
    winner_count: u32,
}

fn default_winner_count() -> u32 {
    1
}

#[derive(Deserialize)]
pub(super) struct AddCandidateBody {
    name: String,
    #[serde(default)]
    group: Option<String>,
    #[serde(default = "default_weight")]
    weight: i64,
}

fn default_weight() -> i64 {
    i64::from(DEFAULT_WEIGHT)
}

#[derive(Deserialize)]
pub(super) struct SetWeightBody {
    weight: i64,
}

#[derive(Deserialize)]
pub(super) struct AdjustWeightBody {
    delta: i64,
}

#[derive(Deserialize)]
pub(super) struct ScheduleQuery {
    n: Option<i64>,
}

/// Path segment: draw id (e.g. /api/draws/{id})
#[derive(Deserialize)]
pub(super) struct DrawPath {
    id: DrawId,
}

#[derive(Deserialize)]
pub(super) struct DrawPrizePath {
    id: DrawId,
    prize_id: PrizeId,
}

#[derive(Deserialize)]
pub(super) struct DrawCandidatePath {
    id: DrawId,
    candidate_id: CandidateId,
}

/// Look up a draw, refresh its activity time, apply `f` and respond with the updated draw.
fn with_draw<F>(state: &AppState, id: DrawId, f: F) -> HttpResponse
where
    F: FnOnce(&mut Draw) -> Result<(), DrawError>,
{
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    let draw = match g.draws.get_mut(&id) {
        Some(e) => e.touch(),
        None => return not_found("draw"),
    };
    match f(&mut *draw) {
        Ok(()) => HttpResponse::Ok().json(&*draw),
        Err(e) => bad_request(e),
    }
}

/// Largest `n` accepted by `/api/schedule` (fixtures grow with n²).
pub const MAX_SCHEDULE_PARTICIPANTS: i64 = 256;

/// Fixtures for positions 0..n; negative or missing n means 0, above the maximum is a 400.
#[get("/api/schedule")]
pub(super) async fn api_schedule(query: Query<ScheduleQuery>) -> HttpResponse {
    let n = query.n.unwrap_or(0).max(0);
    if n > MAX_SCHEDULE_PARTICIPANTS {
        return bad_request(format!(
            "At most {} participants can be scheduled (got {})",
            MAX_SCHEDULE_PARTICIPANTS, n
        ));
    }
    let n = n as usize;
    let rounds = generate_rounds(n);
    let fixtures: Vec<_> = rounds.iter().flatten().copied().collect();
    HttpResponse::Ok().json(serde_json::json!({
        "participants": n,
        "rounds": rounds,
        "fixtures": fixtures,
    }))
}

/// Create a new draw (returns it with id; client stores id for subsequent requests).
#[post("/api/draws")]
pub(super) async fn api_create_draw(state: AppState, body: Option<Json<CreateDrawBody>>) -> HttpResponse {
    let title = body.map(|b| b.into_inner().title).unwrap_or_default();
    let draw = Draw::new(title.trim());
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    log::info!("Created draw {}", draw.id);
    let response = HttpResponse::Ok().json(&draw);
    g.draws.insert(draw.id, Entry::new(draw));
    response
}

#[get("/api/draws/{id}")]
pub(super) async fn api_get_draw(state: AppState, path: Path<DrawPath>) -> HttpResponse {
    with_draw(&state, path.id, |_| Ok(()))
}

#[post("/api/draws/{id}/prizes")]
pub(super) async fn api_add_prize(state: AppState, path: Path<DrawPath>, body: Json<AddPrizeBody>) -> HttpResponse {
    with_draw(&state, path.id, |d| d.add_prize(&body.name, body.winner_count).map(|_| ()))
}

#[delete("/api/draws/{id}/prizes/{prize_id}")]
pub(super) async fn api_remove_prize(state: AppState, path: Path<DrawPrizePath>) -> HttpResponse {
    with_draw(&state, path.id, |d| d.remove_prize(path.prize_id))
}

/// Bulk add participants from a CSV body (header: name[,group][,weight]).
#[post("/api/draws/{id}/candidates/import")]
pub(super) async fn api_import_candidates(state: AppState, path: Path<DrawPath>, body: String) -> HttpResponse {
    let candidates = match parse_candidates_csv(body.as_bytes()) {
        Ok(c) => c,
        Err(e) => return bad_request(e),
    };
    with_draw(&state, path.id, |d| {
        let added = d.import_candidates(candidates)?;
        log::info!("Draw {}: imported {} participants", d.id, added);
        Ok(())
    })
}

#[post("/api/draws/{id}/candidates")]
pub(super) async fn api_add_candidate(
    state: AppState,
    path: Path<DrawPath>,
    body: Json<AddCandidateBody>,
) -> HttpResponse {
    with_draw(&state, path.id, |d| {
        d.add_candidate(&body.name, body.group.as_deref(), body.weight)
            .map(|_| ())
    })
}

#[delete("/api/draws/{id}/candidates/{candidate_id}")]
pub(super) async fn api_remove_candidate(state: AppState, path: Path<DrawCandidatePath>) -> HttpResponse {
    with_draw(&state, path.id, |d| d.remove_candidate(path.candidate_id))
}

#[put("/api/draws/{id}/candidates/{candidate_id}/weight")]
pub(super) async fn api_set_weight(
    state: AppState,
    path: Path<DrawCandidatePath>,
    body: Json<SetWeightBody>,
) -> HttpResponse {
    with_draw(&state, path.id, |d| {
        d.set_weight(path.candidate_id, body.weight).map(|_| ())
    })
}

/// +/- buttons: change weight by a delta, clamped at 0.
#[post("/api/draws/{id}/candidates/{candidate_id}/adjust")]
pub(super) async fn api_adjust_weight(
    state: AppState,
    path: Path<DrawCandidatePath>,
    body: Json<AdjustWeightBody>,
) -> HttpResponse {
    with_draw(&state, path.id, |d| {
        d.adjust_weight(path.candidate_id, body.delta).map(|_| ())
    })
}

/// Draw all prizes; nobody wins twice.
#[post("/api/draws/{id}/run")]
pub(super) async fn api_run_draw(state: AppState, path: Path<DrawPath>) -> HttpResponse {
    with_draw(&state, path.id, run_draw)
}

#[post("/api/draws/{id}/prizes/{prize_id}/redraw")]
pub(super) async fn api_redraw_prize(state: AppState, path: Path<DrawPrizePath>) -> HttpResponse {
    with_draw(&state, path.id, |d| redraw_prize(d, path.prize_id))
}

/// Discard results and return to setup.
#[post("/api/draws/{id}/reset")]
pub(super) async fn api_reset_draw(state: AppState, path: Path<DrawPath>) -> HttpResponse {
    with_draw(&state, path.id, |d| {
        d.reset_results();
        Ok(())
    })
}
