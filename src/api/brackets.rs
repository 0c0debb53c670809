//! Round-robin bracket endpoints.

use super::{bad_request, lock_error, not_found, AppState, Entry};
use crate::logic::{build_table, schedule, standings};
use crate::models::{Bracket, BracketError, BracketId, EntrantId, Score};
use actix_web::{
    delete, get, post, put,
    web::{Json, Path},
    HttpResponse,
};
use serde::{Deserialize, Serialize};

#[derive(Deserialize)]
pub(super) struct CreateBracketBody {
    #[serde(default)]
    name: String,
    #[serde(default)]
    entrants: Vec<String>,
}

#[derive(Deserialize)]
pub(super) struct AddEntrantBody {
    name: String,
}

#[derive(Deserialize)]
pub(super) struct MoveEntrantBody {
    from: usize,
    to: usize,
}

#[derive(Deserialize)]
pub(super) struct RecordScoreBody {
    home: EntrantId,
    away: EntrantId,
    home_score: u32,
    away_score: u32,
}

#[derive(Deserialize)]
pub(super) struct ClearScoreBody {
    home: EntrantId,
    away: EntrantId,
}

#[derive(Deserialize)]
pub(super) struct BracketPath {
    id: BracketId,
}

#[derive(Deserialize)]
pub(super) struct BracketEntrantPath {
    id: BracketId,
    entrant_id: EntrantId,
}

/// Look up a bracket, refresh its activity time, apply `f` and respond with the updated bracket.
fn with_bracket<F>(state: &AppState, id: BracketId, f: F) -> HttpResponse
where
    F: FnOnce(&mut Bracket) -> Result<(), BracketError>,
{
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    let bracket = match g.brackets.get_mut(&id) {
        Some(e) => e.touch(),
        None => return not_found("bracket"),
    };
    match f(&mut *bracket) {
        Ok(()) => HttpResponse::Ok().json(&*bracket),
        Err(e) => bad_request(e),
    }
}

/// Read-only view of a bracket (still counts as activity).
fn view_bracket<F, T>(state: &AppState, id: BracketId, f: F) -> HttpResponse
where
    F: FnOnce(&Bracket) -> T,
    T: Serialize,
{
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match g.brackets.get_mut(&id) {
        Some(e) => HttpResponse::Ok().json(f(&*e.touch())),
        None => not_found("bracket"),
    }
}

/// Create a bracket, optionally with initial entrants (names must be unique).
#[post("/api/brackets")]
pub(super) async fn api_create_bracket(state: AppState, body: Option<Json<CreateBracketBody>>) -> HttpResponse {
    let (name, entrants) = body
        .map(|b| {
            let b = b.into_inner();
            (b.name, b.entrants)
        })
        .unwrap_or_default();
    let mut bracket = Bracket::new(name.trim());
    for entrant in &entrants {
        if let Err(e) = bracket.add_entrant(entrant) {
            return bad_request(e);
        }
    }
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    log::info!(
        "Created bracket {} with {} entrants",
        bracket.id,
        bracket.entrants.len()
    );
    let response = HttpResponse::Ok().json(&bracket);
    g.brackets.insert(bracket.id, Entry::new(bracket));
    response
}

#[get("/api/brackets/{id}")]
pub(super) async fn api_get_bracket(state: AppState, path: Path<BracketPath>) -> HttpResponse {
    with_bracket(&state, path.id, |_| Ok(()))
}

#[post("/api/brackets/{id}/entrants")]
pub(super) async fn api_add_entrant(
    state: AppState,
    path: Path<BracketPath>,
    body: Json<AddEntrantBody>,
) -> HttpResponse {
    with_bracket(&state, path.id, |b| b.add_entrant(&body.name).map(|_| ()))
}

/// Row reorder (drag and drop): move entrant at `from` to `to`.
#[put("/api/brackets/{id}/entrants/order")]
pub(super) async fn api_move_entrant(
    state: AppState,
    path: Path<BracketPath>,
    body: Json<MoveEntrantBody>,
) -> HttpResponse {
    with_bracket(&state, path.id, |b| b.move_entrant(body.from, body.to))
}

#[delete("/api/brackets/{id}/entrants/{entrant_id}")]
pub(super) async fn api_remove_entrant(state: AppState, path: Path<BracketEntrantPath>) -> HttpResponse {
    with_bracket(&state, path.id, |b| b.remove_entrant(path.entrant_id))
}

/// Numbered fixtures for the current entrant order.
#[get("/api/brackets/{id}/schedule")]
pub(super) async fn api_bracket_schedule(state: AppState, path: Path<BracketPath>) -> HttpResponse {
    view_bracket(&state, path.id, schedule)
}

#[get("/api/brackets/{id}/table")]
pub(super) async fn api_bracket_table(state: AppState, path: Path<BracketPath>) -> HttpResponse {
    view_bracket(&state, path.id, build_table)
}

#[get("/api/brackets/{id}/standings")]
pub(super) async fn api_bracket_standings(state: AppState, path: Path<BracketPath>) -> HttpResponse {
    view_bracket(&state, path.id, standings)
}

#[put("/api/brackets/{id}/scores")]
pub(super) async fn api_record_score(
    state: AppState,
    path: Path<BracketPath>,
    body: Json<RecordScoreBody>,
) -> HttpResponse {
    with_bracket(&state, path.id, |b| {
        b.record_score(
            body.home,
            body.away,
            Score::new(body.home_score, body.away_score),
        )
    })
}

#[delete("/api/brackets/{id}/scores")]
pub(super) async fn api_clear_score(
    state: AppState,
    path: Path<BracketPath>,
    body: Json<ClearScoreBody>,
) -> HttpResponse {
    with_bracket(&state, path.id, |b| b.clear_score(body.home, body.away).map(|_| ()))
}
