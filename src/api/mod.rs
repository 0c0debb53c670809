//! REST API over an in-memory store of draws and brackets.
//!
//! Every access refreshes the entry's `last_activity`; the binary periodically calls
//! [`remove_inactive`] to drop stale entries.

mod brackets;
mod draws;

pub use draws::MAX_SCHEDULE_PARTICIPANTS;

use crate::models::{Bracket, BracketId, Draw, DrawId};
use actix_web::{
    get,
    web::{self, Data},
    HttpResponse, Responder,
};
use std::collections::HashMap;
use std::fmt::Display;
use std::sync::RwLock;
use std::time::{Duration, Instant};

/// Stored value plus last activity time (for auto-cleanup).
pub struct Entry<T> {
    pub value: T,
    pub last_activity: Instant,
}

impl<T> Entry<T> {
    pub fn new(value: T) -> Self {
        Self {
            value,
            last_activity: Instant::now(),
        }
    }

    fn touch(&mut self) -> &mut T {
        self.last_activity = Instant::now();
        &mut self.value
    }
}

#[derive(Default)]
pub struct Store {
    pub draws: HashMap<DrawId, Entry<Draw>>,
    pub brackets: HashMap<BracketId, Entry<Bracket>>,
}

pub type AppState = Data<RwLock<Store>>;

pub fn new_state() -> AppState {
    Data::new(RwLock::new(Store::default()))
}

/// Drop draws and brackets idle for at least `timeout`. Returns how many were removed.
pub fn remove_inactive(store: &mut Store, timeout: Duration) -> usize {
    let before = store.draws.len() + store.brackets.len();
    store
        .draws
        .retain(|_, e| e.last_activity.elapsed() < timeout);
    store
        .brackets
        .retain(|_, e| e.last_activity.elapsed() < timeout);
    before - (store.draws.len() + store.brackets.len())
}

#[derive(serde::Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "club-draw-web",
    })
}

fn bad_request(e: impl Display) -> HttpResponse {
    log::debug!("Rejected request: {}", e);
    HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() }))
}

fn not_found(what: &str) -> HttpResponse {
    HttpResponse::NotFound().json(serde_json::json!({ "error": format!("No {}", what) }))
}

fn lock_error() -> HttpResponse {
    HttpResponse::InternalServerError().body("lock error")
}

/// Register every API route.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(api_health)
        .service(draws::api_schedule)
        .service(draws::api_create_draw)
        .service(draws::api_get_draw)
        .service(draws::api_add_prize)
        .service(draws::api_remove_prize)
        .service(draws::api_import_candidates)
        .service(draws::api_add_candidate)
        .service(draws::api_remove_candidate)
        .service(draws::api_set_weight)
        .service(draws::api_adjust_weight)
        .service(draws::api_run_draw)
        .service(draws::api_redraw_prize)
        .service(draws::api_reset_draw)
        .service(brackets::api_create_bracket)
        .service(brackets::api_get_bracket)
        .service(brackets::api_add_entrant)
        .service(brackets::api_move_entrant)
        .service(brackets::api_remove_entrant)
        .service(brackets::api_bracket_schedule)
        .service(brackets::api_bracket_table)
        .service(brackets::api_bracket_standings)
        .service(brackets::api_record_score)
        .service(brackets::api_clear_score);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remove_inactive_drops_only_stale_entries() {
        let mut store = Store::default();
        let fresh = Draw::new("fresh");
        let mut stale = Entry::new(Bracket::new("stale"));
        stale.last_activity = Instant::now() - Duration::from_secs(120);
        store.draws.insert(fresh.id, Entry::new(fresh));
        store.brackets.insert(stale.value.id, stale);

        assert_eq!(remove_inactive(&mut store, Duration::from_secs(60)), 1);
        assert_eq!(store.draws.len(), 1);
        assert!(store.brackets.is_empty());
    }
}
