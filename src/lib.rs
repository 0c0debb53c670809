//! Club draw web app: library with models, business logic and the REST API.

pub mod api;
pub mod config;
pub mod logic;
pub mod models;

pub use logic::{
    build_table, fixture_count, generate_fixtures, generate_rounds, parse_candidates_csv,
    redraw_prize, redraw_prize_with, run_draw, run_draw_with, schedule, select, select_with,
    standings, BracketTable, Cell, Standing,
};
pub use models::{
    clamp_weight, Bracket, BracketError, BracketId, Candidate, CandidateId, Draw, DrawError,
    DrawId, DrawState, Entrant, EntrantId, Fixture, Position, Prize, PrizeId, PrizeResult,
    ScheduledMatch, Score, Winner,
};
