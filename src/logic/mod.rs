//! Business logic: weighted prize draws, round-robin scheduling, bracket tables, CSV import.

mod bracket_table;
mod draw_session;
mod import;
mod round_robin;
mod weighted_draw;

pub use bracket_table::{
    build_table, schedule, standings, BracketTable, Cell, Standing, TableRow, POINTS_FOR_DRAW,
    POINTS_FOR_WIN,
};
pub use draw_session::{redraw_prize, redraw_prize_with, run_draw, run_draw_with};
pub use import::parse_candidates_csv;
pub use round_robin::{fixture_count, generate_fixtures, generate_rounds};
pub use weighted_draw::{select, select_with};
