//! Bracket table view: numbered schedule, pairwise score grid and standings.

use crate::logic::round_robin::generate_rounds;
use crate::models::{Bracket, EntrantId, ScheduledMatch, Score};
use serde::Serialize;
use std::cmp::Reverse;

pub const POINTS_FOR_WIN: u32 = 3;
pub const POINTS_FOR_DRAW: u32 = 1;

/// Round-robin schedule for the bracket's current entrant order, numbered from 1.
pub fn schedule(bracket: &Bracket) -> Vec<ScheduledMatch> {
    let mut match_number = 0;
    generate_rounds(bracket.entrants.len())
        .into_iter()
        .enumerate()
        .flat_map(|(round, fixtures)| fixtures.into_iter().map(move |f| (round, f)))
        .map(|(round, f)| {
            match_number += 1;
            ScheduledMatch {
                match_number,
                round: round as u32 + 1,
                home: bracket.entrants[f.home].id,
                away: bracket.entrants[f.away].id,
            }
        })
        .collect()
}

/// One cell of the grid, from the row entrant's point of view.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Cell {
    /// Diagonal: entrant against itself.
    SelfMatch,
    Match {
        match_number: u32,
        score: Option<Score>,
    },
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct TableRow {
    pub entrant_id: EntrantId,
    pub name: String,
    pub cells: Vec<Cell>,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct BracketTable {
    pub rows: Vec<TableRow>,
}

/// Square grid with one row and one column per entrant, in entrant order.
pub fn build_table(bracket: &Bracket) -> BracketTable {
    let matches = schedule(bracket);
    let match_number = |a: EntrantId, b: EntrantId| {
        matches
            .iter()
            .find(|m| (m.home == a && m.away == b) || (m.home == b && m.away == a))
            .map(|m| m.match_number)
            .unwrap_or_default()
    };

    let rows = bracket
        .entrants
        .iter()
        .map(|row| TableRow {
            entrant_id: row.id,
            name: row.name.clone(),
            cells: bracket
                .entrants
                .iter()
                .map(|col| {
                    if col.id == row.id {
                        Cell::SelfMatch
                    } else {
                        Cell::Match {
                            match_number: match_number(row.id, col.id),
                            score: bracket.score_between(row.id, col.id),
                        }
                    }
                })
                .collect(),
        })
        .collect();

    BracketTable { rows }
}

/// League standing of one entrant.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct Standing {
    pub entrant_id: EntrantId,
    pub name: String,
    pub played: u32,
    pub won: u32,
    pub drawn: u32,
    pub lost: u32,
    /// Summed in `u64`: recorded scores are `u32` each.
    pub scored: u64,
    pub conceded: u64,
    pub points: u32,
}

impl Standing {
    fn record(&mut self, own: u32, other: u32) {
        self.played = self.played.saturating_add(1);
        self.scored = self.scored.saturating_add(u64::from(own));
        self.conceded = self.conceded.saturating_add(u64::from(other));
        match own.cmp(&other) {
            std::cmp::Ordering::Greater => {
                self.won += 1;
                self.points = self.points.saturating_add(POINTS_FOR_WIN);
            }
            std::cmp::Ordering::Equal => {
                self.drawn += 1;
                self.points = self.points.saturating_add(POINTS_FOR_DRAW);
            }
            std::cmp::Ordering::Less => self.lost += 1,
        }
    }

    pub fn difference(&self) -> i64 {
        let clamp = |v: u64| i64::try_from(v).unwrap_or(i64::MAX);
        clamp(self.scored).saturating_sub(clamp(self.conceded))
    }
}

/// Standings from recorded scores: points, then difference, then scored, then name.
pub fn standings(bracket: &Bracket) -> Vec<Standing> {
    let mut table: Vec<Standing> = bracket
        .entrants
        .iter()
        .map(|e| Standing {
            entrant_id: e.id,
            name: e.name.clone(),
            ..Standing::default()
        })
        .collect();

    for s in &bracket.scores {
        if let Some(home) = table.iter_mut().find(|t| t.entrant_id == s.home) {
            home.record(s.score.home, s.score.away);
        }
        if let Some(away) = table.iter_mut().find(|t| t.entrant_id == s.away) {
            away.record(s.score.away, s.score.home);
        }
    }

    table.sort_by_key(|t| {
        (
            Reverse(t.points),
            Reverse(t.difference()),
            Reverse(t.scored),
            t.name.to_ascii_lowercase(),
        )
    });
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bracket(names: &[&str]) -> Bracket {
        let mut b = Bracket::new("Cup");
        for n in names {
            b.add_entrant(n).unwrap();
        }
        b
    }

    #[test]
    fn schedule_numbers_matches_in_round_order() {
        let b = bracket(&["A", "B", "C", "D"]);
        let s = schedule(&b);
        assert_eq!(s.len(), 6);
        let numbers: Vec<_> = s.iter().map(|m| m.match_number).collect();
        assert_eq!(numbers, [1, 2, 3, 4, 5, 6]);
        let rounds: Vec<_> = s.iter().map(|m| m.round).collect();
        assert_eq!(rounds, [1, 1, 2, 2, 3, 3]);
        // first fixture pairs the first and last rows
        assert_eq!(s[0].home, b.entrants[0].id);
        assert_eq!(s[0].away, b.entrants[3].id);
    }

    #[test]
    fn table_is_symmetric_in_match_numbers() {
        let mut b = bracket(&["A", "B", "C"]);
        let (a, c) = (b.entrants[0].id, b.entrants[2].id);
        b.record_score(a, c, Score::new(2, 1)).unwrap();
        let t = build_table(&b);
        assert_eq!(t.rows.len(), 3);
        for (i, row) in t.rows.iter().enumerate() {
            assert_eq!(row.cells[i], Cell::SelfMatch);
            for (j, cell) in row.cells.iter().enumerate() {
                if i == j {
                    continue;
                }
                let (Cell::Match { match_number: x, .. }, Cell::Match { match_number: y, .. }) =
                    (cell, &t.rows[j].cells[i])
                else {
                    panic!("off-diagonal cell must be a match");
                };
                assert_eq!(x, y);
                assert!(*x >= 1 && *x <= 3);
            }
        }
        assert!(matches!(
            t.rows[2].cells[0],
            Cell::Match { score: Some(Score { home: 1, away: 2 }), .. }
        ));
        assert!(matches!(t.rows[0].cells[1], Cell::Match { score: None, .. }));
    }

    #[test]
    fn standings_order_by_points_then_difference() {
        let mut b = bracket(&["A", "B", "C"]);
        let ids: Vec<_> = b.entrants.iter().map(|e| e.id).collect();
        b.record_score(ids[0], ids[1], Score::new(1, 1)).unwrap();
        b.record_score(ids[2], ids[0], Score::new(0, 2)).unwrap();
        b.record_score(ids[1], ids[2], Score::new(5, 0)).unwrap();
        let s = standings(&b);
        // A: draw + win = 4 pts, diff +2; B: draw + win = 4 pts, diff +5; C: 0
        let names: Vec<_> = s.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, ["B", "A", "C"]);
        assert_eq!(s[0].points, 4);
        assert_eq!(s[0].played, 2);
        assert_eq!(s[2].lost, 2);
        assert_eq!(s[2].difference(), -7);
    }

    #[test]
    fn standings_survive_maximum_scores() {
        let mut b = bracket(&["A", "B", "C"]);
        let ids: Vec<_> = b.entrants.iter().map(|e| e.id).collect();
        b.record_score(ids[0], ids[1], Score::new(u32::MAX, 0)).unwrap();
        b.record_score(ids[0], ids[2], Score::new(u32::MAX, u32::MAX)).unwrap();
        let s = standings(&b);
        assert_eq!(s[0].name, "A");
        assert_eq!(s[0].scored, 2 * u64::from(u32::MAX));
        assert_eq!(s[0].conceded, u64::from(u32::MAX));
        assert_eq!(s[0].difference(), i64::from(u32::MAX));
        assert_eq!(s[0].points, POINTS_FOR_WIN + POINTS_FOR_DRAW);
    }
}
