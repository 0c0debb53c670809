//! Fixture: one pairing of two participant positions.

use serde::{Deserialize, Serialize};

/// 0-based position of a participant in the caller's list.
pub type Position = usize;

/// A scheduled pairing. Unordered in meaning; `home`/`away` only reflect generation order.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub struct Fixture {
    pub home: Position,
    pub away: Position,
}

impl Fixture {
    pub fn new(home: Position, away: Position) -> Self {
        Self { home, away }
    }

    /// The pair as `(lower, higher)`, for comparing fixtures regardless of side.
    pub fn pair(&self) -> (Position, Position) {
        if self.home <= self.away {
            (self.home, self.away)
        } else {
            (self.away, self.home)
        }
    }

    pub fn involves(&self, position: Position) -> bool {
        self.home == position || self.away == position
    }
}
