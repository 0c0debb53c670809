//! Round-robin bracket: entrants, recorded scores and BracketError.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Errors that can occur during bracket operations.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum BracketError {
    /// Entrant name is blank after trimming.
    EmptyName,
    /// An entrant with this name already exists (names are unique, case-insensitive).
    DuplicateEntrantName(String),
    EntrantNotFound(EntrantId),
    /// A score needs two different entrants.
    SelfMatch,
    /// Row reorder index outside the entrant list.
    PositionOutOfRange { position: usize, len: usize },
}

impl std::fmt::Display for BracketError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BracketError::EmptyName => write!(f, "Name must not be empty"),
            BracketError::DuplicateEntrantName(name) => {
                write!(f, "An entrant named '{}' already exists", name)
            }
            BracketError::EntrantNotFound(_) => write!(f, "Entrant not found"),
            BracketError::SelfMatch => write!(f, "An entrant cannot play itself"),
            BracketError::PositionOutOfRange { position, len } => {
                write!(f, "Position {} is out of range ({} entrants)", position, len)
            }
        }
    }
}

impl std::error::Error for BracketError {}

/// Unique identifier for a bracket.
pub type BracketId = Uuid;

/// Unique identifier for an entrant (player or team) in a bracket.
pub type EntrantId = Uuid;

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Entrant {
    pub id: EntrantId,
    pub name: String,
}

impl Entrant {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
        }
    }
}

/// Result of one match as seen from the `home` side.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Score {
    pub home: u32,
    pub away: u32,
}

impl Score {
    pub fn new(home: u32, away: u32) -> Self {
        Self { home, away }
    }

    /// Same result from the other side.
    pub fn flipped(self) -> Self {
        Self {
            home: self.away,
            away: self.home,
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct RecordedScore {
    pub home: EntrantId,
    pub away: EntrantId,
    pub score: Score,
}

impl RecordedScore {
    fn is_between(&self, a: EntrantId, b: EntrantId) -> bool {
        (self.home == a && self.away == b) || (self.home == b && self.away == a)
    }
}

/// A fixture with its stable match label, in entrant ids.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ScheduledMatch {
    /// 1-based, in fixture order.
    pub match_number: u32,
    /// 1-based round of the circle schedule.
    pub round: u32,
    pub home: EntrantId,
    pub away: EntrantId,
}

/// A round-robin league table. Entrant order is the row order of the bracket table.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Bracket {
    pub id: BracketId,
    pub name: String,
    pub entrants: Vec<Entrant>,
    /// Keyed by entrant pair, not position, so reordering rows keeps results.
    pub scores: Vec<RecordedScore>,
    pub created_at: DateTime<Utc>,
}

impl Bracket {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            entrants: Vec::new(),
            scores: Vec::new(),
            created_at: Utc::now(),
        }
    }

    pub fn entrant(&self, id: EntrantId) -> Option<&Entrant> {
        self.entrants.iter().find(|e| e.id == id)
    }

    /// Add an entrant at the bottom of the table. Names must be unique (case-insensitive).
    pub fn add_entrant(&mut self, name: &str) -> Result<EntrantId, BracketError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(BracketError::EmptyName);
        }
        if self.entrants.iter().any(|e| e.name.eq_ignore_ascii_case(name)) {
            return Err(BracketError::DuplicateEntrantName(name.to_string()));
        }
        let entrant = Entrant::new(name);
        let id = entrant.id;
        self.entrants.push(entrant);
        Ok(id)
    }

    /// Remove an entrant together with every score involving them.
    pub fn remove_entrant(&mut self, entrant_id: EntrantId) -> Result<(), BracketError> {
        let idx = self
            .entrants
            .iter()
            .position(|e| e.id == entrant_id)
            .ok_or(BracketError::EntrantNotFound(entrant_id))?;
        self.entrants.remove(idx);
        self.scores
            .retain(|s| s.home != entrant_id && s.away != entrant_id);
        Ok(())
    }

    /// Move the row at `from` to index `to` (result of a drag-and-drop reorder).
    pub fn move_entrant(&mut self, from: usize, to: usize) -> Result<(), BracketError> {
        let len = self.entrants.len();
        for position in [from, to] {
            if position >= len {
                return Err(BracketError::PositionOutOfRange { position, len });
            }
        }
        let entrant = self.entrants.remove(from);
        self.entrants.insert(to, entrant);
        Ok(())
    }

    fn check_pair(&self, a: EntrantId, b: EntrantId) -> Result<(), BracketError> {
        if a == b {
            return Err(BracketError::SelfMatch);
        }
        for id in [a, b] {
            if self.entrant(id).is_none() {
                return Err(BracketError::EntrantNotFound(id));
            }
        }
        Ok(())
    }

    /// Record (or overwrite) the result between `home` and `away`, oriented to `home`.
    pub fn record_score(
        &mut self,
        home: EntrantId,
        away: EntrantId,
        score: Score,
    ) -> Result<(), BracketError> {
        self.check_pair(home, away)?;
        self.scores.retain(|s| !s.is_between(home, away));
        self.scores.push(RecordedScore { home, away, score });
        Ok(())
    }

    /// Remove the result between two entrants, if any. Returns whether one existed.
    pub fn clear_score(&mut self, a: EntrantId, b: EntrantId) -> Result<bool, BracketError> {
        self.check_pair(a, b)?;
        let before = self.scores.len();
        self.scores.retain(|s| !s.is_between(a, b));
        Ok(self.scores.len() != before)
    }

    /// Result between `a` and `b` from `a`'s point of view.
    pub fn score_between(&self, a: EntrantId, b: EntrantId) -> Option<Score> {
        self.scores.iter().find(|s| s.is_between(a, b)).map(|s| {
            if s.home == a {
                s.score
            } else {
                s.score.flipped()
            }
        })
    }
}
