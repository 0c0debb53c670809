//! Draw (prize lottery): prizes, weighted candidates, results and DrawError.

use crate::models::candidate::{clamp_weight, Candidate, CandidateId, Winner};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use uuid::Uuid;

/// Errors that can occur during draw operations.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DrawError {
    /// Draw is not in a state that allows this action.
    InvalidState,
    /// Running a draw needs at least one prize.
    NoPrizes,
    /// Every candidate has weight 0 (or there are none).
    NoEligibleCandidates,
    /// Prize or candidate name is blank after trimming.
    EmptyName,
    /// A candidate with this name already exists (names are unique, case-insensitive).
    DuplicateCandidateName(String),
    CandidateNotFound(CandidateId),
    PrizeNotFound(PrizeId),
    /// Participant list could not be parsed.
    Import(String),
}

impl std::fmt::Display for DrawError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DrawError::InvalidState => write!(f, "Invalid state for this action"),
            DrawError::NoPrizes => write!(f, "Add at least one prize"),
            DrawError::NoEligibleCandidates => {
                write!(f, "Add at least one participant with a weight above 0")
            }
            DrawError::EmptyName => write!(f, "Name must not be empty"),
            DrawError::DuplicateCandidateName(name) => {
                write!(f, "A participant named '{}' already exists", name)
            }
            DrawError::CandidateNotFound(_) => write!(f, "Participant not found"),
            DrawError::PrizeNotFound(_) => write!(f, "Prize not found"),
            DrawError::Import(msg) => write!(f, "Could not import participants: {}", msg),
        }
    }
}

impl std::error::Error for DrawError {}

/// Unique identifier for a draw.
pub type DrawId = Uuid;

/// Unique identifier for a prize within a draw.
pub type PrizeId = Uuid;

/// A prize and how many winners it takes.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Prize {
    pub id: PrizeId,
    pub name: String,
    pub winner_count: u32,
}

impl Prize {
    pub fn new(name: impl Into<String>, winner_count: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            winner_count,
        }
    }
}

/// Winners selected for one prize, in draw order.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct PrizeResult {
    pub prize_id: PrizeId,
    pub prize_name: String,
    pub winners: Vec<Winner>,
}

/// Current phase of the draw.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DrawState {
    /// Configuring prizes and participants.
    #[default]
    Setup,
    /// Results are available; single prizes may be redrawn.
    Drawn,
}

/// Full draw session.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Draw {
    pub id: DrawId,
    pub title: String,
    /// Prizes in the order they are drawn.
    pub prizes: Vec<Prize>,
    pub candidates: Vec<Candidate>,
    /// One entry per prize after a run (same order as `prizes`).
    pub results: Vec<PrizeResult>,
    pub state: DrawState,
    pub created_at: DateTime<Utc>,
    pub drawn_at: Option<DateTime<Utc>>,
}

impl Draw {
    /// Create an empty draw in Setup state.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            prizes: Vec::new(),
            candidates: Vec::new(),
            results: Vec::new(),
            state: DrawState::Setup,
            created_at: Utc::now(),
            drawn_at: None,
        }
    }

    fn require_setup(&self) -> Result<(), DrawError> {
        if self.state != DrawState::Setup {
            return Err(DrawError::InvalidState);
        }
        Ok(())
    }

    pub fn prize(&self, id: PrizeId) -> Option<&Prize> {
        self.prizes.iter().find(|p| p.id == id)
    }

    pub fn candidate_mut(&mut self, id: CandidateId) -> Option<&mut Candidate> {
        self.candidates.iter_mut().find(|c| c.id == id)
    }

    /// Candidates with weight above 0.
    pub fn eligible_count(&self) -> usize {
        self.candidates.iter().filter(|c| c.is_eligible()).count()
    }

    /// Add a prize (Setup only). Returns the new prize id.
    pub fn add_prize(&mut self, name: &str, winner_count: u32) -> Result<PrizeId, DrawError> {
        self.require_setup()?;
        let name = name.trim();
        if name.is_empty() {
            return Err(DrawError::EmptyName);
        }
        let prize = Prize::new(name, winner_count);
        let id = prize.id;
        self.prizes.push(prize);
        Ok(id)
    }

    /// Remove a prize by id (Setup only).
    pub fn remove_prize(&mut self, prize_id: PrizeId) -> Result<(), DrawError> {
        self.require_setup()?;
        let idx = self
            .prizes
            .iter()
            .position(|p| p.id == prize_id)
            .ok_or(DrawError::PrizeNotFound(prize_id))?;
        self.prizes.remove(idx);
        Ok(())
    }

    /// Add a candidate (Setup only). Names must be unique (case-insensitive).
    pub fn add_candidate(
        &mut self,
        name: &str,
        group: Option<&str>,
        weight: i64,
    ) -> Result<CandidateId, DrawError> {
        self.require_setup()?;
        let name = name.trim();
        if name.is_empty() {
            return Err(DrawError::EmptyName);
        }
        let mut candidate = Candidate::new(name).with_weight(clamp_weight(weight));
        if let Some(group) = group.map(str::trim).filter(|g| !g.is_empty()) {
            candidate = candidate.with_group(group);
        }
        self.push_candidate(candidate)
    }

    fn push_candidate(&mut self, candidate: Candidate) -> Result<CandidateId, DrawError> {
        let is_duplicate = self
            .candidates
            .iter()
            .any(|c| c.name.eq_ignore_ascii_case(&candidate.name));
        if is_duplicate {
            return Err(DrawError::DuplicateCandidateName(candidate.name));
        }
        let id = candidate.id;
        self.candidates.push(candidate);
        Ok(id)
    }

    /// Append imported candidates (Setup only). The whole batch is rejected, leaving the
    /// draw unchanged, if any name clashes with an existing candidate or another row.
    /// Returns how many were added.
    pub fn import_candidates(&mut self, candidates: Vec<Candidate>) -> Result<usize, DrawError> {
        self.require_setup()?;
        let mut seen: HashSet<String> = self
            .candidates
            .iter()
            .map(|c| c.name.to_ascii_lowercase())
            .collect();
        if let Some(dup) = candidates
            .iter()
            .find(|c| !seen.insert(c.name.to_ascii_lowercase()))
        {
            return Err(DrawError::DuplicateCandidateName(dup.name.clone()));
        }
        let added = candidates.len();
        self.candidates.extend(candidates);
        Ok(added)
    }

    /// Remove a candidate by id (Setup only).
    pub fn remove_candidate(&mut self, candidate_id: CandidateId) -> Result<(), DrawError> {
        self.require_setup()?;
        let idx = self
            .candidates
            .iter()
            .position(|c| c.id == candidate_id)
            .ok_or(DrawError::CandidateNotFound(candidate_id))?;
        self.candidates.remove(idx);
        Ok(())
    }

    /// Set a candidate's weight; negative values clamp to 0. Allowed in any state so
    /// adjustments apply to a later redraw.
    pub fn set_weight(&mut self, candidate_id: CandidateId, weight: i64) -> Result<u32, DrawError> {
        let c = self
            .candidate_mut(candidate_id)
            .ok_or(DrawError::CandidateNotFound(candidate_id))?;
        c.weight = clamp_weight(weight);
        Ok(c.weight)
    }

    /// Change a candidate's weight by `delta`, clamping at 0. Returns the new weight.
    pub fn adjust_weight(&mut self, candidate_id: CandidateId, delta: i64) -> Result<u32, DrawError> {
        let c = self
            .candidate_mut(candidate_id)
            .ok_or(DrawError::CandidateNotFound(candidate_id))?;
        c.adjust_weight(delta);
        Ok(c.weight)
    }

    /// Discard results and go back to Setup.
    pub fn reset_results(&mut self) {
        self.results.clear();
        self.drawn_at = None;
        self.state = DrawState::Setup;
    }

    /// All winner names across results except those of `skip` (case-folded).
    pub(crate) fn winner_names_except(&self, skip: Option<PrizeId>) -> Vec<String> {
        self.results
            .iter()
            .filter(|r| Some(r.prize_id) != skip)
            .flat_map(|r| r.winners.iter().map(|w| w.name.to_ascii_lowercase()))
            .collect()
    }
}
