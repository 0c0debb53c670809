//! Draw candidates and the winners selected from them.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a candidate within a draw.
pub type CandidateId = Uuid;

/// Weight given to a candidate that was added without one.
pub const DEFAULT_WEIGHT: u32 = 1;

/// Clamp a signed weight coming from a request to the valid range (negative -> 0).
pub fn clamp_weight(weight: i64) -> u32 {
    weight.clamp(0, i64::from(u32::MAX)) as u32
}

/// A participant in a draw. Weight 0 means withdrawn: still listed, never drawn.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub id: CandidateId,
    pub name: String,
    /// Optional team / age group shown next to the name.
    pub group: Option<String>,
    pub weight: u32,
}

impl Candidate {
    /// Create a candidate with the default weight.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            group: None,
            weight: DEFAULT_WEIGHT,
        }
    }

    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    pub fn with_weight(mut self, weight: u32) -> Self {
        self.weight = weight;
        self
    }

    /// Whether the candidate can currently be drawn.
    pub fn is_eligible(&self) -> bool {
        self.weight > 0
    }

    /// Apply a signed change (the +/- buttons), never going below 0.
    pub fn adjust_weight(&mut self, delta: i64) {
        self.weight = clamp_weight(i64::from(self.weight).saturating_add(delta));
    }
}

/// One selected winner: what a prize result displays.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Winner {
    pub candidate_id: CandidateId,
    pub name: String,
    pub group: Option<String>,
}

impl From<&Candidate> for Winner {
    fn from(c: &Candidate) -> Self {
        Self {
            candidate_id: c.id,
            name: c.name.clone(),
            group: c.group.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_weight_handles_negative_and_huge_values() {
        assert_eq!(clamp_weight(-5), 0);
        assert_eq!(clamp_weight(7), 7);
        assert_eq!(clamp_weight(i64::MAX), u32::MAX);
    }

    #[test]
    fn adjust_weight_stops_at_zero() {
        let mut c = Candidate::new("Alex").with_weight(1);
        c.adjust_weight(-1);
        assert_eq!(c.weight, 0);
        assert!(!c.is_eligible());
        c.adjust_weight(-1);
        assert_eq!(c.weight, 0);
        c.adjust_weight(3);
        assert_eq!(c.weight, 3);
    }
}
