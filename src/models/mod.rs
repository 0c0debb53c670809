//! Data structures: draw candidates and prizes, fixtures, round-robin brackets.

mod bracket;
mod candidate;
mod draw;
mod fixture;

pub use bracket::{
    Bracket, BracketError, BracketId, Entrant, EntrantId, RecordedScore, ScheduledMatch, Score,
};
pub use candidate::{clamp_weight, Candidate, CandidateId, Winner, DEFAULT_WEIGHT};
pub use draw::{Draw, DrawError, DrawId, DrawState, Prize, PrizeId, PrizeResult};
pub use fixture::{Fixture, Position};
