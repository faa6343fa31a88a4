//! Data structures for the tournament: participants, matches, bracket, snapshot.

mod error;
mod game;
mod participant;
mod snapshot;
mod tournament;

pub use error::TournamentError;
pub use game::{round_name, KnockoutMatch, LeagueMatch, MatchId, Round, Side};
pub use participant::{Participant, ParticipantId, ParticipantStats};
pub use snapshot::Snapshot;
pub use tournament::{Tournament, TournamentId};
