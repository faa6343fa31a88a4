//! Errors returned by tournament operations.

use crate::models::participant::ParticipantId;

/// Errors that can occur during tournament operations.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TournamentError {
    /// Too few participants to generate a league (2) or a knockout bracket (2).
    InsufficientParticipants { required: usize, found: usize },
    /// The chosen winner is not one of the two participants in the match.
    InvalidWinner(ParticipantId),
    /// A persisted snapshot could not be parsed or failed validation.
    MalformedSnapshot(String),
    /// Participant names must not be blank.
    EmptyName,
    /// No registered participant has this id.
    ParticipantNotFound(ParticipantId),
    /// Writing the standings CSV failed.
    Export(String),
}

impl std::fmt::Display for TournamentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TournamentError::InsufficientParticipants { required, found } => {
                write!(f, "Need at least {} participants (have {})", required, found)
            }
            TournamentError::InvalidWinner(_) => write!(f, "Winner is not playing in this match"),
            TournamentError::MalformedSnapshot(reason) => {
                write!(f, "Malformed tournament snapshot: {}", reason)
            }
            TournamentError::EmptyName => write!(f, "Participant name must not be empty"),
            TournamentError::ParticipantNotFound(_) => write!(f, "Participant not found"),
            TournamentError::Export(reason) => write!(f, "Could not export standings: {}", reason),
        }
    }
}

impl std::error::Error for TournamentError {}
