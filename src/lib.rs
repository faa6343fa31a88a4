//! League + knockout tournament organizer: library with models and business logic.

pub mod logic;
pub mod models;

pub use logic::{
    bracket_size, champion, compute_standings, generate_bracket, generate_league, next_slot,
    rank, recompute_stats, record_score, record_winner, standings_csv, Invalidation,
    MIN_BRACKET_PARTICIPANTS, MIN_LEAGUE_PARTICIPANTS,
};
pub use models::{
    round_name, KnockoutMatch, LeagueMatch, MatchId, Participant, ParticipantId, ParticipantStats,
    Round, Side, Snapshot, Tournament, TournamentError, TournamentId,
};
