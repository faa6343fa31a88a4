//! Tournament business logic: league fixtures, standings, knockout bracket.

mod bracket;
mod export;
mod league;
mod progression;
mod standings;

pub use bracket::{bracket_size, generate_bracket, MIN_BRACKET_PARTICIPANTS};
pub use export::standings_csv;
pub use league::{generate_league, record_score, MIN_LEAGUE_PARTICIPANTS};
pub use progression::{champion, next_slot, record_winner, Invalidation};
pub use standings::{compute_standings, rank, recompute_stats};
