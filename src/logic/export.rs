//! CSV export of the standings table.

use crate::logic::bracket::bracket_size;
use crate::models::{Participant, TournamentError};
use serde::Serialize;

#[derive(Serialize)]
struct StandingRow<'a> {
    rank: usize,
    name: &'a str,
    points: u32,
    wins: u32,
    draws: u32,
    losses: u32,
    goals_for: u64,
    goals_against: u64,
    goal_difference: i64,
    /// Inside the knockout cut.
    qualified: bool,
}

const HEADER: [&str; 10] = [
    "rank",
    "name",
    "points",
    "wins",
    "draws",
    "losses",
    "goals_for",
    "goals_against",
    "goal_difference",
    "qualified",
];

/// Write ranked participants as CSV, one row per participant, header first.
pub fn standings_csv(ranked: &[Participant]) -> Result<String, TournamentError> {
    let cut = bracket_size(ranked.len()).unwrap_or(0);
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());
    writer
        .write_record(HEADER)
        .map_err(|e| TournamentError::Export(e.to_string()))?;
    for (i, p) in ranked.iter().enumerate() {
        let s = &p.stats;
        writer
            .serialize(StandingRow {
                rank: i + 1,
                name: &p.name,
                points: s.points,
                wins: s.wins,
                draws: s.draws,
                losses: s.losses,
                goals_for: s.goals_for,
                goals_against: s.goals_against,
                goal_difference: s.goal_difference,
                qualified: i < cut,
            })
            .map_err(|e| TournamentError::Export(e.to_string()))?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| TournamentError::Export(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| TournamentError::Export(e.to_string()))
}
