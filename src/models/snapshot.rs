//! Persisted tournament document: the full state after every mutation.

use crate::logic::Invalidation;
use crate::models::error::TournamentError;
use crate::models::game::{LeagueMatch, Round};
use crate::models::participant::Participant;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// `{participants, leagueMatches, knockoutRounds}`. Missing collections load as empty.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Snapshot {
    pub participants: Vec<Participant>,
    pub league_matches: Vec<LeagueMatch>,
    pub knockout_rounds: Vec<Round>,
    pub invalidation: Invalidation,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub saved_at: Option<DateTime<Utc>>,
}

/// Accepted on-disk shapes. The oldest exports were a bare participant list.
#[derive(Deserialize)]
#[serde(untagged)]
enum Document {
    ParticipantsOnly(Vec<Participant>),
    Full(Snapshot),
}

impl Snapshot {
    /// Parse and validate a snapshot.
    pub fn from_json(json: &str) -> Result<Self, TournamentError> {
        let doc: Document = serde_json::from_str(json)
            .map_err(|e| TournamentError::MalformedSnapshot(e.to_string()))?;
        let snapshot = match doc {
            Document::ParticipantsOnly(participants) => Snapshot {
                participants,
                ..Snapshot::default()
            },
            Document::Full(snapshot) => snapshot,
        };
        snapshot.validate()?;
        Ok(snapshot)
    }

    pub fn to_json(&self) -> Result<String, TournamentError> {
        serde_json::to_string_pretty(self).map_err(|e| TournamentError::MalformedSnapshot(e.to_string()))
    }

    /// Structural checks. Ids that point at removed participants are tolerated.
    pub fn validate(&self) -> Result<(), TournamentError> {
        let malformed = |reason: String| Err(TournamentError::MalformedSnapshot(reason));

        if let Some(m) = self.league_matches.iter().find(|m| m.home_id == m.away_id) {
            return malformed(format!("league match {} has the same participant on both sides", m.id));
        }
        if let Some(m) = self.league_matches.iter().find(|m| m.round == 0) {
            return malformed(format!("league match {} has round 0", m.id));
        }

        if self.knockout_rounds.is_empty() {
            return Ok(());
        }
        for pair in self.knockout_rounds.windows(2) {
            if pair[0].len() != pair[1].len() * 2 {
                return malformed("knockout round sizes do not halve".to_string());
            }
        }
        if self.knockout_rounds.last().map(Vec::len) != Some(1) {
            return malformed("knockout bracket must end in a single final".to_string());
        }
        for m in self.knockout_rounds.iter().flatten() {
            if let Some(w) = m.winner_id {
                if !m.involves(w) {
                    return malformed(format!("knockout match {} has a winner not in the match", m.id));
                }
            }
        }
        Ok(())
    }
}
