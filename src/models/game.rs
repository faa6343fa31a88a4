//! League fixtures, knockout matches and the Side selector shared by both.

use crate::models::participant::{deserialize_id, deserialize_optional_id, ParticipantId};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a match (league or knockout).
pub type MatchId = Uuid;

/// One side of a match: home or away.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    #[default]
    Home,
    Away,
}

/// A round-robin fixture.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct LeagueMatch {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: MatchId,
    /// 1-based round number.
    pub round: u32,
    #[serde(alias = "homeId", deserialize_with = "deserialize_id")]
    pub home_id: ParticipantId,
    #[serde(alias = "awayId", deserialize_with = "deserialize_id")]
    pub away_id: ParticipantId,
    #[serde(default, alias = "homeScore")]
    pub home_score: Option<u32>,
    #[serde(default, alias = "awayScore")]
    pub away_score: Option<u32>,
}

impl LeagueMatch {
    pub fn new(round: u32, home_id: ParticipantId, away_id: ParticipantId) -> Self {
        Self {
            id: Uuid::new_v4(),
            round,
            home_id,
            away_id,
            home_score: None,
            away_score: None,
        }
    }

    /// Final score as (home, away), only once both sides have been entered.
    pub fn result(&self) -> Option<(u32, u32)> {
        Some((self.home_score?, self.away_score?))
    }

    pub fn set_score(&mut self, side: Side, score: Option<u32>) {
        match side {
            Side::Home => self.home_score = score,
            Side::Away => self.away_score = score,
        }
    }
}

/// A knockout match. `None` participants are still to be decided.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct KnockoutMatch {
    #[serde(alias = "matchId", deserialize_with = "deserialize_id")]
    pub id: MatchId,
    #[serde(default, alias = "homeId", deserialize_with = "deserialize_optional_id")]
    pub home_id: Option<ParticipantId>,
    #[serde(default, alias = "awayId", deserialize_with = "deserialize_optional_id")]
    pub away_id: Option<ParticipantId>,
    #[serde(default, alias = "winnerId", deserialize_with = "deserialize_optional_id")]
    pub winner_id: Option<ParticipantId>,
}

impl KnockoutMatch {
    pub fn new(home_id: ParticipantId, away_id: ParticipantId) -> Self {
        Self {
            id: Uuid::new_v4(),
            home_id: Some(home_id),
            away_id: Some(away_id),
            winner_id: None,
        }
    }

    /// Empty later-round match, filled in as winners advance.
    pub fn placeholder() -> Self {
        Self {
            id: Uuid::new_v4(),
            home_id: None,
            away_id: None,
            winner_id: None,
        }
    }

    pub fn slot(&self, side: Side) -> Option<ParticipantId> {
        match side {
            Side::Home => self.home_id,
            Side::Away => self.away_id,
        }
    }

    pub fn set_slot(&mut self, side: Side, participant: Option<ParticipantId>) {
        match side {
            Side::Home => self.home_id = participant,
            Side::Away => self.away_id = participant,
        }
    }

    /// True if `id` currently occupies either slot.
    pub fn involves(&self, id: ParticipantId) -> bool {
        self.home_id == Some(id) || self.away_id == Some(id)
    }
}

/// One knockout round, in bracket order.
pub type Round = Vec<KnockoutMatch>;

const ROUND_NAMES: [&str; 4] = ["Round of 16", "Quarter-Finals", "Semi-Finals", "Final"];

/// Display label for round `index` of a bracket with `total_rounds` rounds.
pub fn round_name(total_rounds: usize, index: usize) -> String {
    (index + ROUND_NAMES.len())
        .checked_sub(total_rounds)
        .and_then(|i| ROUND_NAMES.get(i))
        .map(|s| s.to_string())
        .unwrap_or_else(|| format!("Round {}", index + 1))
}
