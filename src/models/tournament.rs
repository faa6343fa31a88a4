//! Tournament aggregate: participants, league fixtures and knockout bracket.

use crate::logic::{self, Invalidation};
use crate::models::error::TournamentError;
use crate::models::game::{LeagueMatch, MatchId, Round, Side};
use crate::models::participant::{Participant, ParticipantId};
use crate::models::snapshot::Snapshot;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a tournament.
pub type TournamentId = Uuid;

/// Full tournament state. Each method applies one operation completely or,
/// on error, leaves the state untouched.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Tournament {
    pub id: TournamentId,
    /// Registration order; stats always reflect `league_matches`.
    pub participants: Vec<Participant>,
    pub league_matches: Vec<LeagueMatch>,
    pub knockout_rounds: Vec<Round>,
    /// What a changed knockout result clears downstream.
    #[serde(default)]
    pub invalidation: Invalidation,
}

impl Default for Tournament {
    fn default() -> Self {
        Self::new()
    }
}

impl Tournament {
    /// Create an empty tournament.
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            participants: Vec::new(),
            league_matches: Vec::new(),
            knockout_rounds: Vec::new(),
            invalidation: Invalidation::default(),
        }
    }

    /// Create a tournament with initial participants and no fixtures.
    pub fn with_participants(participants: Vec<Participant>) -> Self {
        Self {
            participants,
            ..Self::new()
        }
    }

    /// Restore from a persisted snapshot. Stats are recomputed, never trusted.
    pub fn from_snapshot(snapshot: Snapshot) -> Self {
        let participants = logic::recompute_stats(&snapshot.participants, &snapshot.league_matches);
        Self {
            participants,
            league_matches: snapshot.league_matches,
            knockout_rounds: snapshot.knockout_rounds,
            invalidation: snapshot.invalidation,
            ..Self::new()
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            participants: self.participants.clone(),
            league_matches: self.league_matches.clone(),
            knockout_rounds: self.knockout_rounds.clone(),
            invalidation: self.invalidation,
            saved_at: Some(Utc::now()),
        }
    }

    pub fn participant(&self, id: ParticipantId) -> Option<&Participant> {
        self.participants.iter().find(|p| p.id == id)
    }

    /// Register a participant. Returns the new id.
    pub fn add_participant(&mut self, name: impl Into<String>) -> Result<ParticipantId, TournamentError> {
        let name = name.into();
        let name = name.trim();
        if name.is_empty() {
            return Err(TournamentError::EmptyName);
        }
        let p = Participant::new(name);
        let id = p.id;
        self.participants.push(p);
        Ok(id)
    }

    /// Rename a participant. Fixtures and results are unaffected.
    pub fn rename_participant(
        &mut self,
        id: ParticipantId,
        name: impl Into<String>,
    ) -> Result<(), TournamentError> {
        let name = name.into();
        let name = name.trim();
        if name.is_empty() {
            return Err(TournamentError::EmptyName);
        }
        let p = self
            .participants
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(TournamentError::ParticipantNotFound(id))?;
        p.name = name.to_string();
        Ok(())
    }

    /// Remove a participant. Resets the league and bracket.
    pub fn remove_participant(&mut self, id: ParticipantId) -> Result<(), TournamentError> {
        let idx = self
            .participants
            .iter()
            .position(|p| p.id == id)
            .ok_or(TournamentError::ParticipantNotFound(id))?;
        self.participants.remove(idx);
        self.reset_league();
        Ok(())
    }

    /// Drop all fixtures and the bracket; zero every participant's stats.
    pub fn reset_league(&mut self) {
        self.league_matches.clear();
        self.knockout_rounds.clear();
        for p in &mut self.participants {
            p.reset_stats();
        }
    }

    /// Replace the league (and clear the bracket) with freshly generated fixtures.
    pub fn generate_league(&mut self, rounds: u32) -> Result<(), TournamentError> {
        let matches = logic::generate_league(&self.participants, rounds)?;
        self.reset_league();
        log::info!(
            "Tournament {}: generated {} league match(es) for {} participant(s)",
            self.id,
            matches.len(),
            self.participants.len()
        );
        self.league_matches = matches;
        Ok(())
    }

    /// Enter or clear one side's score and refresh the standings.
    pub fn record_score(&mut self, match_id: MatchId, side: Side, score: Option<u32>) {
        self.league_matches = logic::record_score(&self.league_matches, match_id, side, score);
        self.participants = logic::recompute_stats(&self.participants, &self.league_matches);
    }

    /// Participants in ranking order.
    pub fn standings(&self) -> Vec<Participant> {
        logic::rank(&self.participants)
    }

    /// Seed a new bracket from the current standings, replacing any existing one.
    pub fn generate_bracket(&mut self) -> Result<(), TournamentError> {
        let rounds = logic::generate_bracket(&self.standings())?;
        log::info!("Tournament {}: seeded a {}-round knockout bracket", self.id, rounds.len());
        self.knockout_rounds = rounds;
        Ok(())
    }

    /// Record a knockout winner using this tournament's invalidation strategy.
    pub fn record_winner(
        &mut self,
        round_index: usize,
        match_index: usize,
        winner_id: ParticipantId,
    ) -> Result<(), TournamentError> {
        self.knockout_rounds = logic::record_winner(
            &self.knockout_rounds,
            round_index,
            match_index,
            winner_id,
            self.invalidation,
        )?;
        if let Some(champion) = self.champion() {
            if round_index + 1 == self.knockout_rounds.len() {
                log::info!("Tournament {}: champion decided ({})", self.id, champion);
            }
        }
        Ok(())
    }

    pub fn set_invalidation(&mut self, invalidation: Invalidation) {
        self.invalidation = invalidation;
    }

    /// Winner of the knockout final, once decided.
    pub fn champion(&self) -> Option<ParticipantId> {
        logic::champion(&self.knockout_rounds)
    }
}
