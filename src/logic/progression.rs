//! Knockout progression: record winners and move them into the next round.

use crate::models::{ParticipantId, Round, Side, TournamentError};
use serde::{Deserialize, Serialize};

/// How far a changed result clears downstream state.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Invalidation {
    /// Clear only the winner of the directly fed match. Results two or more
    /// rounds ahead are left as they were.
    #[default]
    SingleRound,
    /// Also empty every later slot the old result flowed into, up to the final.
    FullCascade,
}

/// Where the winner of match `match_index` plays next: (match index in the next round, slot).
pub fn next_slot(match_index: usize) -> (usize, Side) {
    let side = if match_index % 2 == 0 {
        Side::Home
    } else {
        Side::Away
    };
    (match_index / 2, side)
}

/// Record the winner of one match and advance them.
///
/// Returns `InvalidWinner` (state unchanged) if `winner_id` is not playing in
/// the match. Out-of-range round or match indexes are ignored.
pub fn record_winner(
    rounds: &[Round],
    round_index: usize,
    match_index: usize,
    winner_id: ParticipantId,
    invalidation: Invalidation,
) -> Result<Vec<Round>, TournamentError> {
    let mut updated = rounds.to_vec();
    let Some(m) = updated
        .get_mut(round_index)
        .and_then(|round| round.get_mut(match_index))
    else {
        log::debug!("Ignoring winner for unknown knockout match {}/{}", round_index, match_index);
        return Ok(updated);
    };
    if !m.involves(winner_id) {
        log::warn!("Rejected winner {} for knockout match {}", winner_id, m.id);
        return Err(TournamentError::InvalidWinner(winner_id));
    }
    m.winner_id = Some(winner_id);

    let mut round = round_index + 1;
    let (mut index, mut side) = next_slot(match_index);
    let mut advancing = Some(winner_id);
    while let Some(next) = updated.get_mut(round).and_then(|r| r.get_mut(index)) {
        next.set_slot(side, advancing);
        next.winner_id = None;
        if invalidation == Invalidation::SingleRound {
            break;
        }
        advancing = None;
        round += 1;
        (index, side) = next_slot(index);
    }
    Ok(updated)
}

/// Winner of the final, once decided.
pub fn champion(rounds: &[Round]) -> Option<ParticipantId> {
    rounds.last()?.first()?.winner_id
}
