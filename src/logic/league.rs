//! League stage: round-robin fixture generation and score entry.

use crate::models::{LeagueMatch, MatchId, Participant, ParticipantId, Side, TournamentError};

/// Minimum participants for a league.
pub const MIN_LEAGUE_PARTICIPANTS: usize = 2;

/// Generate fixtures with the circle method.
///
/// 1. Pad an odd field with a bye (`None`) so the working list has even size M.
/// 2. Clamp `rounds` to 1..=2*(M-1).
/// 3. Each round pairs slot i with slot M-1-i; pairings with the bye are skipped.
/// 4. Rotate every slot except the first by one position after each round.
///
/// Rounds past the first M-1 repeat the cycle with home and away swapped.
pub fn generate_league(
    participants: &[Participant],
    rounds: u32,
) -> Result<Vec<LeagueMatch>, TournamentError> {
    if participants.len() < MIN_LEAGUE_PARTICIPANTS {
        log::warn!("League needs {} participants, have {}", MIN_LEAGUE_PARTICIPANTS, participants.len());
        return Err(TournamentError::InsufficientParticipants {
            required: MIN_LEAGUE_PARTICIPANTS,
            found: participants.len(),
        });
    }

    let mut slots: Vec<Option<ParticipantId>> = participants.iter().map(|p| Some(p.id)).collect();
    if slots.len() % 2 != 0 {
        slots.push(None);
    }

    let m = slots.len();
    let base_rounds = (m - 1) as u32;
    let rounds_to_play = rounds.clamp(1, base_rounds * 2);
    log::debug!(
        "Generating {} league round(s) for {} slot(s) ({} per cycle)",
        rounds_to_play,
        m,
        base_rounds
    );

    let mut matches = Vec::with_capacity(rounds_to_play as usize * m / 2);
    for r in 0..rounds_to_play {
        let second_half = r >= base_rounds;
        for i in 0..m / 2 {
            let (Some(home), Some(away)) = (slots[i], slots[m - 1 - i]) else {
                continue;
            };
            let (home, away) = if second_half { (away, home) } else { (home, away) };
            matches.push(LeagueMatch::new(r + 1, home, away));
        }
        slots[1..].rotate_right(1);
    }
    Ok(matches)
}

/// Set or clear one side's score. Unknown match ids leave the list unchanged.
pub fn record_score(
    matches: &[LeagueMatch],
    match_id: MatchId,
    side: Side,
    score: Option<u32>,
) -> Vec<LeagueMatch> {
    let mut updated = matches.to_vec();
    match updated.iter_mut().find(|m| m.id == match_id) {
        Some(m) => m.set_score(side, score),
        None => log::debug!("Ignoring score for unknown league match {}", match_id),
    }
    updated
}
