//! Knockout stage: seeded single-elimination bracket from the league ranking.

use crate::models::{KnockoutMatch, Participant, Round, TournamentError};

/// Minimum qualifiers for a knockout (a single final).
pub const MIN_BRACKET_PARTICIPANTS: usize = 2;

/// Supported bracket sizes, largest first.
const BRACKET_SIZES: [usize; 4] = [16, 8, 4, 2];

/// First-round (home seed, away seed) pairs, 0 = best ranked.
/// Adjacent pairs feed the same next-round match, so seeds 1 and 2 can only
/// meet in the final.
const SEEDS_2: &[(usize, usize)] = &[(0, 1)];
const SEEDS_4: &[(usize, usize)] = &[(0, 3), (1, 2)];
const SEEDS_8: &[(usize, usize)] = &[(0, 7), (3, 4), (2, 5), (1, 6)];
const SEEDS_16: &[(usize, usize)] = &[
    (0, 15),
    (7, 8),
    (3, 12),
    (4, 11),
    (2, 13),
    (5, 10),
    (1, 14),
    (6, 9),
];

/// Largest supported bracket that `count` participants can fill.
/// Also the number of qualifying places in the standings table.
pub fn bracket_size(count: usize) -> Option<usize> {
    BRACKET_SIZES.iter().copied().find(|&size| size <= count)
}

fn seed_pairs(size: usize) -> &'static [(usize, usize)] {
    match size {
        16 => SEEDS_16,
        8 => SEEDS_8,
        4 => SEEDS_4,
        _ => SEEDS_2,
    }
}

/// Build a bracket from participants already in ranking order.
///
/// The first round is fully seeded; later rounds are placeholders, halving
/// down to a single final.
pub fn generate_bracket(ranked: &[Participant]) -> Result<Vec<Round>, TournamentError> {
    let size = bracket_size(ranked.len()).ok_or_else(|| {
        log::warn!("Knockout needs {} participants, have {}", MIN_BRACKET_PARTICIPANTS, ranked.len());
        TournamentError::InsufficientParticipants {
            required: MIN_BRACKET_PARTICIPANTS,
            found: ranked.len(),
        }
    })?;
    let qualifiers = &ranked[..size];
    log::debug!("Seeding a {}-team bracket from {} ranked participant(s)", size, ranked.len());

    let first: Round = seed_pairs(size)
        .iter()
        .map(|&(h, a)| KnockoutMatch::new(qualifiers[h].id, qualifiers[a].id))
        .collect();

    let mut rounds = vec![first];
    let mut matches_in_round = size / 2;
    while matches_in_round > 1 {
        matches_in_round /= 2;
        rounds.push((0..matches_in_round).map(|_| KnockoutMatch::placeholder()).collect());
    }
    Ok(rounds)
}
