//! Integration tests for knockout progression: winner propagation and invalidation.

use league_knockout_web::{
    champion, generate_bracket, next_slot, record_winner, Invalidation, Participant, Round, Side,
    TournamentError,
};
use uuid::Uuid;

fn eight() -> (Vec<Participant>, Vec<Round>) {
    let ps: Vec<Participant> = (0..8).map(|i| Participant::new(format!("S{}", i + 1))).collect();
    let rounds = generate_bracket(&ps).unwrap();
    (ps, rounds)
}

/// Home side wins every match, round by round, up to and including the final.
fn play_out(mut rounds: Vec<Round>, invalidation: Invalidation) -> Vec<Round> {
    for r in 0..rounds.len() {
        for m in 0..rounds[r].len() {
            let winner = rounds[r][m].home_id.unwrap();
            rounds = record_winner(&rounds, r, m, winner, invalidation).unwrap();
        }
    }
    rounds
}

#[test]
fn next_slot_follows_match_parity() {
    assert_eq!(next_slot(0), (0, Side::Home));
    assert_eq!(next_slot(1), (0, Side::Away));
    assert_eq!(next_slot(2), (1, Side::Home));
    assert_eq!(next_slot(7), (3, Side::Away));
}

#[test]
fn even_match_feeds_home_odd_match_feeds_away() {
    let (ps, rounds) = eight();
    // QF1 is seed 4 vs seed 5; QF0 is seed 1 vs seed 8.
    let rounds = record_winner(&rounds, 0, 1, ps[4].id, Invalidation::SingleRound).unwrap();
    assert_eq!(rounds[1][0].away_id, Some(ps[4].id));
    assert_eq!(rounds[1][0].home_id, None);

    let rounds = record_winner(&rounds, 0, 0, ps[0].id, Invalidation::SingleRound).unwrap();
    assert_eq!(rounds[1][0].home_id, Some(ps[0].id));
    assert_eq!(rounds[0][0].winner_id, Some(ps[0].id));
    assert_eq!(rounds[0][1].winner_id, Some(ps[4].id));

    let rounds = record_winner(&rounds, 0, 3, ps[6].id, Invalidation::SingleRound).unwrap();
    assert_eq!(rounds[1][1].away_id, Some(ps[6].id));
}

#[test]
fn final_winner_is_champion() {
    let (ps, rounds) = eight();
    assert_eq!(champion(&rounds), None);
    let rounds = play_out(rounds, Invalidation::SingleRound);
    assert_eq!(champion(&rounds), Some(ps[0].id));
    assert_eq!(rounds[2][0].home_id, Some(ps[0].id));
    assert_eq!(rounds[2][0].away_id, Some(ps[2].id));
}

#[test]
fn changed_result_clears_only_the_next_round() {
    let (ps, rounds) = eight();
    let rounds = play_out(rounds, Invalidation::SingleRound);

    // Seed 8 now beats seed 1 in QF0.
    let rounds = record_winner(&rounds, 0, 0, ps[7].id, Invalidation::SingleRound).unwrap();
    assert_eq!(rounds[1][0].home_id, Some(ps[7].id));
    assert_eq!(rounds[1][0].winner_id, None);
    // Untouched sibling semi-final.
    assert_eq!(rounds[1][1].winner_id, Some(ps[2].id));
    // Two rounds ahead the old result stays.
    assert_eq!(rounds[2][0].home_id, Some(ps[0].id));
    assert_eq!(champion(&rounds), Some(ps[0].id));
}

#[test]
fn full_cascade_clears_every_later_round() {
    let (ps, rounds) = eight();
    let rounds = play_out(rounds, Invalidation::FullCascade);
    assert_eq!(champion(&rounds), Some(ps[0].id));

    let rounds = record_winner(&rounds, 0, 0, ps[7].id, Invalidation::FullCascade).unwrap();
    assert_eq!(rounds[1][0].home_id, Some(ps[7].id));
    assert_eq!(rounds[1][0].winner_id, None);
    assert_eq!(rounds[2][0].home_id, None);
    assert_eq!(rounds[2][0].away_id, Some(ps[2].id));
    assert_eq!(champion(&rounds), None);
    assert_eq!(rounds[1][1].winner_id, Some(ps[2].id));
}

#[test]
fn same_winner_again_still_resets_next_match() {
    let (ps, rounds) = eight();
    let rounds = play_out(rounds, Invalidation::SingleRound);
    let rounds = record_winner(&rounds, 0, 2, ps[2].id, Invalidation::SingleRound).unwrap();
    assert_eq!(rounds[1][1].home_id, Some(ps[2].id));
    assert_eq!(rounds[1][1].winner_id, None);
}

#[test]
fn winner_must_be_in_the_match() {
    let (ps, rounds) = eight();
    assert_eq!(
        record_winner(&rounds, 0, 0, ps[1].id, Invalidation::SingleRound),
        Err(TournamentError::InvalidWinner(ps[1].id))
    );
    // Placeholder matches have nobody to pick yet.
    let stranger = Uuid::new_v4();
    assert_eq!(
        record_winner(&rounds, 1, 0, stranger, Invalidation::SingleRound),
        Err(TournamentError::InvalidWinner(stranger))
    );
}

#[test]
fn unknown_match_is_ignored() {
    let (ps, rounds) = eight();
    assert_eq!(
        record_winner(&rounds, 5, 0, ps[0].id, Invalidation::SingleRound).unwrap(),
        rounds
    );
    assert_eq!(
        record_winner(&rounds, 0, 9, ps[0].id, Invalidation::FullCascade).unwrap(),
        rounds
    );
}

#[test]
fn two_team_bracket_is_just_a_final() {
    let ps: Vec<Participant> = (0..2).map(|i| Participant::new(format!("P{i}"))).collect();
    let rounds = generate_bracket(&ps).unwrap();
    assert_eq!(rounds.len(), 1);
    let rounds = record_winner(&rounds, 0, 0, ps[1].id, Invalidation::SingleRound).unwrap();
    assert_eq!(champion(&rounds), Some(ps[1].id));
}
