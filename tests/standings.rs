//! Integration tests for standings: stat derivation and ranking order.

use league_knockout_web::{
    compute_standings, generate_league, rank, recompute_stats, LeagueMatch, Participant,
    ParticipantId, ParticipantStats,
};

fn participants(names: &[&str]) -> Vec<Participant> {
    names.iter().map(|n| Participant::new(*n)).collect()
}

fn played(home: ParticipantId, away: ParticipantId, h: u32, a: u32) -> LeagueMatch {
    let mut m = LeagueMatch::new(1, home, away);
    m.home_score = Some(h);
    m.away_score = Some(a);
    m
}

fn with_stats(name: &str, points: u32, goals_for: u32, goals_against: u32) -> Participant {
    let mut p = Participant::new(name);
    p.stats = ParticipantStats {
        points,
        goals_for: u64::from(goals_for),
        goals_against: u64::from(goals_against),
        goal_difference: i64::from(goals_for) - i64::from(goals_against),
        ..ParticipantStats::default()
    };
    p
}

fn names(ps: &[Participant]) -> Vec<&str> {
    ps.iter().map(|p| p.name.as_str()).collect()
}

#[test]
fn first_round_results_update_table() {
    let ps = participants(&["A", "B", "C", "D"]);
    let mut matches = generate_league(&ps, 3).unwrap();
    // Round 1 is A-D and B-C.
    matches[0].home_score = Some(2);
    matches[0].away_score = Some(1);
    matches[1].home_score = Some(0);
    matches[1].away_score = Some(0);

    let table = compute_standings(&ps, &matches);
    assert_eq!(names(&table), vec!["A", "B", "C", "D"]);
    let points: Vec<u32> = table.iter().map(|p| p.stats.points).collect();
    assert_eq!(points, vec![3, 1, 1, 0]);

    let a = &table[0].stats;
    assert_eq!((a.wins, a.draws, a.losses), (1, 0, 0));
    assert_eq!((a.goals_for, a.goals_against, a.goal_difference), (2, 1, 1));
    let d = &table[3].stats;
    assert_eq!((d.wins, d.draws, d.losses), (0, 0, 1));
    assert_eq!(d.goal_difference, -1);
    assert_eq!(table[1].stats.draws, 1);
}

#[test]
fn pending_and_half_entered_matches_count_for_nothing() {
    let ps = participants(&["A", "B"]);
    let mut half = LeagueMatch::new(1, ps[0].id, ps[1].id);
    half.home_score = Some(4);
    let pending = LeagueMatch::new(2, ps[1].id, ps[0].id);

    let stats = recompute_stats(&ps, &[half, pending]);
    assert!(stats.iter().all(|p| p.stats == ParticipantStats::default()));
}

#[test]
fn recompute_is_idempotent_and_ignores_stale_stats() {
    let mut ps = participants(&["A", "B", "C"]);
    ps[2].stats.points = 99;
    let matches = vec![
        played(ps[0].id, ps[1].id, 1, 3),
        played(ps[1].id, ps[2].id, 2, 2),
        played(ps[2].id, ps[0].id, 0, 5),
    ];

    let once = recompute_stats(&ps, &matches);
    let twice = recompute_stats(&once, &matches);
    assert_eq!(once, twice);
    assert_eq!(once[2].stats.points, 1);
    // Input order is preserved.
    assert_eq!(names(&once), vec!["A", "B", "C"]);
}

#[test]
fn goal_difference_matches_goals() {
    let ps = participants(&["A", "B", "C", "D"]);
    let mut matches = generate_league(&ps, 6).unwrap();
    for (i, m) in matches.iter_mut().enumerate() {
        m.home_score = Some((i as u32 * 7) % 5);
        m.away_score = Some((i as u32 * 3) % 4);
    }
    for p in recompute_stats(&ps, &matches) {
        let s = p.stats;
        assert_eq!(s.goal_difference, s.goals_for as i64 - s.goals_against as i64);
        assert_eq!(s.points, s.wins * 3 + s.draws);
        assert_eq!(s.wins + s.draws + s.losses, 6);
    }
}

#[test]
fn goal_difference_breaks_points_tie() {
    let a = with_stats("A", 6, 5, 2);
    let b = with_stats("B", 6, 7, 2);
    assert_eq!(names(&rank(&[a, b])), vec!["B", "A"]);
}

#[test]
fn goals_for_breaks_goal_difference_tie() {
    let a = with_stats("A", 4, 3, 1);
    let b = with_stats("B", 4, 6, 4);
    let c = with_stats("C", 7, 0, 0);
    assert_eq!(names(&rank(&[a, b, c])), vec!["C", "B", "A"]);
}

#[test]
fn full_ties_keep_prior_order() {
    let ps = vec![
        with_stats("X", 1, 1, 1),
        with_stats("Y", 3, 0, 0),
        with_stats("Z", 1, 1, 1),
        with_stats("W", 1, 1, 1),
    ];
    assert_eq!(names(&rank(&ps)), vec!["Y", "X", "Z", "W"]);
}

#[test]
fn unknown_participants_are_skipped() {
    let ps = participants(&["A", "B"]);
    let stranger = Participant::new("gone");
    let matches = vec![
        played(ps[0].id, stranger.id, 9, 0),
        played(ps[0].id, ps[1].id, 0, 1),
    ];
    let table = compute_standings(&ps, &matches);
    assert_eq!(names(&table), vec!["B", "A"]);
    assert_eq!(table[1].stats.goals_for, 0);
}

#[test]
fn huge_scores_do_not_overflow_totals() {
    let ps = participants(&["A", "B"]);
    let matches = vec![
        played(ps[0].id, ps[1].id, u32::MAX, 0),
        played(ps[1].id, ps[0].id, 1, u32::MAX),
    ];
    let stats = recompute_stats(&ps, &matches);
    let a = &stats[0].stats;
    assert_eq!(a.goals_for, 2 * u64::from(u32::MAX));
    assert_eq!(a.goals_against, 1);
    assert_eq!(a.goal_difference, 2 * i64::from(u32::MAX) - 1);
    assert_eq!((a.wins, a.points), (2, 6));
    let b = &stats[1].stats;
    assert_eq!(b.goals_against, 2 * u64::from(u32::MAX));
    assert_eq!(b.goal_difference, 1 - 2 * i64::from(u32::MAX));
}
