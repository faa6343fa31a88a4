//! Standings: derive participant stats from league results and rank them.

use crate::models::{LeagueMatch, Participant};
use std::cmp::Ordering;
use std::collections::HashMap;

/// Recompute every participant's stats from scratch. Output keeps input order.
///
/// Only matches with both scores entered count. Matches that reference an
/// unknown participant are skipped.
pub fn recompute_stats(participants: &[Participant], matches: &[LeagueMatch]) -> Vec<Participant> {
    let mut out: Vec<Participant> = participants.to_vec();
    for p in &mut out {
        p.reset_stats();
    }
    let index: HashMap<_, _> = out.iter().enumerate().map(|(i, p)| (p.id, i)).collect();

    for m in matches {
        let Some((home_score, away_score)) = m.result() else {
            continue;
        };
        let (Some(&h), Some(&a)) = (index.get(&m.home_id), index.get(&m.away_id)) else {
            log::warn!("Skipping league match {} with unknown participant", m.id);
            continue;
        };
        out[h].stats.record(home_score, away_score);
        out[a].stats.record(away_score, home_score);
    }
    out
}

/// Ranking order: points, then goal difference, then goals scored (all descending).
fn compare_standing(a: &Participant, b: &Participant) -> Ordering {
    b.stats
        .points
        .cmp(&a.stats.points)
        .then_with(|| b.stats.goal_difference.cmp(&a.stats.goal_difference))
        .then_with(|| b.stats.goals_for.cmp(&a.stats.goals_for))
}

/// Sort by standing. Stable: full ties keep their prior relative order.
pub fn rank(participants: &[Participant]) -> Vec<Participant> {
    let mut ranked = participants.to_vec();
    ranked.sort_by(compare_standing);
    ranked
}

/// Recompute stats and return participants in ranking order (index 0 = leader).
pub fn compute_standings(participants: &[Participant], matches: &[LeagueMatch]) -> Vec<Participant> {
    rank(&recompute_stats(participants, matches))
}
