//! Participant and ParticipantStats data structures.

use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// Unique identifier for a participant (used in matches and lookups).
pub type ParticipantId = Uuid;

/// Derived league statistics. Always recomputable from the match list.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParticipantStats {
    pub points: u32,
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
    pub goals_for: u64,
    pub goals_against: u64,
    pub goal_difference: i64,
}

impl ParticipantStats {
    /// Add one played match from this participant's point of view.
    pub fn record(&mut self, scored: u32, conceded: u32) {
        self.goals_for = self.goals_for.saturating_add(u64::from(scored));
        self.goals_against = self.goals_against.saturating_add(u64::from(conceded));
        self.goal_difference = signed(self.goals_for).saturating_sub(signed(self.goals_against));
        if scored > conceded {
            self.points = self.points.saturating_add(3);
            self.wins = self.wins.saturating_add(1);
        } else if scored < conceded {
            self.losses = self.losses.saturating_add(1);
        } else {
            self.points = self.points.saturating_add(1);
            self.draws = self.draws.saturating_add(1);
        }
    }
}

fn signed(goals: u64) -> i64 {
    i64::try_from(goals).unwrap_or(i64::MAX)
}

/// A participant (team) in the tournament.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Participant {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: ParticipantId,
    pub name: String,
    #[serde(default)]
    pub stats: ParticipantStats,
}

impl Participant {
    /// Create a new participant with the given name and zeroed stats.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            stats: ParticipantStats::default(),
        }
    }

    pub fn reset_stats(&mut self) {
        self.stats = ParticipantStats::default();
    }
}

/// Older exports used free-form string ids. Anything that is not a UUID maps
/// onto a name-based UUID, so references between records still line up.
pub(crate) fn id_from_str(raw: &str) -> Uuid {
    Uuid::parse_str(raw).unwrap_or_else(|_| Uuid::new_v5(&Uuid::NAMESPACE_OID, raw.as_bytes()))
}

pub(crate) fn deserialize_id<'de, D>(deserializer: D) -> Result<Uuid, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    Ok(id_from_str(&raw))
}

pub(crate) fn deserialize_optional_id<'de, D>(deserializer: D) -> Result<Option<Uuid>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.map(|raw| id_from_str(&raw)))
}
