//! Splits the accepted players of a match into two teams.
//!
//! Players are taken strongest first and each one joins whichever team has the
//! lower running level total, team A on a tie. Inside the team the player gets
//! the first free slot of their position category, then the first free
//! attacking slot, and as a last resort the overflow slot. The result depends
//! only on the order and content of the input slice.

use std::collections::HashSet;

use crate::domain::{ParticipationId, UserId, roster::Team};

/// Level assumed for players who never recorded one.
pub const DEFAULT_LEVEL: i32 = 5;

/// Category for players without a recognizable position.
pub const DEFAULT_CATEGORY: PositionCategory = PositionCategory::Att;

/// Given out once a team has no free slot left in either the player's own
/// category or attack. It is never marked as used.
pub const OVERFLOW_SLOT: &str = "mf-c";

pub const MIN_LINEUP_PLAYERS: usize = 2;

const GK_SLOTS: [&str; 1] = ["gk"];
const DEF_SLOTS: [&str; 4] = ["df-l", "df-c1", "df-c2", "df-r"];
const MID_SLOTS: [&str; 3] = ["mf-l", "mf-c", "mf-r"];
const ATT_SLOTS: [&str; 3] = ["st-l", "st-c", "st-r"];

const GK_KEYWORDS: [&str; 3] = ["GK", "GARDIEN", "GOALKEEPER"];
const ATT_KEYWORDS: [&str; 3] = ["ATT", "STRIKER", "WING"];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PositionCategory {
    Gk,
    Def,
    Mid,
    Att,
}

impl PositionCategory {
    pub fn classify(position: Option<&str>) -> Self {
        let Some(position) = position else {
            return DEFAULT_CATEGORY;
        };
        let upper = position.to_uppercase();
        if GK_KEYWORDS.iter().any(|k| upper.contains(k)) {
            PositionCategory::Gk
        } else if upper.contains("DEF") {
            PositionCategory::Def
        } else if upper.contains("MID") {
            PositionCategory::Mid
        } else if ATT_KEYWORDS.iter().any(|k| upper.contains(k)) {
            PositionCategory::Att
        } else {
            DEFAULT_CATEGORY
        }
    }

    pub fn slots(&self) -> &'static [&'static str] {
        match self {
            PositionCategory::Gk => &GK_SLOTS,
            PositionCategory::Def => &DEF_SLOTS,
            PositionCategory::Mid => &MID_SLOTS,
            PositionCategory::Att => &ATT_SLOTS,
        }
    }
}

#[derive(Clone, Debug)]
pub struct LineupCandidate {
    pub participation_id: ParticipationId,
    pub user_id: UserId,
    pub position: Option<String>,
    pub level: Option<i32>,
}

impl LineupCandidate {
    pub fn effective_level(&self) -> i32 {
        self.level.unwrap_or(DEFAULT_LEVEL)
    }

    pub fn category(&self) -> PositionCategory {
        PositionCategory::classify(self.position.as_deref())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LineupAssignment {
    pub participation_id: ParticipationId,
    pub user_id: UserId,
    pub team: Team,
    pub slot: &'static str,
}

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum BalanceError {
    #[error("not enough accepted players to create teams ({0} accepted)")]
    InsufficientPlayers(usize),
}

struct TeamSheet {
    team: Team,
    total_level: i64,
    used_slots: HashSet<&'static str>,
    assignments: Vec<LineupAssignment>,
}

impl TeamSheet {
    fn new(team: Team) -> Self {
        Self {
            team,
            total_level: 0,
            used_slots: HashSet::new(),
            assignments: Vec::new(),
        }
    }

    fn take_free_slot(&mut self, slots: &'static [&'static str]) -> Option<&'static str> {
        let slot = *slots.iter().find(|s| !self.used_slots.contains(*s))?;
        self.used_slots.insert(slot);
        Some(slot)
    }

    fn pick_slot(&mut self, category: PositionCategory) -> &'static str {
        if let Some(slot) = self.take_free_slot(category.slots()) {
            return slot;
        }
        if category != PositionCategory::Att
            && let Some(slot) = self.take_free_slot(&ATT_SLOTS)
        {
            return slot;
        }
        OVERFLOW_SLOT
    }

    fn add(&mut self, candidate: &LineupCandidate) {
        let slot = self.pick_slot(candidate.category());
        self.total_level += i64::from(candidate.effective_level());
        self.assignments.push(LineupAssignment {
            participation_id: candidate.participation_id,
            user_id: candidate.user_id,
            team: self.team,
            slot,
        });
    }
}

/// Returns team A's assignments followed by team B's, each in pick order.
pub fn balance_teams(
    candidates: &[LineupCandidate],
) -> Result<Vec<LineupAssignment>, BalanceError> {
    if candidates.len() < MIN_LINEUP_PLAYERS {
        return Err(BalanceError::InsufficientPlayers(candidates.len()));
    }

    let mut ordered: Vec<&LineupCandidate> = candidates.iter().collect();
    ordered.sort_by_key(|c| std::cmp::Reverse(c.effective_level()));

    let mut team_a = TeamSheet::new(Team::A);
    let mut team_b = TeamSheet::new(Team::B);

    for candidate in ordered {
        let sheet = if team_a.total_level <= team_b.total_level {
            &mut team_a
        } else {
            &mut team_b
        };
        sheet.add(candidate);
    }

    log::debug!(
        "Balanced {} players: team A total {}, team B total {}",
        candidates.len(),
        team_a.total_level,
        team_b.total_level
    );

    let mut assignments = team_a.assignments;
    assignments.extend(team_b.assignments);
    Ok(assignments)
}
