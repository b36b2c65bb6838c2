use crate::{domain::TeamCounts, team::TeamId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Leader {
    Outright { team: TeamId, count: u32 },
    /// Two or more teams share the top count, listed in canonical order.
    Tie { teams: Vec<TeamId>, count: u32 },
}

impl Leader {
    pub fn count(&self) -> u32 {
        match self {
            Leader::Outright { count, .. } | Leader::Tie { count, .. } => *count,
        }
    }

    pub fn is_tie(&self) -> bool {
        matches!(self, Leader::Tie { .. })
    }
}

pub fn compute_leader(teams: &TeamCounts) -> Leader {
    let mut entries = teams.entries();
    // Stable sort keeps canonical order among equal counts.
    entries.sort_by(|a, b| b.1.cmp(&a.1));
    let (top_team, top_count) = entries[0];

    let tied: Vec<TeamId> = entries
        .iter()
        .filter(|(_, count)| *count == top_count)
        .map(|(team, _)| *team)
        .collect();

    if tied.len() > 1 {
        Leader::Tie {
            teams: tied,
            count: top_count,
        }
    } else {
        Leader::Outright {
            team: top_team,
            count: top_count,
        }
    }
}
