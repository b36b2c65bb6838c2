use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TeamId {
    #[serde(rename = "water")]
    Water,
    #[serde(rename = "zero")]
    NetZero,
    #[serde(rename = "renewables")]
    Renewables,
}

impl TeamId {
    /// Canonical order. Ties and count listings are reported in this order.
    pub const ALL: [TeamId; 3] = [TeamId::Water, TeamId::NetZero, TeamId::Renewables];

    /// Key used in persisted snapshots.
    pub fn key(self) -> &'static str {
        match self {
            TeamId::Water => "water",
            TeamId::NetZero => "zero",
            TeamId::Renewables => "renewables",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TeamId::Water => "Team Water Wise",
            TeamId::NetZero => "Team Net Zero",
            TeamId::Renewables => "Team Renewables",
        }
    }

    /// Maps free-form team input onto a team.
    ///
    /// Matching is a case-insensitive substring test tried in the order
    /// `water`, `zero`, `renew`, `power`. Input naming more than one team
    /// resolves to the first keyword hit, so "water power" is Water.
    pub fn normalize(raw: &str) -> Option<TeamId> {
        let lower = raw.trim().to_lowercase();
        if lower.contains("water") {
            Some(TeamId::Water)
        } else if lower.contains("zero") {
            Some(TeamId::NetZero)
        } else if lower.contains("renew") || lower.contains("power") {
            Some(TeamId::Renewables)
        } else {
            None
        }
    }
}

impl std::fmt::Display for TeamId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
