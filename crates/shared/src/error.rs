use thiserror::Error;

/// Form inputs a host exposes to the check-in flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    Team,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("attendee name is missing")]
    MissingName,
    #[error("team is missing or not recognized")]
    MissingTeam,
}

impl ValidationError {
    /// The input the user has to correct.
    pub fn field(self) -> Field {
        match self {
            ValidationError::MissingName => Field::Name,
            ValidationError::MissingTeam => Field::Team,
        }
    }

    /// Text shown in the blocking alert.
    pub fn alert_message(self) -> &'static str {
        match self {
            ValidationError::MissingName => "Please enter an attendee name.",
            ValidationError::MissingTeam => "Please select a team.",
        }
    }
}

/// Reasons a persisted snapshot was not accepted.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("snapshot is not valid JSON: {0}")]
    Parse(#[source] serde_json::Error),
    #[error("snapshot has unexpected shape: {0}")]
    Shape(&'static str),
    #[error("snapshot fields could not be decoded: {0}")]
    Decode(#[source] serde_json::Error),
    #[error(
        "snapshot counts disagree: total={total}, attendees={attendees}, team sum={team_sum}"
    )]
    Inconsistent {
        total: u32,
        attendees: usize,
        team_sum: u64,
    },
    #[error("snapshot record {index} is malformed: {reason}")]
    MalformedRecord { index: usize, reason: &'static str },
}
