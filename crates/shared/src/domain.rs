use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::team::TeamId;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TeamCounts {
    pub water: u32,
    pub zero: u32,
    pub renewables: u32,
}

impl TeamCounts {
    pub fn get(&self, team: TeamId) -> u32 {
        match team {
            TeamId::Water => self.water,
            TeamId::NetZero => self.zero,
            TeamId::Renewables => self.renewables,
        }
    }

    fn slot_mut(&mut self, team: TeamId) -> &mut u32 {
        match team {
            TeamId::Water => &mut self.water,
            TeamId::NetZero => &mut self.zero,
            TeamId::Renewables => &mut self.renewables,
        }
    }

    /// Counts in canonical team order.
    pub fn entries(&self) -> [(TeamId, u32); 3] {
        TeamId::ALL.map(|team| (team, self.get(team)))
    }

    pub fn sum(&self) -> u64 {
        self.entries()
            .iter()
            .map(|(_, count)| u64::from(*count))
            .sum()
    }
}

/// One check-in. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    name: String,
    #[serde(rename = "teamKey")]
    team: TeamId,
    #[serde(rename = "ts", with = "chrono::serde::ts_milliseconds")]
    timestamp: DateTime<Utc>,
}

impl AttendanceRecord {
    pub fn new(name: impl Into<String>, team: TeamId, timestamp: DateTime<Utc>) -> Self {
        Self {
            name: name.into(),
            team,
            timestamp,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn team(&self) -> TeamId {
        self.team
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

/// Running tally of check-ins.
///
/// `total`, the per-team counts and the attendee log only ever move together
/// through [`AttendanceState::append`], so
/// `total == attendees.len() == teams.sum()` holds for every value built
/// through this API. Values decoded from storage are checked against the same
/// rule in [`crate::snapshot::decode_state`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceState {
    total: u32,
    teams: TeamCounts,
    attendees: Vec<AttendanceRecord>,
}

impl AttendanceState {
    pub fn total(&self) -> u32 {
        self.total
    }

    pub fn teams(&self) -> &TeamCounts {
        &self.teams
    }

    /// Records in check-in order, oldest first.
    pub fn attendees(&self) -> &[AttendanceRecord] {
        &self.attendees
    }

    pub fn last_timestamp(&self) -> Option<DateTime<Utc>> {
        self.attendees.last().map(AttendanceRecord::timestamp)
    }

    pub fn append(&mut self, record: AttendanceRecord) {
        self.total += 1;
        *self.teams.slot_mut(record.team()) += 1;
        self.attendees.push(record);
    }

    pub fn is_consistent(&self) -> bool {
        let total = u64::from(self.total);
        if total != self.attendees.len() as u64 || total != self.teams.sum() {
            return false;
        }
        TeamId::ALL.iter().all(|team| {
            let logged = self
                .attendees
                .iter()
                .filter(|record| record.team() == *team)
                .count() as u64;
            logged == u64::from(self.teams.get(*team))
        })
    }

    /// First record that could not have come from a check-in: a blank or
    /// untrimmed name, or a timestamp earlier than the record before it.
    pub fn first_malformed_record(&self) -> Option<(usize, &'static str)> {
        let mut previous: Option<DateTime<Utc>> = None;
        for (index, record) in self.attendees.iter().enumerate() {
            if record.name.is_empty() {
                return Some((index, "name is empty"));
            }
            if record.name.trim() != record.name {
                return Some((index, "name has surrounding whitespace"));
            }
            if previous.is_some_and(|previous| record.timestamp < previous) {
                return Some((index, "timestamp is earlier than the previous record"));
            }
            previous = Some(record.timestamp);
        }
        None
    }
}

#[cfg(test)]
#[path = "tests/domain_tests.rs"]
mod tests;
