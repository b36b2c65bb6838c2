use chrono::{DateTime, SubsecRound, Utc};
use shared::{
    domain::{AttendanceRecord, AttendanceState},
    error::ValidationError,
    team::TeamId,
};

/// Sole owner and writer of the attendance state.
#[derive(Debug, Default, Clone)]
pub struct StateStore {
    state: AttendanceState,
}

impl StateStore {
    pub fn new(state: AttendanceState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &AttendanceState {
        &self.state
    }

    /// Records one attendee.
    ///
    /// The name is trimmed and must be non-empty; the team text must
    /// normalize to a known team. Failed validation leaves the state
    /// untouched. `now` is cut to whole milliseconds, the resolution the
    /// snapshot stores, then clamped to the previous record's timestamp so the
    /// log stays in non-decreasing time order even if the clock steps back.
    pub fn check_in(
        &mut self,
        name: &str,
        raw_team: &str,
        now: DateTime<Utc>,
    ) -> Result<AttendanceRecord, ValidationError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::MissingName);
        }
        let team = TeamId::normalize(raw_team).ok_or(ValidationError::MissingTeam)?;

        let now = now.trunc_subsecs(3);
        let timestamp = match self.state.last_timestamp() {
            Some(last) if last > now => last,
            _ => now,
        };
        let record = AttendanceRecord::new(name, team, timestamp);
        self.state.append(record.clone());
        Ok(record)
    }
}
