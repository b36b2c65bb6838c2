use super::*;
use chrono::TimeZone;

fn at(millis: i64) -> DateTime<Utc> {
    Utc.timestamp_millis_opt(millis).single().expect("valid millis")
}

#[test]
fn zero_state_is_consistent() {
    let state = AttendanceState::default();
    assert_eq!(state.total(), 0);
    assert_eq!(state.teams().sum(), 0);
    assert!(state.attendees().is_empty());
    assert!(state.is_consistent());
}

#[test]
fn append_moves_total_team_and_log_together() {
    let mut state = AttendanceState::default();
    state.append(AttendanceRecord::new("Ada", TeamId::Water, at(1_000)));
    state.append(AttendanceRecord::new("Grace", TeamId::Renewables, at(2_000)));
    state.append(AttendanceRecord::new("Linus", TeamId::Water, at(3_000)));

    assert_eq!(state.total(), 3);
    assert_eq!(state.teams().get(TeamId::Water), 2);
    assert_eq!(state.teams().get(TeamId::NetZero), 0);
    assert_eq!(state.teams().get(TeamId::Renewables), 1);
    assert_eq!(state.attendees().len(), 3);
    assert_eq!(state.attendees()[0].name(), "Ada");
    assert_eq!(state.last_timestamp(), Some(at(3_000)));
    assert!(state.is_consistent());
}

#[test]
fn team_entries_follow_canonical_order() {
    let counts = TeamCounts {
        water: 1,
        zero: 2,
        renewables: 3,
    };
    assert_eq!(
        counts.entries(),
        [
            (TeamId::Water, 1),
            (TeamId::NetZero, 2),
            (TeamId::Renewables, 3)
        ]
    );
    assert_eq!(counts.sum(), 6);
}

#[test]
fn record_serializes_with_snapshot_field_names() {
    let record = AttendanceRecord::new("Ada", TeamId::NetZero, at(1_700_000_000_123));
    let value = serde_json::to_value(&record).expect("encode");
    assert_eq!(value["name"], "Ada");
    assert_eq!(value["teamKey"], "zero");
    assert_eq!(value["ts"], 1_700_000_000_123_i64);
}

#[test]
fn detects_team_count_that_disagrees_with_log() {
    let state: AttendanceState = serde_json::from_str(
        r#"{"total":1,"teams":{"water":0,"zero":1},"attendees":[{"name":"Ada","teamKey":"water","ts":5}]}"#,
    )
    .expect("decode");
    assert_eq!(state.teams().get(TeamId::Renewables), 0);
    assert!(!state.is_consistent());
}

#[test]
fn well_formed_log_has_no_malformed_record() {
    let mut state = AttendanceState::default();
    state.append(AttendanceRecord::new("Ada", TeamId::Water, at(1_000)));
    state.append(AttendanceRecord::new("Grace", TeamId::NetZero, at(1_000)));
    assert_eq!(state.first_malformed_record(), None);

    state.append(AttendanceRecord::new("Linus ", TeamId::Renewables, at(2_000)));
    assert_eq!(
        state.first_malformed_record(),
        Some((2, "name has surrounding whitespace"))
    );
}
