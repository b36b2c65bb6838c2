//! JSON codec for the persisted attendance blob.

use serde_json::Value;

use crate::{domain::AttendanceState, error::SnapshotError};

pub fn encode_state(state: &AttendanceState) -> Result<String, serde_json::Error> {
    serde_json::to_string(state)
}

/// Parses and validates a persisted blob.
///
/// The raw JSON is first checked for a numeric `total`, an object `teams`
/// and an array `attendees` before typed decoding; the decoded state must
/// then satisfy the count invariant, and every record must carry a trimmed,
/// non-empty name and a timestamp no earlier than the one before it.
pub fn decode_state(raw: &str) -> Result<AttendanceState, SnapshotError> {
    let value: Value = serde_json::from_str(raw).map_err(SnapshotError::Parse)?;
    check_shape(&value)?;

    let state: AttendanceState = serde_json::from_value(value).map_err(SnapshotError::Decode)?;
    if !state.is_consistent() {
        return Err(SnapshotError::Inconsistent {
            total: state.total(),
            attendees: state.attendees().len(),
            team_sum: state.teams().sum(),
        });
    }
    if let Some((index, reason)) = state.first_malformed_record() {
        return Err(SnapshotError::MalformedRecord { index, reason });
    }
    Ok(state)
}

fn check_shape(value: &Value) -> Result<(), SnapshotError> {
    let Some(object) = value.as_object() else {
        return Err(SnapshotError::Shape("snapshot is not an object"));
    };
    if !object.get("total").is_some_and(Value::is_number) {
        return Err(SnapshotError::Shape("`total` is missing or not a number"));
    }
    if !object.get("teams").is_some_and(Value::is_object) {
        return Err(SnapshotError::Shape("`teams` is missing or not an object"));
    }
    if !object.get("attendees").is_some_and(Value::is_array) {
        return Err(SnapshotError::Shape("`attendees` is missing or not an array"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{domain::AttendanceRecord, team::TeamId};
    use chrono::{TimeZone, Utc};

    fn sample_state() -> AttendanceState {
        let mut state = AttendanceState::default();
        for (idx, (name, team)) in [
            ("Ada", TeamId::Water),
            ("Grace <Hopper>", TeamId::NetZero),
            ("Linus", TeamId::Renewables),
            ("Barbara", TeamId::Water),
        ]
        .into_iter()
        .enumerate()
        {
            let ts = Utc
                .timestamp_millis_opt(1_700_000_000_000 + idx as i64 * 1_500)
                .single()
                .expect("valid millis");
            state.append(AttendanceRecord::new(name, team, ts));
        }
        state
    }

    #[test]
    fn encoded_state_decodes_to_equal_state() {
        let state = sample_state();
        let encoded = encode_state(&state).expect("encode");
        assert_eq!(decode_state(&encoded).expect("decode"), state);
    }

    #[test]
    fn accepts_blob_written_by_browser_widget() {
        let raw = r#"{"total":2,"teams":{"water":1,"zero":0,"renewables":1},
            "attendees":[{"name":"Ada","teamKey":"water","ts":1700000000000},
                         {"name":"Linus","teamKey":"renewables","ts":1700000005000}]}"#;
        let state = decode_state(raw).expect("decode");
        assert_eq!(state.total(), 2);
        assert_eq!(state.attendees()[1].team(), TeamId::Renewables);
    }

    #[test]
    fn rejects_non_json() {
        assert!(matches!(
            decode_state("{not json"),
            Err(SnapshotError::Parse(_))
        ));
    }

    #[test]
    fn rejects_wrong_shape() {
        for raw in [
            "[]",
            r#"{"teams":{},"attendees":[]}"#,
            r#"{"total":"3","teams":{},"attendees":[]}"#,
            r#"{"total":0,"attendees":[]}"#,
            r#"{"total":0,"teams":{},"attendees":{}}"#,
        ] {
            assert!(
                matches!(decode_state(raw), Err(SnapshotError::Shape(_))),
                "expected shape error for {raw}"
            );
        }
    }

    #[test]
    fn rejects_unknown_team_key() {
        let raw = r#"{"total":1,"teams":{"water":1},"attendees":[{"name":"A","teamKey":"fire","ts":1}]}"#;
        assert!(matches!(decode_state(raw), Err(SnapshotError::Decode(_))));
    }

    #[test]
    fn rejects_counts_that_disagree_with_log() {
        let raw = r#"{"total":3,"teams":{"water":1},"attendees":[{"name":"A","teamKey":"water","ts":1}]}"#;
        match decode_state(raw) {
            Err(SnapshotError::Inconsistent {
                total,
                attendees,
                team_sum,
            }) => {
                assert_eq!(total, 3);
                assert_eq!(attendees, 1);
                assert_eq!(team_sum, 1);
            }
            other => panic!("expected inconsistency, got {other:?}"),
        }
    }

    #[test]
    fn rejects_blank_or_untrimmed_names() {
        for (raw, expected_index) in [
            (
                r#"{"total":2,"teams":{"water":2},"attendees":[{"name":"   ","teamKey":"water","ts":1000},{"name":"","teamKey":"water","ts":2000}]}"#,
                0,
            ),
            (
                r#"{"total":2,"teams":{"zero":2},"attendees":[{"name":"Ada","teamKey":"zero","ts":1000},{"name":" Grace","teamKey":"zero","ts":2000}]}"#,
                1,
            ),
        ] {
            match decode_state(raw) {
                Err(SnapshotError::MalformedRecord { index, .. }) => {
                    assert_eq!(index, expected_index, "wrong record flagged in {raw}")
                }
                other => panic!("expected malformed record, got {other:?}"),
            }
        }
    }

    #[test]
    fn rejects_timestamps_that_go_backwards() {
        let raw = r#"{"total":2,"teams":{"renewables":2},"attendees":[{"name":"Ada","teamKey":"renewables","ts":5000},{"name":"Linus","teamKey":"renewables","ts":1000}]}"#;
        assert!(matches!(
            decode_state(raw),
            Err(SnapshotError::MalformedRecord { index: 1, .. })
        ));
    }

    #[test]
    fn equal_timestamps_are_accepted() {
        let raw = r#"{"total":2,"teams":{"water":1,"zero":1},"attendees":[{"name":"Ada","teamKey":"water","ts":5000},{"name":"Grace","teamKey":"zero","ts":5000}]}"#;
        assert_eq!(decode_state(raw).expect("decode").total(), 2);
    }
}
