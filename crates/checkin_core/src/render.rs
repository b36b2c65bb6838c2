//! Projection of the attendance state onto the UI regions.
//!
//! [`render_view`] is pure; [`RenderPipeline`] pushes a full view to a
//! surface every time, never a diff, so re-rendering unchanged state leaves
//! the surface as it was.

use std::borrow::Cow;

use chrono::{DateTime, Local, Utc};
use shared::{
    domain::AttendanceState,
    leader::{compute_leader, Leader},
    team::TeamId,
};

use crate::surface::{Region, RegionMap, RegionUpdate, Surface};

pub const ATTENDEE_LIST_TITLE: &str = "Attendee List";
const TIMESTAMP_FORMAT: &str = "%-m/%-d/%Y, %-I:%M:%S %p";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttendeeRow {
    pub name: String,
    pub team: TeamId,
    pub checked_in_at: String,
}

impl AttendeeRow {
    pub fn team_label(&self) -> &'static str {
        self.team.label()
    }

    pub fn to_markup(&self) -> String {
        format!(
            "<li class=\"attendee\"><div class=\"attendee-main\"><strong>{}</strong>\
             <div class=\"attendee-team\">{}</div></div>\
             <div class=\"attendee-time\">{}</div></li>",
            escape_html(&self.name),
            escape_html(self.team_label()),
            escape_html(&self.checked_in_at),
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct View {
    pub total: u32,
    pub team_counts: [(TeamId, u32); 3],
    pub goal_text: String,
    pub progress_percent: f64,
    /// Newest first.
    pub attendees: Vec<AttendeeRow>,
    /// `None` while the goal has not been reached.
    pub celebration: Option<String>,
}

pub fn render_view(state: &AttendanceState, goal: u32) -> View {
    View {
        total: state.total(),
        team_counts: state.teams().entries(),
        goal_text: format!("Attendance: {}/{}", state.total(), goal),
        progress_percent: progress_percent(state.total(), goal),
        attendees: state
            .attendees()
            .iter()
            .rev()
            .map(|record| AttendeeRow {
                name: record.name().to_string(),
                team: record.team(),
                checked_in_at: format_timestamp(record.timestamp()),
            })
            .collect(),
        celebration: celebration_message(state, goal),
    }
}

pub fn progress_percent(total: u32, goal: u32) -> f64 {
    if goal == 0 {
        return 100.0;
    }
    (f64::from(total) * 100.0 / f64::from(goal)).clamp(0.0, 100.0)
}

pub fn celebration_message(state: &AttendanceState, goal: u32) -> Option<String> {
    if state.total() < goal {
        return None;
    }
    let message = match compute_leader(state.teams()) {
        Leader::Tie { teams, count } => {
            let labels: Vec<&str> = teams.iter().map(|team| team.label()).collect();
            format!(
                "🎉 Goal reached! It's a tie at {count}: {}!",
                labels.join(" & ")
            )
        }
        Leader::Outright { team, count } => {
            format!("🎉 Goal reached! Current leader: {} ({count})", team.label())
        }
    };
    Some(message)
}

pub fn format_timestamp(timestamp: DateTime<Utc>) -> String {
    timestamp
        .with_timezone(&Local)
        .format(TIMESTAMP_FORMAT)
        .to_string()
}

/// Escapes text for inclusion in HTML element content or attribute values.
pub fn escape_html(raw: &str) -> Cow<'_, str> {
    if !raw.contains(|c: char| matches!(c, '&' | '<' | '>' | '"' | '\'')) {
        return Cow::Borrowed(raw);
    }
    let mut escaped = String::with_capacity(raw.len() + 16);
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#039;"),
            other => escaped.push(other),
        }
    }
    Cow::Owned(escaped)
}

pub fn attendee_list_markup(rows: &[AttendeeRow]) -> String {
    let items: String = rows.iter().map(AttendeeRow::to_markup).collect();
    format!("<h3>{ATTENDEE_LIST_TITLE}</h3><ul id=\"attendeeListItems\">{items}</ul>")
}

#[derive(Debug, Clone)]
pub struct RenderPipeline {
    regions: RegionMap,
    goal: u32,
}

impl RenderPipeline {
    pub fn new(regions: RegionMap, goal: u32) -> Self {
        Self { regions, goal }
    }

    pub fn regions(&self) -> &RegionMap {
        &self.regions
    }

    pub fn goal(&self) -> u32 {
        self.goal
    }

    /// Redraws every bound region from `state`.
    pub fn render(&self, state: &AttendanceState, surface: &mut dyn Surface) -> View {
        let view = render_view(state, self.goal);
        self.apply(&view, surface);
        tracing::debug!(
            total = view.total,
            celebrating = view.celebration.is_some(),
            "rendered attendance view"
        );
        view
    }

    pub fn apply(&self, view: &View, surface: &mut dyn Surface) {
        let regions = &self.regions;
        regions.send(
            surface,
            Region::AttendeeCount,
            RegionUpdate::Text(view.total.to_string()),
        );
        for (team, count) in view.team_counts {
            regions.send(
                surface,
                Region::for_team(team),
                RegionUpdate::Text(count.to_string()),
            );
        }
        regions.send(
            surface,
            Region::AttendanceText,
            RegionUpdate::Text(view.goal_text.clone()),
        );
        regions.send(
            surface,
            Region::ProgressBar,
            RegionUpdate::ProgressWidth(view.progress_percent),
        );
        regions.send(
            surface,
            Region::AttendeeList,
            RegionUpdate::AttendeeList(view.attendees.clone()),
        );

        match &view.celebration {
            Some(message) => {
                regions.send(surface, Region::Celebration, RegionUpdate::Text(message.clone()));
                regions.send(surface, Region::Celebration, RegionUpdate::Show);
            }
            None => {
                regions.send(surface, Region::Celebration, RegionUpdate::Hide);
                regions.send(surface, Region::Celebration, RegionUpdate::Text(String::new()));
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/render_tests.rs"]
mod tests;
