//! Seam between the check-in flow and whatever host shows it.
//!
//! Hosts expose named bindings (element ids, widget slots). Each logical
//! [`Region`] is configured with one binding; [`RegionMap::resolve`] checks
//! them against the surface once, and updates for regions the host lacks
//! are dropped.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use shared::{error::Field, team::TeamId};

use crate::render::AttendeeRow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Region {
    Greeting,
    AttendeeCount,
    ProgressBar,
    WaterCount,
    NetZeroCount,
    RenewablesCount,
    AttendanceText,
    AttendeeList,
    Celebration,
}

impl Region {
    pub const ALL: [Region; 9] = [
        Region::Greeting,
        Region::AttendeeCount,
        Region::ProgressBar,
        Region::WaterCount,
        Region::NetZeroCount,
        Region::RenewablesCount,
        Region::AttendanceText,
        Region::AttendeeList,
        Region::Celebration,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Region::Greeting => "greeting",
            Region::AttendeeCount => "attendee_count",
            Region::ProgressBar => "progress_bar",
            Region::WaterCount => "water_count",
            Region::NetZeroCount => "net_zero_count",
            Region::RenewablesCount => "renewables_count",
            Region::AttendanceText => "attendance_text",
            Region::AttendeeList => "attendee_list",
            Region::Celebration => "celebration",
        }
    }

    pub fn for_team(team: TeamId) -> Region {
        match team {
            TeamId::Water => Region::WaterCount,
            TeamId::NetZero => Region::NetZeroCount,
            TeamId::Renewables => Region::RenewablesCount,
        }
    }
}

/// Configured binding per region. An empty binding leaves the region unbound.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegionBindings {
    pub greeting: String,
    pub attendee_count: String,
    pub progress_bar: String,
    pub water_count: String,
    pub net_zero_count: String,
    pub renewables_count: String,
    pub attendance_text: String,
    pub attendee_list: String,
    pub celebration: String,
}

impl Default for RegionBindings {
    fn default() -> Self {
        Self {
            greeting: "#greeting".into(),
            attendee_count: "#attendeeCount".into(),
            progress_bar: ".progress-bar".into(),
            water_count: "#waterCount".into(),
            net_zero_count: "#netZeroCount".into(),
            renewables_count: "#renewablesCount".into(),
            attendance_text: "#attendanceText".into(),
            attendee_list: "#attendeeList".into(),
            celebration: "#celebration".into(),
        }
    }
}

impl RegionBindings {
    pub fn binding(&self, region: Region) -> &str {
        match region {
            Region::Greeting => &self.greeting,
            Region::AttendeeCount => &self.attendee_count,
            Region::ProgressBar => &self.progress_bar,
            Region::WaterCount => &self.water_count,
            Region::NetZeroCount => &self.net_zero_count,
            Region::RenewablesCount => &self.renewables_count,
            Region::AttendanceText => &self.attendance_text,
            Region::AttendeeList => &self.attendee_list,
            Region::Celebration => &self.celebration,
        }
    }

    /// Non-empty bindings in region order.
    pub fn bound(&self) -> impl Iterator<Item = (Region, &str)> + '_ {
        Region::ALL
            .into_iter()
            .map(|region| (region, self.binding(region).trim()))
            .filter(|(_, binding)| !binding.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RegionUpdate {
    Text(String),
    /// Percent in `0.0..=100.0`.
    ProgressWidth(f64),
    AttendeeList(Vec<AttendeeRow>),
    Show,
    Hide,
}

pub trait Surface {
    fn has_binding(&self, binding: &str) -> bool;
    fn update(&mut self, binding: &str, update: RegionUpdate);
    /// Blocking, user-facing notice.
    fn alert(&mut self, message: &str);
    fn clear_inputs(&mut self);
    fn focus(&mut self, field: Field);
}

/// Regions whose bindings were found on the surface at startup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegionMap {
    resolved: BTreeMap<Region, String>,
}

impl RegionMap {
    pub fn resolve(bindings: &RegionBindings, surface: &dyn Surface) -> Self {
        let mut resolved = BTreeMap::new();
        for region in Region::ALL {
            let binding = bindings.binding(region).trim();
            if !binding.is_empty() && surface.has_binding(binding) {
                resolved.insert(region, binding.to_string());
            } else {
                tracing::debug!(
                    region = region.key(),
                    binding,
                    "region not present on surface; updates will be skipped"
                );
            }
        }
        Self { resolved }
    }

    pub fn binding(&self, region: Region) -> Option<&str> {
        self.resolved.get(&region).map(String::as_str)
    }

    pub fn is_bound(&self, region: Region) -> bool {
        self.resolved.contains_key(&region)
    }

    /// Sends `update` to the region's binding; a no-op when unbound.
    pub fn send(&self, surface: &mut dyn Surface, region: Region, update: RegionUpdate) {
        if let Some(binding) = self.binding(region) {
            surface.update(binding, update);
        }
    }
}
