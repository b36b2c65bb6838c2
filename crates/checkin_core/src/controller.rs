//! Wires form submissions to the state store, render pipeline and persistence.

use std::time::{Duration, Instant};

use shared::{
    domain::{AttendanceRecord, AttendanceState},
    error::{Field, ValidationError},
};
use storage::{KeyValueStore, StatePersistence};
use tracing::{debug, info, warn};

use crate::{
    clock::{Clock, SystemClock},
    config::Settings,
    render::{RenderPipeline, View},
    store::StateStore,
    surface::{Region, RegionMap, RegionUpdate, Surface},
};

/// Raw form values as typed by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckInInput {
    pub name: String,
    pub team: String,
}

impl CheckInInput {
    pub fn new(name: impl Into<String>, team: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            team: team.into(),
        }
    }
}

pub fn greeting_message(name: &str) -> String {
    format!("Welcome, {name}! Thanks for checking in.")
}

pub struct CheckInController<S> {
    store: StateStore,
    persistence: StatePersistence<S>,
    pipeline: RenderPipeline,
    clock: Box<dyn Clock>,
    greeting_delay: Duration,
    greeting_deadline: Option<Instant>,
}

impl<S: KeyValueStore> CheckInController<S> {
    pub fn bootstrap(settings: &Settings, store: S, surface: &mut dyn Surface) -> Self {
        Self::bootstrap_with_clock(settings, store, surface, Box::new(SystemClock))
    }

    /// Restores saved state, resolves region bindings against `surface` and
    /// draws the initial view.
    pub fn bootstrap_with_clock(
        settings: &Settings,
        store: S,
        surface: &mut dyn Surface,
        clock: Box<dyn Clock>,
    ) -> Self {
        let persistence = StatePersistence::new(store, settings.storage_key.clone());
        let state = persistence.load();
        let regions = RegionMap::resolve(&settings.regions, surface);
        let pipeline = RenderPipeline::new(regions, settings.attendance_goal);
        pipeline.render(&state, surface);

        info!(
            total = state.total(),
            goal = settings.attendance_goal,
            key = %settings.storage_key,
            "check-in ready"
        );

        Self {
            store: StateStore::new(state),
            persistence,
            pipeline,
            clock,
            greeting_delay: settings.greeting_delay(),
            greeting_deadline: None,
        }
    }

    pub fn state(&self) -> &AttendanceState {
        self.store.state()
    }

    pub fn goal(&self) -> u32 {
        self.pipeline.goal()
    }

    pub fn persistence(&self) -> &StatePersistence<S> {
        &self.persistence
    }

    /// When the current greeting should be hidden, if one is showing.
    pub fn greeting_deadline(&self) -> Option<Instant> {
        self.greeting_deadline
    }

    /// Handles one submit action.
    ///
    /// On success the greeting is shown, every region is redrawn, state is
    /// saved, the inputs are cleared and focus returns to the name field.
    /// On failure the user gets an alert and focus moves to the offending
    /// field; nothing else changes.
    pub fn submit(
        &mut self,
        input: &CheckInInput,
        surface: &mut dyn Surface,
        now: Instant,
    ) -> Result<AttendanceRecord, ValidationError> {
        let record = match self
            .store
            .check_in(&input.name, &input.team, self.clock.now())
        {
            Ok(record) => record,
            Err(err) => {
                debug!(error = %err, "check-in rejected");
                surface.alert(err.alert_message());
                surface.focus(err.field());
                return Err(err);
            }
        };

        info!(
            team = record.team().key(),
            total = self.store.state().total(),
            "attendee checked in"
        );

        self.show_greeting(record.name(), surface, now);
        self.render(surface);
        self.persist();
        surface.clear_inputs();
        surface.focus(Field::Name);
        Ok(record)
    }

    pub fn render(&self, surface: &mut dyn Surface) -> View {
        self.pipeline.render(self.store.state(), surface)
    }

    /// Hides the greeting once its deadline has passed. Returns whether it
    /// was hidden by this call.
    pub fn expire_greeting(&mut self, now: Instant, surface: &mut dyn Surface) -> bool {
        match self.greeting_deadline {
            Some(deadline) if now >= deadline => {
                self.greeting_deadline = None;
                self.pipeline
                    .regions()
                    .send(surface, Region::Greeting, RegionUpdate::Hide);
                true
            }
            _ => false,
        }
    }

    fn show_greeting(&mut self, name: &str, surface: &mut dyn Surface, now: Instant) {
        let regions = self.pipeline.regions();
        regions.send(
            surface,
            Region::Greeting,
            RegionUpdate::Text(greeting_message(name)),
        );
        regions.send(surface, Region::Greeting, RegionUpdate::Show);
        // A newer greeting replaces the pending deadline of an older one.
        self.greeting_deadline = Some(now + self.greeting_delay);
    }

    fn persist(&mut self) {
        if let Err(err) = self.persistence.save(self.store.state()) {
            warn!(
                key = %self.persistence.key(),
                error = %err,
                "failed to save attendance state; continuing without persistence"
            );
        }
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
