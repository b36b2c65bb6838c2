use std::{
    path::PathBuf,
    time::{Duration, Instant},
};

use checkin_core::{CheckInController, CheckInInput, Region, Settings};
use eframe::egui;
use shared::{error::Field, team::TeamId};
use storage::FileStore;

use crate::controller::events::{FormSignals, UiEvent};
use crate::ui::surface::EguiSurface;

const WINDOW_TITLE: &str = "Intel Sustainability Summit: Event Check-In";
const TEAM_PLACEHOLDER: &str = "Select Team...";
const NAME_FIELD_ID: &str = "attendee_name";
const TEAM_FIELD_ID: &str = "team_select";
const IDLE_REPAINT: Duration = Duration::from_millis(500);

/// Values offered by the team selector, as a web form would post them.
const TEAM_OPTIONS: [(&str, TeamId); 3] = [
    ("water", TeamId::Water),
    ("zero", TeamId::NetZero),
    ("power", TeamId::Renewables),
];

#[derive(Debug, Clone, Default)]
pub struct StartupConfig {
    pub config_path: Option<PathBuf>,
    pub data_dir: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct AppPaths {
    pub data_root: PathBuf,
}

impl AppPaths {
    pub fn resolve(startup: &StartupConfig, settings: &Settings) -> anyhow::Result<Self> {
        let data_root = if let Some(dir) = startup.data_dir.as_ref().or(settings.data_dir.as_ref())
        {
            dir.clone()
        } else {
            dirs::data_local_dir()
                .ok_or_else(|| anyhow::anyhow!("unable to resolve local app data dir"))?
                .join("checkin")
        };
        Ok(Self { data_root })
    }
}

#[derive(Debug, Clone, Default)]
struct FormState {
    name: String,
    team: String,
}

pub struct CheckInApp {
    settings: Settings,
    controller: CheckInController<FileStore>,
    surface: EguiSurface,
    form: FormState,
}

impl CheckInApp {
    pub fn bootstrap(settings: Settings, paths: &AppPaths) -> Self {
        let mut surface = EguiSurface::new(&settings.regions);
        let controller = CheckInController::bootstrap(
            &settings,
            FileStore::new(&paths.data_root),
            &mut surface,
        );
        tracing::info!(data_root = %paths.data_root.display(), "check-in window ready");
        Self {
            settings,
            controller,
            surface,
            form: FormState::default(),
        }
    }

    fn binding(&self, region: Region) -> &str {
        self.settings.regions.binding(region)
    }

    fn handle_event(&mut self, event: UiEvent) {
        match event {
            UiEvent::SubmitRequested => {
                let input = CheckInInput::new(self.form.name.clone(), self.form.team.clone());
                match self
                    .controller
                    .submit(&input, &mut self.surface, Instant::now())
                {
                    Ok(record) => {
                        tracing::debug!(team = %record.team(), "check-in accepted");
                    }
                    Err(err) => {
                        tracing::debug!(error = %err, "check-in rejected; alert raised");
                    }
                }
                if self.surface.take_clear_request() {
                    self.form = FormState::default();
                }
            }
            UiEvent::AlertDismissed => self.surface.dismiss_alert(),
        }
    }

    fn show_greeting(&self, ui: &mut egui::Ui) {
        let Some(text) = self.surface.shown_text(self.binding(Region::Greeting)) else {
            return;
        };
        egui::Frame::NONE
            .fill(egui::Color32::from_rgb(220, 252, 231))
            .stroke(egui::Stroke::new(1.0, egui::Color32::from_rgb(134, 239, 172)))
            .corner_radius(8.0)
            .inner_margin(egui::Margin::symmetric(10, 8))
            .show(ui, |ui| {
                ui.label(
                    egui::RichText::new(text)
                        .strong()
                        .color(egui::Color32::from_rgb(22, 101, 52)),
                );
            });
    }

    fn show_progress(&self, ui: &mut egui::Ui) {
        if let Some(content) = self.surface.content(self.binding(Region::AttendanceText)) {
            ui.label(egui::RichText::new(&content.text).strong().size(18.0));
        }
        if let Some(total) = self.surface.content(self.binding(Region::AttendeeCount)) {
            ui.weak(format!("{} checked in", total.text));
        }
        if let Some(width) = self
            .surface
            .content(self.binding(Region::ProgressBar))
            .and_then(|content| content.progress_width)
        {
            ui.add(egui::ProgressBar::new((width / 100.0) as f32).show_percentage());
        }
    }

    fn show_form(&mut self, ui: &mut egui::Ui, alert_open: bool) -> FormSignals {
        let focus = self.surface.take_focus_request();
        let mut signals = FormSignals {
            alert_open,
            ..FormSignals::default()
        };

        ui.add_enabled_ui(!alert_open, |ui| {
            ui.horizontal(|ui| {
                let name_resp = ui.add(
                    egui::TextEdit::singleline(&mut self.form.name)
                        .id(egui::Id::new(NAME_FIELD_ID))
                        .hint_text("Enter attendee name")
                        .desired_width(240.0),
                );
                if focus == Some(Field::Name) {
                    name_resp.request_focus();
                }
                signals.name_lost_focus = name_resp.lost_focus();
                signals.enter_pressed = ui.input(|i| i.key_pressed(egui::Key::Enter));

                let selected = TEAM_OPTIONS
                    .iter()
                    .find(|(value, _)| *value == self.form.team)
                    .map(|(_, team)| team.label())
                    .unwrap_or(TEAM_PLACEHOLDER);
                let team_resp = egui::ComboBox::from_id_salt(TEAM_FIELD_ID)
                    .selected_text(selected)
                    .width(200.0)
                    .show_ui(ui, |ui| {
                        ui.selectable_value(&mut self.form.team, String::new(), TEAM_PLACEHOLDER);
                        for (value, team) in TEAM_OPTIONS {
                            ui.selectable_value(
                                &mut self.form.team,
                                value.to_string(),
                                team.label(),
                            );
                        }
                    })
                    .response;
                if focus == Some(Field::Team) {
                    team_resp.request_focus();
                }

                signals.button_clicked = ui
                    .add(egui::Button::new(egui::RichText::new("Check In").strong()))
                    .clicked();
            });
        });

        signals
    }

    fn show_team_counts(&self, ui: &mut egui::Ui) {
        ui.columns(TeamId::ALL.len(), |columns| {
            for (column, team) in columns.iter_mut().zip(TeamId::ALL) {
                let count = self
                    .surface
                    .content(self.binding(Region::for_team(team)))
                    .map(|content| content.text.as_str())
                    .unwrap_or("-");
                column.vertical_centered(|ui| {
                    ui.label(egui::RichText::new(team.label()).weak());
                    ui.label(egui::RichText::new(count).size(24.0).strong());
                });
            }
        });
    }

    fn show_celebration(&self, ui: &mut egui::Ui) {
        let Some(text) = self.surface.shown_text(self.binding(Region::Celebration)) else {
            return;
        };
        egui::Frame::NONE
            .fill(egui::Color32::from_rgb(236, 254, 255))
            .stroke(egui::Stroke::new(1.0, egui::Color32::from_gray(210)))
            .corner_radius(12.0)
            .inner_margin(egui::Margin::symmetric(16, 14))
            .show(ui, |ui| {
                ui.label(
                    egui::RichText::new(text)
                        .strong()
                        .color(egui::Color32::from_rgb(0, 60, 113)),
                );
            });
    }

    fn show_attendee_list(&self, ui: &mut egui::Ui) {
        let Some(rows) = self
            .surface
            .content(self.binding(Region::AttendeeList))
            .and_then(|content| content.rows.as_ref())
        else {
            return;
        };
        ui.label(
            egui::RichText::new(checkin_core::render::ATTENDEE_LIST_TITLE)
                .color(egui::Color32::from_rgb(100, 116, 139)),
        );
        egui::ScrollArea::vertical()
            .auto_shrink([false, true])
            .show(ui, |ui| {
                for row in rows {
                    let border = ui.visuals().widgets.noninteractive.bg_stroke.color;
                    egui::Frame::NONE
                        .stroke(egui::Stroke::new(1.0, border))
                        .corner_radius(10.0)
                        .inner_margin(egui::Margin::same(12))
                        .show(ui, |ui| {
                            ui.horizontal(|ui| {
                                ui.vertical(|ui| {
                                    ui.label(egui::RichText::new(&row.name).strong());
                                    ui.weak(row.team_label());
                                });
                                ui.with_layout(
                                    egui::Layout::right_to_left(egui::Align::Min),
                                    |ui| {
                                        ui.small(row.checked_in_at.as_str());
                                    },
                                );
                            });
                        });
                    ui.add_space(6.0);
                }
            });
    }

    fn show_alert_window(&self, ctx: &egui::Context) -> Option<UiEvent> {
        let message = self.surface.pending_alert()?;
        let mut dismissed = false;
        egui::Window::new("Check-in")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label(message);
                ui.add_space(8.0);
                let ok = ui.button("OK");
                let enter = ui.input(|i| i.key_pressed(egui::Key::Enter));
                dismissed = ok.clicked() || enter;
            });
        dismissed.then_some(UiEvent::AlertDismissed)
    }
}

impl eframe::App for CheckInApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();
        self.controller.expire_greeting(now, &mut self.surface);

        let mut events = Vec::new();
        let alert_open = self.surface.pending_alert().is_some();

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.style_mut().spacing.item_spacing = egui::vec2(10.0, 10.0);
            ui.heading(WINDOW_TITLE);
            self.show_greeting(ui);
            self.show_progress(ui);
            events.extend(self.show_form(ui, alert_open).to_event());
            ui.separator();
            self.show_team_counts(ui);
            self.show_celebration(ui);
            ui.separator();
            self.show_attendee_list(ui);
        });
        events.extend(self.show_alert_window(ctx));

        for event in events {
            self.handle_event(event);
        }

        let repaint_after = self
            .controller
            .greeting_deadline()
            .map(|deadline| deadline.saturating_duration_since(now))
            .unwrap_or(IDLE_REPAINT);
        ctx.request_repaint_after(repaint_after);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn team_options_normalize_to_their_team() {
        for (value, team) in TEAM_OPTIONS {
            assert_eq!(TeamId::normalize(value), Some(team));
        }
        assert_eq!(TeamId::normalize(TEAM_PLACEHOLDER), None);
    }

    #[test]
    fn data_dir_prefers_startup_flag() {
        let settings = Settings {
            data_dir: Some(PathBuf::from("/from/settings")),
            ..Settings::default()
        };
        let startup = StartupConfig {
            data_dir: Some(PathBuf::from("/from/flag")),
            ..StartupConfig::default()
        };
        assert_eq!(
            AppPaths::resolve(&startup, &settings).expect("paths").data_root,
            PathBuf::from("/from/flag")
        );
        assert_eq!(
            AppPaths::resolve(&StartupConfig::default(), &settings)
                .expect("paths")
                .data_root,
            PathBuf::from("/from/settings")
        );
    }

    #[test]
    fn submit_event_checks_in_and_resets_form() {
        let temp = tempfile::tempdir().expect("tempdir");
        let paths = AppPaths {
            data_root: temp.path().to_path_buf(),
        };
        let mut app = CheckInApp::bootstrap(Settings::default(), &paths);

        app.form.name = "Ada".into();
        app.form.team = "water".into();
        app.handle_event(UiEvent::SubmitRequested);

        assert_eq!(app.controller.state().total(), 1);
        assert!(app.form.name.is_empty());
        assert!(app.form.team.is_empty());
        assert_eq!(
            app.surface.shown_text("#greeting"),
            Some("Welcome, Ada! Thanks for checking in.")
        );
        assert_eq!(app.surface.take_focus_request(), Some(Field::Name));
    }

    #[test]
    fn rejected_submit_keeps_form_and_raises_alert() {
        let temp = tempfile::tempdir().expect("tempdir");
        let paths = AppPaths {
            data_root: temp.path().to_path_buf(),
        };
        let mut app = CheckInApp::bootstrap(Settings::default(), &paths);

        app.form.name = "Ada".into();
        app.handle_event(UiEvent::SubmitRequested);

        assert_eq!(app.controller.state().total(), 0);
        assert_eq!(app.form.name, "Ada");
        assert_eq!(app.surface.pending_alert(), Some("Please select a team."));
        // The team selector is disabled behind the modal.
        assert_eq!(app.surface.take_focus_request(), None);

        app.handle_event(UiEvent::AlertDismissed);
        assert_eq!(app.surface.pending_alert(), None);
        assert_eq!(app.surface.take_focus_request(), Some(Field::Team));
    }
}
