use checkin_core::{
    page::RegionContent, PageSurface, RegionBindings, RegionUpdate, Surface,
};
use shared::error::Field;

/// Region contents plus the transient requests (alert, focus, input reset)
/// the window acts on during the next frame.
#[derive(Debug, Clone)]
pub struct EguiSurface {
    regions: PageSurface,
    alert: Option<String>,
    focus_request: Option<Field>,
    clear_requested: bool,
}

impl EguiSurface {
    pub fn new(bindings: &RegionBindings) -> Self {
        Self {
            regions: PageSurface::for_bindings(bindings),
            alert: None,
            focus_request: None,
            clear_requested: false,
        }
    }

    pub fn content(&self, binding: &str) -> Option<&RegionContent> {
        self.regions.content(binding)
    }

    /// Text of a visible, non-empty region.
    pub fn shown_text(&self, binding: &str) -> Option<&str> {
        let content = self.regions.content(binding)?;
        (content.visible && !content.text.is_empty()).then_some(content.text.as_str())
    }

    pub fn pending_alert(&self) -> Option<&str> {
        self.alert.as_deref()
    }

    pub fn dismiss_alert(&mut self) {
        self.alert = None;
    }

    /// Held back while an alert is open so the field receives focus once
    /// the modal closes rather than while it is disabled behind it.
    pub fn take_focus_request(&mut self) -> Option<Field> {
        if self.alert.is_some() {
            return None;
        }
        self.focus_request.take()
    }

    pub fn take_clear_request(&mut self) -> bool {
        std::mem::take(&mut self.clear_requested)
    }
}

impl Surface for EguiSurface {
    fn has_binding(&self, binding: &str) -> bool {
        self.regions.has_binding(binding)
    }

    fn update(&mut self, binding: &str, update: RegionUpdate) {
        self.regions.update(binding, update);
    }

    fn alert(&mut self, message: &str) {
        self.alert = Some(message.to_string());
    }

    fn clear_inputs(&mut self) {
        self.clear_requested = true;
    }

    fn focus(&mut self, field: Field) {
        self.focus_request = Some(field);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shown_text_respects_visibility() {
        let bindings = RegionBindings::default();
        let mut surface = EguiSurface::new(&bindings);
        assert_eq!(surface.shown_text("#greeting"), None);

        surface.update("#greeting", RegionUpdate::Text("Welcome, Ada!".into()));
        assert_eq!(surface.shown_text("#greeting"), Some("Welcome, Ada!"));

        surface.update("#greeting", RegionUpdate::Hide);
        assert_eq!(surface.shown_text("#greeting"), None);
    }

    #[test]
    fn transient_requests_are_taken_once() {
        let mut surface = EguiSurface::new(&RegionBindings::default());
        surface.alert("Please select a team.");
        surface.focus(Field::Team);
        surface.clear_inputs();

        assert_eq!(surface.pending_alert(), Some("Please select a team."));
        assert!(surface.take_clear_request());
        assert!(!surface.take_clear_request());

        surface.dismiss_alert();
        assert_eq!(surface.pending_alert(), None);
        assert_eq!(surface.take_focus_request(), Some(Field::Team));
        assert_eq!(surface.take_focus_request(), None);
    }

    #[test]
    fn focus_waits_for_alert_dismissal() {
        let mut surface = EguiSurface::new(&RegionBindings::default());
        surface.alert("Please enter an attendee name.");
        surface.focus(Field::Name);

        assert_eq!(surface.take_focus_request(), None);
        assert_eq!(surface.take_focus_request(), None);

        surface.dismiss_alert();
        assert_eq!(surface.take_focus_request(), Some(Field::Name));
    }

    #[test]
    fn unknown_bindings_are_ignored() {
        let mut surface = EguiSurface::new(&RegionBindings::default());
        assert!(!surface.has_binding("#nope"));
        surface.update("#nope", RegionUpdate::Show);
        assert!(surface.content("#nope").is_none());
    }
}
