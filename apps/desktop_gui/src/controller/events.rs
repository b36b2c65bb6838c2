//! UI events and submit detection for the check-in form.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiEvent {
    SubmitRequested,
    AlertDismissed,
}

/// Per-frame input observations gathered while drawing the form.
#[derive(Debug, Clone, Copy, Default)]
pub struct FormSignals {
    pub button_clicked: bool,
    pub enter_pressed: bool,
    /// The name field gave up focus this frame, which is what a single-line
    /// edit does when Enter is pressed in it.
    pub name_lost_focus: bool,
    pub alert_open: bool,
}

impl FormSignals {
    pub fn to_event(self) -> Option<UiEvent> {
        if self.alert_open {
            return None;
        }
        let enter_in_name = self.enter_pressed && self.name_lost_focus;
        (self.button_clicked || enter_in_name).then_some(UiEvent::SubmitRequested)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn button_click_submits() {
        let signals = FormSignals {
            button_clicked: true,
            ..FormSignals::default()
        };
        assert_eq!(signals.to_event(), Some(UiEvent::SubmitRequested));
    }

    #[test]
    fn enter_submits_only_from_name_field() {
        let in_name = FormSignals {
            enter_pressed: true,
            name_lost_focus: true,
            ..FormSignals::default()
        };
        assert_eq!(in_name.to_event(), Some(UiEvent::SubmitRequested));

        let elsewhere = FormSignals {
            enter_pressed: true,
            ..FormSignals::default()
        };
        assert_eq!(elsewhere.to_event(), None);

        let blur_without_enter = FormSignals {
            name_lost_focus: true,
            ..FormSignals::default()
        };
        assert_eq!(blur_without_enter.to_event(), None);
    }

    #[test]
    fn open_alert_blocks_submission() {
        let signals = FormSignals {
            button_clicked: true,
            enter_pressed: true,
            name_lost_focus: true,
            alert_open: true,
        };
        assert_eq!(signals.to_event(), None);
    }
}
