//! In-memory page used by headless hosts and tests.

use std::collections::BTreeMap;

use shared::error::Field;

use crate::{
    render::{attendee_list_markup, escape_html, AttendeeRow},
    surface::{RegionBindings, RegionUpdate, Surface},
};

#[derive(Debug, Clone, PartialEq)]
pub struct RegionContent {
    pub text: String,
    pub progress_width: Option<f64>,
    pub rows: Option<Vec<AttendeeRow>>,
    pub visible: bool,
}

impl Default for RegionContent {
    fn default() -> Self {
        Self {
            text: String::new(),
            progress_width: None,
            rows: None,
            visible: true,
        }
    }
}

/// A page with a fixed set of bindings.
///
/// Records every update, alert, focus change and input reset so a caller can
/// inspect what a user would see, or emit it as an HTML document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageSurface {
    regions: BTreeMap<String, RegionContent>,
    alerts: Vec<String>,
    focused: Option<Field>,
    inputs_cleared: usize,
}

impl PageSurface {
    pub fn with_bindings<I, S>(bindings: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            regions: bindings
                .into_iter()
                .map(|binding| (binding.into(), RegionContent::default()))
                .collect(),
            ..Self::default()
        }
    }

    /// A page carrying every configured binding.
    pub fn for_bindings(bindings: &RegionBindings) -> Self {
        Self::with_bindings(bindings.bound().map(|(_, binding)| binding.to_string()))
    }

    pub fn content(&self, binding: &str) -> Option<&RegionContent> {
        self.regions.get(binding)
    }

    pub fn text(&self, binding: &str) -> Option<&str> {
        self.content(binding).map(|content| content.text.as_str())
    }

    pub fn is_visible(&self, binding: &str) -> bool {
        self.content(binding).is_some_and(|content| content.visible)
    }

    pub fn alerts(&self) -> &[String] {
        &self.alerts
    }

    pub fn focused(&self) -> Option<Field> {
        self.focused
    }

    pub fn inputs_cleared(&self) -> usize {
        self.inputs_cleared
    }

    /// Inner markup of one region as it would appear in the page.
    pub fn region_markup(&self, binding: &str) -> Option<String> {
        let content = self.content(binding)?;
        let mut markup = String::new();
        if let Some(width) = content.progress_width {
            markup.push_str(&format!(
                "<div class=\"progress-fill\" style=\"width: {width:.1}%\"></div>"
            ));
        }
        if let Some(rows) = &content.rows {
            markup.push_str(&attendee_list_markup(rows));
        }
        markup.push_str(&escape_html(&content.text));
        Some(markup)
    }

    pub fn to_html_document(&self, title: &str) -> String {
        let mut body = String::new();
        for binding in self.regions.keys() {
            let Some(markup) = self.region_markup(binding) else {
                continue;
            };
            let hidden = if self.is_visible(binding) {
                ""
            } else {
                " style=\"display: none\""
            };
            body.push_str(&format!(
                "    <div {}{hidden}>{markup}</div>\n",
                binding_attribute(binding)
            ));
        }
        let title = escape_html(title);
        format!(
            "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n  <meta charset=\"utf-8\">\n  \
             <title>{title}</title>\n</head>\n<body>\n  <main class=\"container\">\n    \
             <h1>{title}</h1>\n{body}  </main>\n</body>\n</html>\n"
        )
    }
}

fn binding_attribute(binding: &str) -> String {
    if let Some(id) = binding.strip_prefix('#') {
        format!("id=\"{}\"", escape_html(id))
    } else if let Some(class) = binding.strip_prefix('.') {
        format!("class=\"{}\"", escape_html(class))
    } else {
        format!("data-region=\"{}\"", escape_html(binding))
    }
}

impl Surface for PageSurface {
    fn has_binding(&self, binding: &str) -> bool {
        self.regions.contains_key(binding)
    }

    fn update(&mut self, binding: &str, update: RegionUpdate) {
        let Some(content) = self.regions.get_mut(binding) else {
            return;
        };
        match update {
            RegionUpdate::Text(text) => content.text = text,
            RegionUpdate::ProgressWidth(width) => content.progress_width = Some(width),
            RegionUpdate::AttendeeList(rows) => content.rows = Some(rows),
            RegionUpdate::Show => content.visible = true,
            RegionUpdate::Hide => content.visible = false,
        }
    }

    fn alert(&mut self, message: &str) {
        self.alerts.push(message.to_string());
    }

    fn clear_inputs(&mut self) {
        self.inputs_cleared += 1;
    }

    fn focus(&mut self, field: Field) {
        self.focused = Some(field);
    }
}
