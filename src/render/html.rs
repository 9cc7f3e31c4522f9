use super::{RenderOptions, Renderer};
use crate::locale::Locale;
use crate::office::Contact;
use crate::resolver::{RegularDay, ResolvedView, TownChanges, UpcomingChange};
use std::collections::HashMap;
use std::fmt::Write;

/// Background colour per town key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TownPalette {
    colors: HashMap<String, String>,
    fallback: String,
}

impl Default for TownPalette {
    fn default() -> Self {
        Self::empty("#eee")
            .with("chotebor_p", "#009e7cb8")
            .with("chotebor_m", "#d75d9eba")
            .with("hlinsko", "#01bbffba")
            .with("kolin", "#ff6900")
            .with("malec", "#ffcd57")
    }
}

impl TownPalette {
    pub fn empty(fallback: impl Into<String>) -> Self {
        Self {
            colors: HashMap::new(),
            fallback: fallback.into(),
        }
    }

    pub fn with(mut self, town: impl Into<String>, color: impl Into<String>) -> Self {
        self.colors.insert(town.into(), color.into());
        self
    }

    pub fn color(&self, town: &str) -> &str {
        self.colors
            .get(town)
            .map(String::as_str)
            .unwrap_or(&self.fallback)
    }
}

#[derive(Debug, Clone, Default)]
pub struct HtmlRenderer {
    locale: Locale,
    palette: TownPalette,
}

const HEIGHT_SCRIPT: &str = "<script>window.addEventListener(\"load\", function () { \
window.parent.postMessage({ type: \"office-hours-height\", height: document.body.scrollHeight }, \"*\"); \
});</script>";

impl HtmlRenderer {
    pub fn new(locale: Locale) -> Self {
        Self {
            locale,
            palette: TownPalette::default(),
        }
    }

    pub fn with_palette(mut self, palette: TownPalette) -> Self {
        self.palette = palette;
        self
    }

    fn contact_block(&self, contact: &Contact, out: &mut String) {
        let labels = self.locale.labels();
        for (label, value) in [
            (labels.nurse, &contact.nurse),
            (labels.phone, &contact.phone),
            (labels.email, &contact.email),
        ] {
            let value = value.as_deref().unwrap_or("-");
            let _ = write!(
                out,
                "<p><strong>{}:</strong> {}</p>",
                escape_html(label),
                escape_html(value)
            );
        }
    }

    fn regular_row(&self, day: &RegularDay, out: &mut String) {
        let (hours, note) = match (day.by_appointment, day.note.as_deref()) {
            (true, Some(note)) => (String::new(), escape_html(note)),
            (true, None) => (String::new(), String::new()),
            (false, Some(note)) => (
                escape_html(&day.hours),
                format!(
                    " <span style=\"font-style: italic;\">({})</span>",
                    escape_html(note)
                ),
            ),
            (false, None) => (escape_html(&day.hours), String::new()),
        };
        let _ = write!(
            out,
            "<tr><td style=\"font-weight: 600; padding-right: 12px;\">{}</td><td>{}{}</td></tr>",
            escape_html(&day.label),
            hours,
            note
        );
    }

    fn change_row(&self, change: &UpcomingChange, out: &mut String) {
        let (background, border) = if change.closed {
            ("#ffecec", "#ff4d4f")
        } else {
            ("#e6f7e6", "#4caf50")
        };
        let note = change
            .note
            .as_deref()
            .map(|note| format!(" <span style=\"font-weight: 500;\">({})</span>", escape_html(note)))
            .unwrap_or_default();
        let _ = write!(
            out,
            "<div class=\"change\" style=\"display: flex; padding: 10px 14px; \
background-color: {background}; border-left: 4px solid {border}; border-radius: 6px; \
margin-bottom: 6px; align-items: center;\">\
<span style=\"flex-shrink: 0; width: 130px; font-weight: 600;\">{} {}</span>\
<span style=\"flex-grow: 1; margin-left: 12px; text-align: right;\">{}{}</span></div>",
            escape_html(&change.weekday),
            escape_html(&change.date_label),
            escape_html(&change.hours),
            note
        );
    }

    fn changes_block(&self, changes: &[UpcomingChange], out: &mut String) {
        if changes.is_empty() {
            let _ = write!(
                out,
                "<p><em>{}</em></p>",
                escape_html(self.locale.labels().no_changes)
            );
            return;
        }
        for change in changes {
            self.change_row(change, out);
        }
    }
}

impl Renderer for HtmlRenderer {
    fn render_view(&self, view: &ResolvedView, options: &RenderOptions) -> String {
        let labels = self.locale.labels();
        let mut out = String::new();
        let _ = write!(
            out,
            "<div class=\"office-hours\" style=\"background-color: {}; padding: 10px; border-radius: 5px;\">",
            escape_html(self.palette.color(&view.town))
        );
        let _ = write!(
            out,
            "<h2>{} – {}</h2>",
            escape_html(&view.town),
            escape_html(&view.office)
        );
        if options.include_contacts && !view.contact.is_empty() {
            self.contact_block(&view.contact, &mut out);
        }

        let _ = write!(out, "<h3>{}</h3>", escape_html(labels.regular_hours));
        if view.by_appointment_only {
            let _ = write!(
                out,
                "<p><strong>{}</strong></p>",
                escape_html(labels.by_appointment)
            );
        }
        if !view.regular_schedule.is_empty() {
            out.push_str("<table>");
            for day in &view.regular_schedule {
                self.regular_row(day, &mut out);
            }
            out.push_str("</table>");
        }

        let _ = write!(out, "<h3>{}</h3>", escape_html(labels.upcoming_changes));
        self.changes_block(&view.exceptions, &mut out);
        out.push_str("</div>");

        if options.report_height {
            out.push_str(HEIGHT_SCRIPT);
        }
        out
    }

    fn render_not_found(&self, town: &str, office: &str) -> String {
        format!(
            "<p>❌ {}: {} / {}</p>",
            escape_html(self.locale.labels().not_found),
            escape_html(town),
            escape_html(office)
        )
    }

    fn render_overview(&self, towns: &[TownChanges]) -> String {
        let mut out = String::new();
        let _ = write!(
            out,
            "<h3>{}:</h3><div style=\"display: flex; flex-wrap: wrap; gap: 10px;\">",
            escape_html(self.locale.labels().current_changes)
        );
        for town in towns {
            let _ = write!(
                out,
                "<div class=\"town\" style=\"background-color: {}; padding: 5px; border-radius: 5px; margin: 5px;\">\
<h3 style=\"border-bottom: 2px solid white; text-align: center;\">{}</h3>",
                escape_html(self.palette.color(&town.town)),
                escape_html(&town.town)
            );
            for office in &town.offices {
                let _ = write!(
                    out,
                    "<div style=\"margin-bottom: 5px;\"><strong style=\"border-bottom: 2px solid;\">{}</strong><div style=\"margin: 10px;\">",
                    escape_html(&office.office)
                );
                self.changes_block(&office.changes, &mut out);
                out.push_str("</div></div>");
            }
            out.push_str("</div>");
        }
        out.push_str("</div>");
        out
    }

    fn render_error(&self, message: &str) -> String {
        format!("<p>❌ {}</p>", escape_html(message))
    }
}

pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
