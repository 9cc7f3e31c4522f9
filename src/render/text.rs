use super::{RenderOptions, Renderer};
use crate::locale::Locale;
use crate::resolver::{ResolvedView, TownChanges, UpcomingChange};
use std::fmt::Write;

/// Plain text output for terminals.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextRenderer {
    locale: Locale,
}

impl TextRenderer {
    pub fn new(locale: Locale) -> Self {
        Self { locale }
    }

    fn changes(&self, changes: &[UpcomingChange], indent: &str, out: &mut String) {
        if changes.is_empty() {
            let _ = writeln!(out, "{indent}{}", self.locale.labels().no_changes);
            return;
        }
        for change in changes {
            let _ = writeln!(
                out,
                "{indent}{:<10} {:<3} {}",
                change.date_label,
                change.weekday,
                change.display_text()
            );
        }
    }
}

impl Renderer for TextRenderer {
    fn render_view(&self, view: &ResolvedView, options: &RenderOptions) -> String {
        let labels = self.locale.labels();
        let mut out = String::new();
        let _ = writeln!(out, "{} – {}", view.town, view.office);
        if options.include_contacts && !view.contact.is_empty() {
            let _ = writeln!(
                out,
                "{:<8}: {}",
                labels.nurse,
                view.contact.nurse.as_deref().unwrap_or("-")
            );
            let _ = writeln!(
                out,
                "{:<8}: {}",
                labels.phone,
                view.contact.phone.as_deref().unwrap_or("-")
            );
            let _ = writeln!(
                out,
                "{:<8}: {}",
                labels.email,
                view.contact.email.as_deref().unwrap_or("-")
            );
        }

        let _ = writeln!(out, "{}", labels.regular_hours);
        if view.by_appointment_only {
            let _ = writeln!(out, "  {}", labels.by_appointment);
        }
        for day in &view.regular_schedule {
            let hours = if day.by_appointment { "" } else { day.hours.as_str() };
            match &day.note {
                Some(note) if hours.is_empty() => {
                    let _ = writeln!(out, "  {:<10} {}", day.label, note);
                }
                Some(note) => {
                    let _ = writeln!(out, "  {:<10} {} ({})", day.label, hours, note);
                }
                None => {
                    let _ = writeln!(out, "  {:<10} {}", day.label, hours);
                }
            }
        }

        let _ = writeln!(out, "{}", labels.upcoming_changes);
        self.changes(&view.exceptions, "  ", &mut out);
        out
    }

    fn render_not_found(&self, town: &str, office: &str) -> String {
        format!("{}: {} / {}\n", self.locale.labels().not_found, town, office)
    }

    fn render_overview(&self, towns: &[TownChanges]) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{}:", self.locale.labels().current_changes);
        for town in towns {
            let _ = writeln!(out, "{}", town.town);
            for office in &town.offices {
                let _ = writeln!(out, "  {}", office.office);
                self.changes(&office.changes, "    ", &mut out);
            }
        }
        out
    }

    fn render_error(&self, message: &str) -> String {
        format!("{message}\n")
    }
}
