use crate::calendar::DISPLAY_WEEKDAYS;
use crate::locale::Locale;
use crate::office::{Contact, DateException, OfficeRecord, RegularHours};
use chrono::{Datelike, NaiveDate, Weekday};
use serde::Serialize;

/// One row of the weekly schedule as it should be displayed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegularDay {
    pub weekday: Weekday,
    pub label: String,
    pub hours: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    /// Set when the office has no regular hours at all and only sees
    /// patients by individual appointment.
    pub by_appointment: bool,
}

/// A dated change on or after the reference date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpcomingChange {
    pub date: NaiveDate,
    pub date_label: String,
    pub weekday: String,
    pub closed: bool,
    pub hours: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl UpcomingChange {
    /// Hours (or the closed marker) followed by the note in parentheses.
    pub fn display_text(&self) -> String {
        match &self.note {
            Some(note) => format!("{} ({})", self.hours, note),
            None => self.hours.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedView {
    pub town: String,
    pub office: String,
    pub contact: Contact,
    pub by_appointment_only: bool,
    pub regular_schedule: Vec<RegularDay>,
    pub exceptions: Vec<UpcomingChange>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Resolution {
    Found(ResolvedView),
    NotFound { town: String, office: String },
}

impl Resolution {
    pub fn found(self) -> Option<ResolvedView> {
        match self {
            Resolution::Found(view) => Some(view),
            Resolution::NotFound { .. } => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Resolution::Found(_))
    }
}

/// Upcoming changes of every office, grouped by town.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TownChanges {
    pub town: String,
    pub offices: Vec<OfficeChanges>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OfficeChanges {
    pub office: String,
    pub changes: Vec<UpcomingChange>,
}

/// Turns dataset records into display-ready views.
///
/// Resolution is a pure function of the dataset, the keys and the reference
/// date; the locale only picks the labels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScheduleResolver {
    locale: Locale,
}

impl ScheduleResolver {
    pub fn new(locale: Locale) -> Self {
        Self { locale }
    }

    pub fn resolve(
        &self,
        dataset: &[OfficeRecord],
        town: &str,
        office: &str,
        reference_date: NaiveDate,
    ) -> Resolution {
        match dataset.iter().find(|record| record.matches(town, office)) {
            Some(record) => Resolution::Found(self.view(record, reference_date)),
            None => {
                tracing::debug!(town, office, "no office record matches");
                Resolution::NotFound {
                    town: town.to_string(),
                    office: office.to_string(),
                }
            }
        }
    }

    pub fn view(&self, record: &OfficeRecord, reference_date: NaiveDate) -> ResolvedView {
        let (regular_schedule, by_appointment_only) = self.regular_schedule(&record.regular_hours);
        ResolvedView {
            town: record.town.clone(),
            office: record.office.clone(),
            contact: record.contact(),
            by_appointment_only,
            regular_schedule,
            exceptions: self.upcoming_changes(&record.irregular_changes, reference_date),
        }
    }

    /// Rows for Monday to Saturday plus the appointment-only flag.
    ///
    /// Saturday is dropped when it is missing, marked closed or has no
    /// morning opening. When no day opens at all only rows carrying a note
    /// are kept.
    pub fn regular_schedule(&self, hours: &RegularHours) -> (Vec<RegularDay>, bool) {
        let labels = self.locale.labels();
        let by_appointment_only = !DISPLAY_WEEKDAYS
            .iter()
            .any(|day| hours.get(*day).is_some_and(|schedule| schedule.is_open()));

        let mut rows = Vec::with_capacity(DISPLAY_WEEKDAYS.len());
        for weekday in DISPLAY_WEEKDAYS {
            let schedule = hours.get(weekday);
            if by_appointment_only {
                if weekday == Weekday::Sat && schedule.is_some_and(|s| s.is_marked_closed()) {
                    continue;
                }
                let Some(note) = schedule.and_then(|s| s.note.clone()) else {
                    continue;
                };
                rows.push(RegularDay {
                    weekday,
                    label: self.locale.day_name(weekday).to_string(),
                    hours: labels.by_appointment.to_string(),
                    note: Some(note),
                    by_appointment: true,
                });
                continue;
            }

            if weekday == Weekday::Sat
                && !schedule.is_some_and(|s| s.is_open() && !s.is_marked_closed())
            {
                continue;
            }
            rows.push(RegularDay {
                weekday,
                label: self.locale.day_name(weekday).to_string(),
                hours: schedule
                    .map(|s| s.format_hours(labels.closed))
                    .unwrap_or_else(|| labels.closed.to_string()),
                note: schedule.and_then(|s| s.note.clone()),
                by_appointment: false,
            });
        }
        (rows, by_appointment_only)
    }

    /// Changes dated on or after `reference_date`, earliest first.
    ///
    /// Entries whose date cannot be parsed never count as upcoming.
    pub fn upcoming_changes(
        &self,
        changes: &[DateException],
        reference_date: NaiveDate,
    ) -> Vec<UpcomingChange> {
        let mut dated: Vec<(NaiveDate, &DateException)> = changes
            .iter()
            .filter_map(|change| match change.parsed_date() {
                Some(date) => Some((date, change)),
                None => {
                    tracing::trace!(date = %change.date, "skipping change with unparseable date");
                    None
                }
            })
            .filter(|(date, _)| *date >= reference_date)
            .collect();
        dated.sort_by_key(|(date, _)| *date);
        dated
            .into_iter()
            .map(|(date, change)| self.upcoming_change(date, change))
            .collect()
    }

    /// Changes of one record dated exactly on `date`.
    pub fn changes_on(&self, record: &OfficeRecord, date: NaiveDate) -> Vec<UpcomingChange> {
        record
            .irregular_changes
            .iter()
            .filter_map(|change| {
                change
                    .parsed_date()
                    .filter(|parsed| *parsed == date)
                    .map(|parsed| self.upcoming_change(parsed, change))
            })
            .collect()
    }

    /// Upcoming changes for every office, towns and offices in first-seen order.
    pub fn overview(&self, dataset: &[OfficeRecord], reference_date: NaiveDate) -> Vec<TownChanges> {
        let mut towns: Vec<TownChanges> = Vec::new();
        for record in dataset {
            let position = match towns.iter().position(|t| t.town == record.town) {
                Some(position) => position,
                None => {
                    towns.push(TownChanges {
                        town: record.town.clone(),
                        offices: Vec::new(),
                    });
                    towns.len() - 1
                }
            };
            let town = &mut towns[position];
            if town.offices.iter().any(|o| o.office == record.office) {
                continue;
            }
            town.offices.push(OfficeChanges {
                office: record.office.clone(),
                changes: self.upcoming_changes(&record.irregular_changes, reference_date),
            });
        }
        towns
    }

    fn upcoming_change(&self, date: NaiveDate, change: &DateException) -> UpcomingChange {
        UpcomingChange {
            date,
            date_label: change.date_label(),
            weekday: self.locale.weekday_abbreviation(date.weekday()).to_string(),
            closed: change.closed,
            hours: change.hours_text(self.locale.closed_marker()),
            note: change.note.clone(),
        }
    }
}
