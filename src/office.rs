use crate::calendar::{self, SHIFT_SEPARATOR, TimeCode};
use chrono::{NaiveDate, Weekday};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// The whole dataset: one record per town/office pair.
pub type Dataset = Vec<OfficeRecord>;

/// Hours of a single day, either a weekday of the regular schedule or the
/// override attached to a dated change.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaySchedule {
    #[serde(
        rename = "m_o",
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub morning_open: Option<String>,
    #[serde(
        rename = "m_c",
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub morning_close: Option<String>,
    #[serde(
        rename = "a_o",
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub afternoon_open: Option<String>,
    #[serde(
        rename = "a_c",
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub afternoon_close: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub note: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_flag",
        skip_serializing_if = "Option::is_none"
    )]
    pub closed: Option<bool>,
}

impl DaySchedule {
    /// Morning shift only.
    pub fn morning(open: &str, close: &str) -> Self {
        Self {
            morning_open: Some(open.to_string()),
            morning_close: Some(close.to_string()),
            ..Self::default()
        }
    }

    /// Morning and afternoon shift.
    pub fn split(morning: (&str, &str), afternoon: (&str, &str)) -> Self {
        Self {
            afternoon_open: Some(afternoon.0.to_string()),
            afternoon_close: Some(afternoon.1.to_string()),
            ..Self::morning(morning.0, morning.1)
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    pub fn morning_open_time(&self) -> Option<TimeCode> {
        self.morning_open.as_deref().and_then(TimeCode::parse)
    }

    pub fn morning_close_time(&self) -> Option<TimeCode> {
        self.morning_close.as_deref().and_then(TimeCode::parse)
    }

    pub fn afternoon_open_time(&self) -> Option<TimeCode> {
        self.afternoon_open.as_deref().and_then(TimeCode::parse)
    }

    pub fn afternoon_close_time(&self) -> Option<TimeCode> {
        self.afternoon_close.as_deref().and_then(TimeCode::parse)
    }

    /// Open at all on this day: a valid morning opening time is present.
    pub fn is_open(&self) -> bool {
        self.morning_open_time().is_some()
    }

    pub fn is_marked_closed(&self) -> bool {
        self.closed.unwrap_or(false)
    }

    /// Renders the two shifts as `08:00 - 12:00︱13:00 - 17:00`.
    ///
    /// Without a valid morning opening time the day is closed and
    /// `closed_marker` is returned. Any other invalid field is skipped.
    pub fn format_hours(&self, closed_marker: &str) -> String {
        let Some(open) = self.morning_open_time() else {
            return closed_marker.to_string();
        };
        let mut out = open.to_string();
        if let Some(close) = self.morning_close_time() {
            out.push_str(&format!(" - {close}"));
        }
        if let Some(open) = self.afternoon_open_time() {
            out.push_str(&format!("{SHIFT_SEPARATOR}{open}"));
        }
        if let Some(close) = self.afternoon_close_time() {
            out.push_str(&format!(" - {close}"));
        }
        out
    }
}

/// Weekly schedule keyed by the dataset's three-letter weekday codes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegularHours {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mon: Option<DaySchedule>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tue: Option<DaySchedule>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wed: Option<DaySchedule>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thu: Option<DaySchedule>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fri: Option<DaySchedule>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sat: Option<DaySchedule>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sun: Option<DaySchedule>,
}

impl RegularHours {
    pub fn get(&self, weekday: Weekday) -> Option<&DaySchedule> {
        self.slot(weekday).as_ref()
    }

    pub fn set(&mut self, weekday: Weekday, schedule: DaySchedule) {
        *self.slot_mut(weekday) = Some(schedule);
    }

    pub fn with(mut self, weekday: Weekday, schedule: DaySchedule) -> Self {
        self.set(weekday, schedule);
        self
    }

    fn slot(&self, weekday: Weekday) -> &Option<DaySchedule> {
        match weekday {
            Weekday::Mon => &self.mon,
            Weekday::Tue => &self.tue,
            Weekday::Wed => &self.wed,
            Weekday::Thu => &self.thu,
            Weekday::Fri => &self.fri,
            Weekday::Sat => &self.sat,
            Weekday::Sun => &self.sun,
        }
    }

    fn slot_mut(&mut self, weekday: Weekday) -> &mut Option<DaySchedule> {
        match weekday {
            Weekday::Mon => &mut self.mon,
            Weekday::Tue => &mut self.tue,
            Weekday::Wed => &mut self.wed,
            Weekday::Thu => &mut self.thu,
            Weekday::Fri => &mut self.fri,
            Weekday::Sat => &mut self.sat,
            Weekday::Sun => &mut self.sun,
        }
    }
}

/// A one-off change for a single date: a closure or altered hours.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateException {
    /// `DDMMYYYY`, kept verbatim as it appears in the dataset.
    #[serde(default, deserialize_with = "text_or_empty")]
    pub date: String,
    #[serde(default, deserialize_with = "truthy")]
    pub closed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day: Option<DaySchedule>,
    #[serde(
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub note: Option<String>,
}

impl DateException {
    pub fn closure(date: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            closed: true,
            ..Self::default()
        }
    }

    pub fn altered(date: impl Into<String>, day: DaySchedule) -> Self {
        Self {
            date: date.into(),
            day: Some(day),
            ..Self::default()
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    pub fn parsed_date(&self) -> Option<NaiveDate> {
        calendar::parse_date(&self.date)
    }

    pub fn date_label(&self) -> String {
        calendar::format_date(&self.date)
    }

    /// Closed marker when the office is closed that day, the altered hours otherwise.
    pub fn hours_text(&self, closed_marker: &str) -> String {
        if self.closed {
            return closed_marker.to_string();
        }
        match &self.day {
            Some(day) => day.format_hours(closed_marker),
            None => closed_marker.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nurse: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl Contact {
    pub fn is_empty(&self) -> bool {
        self.nurse.is_none() && self.phone.is_none() && self.email.is_none()
    }
}

/// One town/office pair with its weekly schedule and dated changes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OfficeRecord {
    pub town: String,
    pub office: String,
    #[serde(
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub nurse: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub phone: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub regular_hours: RegularHours,
    #[serde(default, deserialize_with = "change_collection")]
    pub irregular_changes: Vec<DateException>,
}

impl OfficeRecord {
    pub fn new(town: impl Into<String>, office: impl Into<String>) -> Self {
        Self {
            town: town.into(),
            office: office.into(),
            ..Self::default()
        }
    }

    /// Exact, case-sensitive key match.
    pub fn matches(&self, town: &str, office: &str) -> bool {
        self.town == town && self.office == office
    }

    pub fn contact(&self) -> Contact {
        Contact {
            nurse: self.nurse.clone(),
            phone: self.phone.clone(),
            email: self.email.clone(),
        }
    }
}

/// Strings pass through, numbers are stringified, empty strings and anything
/// else count as absent.
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(text)) if !text.trim().is_empty() => Some(text),
        Some(Value::Number(number)) => Some(number.to_string()),
        _ => None,
    })
}

fn text_or_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_text(deserializer)?.unwrap_or_default())
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn truthy<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Value>::deserialize(deserializer)?
        .as_ref()
        .is_some_and(is_truthy))
}

fn lenient_flag<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Value>::deserialize(deserializer)?
        .filter(|value| !value.is_null())
        .map(|value| is_truthy(&value)))
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ChangeCollection {
    List(Vec<DateException>),
    Keyed(BTreeMap<String, DateException>),
}

/// Changes come either as an array or as an object whose values are changes.
fn change_collection<'de, D>(deserializer: D) -> Result<Vec<DateException>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<ChangeCollection>::deserialize(deserializer)? {
        Some(ChangeCollection::List(changes)) => changes,
        Some(ChangeCollection::Keyed(changes)) => changes.into_values().collect(),
        None => Vec::new(),
    })
}
