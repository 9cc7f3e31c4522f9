use chrono::{Local, NaiveDate, Weekday};
use std::fmt;

/// Separator placed between the morning and the afternoon shift.
pub const SHIFT_SEPARATOR: &str = "︱";

pub const ALL_WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// Days listed in a regular schedule, in display order. Sunday is never shown.
pub const DISPLAY_WEEKDAYS: [Weekday; 6] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
];

/// The local calendar date, sampled once by hosts before resolving.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Three-letter key used for a weekday in the dataset (`mon`..`sun`).
pub fn weekday_code(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "mon",
        Weekday::Tue => "tue",
        Weekday::Wed => "wed",
        Weekday::Thu => "thu",
        Weekday::Fri => "fri",
        Weekday::Sat => "sat",
        Weekday::Sun => "sun",
    }
}

pub fn weekday_from_code(code: &str) -> Option<Weekday> {
    ALL_WEEKDAYS
        .into_iter()
        .find(|day| weekday_code(*day) == code)
}

/// Day, month and year cut out of a `DDMMYYYY` string.
///
/// No range check happens here; `to_date` is where impossible dates such as
/// month 13 are rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateParts {
    pub day: u32,
    /// 1-based month as written in the dataset.
    pub month: u32,
    pub year: i32,
}

impl DateParts {
    /// Zero-indexed month (January = 0). A written month of `00` yields -1.
    pub fn month0(&self) -> i32 {
        self.month as i32 - 1
    }

    pub fn to_date(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, self.day)
    }
}

/// Splits an 8-character `DDMMYYYY` string into its parts.
///
/// Returns `None` for any other length or for non-digit characters.
pub fn parse_date_parts(input: &str) -> Option<DateParts> {
    if input.len() != 8 || !input.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let day = input[0..2].parse().ok()?;
    let month = input[2..4].parse().ok()?;
    let year = input[4..8].parse().ok()?;
    Some(DateParts { day, month, year })
}

/// Parses `DDMMYYYY` into a calendar date.
pub fn parse_date(input: &str) -> Option<NaiveDate> {
    parse_date_parts(input)?.to_date()
}

/// Renders `DDMMYYYY` as `DD.MM.YYYY`, passing other inputs through unchanged.
pub fn format_date(input: &str) -> String {
    if input.len() != 8 || !input.is_ascii() {
        return input.to_string();
    }
    format!("{}.{}.{}", &input[0..2], &input[2..4], &input[4..8])
}

/// A four-digit `HHMM` time code from the dataset.
///
/// Digits are kept as written: `2599` is accepted and rendered `25:99`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeCode {
    hour: u8,
    minute: u8,
}

impl TimeCode {
    pub fn parse(code: &str) -> Option<Self> {
        if code.len() != 4 || !code.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        Some(Self {
            hour: code[0..2].parse().ok()?,
            minute: code[2..4].parse().ok()?,
        })
    }

    pub fn hour(&self) -> u8 {
        self.hour
    }

    pub fn minute(&self) -> u8 {
        self.minute
    }
}

impl fmt::Display for TimeCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}
