use chrono::Weekday;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};
use std::str::FromStr;

/// Display language of labels produced by the resolver and the renderers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Locale {
    #[default]
    #[serde(rename = "cs")]
    Czech,
    #[serde(rename = "en")]
    English,
}

/// Static label table of one locale.
#[derive(Debug)]
pub struct Labels {
    /// Full weekday names, Monday first.
    pub weekdays: [&'static str; 7],
    /// Weekday abbreviations, Sunday first.
    pub weekday_abbreviations: [&'static str; 7],
    pub closed: &'static str,
    pub by_appointment: &'static str,
    pub regular_hours: &'static str,
    pub upcoming_changes: &'static str,
    pub current_changes: &'static str,
    pub no_changes: &'static str,
    pub nurse: &'static str,
    pub phone: &'static str,
    pub email: &'static str,
    pub not_found: &'static str,
    pub missing_parameters: &'static str,
    pub load_error: &'static str,
}

static CZECH: Labels = Labels {
    weekdays: [
        "Pondělí", "Úterý", "Středa", "Čtvrtek", "Pátek", "Sobota", "Neděle",
    ],
    weekday_abbreviations: ["Ne", "Po", "Út", "St", "Čt", "Pá", "So"],
    closed: "Zavřeno",
    by_appointment: "Pouze po individuální domluvě",
    regular_hours: "Ordinační hodiny",
    upcoming_changes: "Plánované změny",
    current_changes: "Aktuální změny",
    no_changes: "Žádné aktuální změny",
    nurse: "Sestra",
    phone: "Telefon",
    email: "E-mail",
    not_found: "Nenalezeno",
    missing_parameters: "Chybí parametry v URL (např. ?town=chotebor&office=sportovko)",
    load_error: "Chyba při načítání dat.",
};

static ENGLISH: Labels = Labels {
    weekdays: [
        "Monday",
        "Tuesday",
        "Wednesday",
        "Thursday",
        "Friday",
        "Saturday",
        "Sunday",
    ],
    weekday_abbreviations: ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"],
    closed: "closed",
    by_appointment: "By individual appointment only",
    regular_hours: "Regular hours",
    upcoming_changes: "Upcoming changes",
    current_changes: "Current changes",
    no_changes: "No current changes",
    nurse: "Nurse",
    phone: "Phone",
    email: "Email",
    not_found: "Not found",
    missing_parameters: "Missing URL parameters (e.g., ?town=chotebor&office=sportovko)",
    load_error: "Error loading data.",
};

impl Locale {
    pub fn code(self) -> &'static str {
        match self {
            Locale::Czech => "cs",
            Locale::English => "en",
        }
    }

    pub fn labels(self) -> &'static Labels {
        match self {
            Locale::Czech => &CZECH,
            Locale::English => &ENGLISH,
        }
    }

    pub fn day_name(self, weekday: Weekday) -> &'static str {
        self.labels().weekdays[weekday.num_days_from_monday() as usize]
    }

    pub fn weekday_abbreviation(self, weekday: Weekday) -> &'static str {
        self.labels().weekday_abbreviations[weekday.num_days_from_sunday() as usize]
    }

    pub fn closed_marker(self) -> &'static str {
        self.labels().closed
    }
}

impl Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub struct UnknownLocale(pub String);

impl Display for UnknownLocale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown language code `{}` (expected cs or en)", self.0)
    }
}

impl std::error::Error for UnknownLocale {}

impl FromStr for Locale {
    type Err = UnknownLocale;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cs" | "cz" | "czech" => Ok(Locale::Czech),
            "en" | "english" => Ok(Locale::English),
            _ => Err(UnknownLocale(s.to_string())),
        }
    }
}
