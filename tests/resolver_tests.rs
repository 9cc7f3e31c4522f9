use chrono::{NaiveDate, Weekday};
use office_hours::{
    DateException, DaySchedule, Locale, OfficeRecord, RegularHours, Resolution, ScheduleResolver,
    load_dataset_from_str,
};
use serde_json::json;

fn d(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn sportovko() -> Vec<OfficeRecord> {
    let json = json!([
        {
            "town": "chotebor_m",
            "office": "sportovko",
            "nurse": "Jana",
            "phone": "+420 569 000 000",
            "regular_hours": {
                "mon": { "m_o": "0800", "m_c": "1200", "a_o": "1300", "a_c": "1700" }
            },
            "irregular_changes": [
                { "date": "25122024", "closed": true, "note": "Vánoce" }
            ]
        }
    ]);
    load_dataset_from_str(&json.to_string()).unwrap()
}

fn record_with_hours(hours: RegularHours) -> OfficeRecord {
    let mut record = OfficeRecord::new("hlinsko", "poliklinika");
    record.regular_hours = hours;
    record
}

fn weekdays(record: &OfficeRecord) -> Vec<Weekday> {
    let (rows, _) = ScheduleResolver::default().regular_schedule(&record.regular_hours);
    rows.into_iter().map(|row| row.weekday).collect()
}

#[test]
fn unknown_keys_resolve_to_not_found() {
    let dataset = sportovko();
    let resolver = ScheduleResolver::default();
    let result = resolver.resolve(&dataset, "chotebor_m", "ambulance", d(2024, 12, 1));
    assert_eq!(
        result,
        Resolution::NotFound {
            town: "chotebor_m".into(),
            office: "ambulance".into()
        }
    );
    assert!(!resolver.resolve(&[], "a", "b", d(2024, 12, 1)).is_found());
}

#[test]
fn key_matching_is_exact_and_case_sensitive() {
    let dataset = sportovko();
    let resolver = ScheduleResolver::default();
    assert!(!resolver.resolve(&dataset, "Chotebor_m", "sportovko", d(2024, 12, 1)).is_found());
    assert!(!resolver.resolve(&dataset, "chotebor_m ", "sportovko", d(2024, 12, 1)).is_found());
    assert!(resolver.resolve(&dataset, "chotebor_m", "sportovko", d(2024, 12, 1)).is_found());
}

#[test]
fn first_matching_record_wins() {
    let mut first = OfficeRecord::new("kolin", "centrum");
    first.nurse = Some("first".into());
    let mut second = OfficeRecord::new("kolin", "centrum");
    second.nurse = Some("second".into());
    let view = ScheduleResolver::default()
        .resolve(&[first, second], "kolin", "centrum", d(2025, 1, 1))
        .found()
        .unwrap();
    assert_eq!(view.contact.nurse.as_deref(), Some("first"));
}

#[test]
fn sportovko_scenario_in_english() {
    let dataset = sportovko();
    let view = ScheduleResolver::new(Locale::English)
        .resolve(&dataset, "chotebor_m", "sportovko", d(2024, 12, 20))
        .found()
        .expect("record should resolve");

    let monday = &view.regular_schedule[0];
    assert_eq!(monday.weekday, Weekday::Mon);
    assert_eq!(monday.label, "Monday");
    assert_eq!(monday.hours, "08:00 - 12:00︱13:00 - 17:00");
    assert!(!view.by_appointment_only);

    assert_eq!(view.exceptions.len(), 1);
    let christmas = &view.exceptions[0];
    assert_eq!(christmas.date_label, "25.12.2024");
    assert_eq!(christmas.weekday, "Wed");
    assert!(christmas.closed);
    assert_eq!(christmas.display_text(), "closed (Vánoce)");
    assert_eq!(view.contact.nurse.as_deref(), Some("Jana"));
}

#[test]
fn sportovko_scenario_in_czech() {
    let dataset = sportovko();
    let view = ScheduleResolver::new(Locale::Czech)
        .resolve(&dataset, "chotebor_m", "sportovko", d(2024, 12, 1))
        .found()
        .unwrap();
    assert_eq!(view.regular_schedule[0].label, "Pondělí");
    assert_eq!(view.exceptions[0].weekday, "St");
    assert_eq!(view.exceptions[0].display_text(), "Zavřeno (Vánoce)");
}

#[test]
fn missing_weekdays_render_closed() {
    let dataset = sportovko();
    let view = ScheduleResolver::new(Locale::English)
        .resolve(&dataset, "chotebor_m", "sportovko", d(2024, 12, 1))
        .found()
        .unwrap();
    let days: Vec<Weekday> = view.regular_schedule.iter().map(|r| r.weekday).collect();
    assert_eq!(
        days,
        vec![Weekday::Mon, Weekday::Tue, Weekday::Wed, Weekday::Thu, Weekday::Fri]
    );
    assert!(view.regular_schedule[1..].iter().all(|r| r.hours == "closed"));
}

#[test]
fn sunday_is_never_listed() {
    let hours = RegularHours::default()
        .with(Weekday::Mon, DaySchedule::morning("0700", "1100"))
        .with(Weekday::Sat, DaySchedule::morning("0800", "1000"))
        .with(Weekday::Sun, DaySchedule::morning("0900", "1000"));
    let days = weekdays(&record_with_hours(hours));
    assert!(!days.contains(&Weekday::Sun));
    assert_eq!(days.last(), Some(&Weekday::Sat));
}

#[test]
fn saturday_is_hidden_unless_open() {
    let base = RegularHours::default().with(Weekday::Mon, DaySchedule::morning("0700", "1100"));

    assert!(!weekdays(&record_with_hours(base.clone())).contains(&Weekday::Sat));

    let no_morning = DaySchedule {
        afternoon_open: Some("1300".into()),
        afternoon_close: Some("1500".into()),
        ..DaySchedule::default()
    };
    let hours = base.clone().with(Weekday::Sat, no_morning);
    assert!(!weekdays(&record_with_hours(hours)).contains(&Weekday::Sat));

    let mut marked_closed = DaySchedule::morning("0800", "1000");
    marked_closed.closed = Some(true);
    let hours = base.clone().with(Weekday::Sat, marked_closed);
    assert!(!weekdays(&record_with_hours(hours)).contains(&Weekday::Sat));

    let hours = base.with(Weekday::Sat, DaySchedule::morning("0800", "1000"));
    assert!(weekdays(&record_with_hours(hours)).contains(&Weekday::Sat));
}

#[test]
fn office_without_hours_is_by_appointment_only() {
    let hours = RegularHours::default()
        .with(Weekday::Mon, DaySchedule::default().with_note("volejte"))
        .with(Weekday::Tue, DaySchedule::default());
    let view = ScheduleResolver::new(Locale::English)
        .view(&record_with_hours(hours), d(2025, 1, 1));
    assert!(view.by_appointment_only);
    assert_eq!(view.regular_schedule.len(), 1);
    let row = &view.regular_schedule[0];
    assert_eq!(row.weekday, Weekday::Mon);
    assert_eq!(row.note.as_deref(), Some("volejte"));
    assert!(row.by_appointment);
}

#[test]
fn closed_saturday_note_is_dropped_for_appointment_only_office() {
    let mut saturday = DaySchedule::default().with_note("jen objednaní");
    saturday.closed = Some(true);
    let hours = RegularHours::default()
        .with(Weekday::Mon, DaySchedule::default().with_note("volejte"))
        .with(Weekday::Sat, saturday);
    let view = ScheduleResolver::default().view(&record_with_hours(hours), d(2025, 1, 1));
    assert!(view.by_appointment_only);
    let days: Vec<Weekday> = view.regular_schedule.iter().map(|row| row.weekday).collect();
    assert_eq!(days, vec![Weekday::Mon]);
}

#[test]
fn saturday_marked_closed_still_opens_the_week() {
    let mut saturday = DaySchedule::morning("0800", "1000");
    saturday.closed = Some(true);
    let hours = RegularHours::default().with(Weekday::Sat, saturday);
    let view = ScheduleResolver::new(Locale::English).view(&record_with_hours(hours), d(2025, 1, 1));
    assert!(!view.by_appointment_only);
    let days: Vec<Weekday> = view.regular_schedule.iter().map(|row| row.weekday).collect();
    assert_eq!(
        days,
        vec![Weekday::Mon, Weekday::Tue, Weekday::Wed, Weekday::Thu, Weekday::Fri]
    );
    assert!(view
        .regular_schedule
        .iter()
        .all(|row| row.hours == "closed" && !row.by_appointment));
}

#[test]
fn sunday_hours_do_not_count_as_open() {
    let hours = RegularHours::default()
        .with(Weekday::Sun, DaySchedule::morning("0800", "1000"))
        .with(Weekday::Wed, DaySchedule::default().with_note("jen akutní"));
    let view = ScheduleResolver::default().view(&record_with_hours(hours), d(2025, 1, 1));
    assert!(view.by_appointment_only);
    assert_eq!(view.regular_schedule.len(), 1);
    assert_eq!(view.regular_schedule[0].weekday, Weekday::Wed);
}

#[test]
fn invalid_morning_open_counts_as_closed() {
    let hours = RegularHours::default().with(Weekday::Mon, DaySchedule::morning("800", "1200"));
    let view = ScheduleResolver::default().view(&record_with_hours(hours), d(2025, 1, 1));
    assert!(view.by_appointment_only);
    assert!(view.regular_schedule.is_empty());
}

#[test]
fn past_changes_are_filtered_and_rest_sorted() {
    let mut record = OfficeRecord::new("malec", "ordinace");
    record.irregular_changes = vec![
        DateException::closure("05012025"),
        DateException::closure("31122024").with_note("Silvestr"),
        DateException::altered("02012025", DaySchedule::morning("0900", "1100")),
        DateException::closure("01012025"),
    ];
    let changes = ScheduleResolver::default()
        .upcoming_changes(&record.irregular_changes, d(2025, 1, 1));
    let labels: Vec<&str> = changes.iter().map(|c| c.date_label.as_str()).collect();
    assert_eq!(labels, vec!["01.01.2025", "02.01.2025", "05.01.2025"]);
    assert_eq!(changes[1].hours, "09:00 - 11:00");
    assert!(!changes[1].closed);
}

#[test]
fn reference_date_example() {
    let changes = vec![
        DateException::closure("31122024"),
        DateException::closure("02012025"),
    ];
    let upcoming = ScheduleResolver::default().upcoming_changes(&changes, d(2025, 1, 1));
    assert_eq!(upcoming.len(), 1);
    assert_eq!(upcoming[0].date, d(2025, 1, 2));
}

#[test]
fn unparseable_dates_are_never_upcoming() {
    let changes = vec![
        DateException::closure("1012025"),
        DateException::closure("2025-01-10"),
        DateException::closure("32132030"),
        DateException::closure(""),
        DateException::closure("10012025"),
    ];
    let upcoming = ScheduleResolver::default().upcoming_changes(&changes, d(2025, 1, 1));
    assert_eq!(upcoming.len(), 1);
    assert_eq!(upcoming[0].date_label, "10.01.2025");
}

#[test]
fn altered_day_without_hours_shows_closed() {
    let changes = vec![
        DateException {
            date: "03012025".into(),
            ..DateException::default()
        }
        .with_note("porada"),
    ];
    let upcoming = ScheduleResolver::new(Locale::English).upcoming_changes(&changes, d(2025, 1, 1));
    assert_eq!(upcoming[0].display_text(), "closed (porada)");
    assert!(!upcoming[0].closed);
}

#[test]
fn changes_on_picks_exact_date() {
    let mut record = OfficeRecord::new("kolin", "centrum");
    record.irregular_changes = vec![
        DateException::closure("06012025"),
        DateException::closure("07012025").with_note("školení"),
    ];
    let today = ScheduleResolver::default().changes_on(&record, d(2025, 1, 7));
    assert_eq!(today.len(), 1);
    assert_eq!(today[0].note.as_deref(), Some("školení"));
}

#[test]
fn overview_groups_by_town_in_first_seen_order() {
    let mut a = OfficeRecord::new("hlinsko", "poliklinika");
    a.irregular_changes = vec![DateException::closure("10012025")];
    let b = OfficeRecord::new("kolin", "centrum");
    let mut c = OfficeRecord::new("hlinsko", "skola");
    c.irregular_changes = vec![DateException::closure("01012020")];
    let duplicate = OfficeRecord::new("hlinsko", "poliklinika");

    let towns = ScheduleResolver::default().overview(&[a, b, c, duplicate], d(2025, 1, 1));
    assert_eq!(towns.len(), 2);
    assert_eq!(towns[0].town, "hlinsko");
    assert_eq!(towns[1].town, "kolin");
    let offices: Vec<&str> = towns[0].offices.iter().map(|o| o.office.as_str()).collect();
    assert_eq!(offices, vec!["poliklinika", "skola"]);
    assert_eq!(towns[0].offices[0].changes.len(), 1);
    assert!(towns[0].offices[1].changes.is_empty());
}

#[test]
fn resolution_serializes_with_status_tag() {
    let value = serde_json::to_value(Resolution::NotFound {
        town: "x".into(),
        office: "y".into(),
    })
    .unwrap();
    assert_eq!(value["status"], json!("not_found"));
    assert_eq!(value["town"], json!("x"));
}
