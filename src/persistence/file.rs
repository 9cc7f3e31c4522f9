use super::{DatasetResult, DatasetSource};
use crate::office::{Dataset, OfficeRecord};
use crate::resolver::ScheduleResolver;
use chrono::NaiveDate;
use serde::Serialize;
use std::fs::File;
use std::io::{BufReader, Read, Write};
use std::path::{Path, PathBuf};

pub fn load_dataset_from_json<P: AsRef<Path>>(path: P) -> DatasetResult<Dataset> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let dataset = load_dataset_from_reader(BufReader::new(file))?;
    tracing::debug!(path = %path.display(), records = dataset.len(), "dataset loaded");
    Ok(dataset)
}

pub fn load_dataset_from_reader<R: Read>(reader: R) -> DatasetResult<Dataset> {
    Ok(serde_json::from_reader(reader)?)
}

pub fn load_dataset_from_str(json: &str) -> DatasetResult<Dataset> {
    Ok(serde_json::from_str(json)?)
}

/// Reads a JSON file on every `load`, so edits show up without a restart.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DatasetSource for JsonFileSource {
    fn load(&self) -> DatasetResult<Dataset> {
        load_dataset_from_json(&self.path)
    }
}

#[derive(Serialize)]
struct ChangeCsvRecord<'a> {
    town: &'a str,
    office: &'a str,
    date: String,
    weekday: String,
    closed: bool,
    hours: String,
    note: String,
}

/// Writes one CSV row per upcoming change, records in dataset order.
pub fn write_upcoming_changes_csv<W: Write>(
    dataset: &[OfficeRecord],
    resolver: &ScheduleResolver,
    reference_date: NaiveDate,
    writer: W,
) -> DatasetResult<usize> {
    let mut writer = csv::Writer::from_writer(writer);
    let mut rows = 0;
    for record in dataset {
        for change in resolver.upcoming_changes(&record.irregular_changes, reference_date) {
            writer.serialize(ChangeCsvRecord {
                town: &record.town,
                office: &record.office,
                date: change.date_label,
                weekday: change.weekday,
                closed: change.closed,
                hours: change.hours,
                note: change.note.unwrap_or_default(),
            })?;
            rows += 1;
        }
    }
    writer.flush()?;
    Ok(rows)
}

pub fn save_upcoming_changes_to_csv<P: AsRef<Path>>(
    dataset: &[OfficeRecord],
    resolver: &ScheduleResolver,
    reference_date: NaiveDate,
    path: P,
) -> DatasetResult<usize> {
    let file = File::create(path)?;
    write_upcoming_changes_csv(dataset, resolver, reference_date, file)
}
