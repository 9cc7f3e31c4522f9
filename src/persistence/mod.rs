use crate::office::Dataset;
use serde_json::Error as SerdeJsonError;
use std::fmt;
use std::io;

/// The dataset could not be obtained. Hosts show a generic failure message.
#[derive(Debug)]
pub enum DatasetError {
    Serialization(SerdeJsonError),
    Io(io::Error),
    Csv(csv::Error),
}

impl fmt::Display for DatasetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatasetError::Serialization(err) => write!(f, "dataset is not valid JSON: {err}"),
            DatasetError::Io(err) => write!(f, "io error: {err}"),
            DatasetError::Csv(err) => write!(f, "csv error: {err}"),
        }
    }
}

impl std::error::Error for DatasetError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DatasetError::Serialization(err) => Some(err),
            DatasetError::Io(err) => Some(err),
            DatasetError::Csv(err) => Some(err),
        }
    }
}

impl From<SerdeJsonError> for DatasetError {
    fn from(value: SerdeJsonError) -> Self {
        Self::Serialization(value)
    }
}

impl From<io::Error> for DatasetError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<csv::Error> for DatasetError {
    fn from(value: csv::Error) -> Self {
        Self::Csv(value)
    }
}

pub type DatasetResult<T> = Result<T, DatasetError>;

/// Where the dataset comes from. Every call returns a fresh copy.
pub trait DatasetSource {
    fn load(&self) -> DatasetResult<Dataset>;
}

/// A dataset held in memory, mostly useful for tests and embedding.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    dataset: Dataset,
}

impl StaticSource {
    pub fn new(dataset: Dataset) -> Self {
        Self { dataset }
    }
}

impl DatasetSource for StaticSource {
    fn load(&self) -> DatasetResult<Dataset> {
        Ok(self.dataset.clone())
    }
}

pub mod file;

pub use file::{
    JsonFileSource, load_dataset_from_json, load_dataset_from_reader, load_dataset_from_str,
    save_upcoming_changes_to_csv, write_upcoming_changes_csv,
};
