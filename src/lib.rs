pub mod calendar;
pub mod config;
#[cfg(feature = "http_api")]
pub mod http_api;
pub mod locale;
pub mod office;
pub mod persistence;
pub mod render;
pub mod resolver;
pub mod telemetry;

pub use calendar::{DateParts, TimeCode, format_date, parse_date, parse_date_parts};
pub use config::{ConfigError, ServerConfig};
pub use locale::{Labels, Locale, UnknownLocale};
pub use office::{Contact, Dataset, DateException, DaySchedule, OfficeRecord, RegularHours};
pub use persistence::{
    DatasetError, DatasetResult, DatasetSource, JsonFileSource, StaticSource,
    load_dataset_from_json, load_dataset_from_reader, load_dataset_from_str,
    save_upcoming_changes_to_csv, write_upcoming_changes_csv,
};
pub use render::{HtmlRenderer, RenderOptions, Renderer, TextRenderer, TownPalette};
pub use resolver::{
    OfficeChanges, RegularDay, Resolution, ResolvedView, ScheduleResolver, TownChanges,
    UpcomingChange,
};
