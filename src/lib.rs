//! # id-log Library
//!
//! Turns a directory of bibxml Internet-Draft reference files into a gource custom log:
//! one `timestamp|author|M|path|colour` line per author of every usable draft.

pub mod areas;
pub mod cli;
pub mod colours;
pub mod config;
pub mod draft;
pub mod driver;
pub mod error;
pub mod extractor;
pub mod libxml2;
pub mod output;
pub mod record;

pub use areas::{Area, area_of};
pub use cli::{Cli, VerbosityLevel};
pub use colours::{IETF_COLOUR, IRTF_COLOUR, OTHER_COLOUR, area_colour, colour_of};
pub use config::{Config, ConfigError, ConfigManager, EnvProvider, SystemEnvProvider};
pub use draft::{DraftIdentity, DraftNameError};
pub use driver::{Driver, FileOutcome, FileStatus, RunSummary};
pub use error::{IdLogError, SkipReason, XmlError};
pub use extractor::{DraftFileReference, DraftFileSource, extract_draft_file_name, locate_draft_file};
pub use libxml2::XmlDocument;
pub use output::Output;
pub use record::{
    DocumentRecords, LogRecord, PublicationDate, RandomTimeOfDay, RecordOutcome,
    RecordProcessor, TimeOfDaySource, TimeZoneConfig,
};
