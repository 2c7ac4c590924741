//! Turning one bibxml reference into gource log records.
//!
//! A reference yields one [`LogRecord`] per named author. References without a title,
//! a usable date or a locatable draft file name are skipped, never treated as errors.
//!
//! bibxml dates carry no time of day. Each reference gets a synthesized hour and minute
//! from a [`TimeOfDaySource`], spreading records that share a publication date.

use std::fmt;

use chrono::{DateTime, Local, Month, NaiveDate, NaiveDateTime, TimeDelta, TimeZone};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::colours::colour_of;
use crate::draft::DraftIdentity;
use crate::error::{IdLogError, SkipReason, XmlResult};
use crate::extractor::locate_draft_file;
use crate::libxml2::XmlDocument;

/// gource action type: every record is a modification
pub const RECORD_TYPE: &str = "M";

const TITLE: &str = "/reference/front/title";
const DATE: &str = "/reference/front/date";
const DATE_YEAR: &str = "/reference/front/date[1]/@year";
const DATE_MONTH: &str = "/reference/front/date[1]/@month";
const DATE_DAY: &str = "/reference/front/date[1]/@day";
const AUTHORS: &str = "/reference/front/author";

/// Source of the synthesized time of day
#[cfg_attr(test, mockall::automock)]
pub trait TimeOfDaySource {
    /// Hour in `0..24`
    fn hour(&mut self) -> u32;
    /// Minute in `0..60`
    fn minute(&mut self) -> u32;
}

/// Uniformly random time of day
pub struct RandomTimeOfDay {
    rng: StdRng,
}

impl RandomTimeOfDay {
    /// Seeded for reproducible output, or from OS entropy when `seed` is `None`
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self { rng }
    }
}

impl TimeOfDaySource for RandomTimeOfDay {
    fn hour(&mut self) -> u32 {
        self.rng.random_range(0..24)
    }

    fn minute(&mut self) -> u32 {
        self.rng.random_range(0..60)
    }
}

/// Time zone in which publication dates are converted to epoch seconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeZoneConfig {
    /// The host's local time zone
    #[default]
    Local,
    Utc,
}

/// Publication date as recorded in `<date year month day>`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PublicationDate {
    pub year: i32,
    pub month: Month,
    pub day: u32,
}

impl PublicationDate {
    /// Build a date from raw attribute values; month defaults to January and day to 1.
    ///
    /// The year must be exactly four digits. Month names are matched
    /// case-insensitively and may be abbreviated.
    pub fn from_parts(
        year: &str,
        month: Option<&str>,
        day: Option<&str>,
    ) -> Result<Self, SkipReason> {
        let digits = year.trim();
        if digits.len() != 4 || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(SkipReason::InvalidDate {
                details: format!("year '{year}' is not four digits"),
            });
        }
        let year = digits.parse::<i32>().map_err(|_| SkipReason::InvalidDate {
            details: format!("year '{year}'"),
        })?;

        let month = match month {
            Some(name) => name.trim().parse::<Month>().map_err(|_| SkipReason::InvalidDate {
                details: format!("month '{name}'"),
            })?,
            None => Month::January,
        };

        let day = match day {
            Some(value) => value.trim().parse::<u32>().map_err(|_| SkipReason::InvalidDate {
                details: format!("day '{value}'"),
            })?,
            None => 1,
        };

        let date = Self { year, month, day };
        date.naive_date()?;
        Ok(date)
    }

    /// Read the first `front/date` element of a reference
    pub fn from_document(doc: &XmlDocument) -> Result<Result<Self, SkipReason>, IdLogError> {
        let Some(year) = doc.attribute(DATE_YEAR)? else {
            return Ok(Err(SkipReason::MissingYear));
        };
        let month = doc.attribute(DATE_MONTH)?;
        let day = doc.attribute(DATE_DAY)?;

        Ok(Self::from_parts(&year, month.as_deref(), day.as_deref()))
    }

    fn naive_date(&self) -> Result<NaiveDate, SkipReason> {
        NaiveDate::from_ymd_opt(self.year, self.month.number_from_month(), self.day).ok_or_else(
            || SkipReason::InvalidDate {
                details: format!(
                    "{} {} {} is not a calendar date",
                    self.year,
                    self.month.name(),
                    self.day
                ),
            },
        )
    }

    /// Epoch seconds at `hour:minute:00` on this date
    pub fn timestamp(
        &self,
        hour: u32,
        minute: u32,
        time_zone: TimeZoneConfig,
    ) -> Result<i64, SkipReason> {
        let naive = self
            .naive_date()?
            .and_hms_opt(hour, minute, 0)
            .ok_or_else(|| SkipReason::InvalidDate {
                details: format!("time {hour:02}:{minute:02} out of range"),
            })?;

        match time_zone {
            TimeZoneConfig::Utc => Ok(naive.and_utc().timestamp()),
            TimeZoneConfig::Local => local_timestamp(naive),
        }
    }
}

/// Local wall-clock time to epoch seconds; times skipped by a DST transition
/// move forward one hour.
fn local_timestamp(naive: NaiveDateTime) -> Result<i64, SkipReason> {
    let resolve = |naive: NaiveDateTime| -> Option<DateTime<Local>> {
        Local.from_local_datetime(&naive).earliest()
    };

    resolve(naive)
        .or_else(|| resolve(naive + TimeDelta::hours(1)))
        .map(|local| local.timestamp())
        .ok_or_else(|| SkipReason::InvalidDate {
            details: format!("{naive} does not exist in the local time zone"),
        })
}

/// One gource custom log line: `timestamp|author|M|path|colour`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    pub timestamp: i64,
    pub author: String,
    pub path: String,
    pub colour: &'static str,
}

impl fmt::Display for LogRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}|{}|{}|{}|{}",
            self.timestamp, self.author, RECORD_TYPE, self.path, self.colour
        )
    }
}

/// Everything shared by the records of one reference
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentRecords {
    pub timestamp: i64,
    pub identity: DraftIdentity,
    pub path: String,
    pub colour: &'static str,
    /// `fullname` of every author, in document order; unnamed authors are `None`
    pub authors: Vec<Option<String>>,
}

impl DocumentRecords {
    /// One record per author with a non-empty name
    pub fn records(&self) -> impl Iterator<Item = LogRecord> + '_ {
        self.authors
            .iter()
            .flatten()
            .filter(|name| !name.is_empty())
            .map(|author| LogRecord {
                timestamp: self.timestamp,
                author: author.clone(),
                path: self.path.clone(),
                colour: self.colour,
            })
    }
}

/// Result of processing one parsed reference
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordOutcome {
    Emit(DocumentRecords),
    Skip(SkipReason),
}

/// Per-document pipeline: date, draft file name, identity, colour, authors
pub struct RecordProcessor<T: TimeOfDaySource> {
    time_source: T,
    time_zone: TimeZoneConfig,
}

impl<T: TimeOfDaySource> RecordProcessor<T> {
    pub fn new(time_source: T, time_zone: TimeZoneConfig) -> Self {
        Self {
            time_source,
            time_zone,
        }
    }

    /// Process one reference.
    ///
    /// # Errors
    ///
    /// Only XPath evaluation failures are errors; missing or unusable data is
    /// reported as `RecordOutcome::Skip`.
    pub fn process(&mut self, doc: &XmlDocument) -> Result<RecordOutcome, IdLogError> {
        if !doc.exists(TITLE)? {
            return Ok(RecordOutcome::Skip(SkipReason::MissingTitle));
        }
        if !doc.exists(DATE)? {
            return Ok(RecordOutcome::Skip(SkipReason::MissingDate));
        }

        let date = match PublicationDate::from_document(doc)? {
            Ok(date) => date,
            Err(reason) => return Ok(RecordOutcome::Skip(reason)),
        };
        let hour = self.time_source.hour();
        let minute = self.time_source.minute();
        let timestamp = match date.timestamp(hour, minute, self.time_zone) {
            Ok(timestamp) => timestamp,
            Err(reason) => return Ok(RecordOutcome::Skip(reason)),
        };

        let Some(reference) = locate_draft_file(doc)? else {
            return Ok(RecordOutcome::Skip(SkipReason::NoDraftFileName));
        };
        debug!(
            file_name = %reference.file_name,
            source = %reference.source,
            "located draft file name"
        );

        let identity = match DraftIdentity::parse(&reference.file_name) {
            Ok(identity) => identity,
            Err(err) => {
                return Ok(RecordOutcome::Skip(SkipReason::MalformedDraftName {
                    file_name: reference.file_name,
                    details: err.to_string(),
                }));
            }
        };

        Ok(RecordOutcome::Emit(DocumentRecords {
            timestamp,
            path: identity.path(),
            colour: colour_of(&identity),
            identity,
            authors: author_names(doc)?,
        }))
    }
}

fn author_names(doc: &XmlDocument) -> XmlResult<Vec<Option<String>>> {
    let count = doc.count(AUTHORS)?;
    (1..=count)
        .map(|index| doc.attribute(&format!("{AUTHORS}[{index}]/@fullname")))
        .collect()
}
