//! Batch driver: every entry of the input directory is treated as a bibxml reference.
//!
//! Entries are read one at a time, in whatever order the file system yields them. No
//! entry can abort the batch: unreadable files, malformed XML and unusable references
//! are recorded as per-file outcomes and the run continues. Only an unreadable input
//! directory or a failed write to the output sink stops the run.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use tracing::{debug, info};

use crate::config::Config;
use crate::error::{IdLogError, Result, SkipReason};
use crate::libxml2::XmlDocument;
use crate::record::{RandomTimeOfDay, RecordOutcome, RecordProcessor, TimeOfDaySource};

/// What happened to a single directory entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileStatus {
    /// The reference was usable; `records` lines were written (possibly zero)
    Emitted { records: usize },
    /// Well-formed but lacking required data
    Skipped { reason: SkipReason },
    /// Unreadable or not well-formed XML
    Failed { message: String },
}

impl FileStatus {
    pub fn is_emitted(&self) -> bool {
        matches!(self, FileStatus::Emitted { .. })
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, FileStatus::Skipped { .. })
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, FileStatus::Failed { .. })
    }
}

/// Outcome of processing one directory entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileOutcome {
    pub path: PathBuf,
    pub status: FileStatus,
}

/// Aggregated counts for a run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Directory entries visited
    pub total_entries: usize,
    pub emitted_files: usize,
    pub skipped_files: usize,
    pub failed_files: usize,
    /// Log lines written
    pub records_written: usize,
    pub duration: Duration,
}

impl RunSummary {
    fn record(&mut self, status: &FileStatus) {
        self.total_entries += 1;
        match status {
            FileStatus::Emitted { records } => {
                self.emitted_files += 1;
                self.records_written += records;
            }
            FileStatus::Skipped { .. } => self.skipped_files += 1,
            FileStatus::Failed { .. } => self.failed_files += 1,
        }
    }
}

/// Sequential directory-to-log pipeline
pub struct Driver<T: TimeOfDaySource> {
    processor: RecordProcessor<T>,
}

impl Driver<RandomTimeOfDay> {
    /// Driver with a random time-of-day source, seeded from configuration if requested
    pub fn from_config(config: &Config) -> Self {
        Self::new(RecordProcessor::new(
            RandomTimeOfDay::new(config.dates.seed),
            config.dates.timezone,
        ))
    }
}

impl<T: TimeOfDaySource> Driver<T> {
    pub fn new(processor: RecordProcessor<T>) -> Self {
        Self { processor }
    }

    /// Process every entry of `dir`, writing one line per record to `out`.
    ///
    /// # Errors
    ///
    /// Returns `IdLogError::InputDirectory` if `dir` cannot be listed and
    /// `IdLogError::Output` if writing to `out` fails. Per-file problems are not errors.
    pub fn run<W: Write>(&mut self, dir: &Path, out: &mut W) -> Result<RunSummary> {
        self.run_with(dir, out, |_| {})
    }

    /// Like [`Driver::run`], reporting each file's outcome to `on_file`
    pub fn run_with<W, F>(&mut self, dir: &Path, out: &mut W, mut on_file: F) -> Result<RunSummary>
    where
        W: Write,
        F: FnMut(&FileOutcome),
    {
        let start = Instant::now();
        let entries = fs::read_dir(dir).map_err(|source| IdLogError::InputDirectory {
            path: dir.to_path_buf(),
            source,
        })?;

        let mut summary = RunSummary::default();

        for entry in entries {
            let outcome = match entry {
                Ok(entry) => {
                    let path = entry.path();
                    let status = self.process_file(&path, out)?;
                    FileOutcome { path, status }
                }
                Err(err) => FileOutcome {
                    path: dir.to_path_buf(),
                    status: FileStatus::Failed {
                        message: format!("unreadable directory entry: {err}"),
                    },
                },
            };

            match &outcome.status {
                FileStatus::Emitted { records } => {
                    debug!(path = %outcome.path.display(), records, "emitted");
                }
                FileStatus::Skipped { reason } => {
                    debug!(path = %outcome.path.display(), %reason, "skipped reference");
                }
                FileStatus::Failed { message } => {
                    debug!(path = %outcome.path.display(), error = %message, "skipped file");
                }
            }

            summary.record(&outcome.status);
            on_file(&outcome);
        }

        out.flush().map_err(IdLogError::Output)?;
        summary.duration = start.elapsed();

        info!(
            entries = summary.total_entries,
            emitted = summary.emitted_files,
            skipped = summary.skipped_files,
            failed = summary.failed_files,
            records = summary.records_written,
            "run complete"
        );

        Ok(summary)
    }

    /// Process a single file, writing its records to `out`.
    ///
    /// # Errors
    ///
    /// Only output failures are returned; everything else becomes a `FileStatus`.
    pub fn process_file<W: Write>(&mut self, path: &Path, out: &mut W) -> Result<FileStatus> {
        let outcome = match self.read_reference(path) {
            Ok(outcome) => outcome,
            Err(err) => {
                return Ok(FileStatus::Failed {
                    message: err.to_string(),
                });
            }
        };

        match outcome {
            RecordOutcome::Skip(reason) => Ok(FileStatus::Skipped { reason }),
            RecordOutcome::Emit(document) => {
                let mut records = 0;
                for record in document.records() {
                    writeln!(out, "{record}").map_err(IdLogError::Output)?;
                    records += 1;
                }
                Ok(FileStatus::Emitted { records })
            }
        }
    }

    fn read_reference(&mut self, path: &Path) -> Result<RecordOutcome> {
        let bytes = fs::read(path).map_err(|source| IdLogError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;
        let doc = XmlDocument::parse(&bytes)?;
        self.processor.process(&doc)
    }
}
