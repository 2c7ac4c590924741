//! Run summary formatting
//!
//! Everything here goes to stderr; stdout is reserved for log lines.

use std::time::Duration;

use crate::cli::VerbosityLevel;
use crate::driver::{FileOutcome, FileStatus, RunSummary};

/// Human-readable formatter for run diagnostics
pub struct Output {
    verbosity: VerbosityLevel,
    show_colors: bool,
}

impl Output {
    pub fn new(verbosity: VerbosityLevel) -> Self {
        Self {
            verbosity,
            show_colors: atty::is(atty::Stream::Stderr),
        }
    }

    /// Formatter that never emits ANSI colour codes
    pub fn plain(verbosity: VerbosityLevel) -> Self {
        Self {
            verbosity,
            show_colors: false,
        }
    }

    fn colorize(&self, text: &str, color: &str) -> String {
        if self.show_colors {
            format!("\x1b[{}m{}\x1b[0m", color, text)
        } else {
            text.to_string()
        }
    }

    pub fn format_summary(&self, summary: &RunSummary) -> String {
        let mut output = String::new();

        if self.verbosity == VerbosityLevel::Quiet {
            if summary.failed_files > 0 {
                output.push_str(&format!("Failed: {}\n", summary.failed_files));
            }
            return output;
        }

        output.push_str("Run Summary:\n");
        output.push_str(&format!("  Entries: {}\n", summary.total_entries));
        output.push_str(&format!(
            "  {} {}\n",
            self.colorize("Emitted:", "32"),
            summary.emitted_files
        ));

        if summary.skipped_files > 0 {
            output.push_str(&format!(
                "  {} {}\n",
                self.colorize("Skipped:", "36"),
                summary.skipped_files
            ));
        }
        if summary.failed_files > 0 {
            output.push_str(&format!(
                "  {} {}\n",
                self.colorize("Failed:", "33"),
                summary.failed_files
            ));
        }

        output.push_str(&format!("  Records: {}\n", summary.records_written));
        output.push_str(&format!(
            "  Duration: {}\n",
            format_duration(summary.duration)
        ));

        output
    }

    /// One line for a file that produced no records; `None` for emitted files
    pub fn format_file_outcome(&self, outcome: &FileOutcome) -> Option<String> {
        let path_display = outcome.path.display();

        match &outcome.status {
            FileStatus::Emitted { .. } => None,
            FileStatus::Skipped { reason } => Some(format!(
                "{}  {} - {}",
                self.colorize("- SKIPPED", "36"),
                path_display,
                reason
            )),
            FileStatus::Failed { message } => Some(format!(
                "{}  {} - {}",
                self.colorize("⚠ FAILED", "33"),
                path_display,
                message
            )),
        }
    }
}

fn format_duration(duration: Duration) -> String {
    let total_secs = duration.as_secs_f64();
    if total_secs < 1.0 {
        format!("{:.0}ms", duration.as_millis())
    } else if total_secs < 60.0 {
        format!("{:.2}s", total_secs)
    } else {
        let mins = (total_secs / 60.0) as u64;
        let secs = total_secs % 60.0;
        format!("{}m{:.1}s", mins, secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SkipReason;
    use std::path::PathBuf;

    fn create_test_summary() -> RunSummary {
        RunSummary {
            total_entries: 5,
            emitted_files: 3,
            skipped_files: 1,
            failed_files: 1,
            records_written: 7,
            duration: Duration::from_millis(120),
        }
    }

    #[test]
    fn test_output_summary() {
        let output = Output::plain(VerbosityLevel::Normal);
        let formatted = output.format_summary(&create_test_summary());

        assert!(formatted.starts_with("Run Summary:\n"));
        assert!(formatted.contains("  Entries: 5\n"));
        assert!(formatted.contains("  Emitted: 3\n"));
        assert!(formatted.contains("  Skipped: 1\n"));
        assert!(formatted.contains("  Failed: 1\n"));
        assert!(formatted.contains("  Records: 7\n"));
        assert!(formatted.contains("  Duration: 120ms\n"));
    }

    #[test]
    fn test_clean_run_omits_problem_counts() {
        let output = Output::plain(VerbosityLevel::Normal);
        let summary = RunSummary {
            skipped_files: 0,
            failed_files: 0,
            ..create_test_summary()
        };
        let formatted = output.format_summary(&summary);

        assert!(!formatted.contains("Skipped"));
        assert!(!formatted.contains("Failed"));
    }

    #[test]
    fn test_quiet_summary() {
        let output = Output::plain(VerbosityLevel::Quiet);
        assert_eq!(output.format_summary(&create_test_summary()), "Failed: 1\n");

        let clean = RunSummary::default();
        assert_eq!(output.format_summary(&clean), "");
    }

    #[test]
    fn test_file_outcome_lines() {
        let output = Output::plain(VerbosityLevel::Verbose);

        let emitted = FileOutcome {
            path: PathBuf::from("bibxml3/a.xml"),
            status: FileStatus::Emitted { records: 2 },
        };
        assert_eq!(output.format_file_outcome(&emitted), None);

        let skipped = FileOutcome {
            path: PathBuf::from("bibxml3/b.xml"),
            status: FileStatus::Skipped {
                reason: SkipReason::MissingTitle,
            },
        };
        let line = output.format_file_outcome(&skipped).unwrap();
        assert!(line.starts_with("- SKIPPED  bibxml3/b.xml - "));

        let failed = FileOutcome {
            path: PathBuf::from("bibxml3/c.xml"),
            status: FileStatus::Failed {
                message: "XML parsing failed".to_string(),
            },
        };
        assert_eq!(
            output.format_file_outcome(&failed).unwrap(),
            "⚠ FAILED  bibxml3/c.xml - XML parsing failed"
        );
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::from_millis(5)), "5ms");
        assert_eq!(format_duration(Duration::from_millis(2500)), "2.50s");
        assert_eq!(format_duration(Duration::from_secs(125)), "2m5.0s");
    }
}
