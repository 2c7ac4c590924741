use std::path::PathBuf;

use thiserror::Error;

/// Main application error type that encompasses all fatal and per-file failure modes
#[derive(Error, Debug)]
pub enum IdLogError {
    #[error("Cannot read input directory: {path} - {source}")]
    InputDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot read {path}: {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("XML error: {0}")]
    Xml(#[from] XmlError),

    #[error("Failed to write log line: {0}")]
    Output(#[source] std::io::Error),
}

impl IdLogError {
    /// The output reader went away; the run stops without being a failure
    pub fn is_broken_pipe(&self) -> bool {
        matches!(self, IdLogError::Output(err) if err.kind() == std::io::ErrorKind::BrokenPipe)
    }
}

/// libxml2-specific error types
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum XmlError {
    #[error("Document parsing failed: not well-formed XML")]
    ParseFailed,

    #[error("Document is empty")]
    EmptyDocument,

    #[error("Document too large for libxml2: {size} bytes")]
    DocumentTooLarge { size: usize },

    #[error("XPath context creation failed")]
    XPathContextFailed,

    #[error("XPath evaluation failed: {expression}")]
    XPathEvaluationFailed { expression: String },

    #[error("XPath expression contains an interior NUL byte: {expression}")]
    InvalidExpression { expression: String },

    #[error("Unexpected XPath result type for {expression}")]
    UnexpectedResultType { expression: String },
}

/// Why a well-formed document produced no log lines.
///
/// Skips are expected in a heterogeneous bibxml corpus and are never fatal.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    #[error("no front/title element")]
    MissingTitle,

    #[error("no front/date element")]
    MissingDate,

    #[error("date has no year attribute")]
    MissingYear,

    #[error("invalid date: {details}")]
    InvalidDate { details: String },

    #[error("no draft file name could be located")]
    NoDraftFileName,

    #[error("unusable draft file name {file_name}: {details}")]
    MalformedDraftName { file_name: String, details: String },
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, IdLogError>;

/// libxml2 result type alias
pub type XmlResult<T> = std::result::Result<T, XmlError>;
