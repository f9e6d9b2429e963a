//! Error types for the slideaudit library.

use std::io;
use thiserror::Error;

/// Result type alias for slideaudit operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while analyzing a presentation.
///
/// Variants other than [`Error::MalformedPart`] are fatal for the whole
/// run: without a readable container and presentation manifest no report
/// can be produced. A malformed individual part is downgraded by the
/// analyzer to a per-slide fault in the report instead of surfacing here.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The input is not a ZIP archive at all.
    #[error("Not a presentation container (missing ZIP signature)")]
    NotAnArchive,

    /// Error reading the ZIP archive.
    #[error("ZIP archive error: {0}")]
    ZipArchive(String),

    /// A required part is missing from the container.
    #[error("Missing part: {0}")]
    MissingPart(String),

    /// The presentation manifest could not be parsed.
    #[error("XML parse error: {0}")]
    XmlParse(String),

    /// One slide/theme/chart part's XML could not be parsed.
    ///
    /// Non-fatal at the analysis level: the affected slide is recorded
    /// as unanalyzable and the run continues.
    #[error("Malformed part {part}: {reason}")]
    MalformedPart {
        /// Archive path of the offending part.
        part: String,
        /// Underlying parser message.
        reason: String,
    },
}

impl From<zip::result::ZipError> for Error {
    fn from(err: zip::result::ZipError) -> Self {
        Error::ZipArchive(err.to_string())
    }
}

impl From<quick_xml::Error> for Error {
    fn from(err: quick_xml::Error) -> Self {
        Error::XmlParse(err.to_string())
    }
}
