//! Custom error types for scan-file processing

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Scan-file-specific error types
#[derive(Debug)]
pub enum ScanError {
    /// I/O error
    IoError(io::Error),
    /// Invalid TIFF header
    InvalidHeader,
    /// Invalid byte order marker
    InvalidByteOrder(u16),
    /// Invalid BigTIFF header
    InvalidBigTiffHeader,
    /// Unsupported TIFF version
    UnsupportedVersion(u16),
    /// Tag not found
    TagNotFound(u16),
    /// Unsupported field type
    UnsupportedFieldType(u16),
    /// Page dimensions not found
    MissingDimensions,
    /// The scan has no files at all
    EmptyFileSet,
    /// A required ScanImage header parameter is missing
    MissingParameter(String),
    /// A ScanImage header parameter could not be interpreted
    InvalidParameter {
        /// Header key the value belongs to
        key: String,
        /// The raw value that failed to parse
        value: String,
    },
    /// Files of one scan disagree on acquisition parameters
    InconsistentFileSet(String),
    /// A scan file lies outside the configured root data directory
    PathOutsideRoot {
        /// The offending file path
        path: PathBuf,
        /// The configured root data directory
        root: PathBuf,
    },
    /// Header frame count and extracted field count cannot both be right
    FieldCountMismatch {
        /// Number of frames the header reports
        num_frames: u32,
        /// Number of fields geometry extraction produced
        num_fields: usize,
    },
    /// Generic error with message
    GenericError(String),
}

impl fmt::Display for ScanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScanError::IoError(e) => write!(f, "I/O error: {}", e),
            ScanError::InvalidHeader => write!(f, "Invalid scan file header"),
            ScanError::InvalidByteOrder(v) => write!(f, "Invalid byte order marker: {:#06x}", v),
            ScanError::InvalidBigTiffHeader => write!(f, "Invalid BigTIFF header"),
            ScanError::UnsupportedVersion(v) => write!(f, "Unsupported TIFF version: {}", v),
            ScanError::TagNotFound(tag) => write!(f, "Tag not found: {}", tag),
            ScanError::UnsupportedFieldType(ft) => write!(f, "Unsupported field type: {}", ft),
            ScanError::MissingDimensions => write!(f, "Page dimensions not found"),
            ScanError::EmptyFileSet => write!(f, "Scan file set is empty"),
            ScanError::MissingParameter(key) => write!(f, "Missing ScanImage parameter: SI.{}", key),
            ScanError::InvalidParameter { key, value } =>
                write!(f, "Invalid value for SI.{}: '{}'", key, value),
            ScanError::InconsistentFileSet(msg) => write!(f, "Inconsistent scan file set: {}", msg),
            ScanError::PathOutsideRoot { path, root } =>
                write!(f, "Scan file {} is not under the root data directory {}",
                       path.display(), root.display()),
            ScanError::FieldCountMismatch { num_frames, num_fields } =>
                write!(f, "Scan reports {} frames but geometry extraction produced {} fields",
                       num_frames, num_fields),
            ScanError::GenericError(msg) => write!(f, "Scan error: {}", msg),
        }
    }
}

impl std::error::Error for ScanError {}

impl From<io::Error> for ScanError {
    fn from(error: io::Error) -> Self {
        ScanError::IoError(error)
    }
}

impl From<String> for ScanError {
    fn from(msg: String) -> Self {
        ScanError::GenericError(msg)
    }
}

/// Result type for scan-file operations
pub type ScanResult<T> = Result<T, ScanError>;
