//! Core scan-file data structures

use std::fmt;
use std::path::PathBuf;
use crate::scanfile::ifd::IFD;

/// Represents a single file of a scan set with its parsed structure
///
/// Every recorded page of the acquisition is one IFD; long recordings
/// are split across several files, each holding a slice of the page
/// sequence.
#[derive(Debug)]
pub struct ScanFile {
    /// Path this structure was read from
    pub path: PathBuf,
    /// Image File Directories, one per page
    pub ifds: Vec<IFD>,
    /// Whether this is a BigTIFF format file
    pub is_big_tiff: bool,
}

impl ScanFile {
    /// Creates a new empty scan-file structure
    pub fn new(path: PathBuf, is_big_tiff: bool) -> Self {
        ScanFile {
            path,
            ifds: Vec::new(),
            is_big_tiff,
        }
    }

    /// Returns the main (first) IFD if available
    pub fn main_ifd(&self) -> Option<&IFD> {
        self.ifds.first()
    }

    /// Returns the number of recorded pages in this file
    pub fn page_count(&self) -> usize {
        self.ifds.len()
    }

    /// Returns the pixel dimensions (width, height) of the pages
    pub fn dimensions(&self) -> Option<(u64, u64)> {
        self.main_ifd().and_then(|ifd| ifd.get_dimensions())
    }
}

impl fmt::Display for ScanFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Scan file: {}", self.path.display())?;
        writeln!(f, "  Format: {}", if self.is_big_tiff { "BigTIFF" } else { "TIFF" })?;
        writeln!(f, "  Number of pages: {}", self.ifds.len())?;

        if let Some(ifd) = self.main_ifd() {
            write!(f, "{}", ifd)?;
        }

        Ok(())
    }
}
