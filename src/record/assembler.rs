//! Scan record assembly
//!
//! Combines the acquisition record, the extracted field geometry and
//! the normalized file references into one immutable aggregate. The
//! aggregate mirrors the persistence contract exactly: one header row,
//! N field rows keyed by field index, M file rows keyed by relative
//! path. Assembly either produces a complete record or fails without
//! exposing partial state.

use log::debug;
use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::geometry::field::FieldGeometry;
use crate::record::acquisition::ScanAcquisition;
use crate::scanfile::errors::{ScanError, ScanResult};
use crate::utils::path_utils;

/// One scan file, expressed relative to the root data directory
#[derive(Debug, Clone, Serialize)]
pub struct ScanFileReference {
    /// Posix-style path relative to the root data directory
    pub file_path: String,
}

/// The assembled extraction record of one scan
#[derive(Debug, Clone, Serialize)]
pub struct ScanRecord {
    scan: ScanAcquisition,
    fields: Vec<FieldGeometry>,
    files: Vec<ScanFileReference>,
}

impl ScanRecord {
    /// The header row
    pub fn scan(&self) -> &ScanAcquisition {
        &self.scan
    }

    /// The field rows, ordered by field index
    pub fn fields(&self) -> &[FieldGeometry] {
        &self.fields
    }

    /// The file-reference rows, in acquisition order
    pub fn files(&self) -> &[ScanFileReference] {
        &self.files
    }
}

/// Assembler producing the final extraction record
pub struct MetadataAssembler;

impl MetadataAssembler {
    /// Assembles the immutable extraction record
    ///
    /// # Arguments
    /// * `scan` - The acquisition-wide record
    /// * `fields` - Extracted field geometry, ordered by field index
    /// * `file_paths` - Absolute paths of the scan's files
    /// * `root` - The configured root data directory
    ///
    /// # Returns
    /// The assembled record, or an error when a file lies outside the
    /// root or the header and field counts contradict each other
    pub fn assemble(
        scan: ScanAcquisition,
        fields: Vec<FieldGeometry>,
        file_paths: &[PathBuf],
        root: &Path,
    ) -> ScanResult<ScanRecord> {
        // A scan that recorded frames must have imaged at least one field
        if fields.is_empty() && scan.num_frames > 0 {
            return Err(ScanError::FieldCountMismatch {
                num_frames: scan.num_frames,
                num_fields: fields.len(),
            });
        }

        let mut files = Vec::with_capacity(file_paths.len());
        for path in file_paths {
            let file_path = path_utils::relative_posix_path(path, root)?;
            files.push(ScanFileReference { file_path });
        }

        debug!("Assembled scan record: {} fields, {} files", fields.len(), files.len());

        Ok(ScanRecord {
            scan,
            fields,
            files,
        })
    }
}
