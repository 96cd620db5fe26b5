//! Scan-file validation utilities
//!
//! Validation functions that keep the decoder from chasing bogus
//! offsets in truncated or malformed files.

use log::warn;
use std::io::SeekFrom;

use crate::io::seekable::SeekableReader;
use crate::io::byte_order::ByteOrderHandler;
use crate::scanfile::constants::header;
use crate::scanfile::errors::{ScanError, ScanResult};

/// Validates an IFD offset to ensure it's within reasonable bounds
///
/// # Arguments
/// * `offset` - The offset to validate
/// * `file_size` - The file size for validation
///
/// # Returns
/// Ok if the offset is valid, an error otherwise
pub fn validate_ifd_offset(offset: u64, file_size: u64) -> ScanResult<()> {
    if offset >= file_size || offset < 8 {
        return Err(ScanError::GenericError(format!(
            "Invalid IFD offset: {} (file size: {})",
            offset, file_size
        )));
    }

    Ok(())
}

/// Gets the file size for validation purposes
///
/// # Arguments
/// * `reader` - The seekable reader to use
///
/// # Returns
/// The file size or u64::MAX if it couldn't be determined
pub fn get_file_size(reader: &mut dyn SeekableReader) -> ScanResult<u64> {
    let current_position = reader.seek(SeekFrom::Current(0))?;
    let file_size = match reader.seek(SeekFrom::End(0)) {
        Ok(size) => {
            // Reset position after getting size
            reader.seek(SeekFrom::Start(current_position))?;
            size
        },
        Err(e) => {
            warn!("Could not determine file size: {}", e);
            reader.seek(SeekFrom::Start(current_position))?;
            u64::MAX
        }
    };

    Ok(file_size)
}

/// Validates the two constant fields that follow a BigTIFF version number
///
/// # Arguments
/// * `reader` - The seekable reader, positioned right after the version
/// * `handler` - Handler for the file's byte order
///
/// # Returns
/// Ok if the header is a valid BigTIFF header, an error otherwise
pub fn validate_bigtiff_header(
    reader: &mut dyn SeekableReader,
    handler: &Box<dyn ByteOrderHandler>
) -> ScanResult<()> {
    let offset_size = handler.read_u16(reader)?;
    let reserved = handler.read_u16(reader)?;

    if offset_size != header::BIGTIFF_OFFSET_SIZE || reserved != 0 {
        return Err(ScanError::InvalidBigTiffHeader);
    }

    Ok(())
}
