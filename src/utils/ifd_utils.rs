//! IFD utilities
//!
//! Utilities for working with Image File Directories (IFDs) in scan files.

use log::debug;
use crate::io::seekable::SeekableReader;
use crate::io::byte_order::ByteOrderHandler;
use crate::scanfile::errors::{ScanError, ScanResult};
use crate::scanfile::ifd::IFD;

/// Reads the first IFD offset from a TIFF file header
///
/// # Arguments
/// * `reader` - The seekable reader to use
/// * `is_big_tiff` - Whether the file is in BigTIFF format
/// * `byte_order_handler` - Handler for the file's byte order
///
/// # Returns
/// The offset to the first IFD
pub fn read_first_ifd_offset(
    reader: &mut dyn SeekableReader,
    is_big_tiff: bool,
    byte_order_handler: &Box<dyn ByteOrderHandler>
) -> ScanResult<u64> {
    if is_big_tiff {
        debug!("Reading BigTIFF first IFD offset");
        byte_order_handler.read_u64(reader).map_err(ScanError::IoError)
    } else {
        debug!("Reading standard TIFF first IFD offset");
        byte_order_handler.read_u32(reader)
            .map(|v| v as u64)
            .map_err(ScanError::IoError)
    }
}

/// Reads the next IFD offset
///
/// # Arguments
/// * `reader` - The seekable reader to use
/// * `is_big_tiff` - Whether the file is in BigTIFF format
/// * `byte_order_handler` - Handler for the file's byte order
///
/// # Returns
/// The offset to the next IFD, or 0 if there are no more IFDs
pub fn read_next_ifd_offset(
    reader: &mut dyn SeekableReader,
    is_big_tiff: bool,
    byte_order_handler: &Box<dyn ByteOrderHandler>
) -> ScanResult<u64> {
    if is_big_tiff {
        byte_order_handler.read_u64(reader).map_err(ScanError::IoError)
    } else {
        byte_order_handler.read_u32(reader)
            .map(|v| v as u64)
            .map_err(ScanError::IoError)
    }
}

/// Position of the next-IFD-offset field of an IFD
///
/// The field sits right after the entry table, before the IFD ends.
///
/// # Arguments
/// * `ifd_offset` - Offset of the IFD in the file
/// * `ifd` - The IFD itself
/// * `is_big_tiff` - Whether the file is in BigTIFF format
///
/// # Returns
/// The absolute position of the next-IFD-offset field
pub fn next_offset_field_position(ifd_offset: u64, ifd: &IFD, is_big_tiff: bool) -> u64 {
    if is_big_tiff {
        ifd_offset + 8 + (20 * ifd.entries.len() as u64)
    } else {
        ifd_offset + 2 + (12 * ifd.entries.len() as u64)
    }
}
