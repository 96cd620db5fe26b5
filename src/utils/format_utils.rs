//! Scan-file format utilities
//!
//! Utilities for working with TIFF container specifics like
//! byte order detection and TIFF/BigTIFF format detection.

use log::debug;
use crate::io::seekable::SeekableReader;
use crate::io::byte_order::{ByteOrder, ByteOrderHandler};
use crate::scanfile::constants::header;
use crate::scanfile::errors::{ScanError, ScanResult};
use crate::scanfile::validation;

/// Detects and returns the byte order for a scan file
pub fn detect_byte_order(reader: &mut dyn SeekableReader) -> ScanResult<Box<dyn ByteOrderHandler>> {
    let byte_order = ByteOrder::detect(reader)?;
    debug!("Detected byte order: {}", byte_order.name());

    Ok(byte_order.create_handler())
}

/// Detects whether a file is TIFF or BigTIFF based on its version number
///
/// # Arguments
/// * `reader` - The seekable reader to use
/// * `byte_order_handler` - Handler for the file's byte order
///
/// # Returns
/// A tuple with (is_big_tiff, version_number)
pub fn detect_tiff_format(
    reader: &mut dyn SeekableReader,
    byte_order_handler: &Box<dyn ByteOrderHandler>
) -> ScanResult<(bool, u16)> {
    let version = byte_order_handler.read_u16(reader)?;
    debug!("TIFF version: {}", version);

    let is_big_tiff = match version {
        header::BIG_TIFF_VERSION => {
            debug!("Detected BigTIFF format");
            validation::validate_bigtiff_header(reader, byte_order_handler)?;
            true
        },
        header::TIFF_VERSION => {
            debug!("Detected standard TIFF format");
            false
        },
        _ => return Err(ScanError::UnsupportedVersion(version)),
    };

    Ok((is_big_tiff, version))
}
