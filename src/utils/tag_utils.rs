//! TIFF tag utilities
//!
//! Utilities for working with TIFF tags and their values in scan files.

use byteorder::ReadBytesExt;

use crate::io::seekable::SeekableReader;
use crate::io::byte_order::{ByteOrder, ByteOrderHandler};
use crate::scanfile::constants::{field_types, tags};
use crate::scanfile::errors::{ScanError, ScanResult};
use crate::scanfile::ifd::IFDEntry;

/// Reads an array of tag values based on the field type
///
/// # Arguments
/// * `reader` - The seekable reader to use
/// * `entry` - The IFD entry with tag information
/// * `handler` - The byte order handler
/// * `values` - The vector to store values in
///
/// # Returns
/// Result indicating success or failure
pub fn read_tag_value_array(
    reader: &mut dyn SeekableReader,
    entry: &IFDEntry,
    handler: &Box<dyn ByteOrderHandler>,
    values: &mut Vec<u64>
) -> ScanResult<()> {
    for _ in 0..entry.count {
        let value = match entry.field_type {
            field_types::BYTE | field_types::SBYTE | field_types::UNDEFINED => reader.read_u8()? as u64,
            field_types::SHORT | field_types::SSHORT => handler.read_u16(reader)? as u64,
            field_types::LONG | field_types::SLONG | field_types::FLOAT => handler.read_u32(reader)? as u64,
            field_types::LONG8 | field_types::SLONG8 | field_types::IFD8 => handler.read_u64(reader)?,
            _ => return Err(ScanError::UnsupportedFieldType(entry.field_type)),
        };

        values.push(value);
    }

    Ok(())
}

/// Recovers the raw bytes of an inline tag value
///
/// When a value fits in the entry's value/offset slot, the bytes live
/// there in file byte order. The slot is 4 bytes wide in standard TIFF
/// and 8 in BigTIFF; for big-endian standard TIFF the 4 meaningful
/// bytes sit in the low half of the widened u64.
///
/// # Arguments
/// * `value_offset` - The entry's value/offset field as read
/// * `count` - Number of bytes actually stored
/// * `byte_order` - The file's byte order
/// * `is_big_tiff` - Whether the file is BigTIFF format
pub fn inline_value_bytes(
    value_offset: u64,
    count: u64,
    byte_order: ByteOrder,
    is_big_tiff: bool,
) -> Vec<u8> {
    let bytes = match byte_order {
        ByteOrder::LittleEndian => value_offset.to_le_bytes().to_vec(),
        ByteOrder::BigEndian => {
            if is_big_tiff {
                value_offset.to_be_bytes().to_vec()
            } else {
                (value_offset as u32).to_be_bytes().to_vec()
            }
        }
    };

    bytes.into_iter().take(count as usize).collect()
}

/// Get the name of a TIFF tag
///
/// Returns a human-readable name for a tag based on its numeric ID.
/// If the tag is not recognized, returns "Unknown".
///
/// # Arguments
/// * `tag` - The tag ID to look up
///
/// # Returns
/// A string representing the tag name
pub fn get_tag_name(tag: u16) -> &'static str {
    match tag {
        tags::IMAGE_WIDTH => "ImageWidth",
        tags::IMAGE_LENGTH => "ImageLength",
        tags::BITS_PER_SAMPLE => "BitsPerSample",
        tags::IMAGE_DESCRIPTION => "ImageDescription",
        tags::SAMPLES_PER_PIXEL => "SamplesPerPixel",
        tags::SOFTWARE => "Software",
        tags::DATE_TIME => "DateTime",
        tags::ARTIST => "Artist",
        _ => "Unknown",
    }
}

/// Get the name of a TIFF field type
///
/// # Arguments
/// * `field_type` - The field type ID to look up
///
/// # Returns
/// A string representing the field type name
pub fn get_field_type_name(field_type: u16) -> &'static str {
    match field_type {
        field_types::BYTE => "BYTE",
        field_types::ASCII => "ASCII",
        field_types::SHORT => "SHORT",
        field_types::LONG => "LONG",
        field_types::RATIONAL => "RATIONAL",
        field_types::SBYTE => "SBYTE",
        field_types::UNDEFINED => "UNDEFINED",
        field_types::SSHORT => "SSHORT",
        field_types::SLONG => "SLONG",
        field_types::SRATIONAL => "SRATIONAL",
        field_types::FLOAT => "FLOAT",
        field_types::DOUBLE => "DOUBLE",
        field_types::LONG8 => "LONG8",
        field_types::SLONG8 => "SLONG8",
        field_types::IFD8 => "IFD8",
        _ => "Unknown",
    }
}
