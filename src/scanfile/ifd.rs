//! Image File Directory (IFD) structures and methods
//!
//! A ScanImage stack is a multipage TIFF: one IFD per recorded page.
//! Each IFD stores tag entries describing that page (dimensions, text
//! metadata, timestamps). The decoder walks the IFD chain of every file
//! in the scan set and reads the handful of tags it needs.

use std::collections::HashMap;
use std::fmt;
use crate::scanfile::constants::{field_types, tags};
use crate::utils::tag_utils;
use log::{debug, trace};

/// Represents an Image File Directory (IFD) in a scan file
#[derive(Debug, Clone)]
pub struct IFD {
    /// Entries in this IFD
    pub entries: Vec<IFDEntry>,
    /// IFD number (0-based page index within the file)
    pub number: usize,
    /// Offset to this IFD in the file
    pub offset: u64,
    /// Cached tag values for quick lookup
    tag_map: HashMap<u16, IFDEntry>,
}

/// Represents an entry in an Image File Directory (IFD)
///
/// Each entry describes one aspect of the page using a tag-value pair.
/// The field_type determines how to interpret the value or offset.
#[derive(Debug, Clone)]
pub struct IFDEntry {
    /// TIFF tag identifier
    pub tag: u16,
    /// Field type
    pub field_type: u16,
    /// Number of values
    pub count: u64,
    /// Value or offset to values
    pub value_offset: u64,
}

impl IFDEntry {
    /// Creates a new IFD entry
    ///
    /// For small values, value_offset contains the actual value.
    /// For larger values, it contains an offset to where the value is stored.
    pub fn new(tag: u16, field_type: u16, count: u64, value_offset: u64) -> Self {
        trace!("Creating IFD entry: tag={} ({}), type={}, count={}, offset/value={}",
               tag, tag_utils::get_tag_name(tag), field_type, count, value_offset);

        Self {
            tag,
            field_type,
            count,
            value_offset,
        }
    }

    /// Get the size in bytes for this entry's field type
    pub fn get_field_type_size(&self) -> usize {
        match self.field_type {
            field_types::BYTE | field_types::ASCII | field_types::SBYTE | field_types::UNDEFINED => 1,
            field_types::SHORT | field_types::SSHORT => 2,
            field_types::LONG | field_types::SLONG | field_types::FLOAT => 4,
            field_types::RATIONAL | field_types::SRATIONAL | field_types::DOUBLE => 8,
            field_types::LONG8 | field_types::SLONG8 | field_types::IFD8 => 8,
            _ => {
                debug!("Unknown field type: {}, assuming 1 byte", self.field_type);
                1
            }
        }
    }

    /// Determines if the value is stored inline in value_offset
    /// rather than at the offset location
    ///
    /// TIFF allows values that fit in 4 bytes (8 for BigTIFF) to live
    /// directly in the IFD entry instead of a separate data area.
    pub fn is_value_inline(&self, is_big_tiff: bool) -> bool {
        let total_size = self.get_field_type_size() * self.count as usize;
        let inline_size = if is_big_tiff { 8 } else { 4 };

        total_size <= inline_size
    }

    /// Returns a human-readable description of this entry
    pub fn description(&self) -> String {
        format!("Tag: {} ({}), Type: {} ({}), Count: {}, Value/Offset: {}",
                self.tag, tag_utils::get_tag_name(self.tag),
                self.field_type, tag_utils::get_field_type_name(self.field_type),
                self.count, self.value_offset)
    }
}

impl IFD {
    /// Creates a new empty IFD with the given page number and file offset
    pub fn new(number: usize, offset: u64) -> Self {
        trace!("Creating IFD #{} at offset {}", number, offset);

        Self {
            entries: Vec::new(),
            number,
            offset,
            tag_map: HashMap::new(),
        }
    }

    /// Adds an entry to this IFD and updates the lookup cache
    pub fn add_entry(&mut self, entry: IFDEntry) {
        self.tag_map.insert(entry.tag, entry.clone());
        self.entries.push(entry);
    }

    /// Gets a tag value (value_offset) directly
    pub fn get_tag_value(&self, tag: u16) -> Option<u64> {
        self.tag_map.get(&tag).map(|entry| entry.value_offset)
    }

    /// Checks if this IFD has a specific tag
    pub fn has_tag(&self, tag: u16) -> bool {
        self.tag_map.contains_key(&tag)
    }

    /// Gets an IFD entry by tag
    pub fn get_entry(&self, tag: u16) -> Option<&IFDEntry> {
        self.tag_map.get(&tag)
    }

    /// Gets the pixel dimensions of the page described by this IFD
    ///
    /// Returns (width, height) if both tags are present.
    pub fn get_dimensions(&self) -> Option<(u64, u64)> {
        let width = self.get_tag_value(tags::IMAGE_WIDTH)?;
        let height = self.get_tag_value(tags::IMAGE_LENGTH)?;

        debug!("Page dimensions from IFD #{}: {}x{}", self.number, width, height);

        Some((width, height))
    }

    /// Returns number of samples per pixel (default 1 if not specified)
    pub fn get_samples_per_pixel(&self) -> u64 {
        self.get_tag_value(tags::SAMPLES_PER_PIXEL).unwrap_or(1)
    }

    /// Gets the number of entries in this IFD
    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }
}

impl fmt::Display for IFD {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "IFD #{} (offset: {})", self.number, self.offset)?;
        writeln!(f, "  Number of entries: {}", self.entries.len())?;

        if let Some((width, height)) = self.get_dimensions() {
            writeln!(f, "  Dimensions: {}x{}", width, height)?;
        }

        writeln!(f, "  Tags:")?;
        for entry in &self.entries {
            writeln!(f, "    {} ({}): {} [{}]",
                     entry.tag, tag_utils::get_tag_name(entry.tag),
                     entry.value_offset,
                     tag_utils::get_field_type_name(entry.field_type))?;
        }

        Ok(())
    }
}
