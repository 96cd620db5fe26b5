//! Scan-file reader implementation
//!
//! This module implements the TIFF/BigTIFF structure reader used on every
//! file of a ScanImage acquisition. It uses the Strategy pattern to handle
//! different byte orders and walks the whole IFD chain so the page count
//! of multipage stacks is known exactly.

use log::{debug, info, warn};
use std::fs::File;
use std::io::{BufReader, Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

use crate::io::seekable::SeekableReader;
use crate::io::byte_order::{ByteOrder, ByteOrderHandler};
use crate::scanfile::errors::{ScanError, ScanResult};
use crate::scanfile::ifd::{IFD, IFDEntry};
use crate::scanfile::types::ScanFile;
use crate::scanfile::validation;
use crate::utils::format_utils;
use crate::utils::ifd_utils;
use crate::utils::tag_utils;
use crate::utils::string_utils;

/// Upper bound on pages per file, to stop runaway IFD chains
///
/// Long recordings easily reach tens of thousands of pages per file;
/// anything beyond this indicates a corrupt offset loop.
const MAX_IFDS_PER_FILE: usize = 1_000_000;

/// Reader for the TIFF/BigTIFF structure of scan files
pub struct ScanFileReader {
    /// Current byte order handler
    pub(crate) byte_order_handler: Option<Box<dyn ByteOrderHandler>>,
    /// Detected byte order of the current file
    byte_order: Option<ByteOrder>,
    /// Current file path
    current_file: Option<PathBuf>,
    /// Whether currently reading BigTIFF format
    pub(crate) is_big_tiff: bool,
}

impl ScanFileReader {
    /// Creates a new scan-file reader
    pub fn new() -> Self {
        ScanFileReader {
            byte_order_handler: None,
            byte_order: None,
            current_file: None,
            is_big_tiff: false,
        }
    }

    /// Returns the byte order handler, with proper error handling for None case
    fn get_byte_order_handler_unwrapped(&self) -> ScanResult<&Box<dyn ByteOrderHandler>> {
        self.byte_order_handler.as_ref()
            .ok_or_else(|| ScanError::GenericError("Byte order not yet determined".to_string()))
    }

    /// Loads the structure of one scan file from the given path
    ///
    /// This is the main entry point for reading a file of the scan set.
    /// It opens the file and delegates to the read() method.
    ///
    /// # Arguments
    /// * `filepath` - Path to the scan file to load
    ///
    /// # Returns
    /// A ScanFile structure with the file's IFD chain
    pub fn load(&mut self, filepath: &Path) -> ScanResult<ScanFile> {
        info!("Loading scan file: {}", filepath.display());
        self.current_file = Some(filepath.to_path_buf());

        let file = File::open(filepath)?;
        let mut reader = BufReader::with_capacity(1024 * 1024, file); // 1MB buffer

        self.read(&mut reader)
    }

    /// Reads a scan file's structure from the given reader
    ///
    /// 1. Detect byte order (little/big endian)
    /// 2. Check for TIFF or BigTIFF format
    /// 3. Read all IFDs (one per recorded page)
    ///
    /// # Arguments
    /// * `reader` - Any struct implementing the SeekableReader trait
    ///
    /// # Returns
    /// A ScanFile structure with the file's IFD chain
    pub fn read(&mut self, reader: &mut dyn SeekableReader) -> ScanResult<ScanFile> {
        debug!("ScanFileReader::read starting");

        // Detect and set up byte order
        self.byte_order_handler = Some(format_utils::detect_byte_order(reader)?);
        self.byte_order = self.byte_order_handler.as_ref().map(|h| h.byte_order());

        // Check for BigTIFF format and validate header
        let handler = self.byte_order_handler.as_ref().unwrap();
        let (is_big_tiff, _) = format_utils::detect_tiff_format(reader, handler)?;
        self.is_big_tiff = is_big_tiff;

        let path = self.current_file.clone().unwrap_or_default();
        let mut scan_file = ScanFile::new(path, self.is_big_tiff);

        // Get a fresh reference to the handler after modifying self
        let handler = self.byte_order_handler.as_ref().unwrap();

        // Read the first IFD offset
        let first_ifd_offset = ifd_utils::read_first_ifd_offset(reader, self.is_big_tiff, handler)?;
        debug!("First IFD offset: {}", first_ifd_offset);

        // Validate the first IFD offset
        let file_size = validation::get_file_size(reader)?;
        validation::validate_ifd_offset(first_ifd_offset, file_size)?;

        // Read all IFDs in the chain
        scan_file.ifds = self.read_ifd_chain(reader, first_ifd_offset)?;

        info!("Read {} pages from scan file", scan_file.ifds.len());
        Ok(scan_file)
    }

    /// Reads a chain of IFDs starting from the given offset
    ///
    /// # Arguments
    /// * `reader` - The seekable reader to use
    /// * `first_ifd_offset` - Offset of the first IFD in the chain
    ///
    /// # Returns
    /// A vector of IFDs, one per page
    fn read_ifd_chain(&self, reader: &mut dyn SeekableReader, first_ifd_offset: u64) -> ScanResult<Vec<IFD>> {
        let mut ifds = Vec::new();
        let mut ifd_offset = first_ifd_offset;
        let mut ifd_number = 0;
        let handler = self.get_byte_order_handler_unwrapped()?;
        let file_size = validation::get_file_size(reader)?;

        while ifd_offset != 0 && ifd_number < MAX_IFDS_PER_FILE {
            if ifd_offset >= file_size {
                warn!("IFD offset {} exceeds file size {}, stopping IFD chain",
                  ifd_offset, file_size);
                break;
            }

            match self.read_ifd(reader, ifd_offset, ifd_number) {
                Ok(ifd) => {
                    // Get next IFD offset
                    let next_offset_position =
                        ifd_utils::next_offset_field_position(ifd_offset, &ifd, self.is_big_tiff);

                    if next_offset_position >= file_size {
                        warn!("Next IFD offset position {} exceeds file size {}",
                          next_offset_position, file_size);
                        ifds.push(ifd);
                        break;
                    }

                    if let Err(e) = reader.seek(SeekFrom::Start(next_offset_position)) {
                        warn!("Error seeking to next IFD offset: {}", e);
                        ifds.push(ifd);
                        break;
                    }

                    let next_ifd_offset = match ifd_utils::read_next_ifd_offset(reader, self.is_big_tiff, handler) {
                        Ok(offset) => offset,
                        Err(e) => {
                            warn!("Error reading next IFD offset: {}", e);
                            ifds.push(ifd);
                            break;
                        }
                    };

                    // Sanity check for next IFD offset
                    if next_ifd_offset != 0 && (next_ifd_offset >= file_size || next_ifd_offset < 8) {
                        warn!("Invalid next IFD offset: {}, stopping IFD chain", next_ifd_offset);
                        ifds.push(ifd);
                        break;
                    }

                    ifds.push(ifd);
                    ifd_offset = next_ifd_offset;
                    ifd_number += 1;
                },
                Err(e) => {
                    warn!("Error reading IFD {}: {}", ifd_number, e);
                    break;
                }
            }
        }

        Ok(ifds)
    }

    /// Reads an IFD from the reader
    ///
    /// An IFD holds all the metadata for a single recorded page as a
    /// count followed by a series of tag entries.
    ///
    /// # Arguments
    /// * `reader` - The seekable reader to use
    /// * `offset` - Offset in the file where the IFD starts
    /// * `number` - The index of this IFD in the file
    ///
    /// # Returns
    /// The parsed IFD structure
    pub fn read_ifd(&self, reader: &mut dyn SeekableReader, offset: u64, number: usize) -> ScanResult<IFD> {
        reader.seek(SeekFrom::Start(offset))?;

        let entry_count = self.read_ifd_entry_count(reader)?;
        debug!("IFD #{} entry count: {}", number, entry_count);

        let mut ifd = IFD::new(number, offset);

        for _ in 0..entry_count {
            let entry = self.read_ifd_entry(reader)?;
            ifd.add_entry(entry);
        }

        Ok(ifd)
    }

    /// Reads the entry count from an IFD
    fn read_ifd_entry_count(&self, reader: &mut dyn SeekableReader) -> ScanResult<u64> {
        let handler = self.get_byte_order_handler_unwrapped()?;
        if self.is_big_tiff {
            handler.read_u64(reader).map_err(ScanError::IoError)
        } else {
            handler.read_u16(reader)
                .map(|v| v as u64)
                .map_err(ScanError::IoError)
        }
    }

    /// Reads a single IFD entry
    fn read_ifd_entry(&self, reader: &mut dyn SeekableReader) -> ScanResult<IFDEntry> {
        let handler = self.get_byte_order_handler_unwrapped()?;

        let tag = handler.read_u16(reader)?;
        let field_type = handler.read_u16(reader)?;
        let count = if self.is_big_tiff {
            handler.read_u64(reader)?
        } else {
            handler.read_u32(reader)? as u64
        };

        let value_offset = if self.is_big_tiff {
            handler.read_u64(reader)?
        } else {
            handler.read_u32(reader)? as u64
        };

        Ok(IFDEntry::new(tag, field_type, count, value_offset))
    }

    /// Reads a tag's value as a vector of u64
    ///
    /// Handles different field types and automatically converts them to u64.
    ///
    /// # Arguments
    /// * `reader` - The seekable reader to use
    /// * `ifd` - The IFD containing the tag
    /// * `tag` - The tag number to read
    ///
    /// # Returns
    /// A vector of u64 values
    pub fn read_tag_values(&self, reader: &mut dyn SeekableReader, ifd: &IFD, tag: u16) -> ScanResult<Vec<u64>> {
        let entry = ifd.get_entry(tag)
            .ok_or_else(|| ScanError::TagNotFound(tag))?;

        let mut values = Vec::with_capacity(entry.count as usize);

        // Check if the value is stored inline
        if entry.is_value_inline(self.is_big_tiff) {
            values.push(entry.value_offset);
        } else {
            reader.seek(SeekFrom::Start(entry.value_offset))?;
            let handler = self.get_byte_order_handler_unwrapped()?;
            tag_utils::read_tag_value_array(reader, entry, handler, &mut values)?;
        }

        Ok(values)
    }

    /// Reads an ASCII tag's text from an IFD
    ///
    /// ScanImage stores its acquisition header and the ROI-group JSON as
    /// large ASCII tags; tiny inline values are reconstructed from the
    /// entry's value slot.
    ///
    /// # Arguments
    /// * `reader` - The seekable reader to use
    /// * `ifd` - The IFD containing the tag
    /// * `tag` - The ASCII tag number to read
    ///
    /// # Returns
    /// The text value, with trailing null characters removed
    pub fn read_ascii_tag(&self, reader: &mut dyn SeekableReader, ifd: &IFD, tag: u16) -> ScanResult<String> {
        let entry = ifd.get_entry(tag)
            .ok_or_else(|| ScanError::TagNotFound(tag))?;

        let mut buffer = if entry.is_value_inline(self.is_big_tiff) {
            let order = self.byte_order
                .ok_or_else(|| ScanError::GenericError("Byte order not yet determined".to_string()))?;
            tag_utils::inline_value_bytes(entry.value_offset, entry.count, order, self.is_big_tiff)
        } else {
            reader.seek(SeekFrom::Start(entry.value_offset))?;
            let mut buffer = vec![0u8; entry.count as usize];
            reader.read_exact(&mut buffer)?;
            buffer
        };

        string_utils::trim_trailing_nulls(&mut buffer);

        match String::from_utf8(buffer) {
            Ok(s) => Ok(s),
            Err(e) => Err(ScanError::GenericError(format!("Invalid UTF-8 string: {}", e))),
        }
    }

    /// Gets the file path if available
    pub fn get_file_path(&self) -> Option<&Path> {
        self.current_file.as_deref()
    }

    /// Returns whether the current file is a BigTIFF
    pub fn is_big_tiff(&self) -> bool {
        self.is_big_tiff
    }

    /// Gets the current byte order handler
    pub fn get_byte_order_handler(&self) -> Option<&Box<dyn ByteOrderHandler>> {
        self.byte_order_handler.as_ref()
    }
}
