//! ScanImage scan-file decoding module
//!
//! This module provides structures and functions for reading the
//! TIFF/BigTIFF structure and acquisition metadata of ScanImage
//! multi-page stacks.

pub mod errors;
pub mod ifd;
pub(crate) mod types;
pub mod reader;
pub mod metadata;
pub mod roi;
pub mod timing;
pub mod scan;
pub(crate) mod constants;
pub(crate) mod validation;
#[cfg(test)]
mod tests;

pub use crate::io::byte_order::{BigEndianHandler, ByteOrder, ByteOrderHandler, LittleEndianHandler};
pub use errors::{ScanError, ScanResult};
pub use ifd::{IFD, IFDEntry};
pub use reader::ScanFileReader;
pub use types::ScanFile;
pub use metadata::HeaderMap;
pub use roi::{Roi, RoiGroup};
pub use scan::{ParsedScan, RoiField};
pub use timing::DelayImage;
