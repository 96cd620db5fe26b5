//! Field geometry normalization
//!
//! Turns the decoder's raw per-field attributes into motor-referenced
//! field geometry, one record per imaged field regardless of whether
//! the acquisition was multi-ROI or single-plane raster.

pub mod units;
pub mod field;
pub mod extractor;

pub use field::FieldGeometry;
pub use extractor::{AcquisitionMode, FieldGeometryExtractor};
