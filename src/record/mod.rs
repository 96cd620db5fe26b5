//! Assembled scan records
//!
//! The acquisition-wide header record, the record assembler, and the
//! immutable aggregate handed to the persistence layer.

pub mod acquisition;
pub mod assembler;

pub use acquisition::ScanAcquisition;
pub use assembler::{MetadataAssembler, ScanFileReference, ScanRecord};
