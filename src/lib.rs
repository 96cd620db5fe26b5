pub mod io;
pub mod scanfile;
pub mod utils;
pub mod geometry;
pub mod record;
pub mod resolve;
pub mod commands;
pub mod api;

pub use crate::api::ScanKit;

pub use scanfile::{ParsedScan, ScanFileReader};
pub use geometry::{AcquisitionMode, FieldGeometry, FieldGeometryExtractor};
pub use record::{MetadataAssembler, ScanAcquisition, ScanRecord};
pub use resolve::{DirectResolver, FileSetResolver, ManifestResolver};
