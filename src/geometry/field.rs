//! Field geometry record

use serde::Serialize;
use std::fmt;

use crate::scanfile::timing::DelayImage;

/// Geometry and timing of one imaged field
///
/// Positions are microns in the motor coordinate system, referenced to
/// the acquisition's zero point. Physical dimensions are absent when
/// the format did not report them.
#[derive(Debug, Clone, Serialize)]
pub struct FieldGeometry {
    /// Field index within the scan (0-based, dense)
    pub field_idx: usize,
    /// Height in pixels
    pub px_height: u32,
    /// Width in pixels
    pub px_width: u32,
    /// Height in microns, when reported
    pub um_height: Option<f64>,
    /// Width in microns, when reported
    pub um_width: Option<f64>,
    /// Center of the field, microns
    pub field_x: f64,
    /// Center of the field, microns
    pub field_y: f64,
    /// Depth of the field, microns
    pub field_z: f64,
    /// Per-pixel acquisition delay from scan start, milliseconds
    pub delay_image: DelayImage,
}

impl fmt::Display for FieldGeometry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Field #{}: {}x{} px at ({:.1}, {:.1}, {:.1}) um",
               self.field_idx, self.px_width, self.px_height,
               self.field_x, self.field_y, self.field_z)
    }
}
