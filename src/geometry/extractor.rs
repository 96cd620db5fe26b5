//! Per-field geometry extraction
//!
//! The acquisition mode decides everything about field geometry: where
//! the field count comes from, where pixel and physical dimensions live,
//! and whether fields have individual lateral positions. The mode is
//! resolved once and dispatched to one of two extraction branches.

use log::debug;

use crate::geometry::field::FieldGeometry;
use crate::geometry::units;
use crate::record::acquisition::ScanAcquisition;
use crate::scanfile::errors::ScanResult;
use crate::scanfile::scan::ParsedScan;

/// How the acquisition laid out its fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AcquisitionMode {
    /// Multiple independently positioned rectangles per frame
    MultiRoi,
    /// One full-frame rectangle per scanning depth
    SinglePlane,
}

impl AcquisitionMode {
    /// Resolves the mode of a parsed scan
    pub fn of(raw: &ParsedScan) -> ScanResult<Self> {
        Ok(if raw.is_multiroi()? {
            AcquisitionMode::MultiRoi
        } else {
            AcquisitionMode::SinglePlane
        })
    }

    /// Returns a string representation of this mode
    pub fn name(&self) -> &'static str {
        match self {
            AcquisitionMode::MultiRoi => "multi-ROI",
            AcquisitionMode::SinglePlane => "single-plane",
        }
    }
}

/// Extractor producing one FieldGeometry per imaged field
pub struct FieldGeometryExtractor;

impl FieldGeometryExtractor {
    /// Extracts the geometry of every field of a scan
    ///
    /// # Arguments
    /// * `scan` - The acquisition-wide record (supplies the motor zero)
    /// * `raw` - The parsed scan object (supplies per-field attributes)
    ///
    /// # Returns
    /// Field geometry ordered by field index 0..n-1; empty when the
    /// format reports no fields at all
    pub fn extract(scan: &ScanAcquisition, raw: &ParsedScan) -> ScanResult<Vec<FieldGeometry>> {
        let mode = AcquisitionMode::of(raw)?;
        debug!("Extracting field geometry in {} mode", mode.name());

        match mode {
            AcquisitionMode::MultiRoi => Self::extract_multiroi(scan, raw),
            AcquisitionMode::SinglePlane => Self::extract_single_plane(scan, raw),
        }
    }

    /// Multi-ROI branch: one field per (ROI, depth) pair
    ///
    /// Field centers are stored as scan angles and converted to microns
    /// with the calibration the decoder supplies; depths are already
    /// microns.
    fn extract_multiroi(scan: &ScanAcquisition, raw: &ParsedScan) -> ScanResult<Vec<FieldGeometry>> {
        let [x_zero, y_zero, z_zero] = scan.motor_zero();
        let microns_per_degree = raw.microns_per_degree()?;
        let roi_fields = raw.fields()?;

        let mut fields = Vec::with_capacity(roi_fields.len());
        for (field_idx, roi_field) in roi_fields.iter().enumerate() {
            fields.push(FieldGeometry {
                field_idx,
                px_height: roi_field.px_height,
                px_width: roi_field.px_width,
                um_height: Some(units::degrees_to_microns(roi_field.height_deg, microns_per_degree)),
                um_width: Some(units::degrees_to_microns(roi_field.width_deg, microns_per_degree)),
                field_x: x_zero + units::degrees_to_microns(roi_field.x_deg, microns_per_degree),
                field_y: y_zero + units::degrees_to_microns(roi_field.y_deg, microns_per_degree),
                field_z: z_zero + roi_field.depth,
                delay_image: raw.field_delay_image(field_idx)?,
            });
        }

        Ok(fields)
    }

    /// Single-plane branch: one field per scanning depth
    ///
    /// All depths share the frame's pixel dimensions and sit at the
    /// motor zero laterally; physical dimensions are only filled in
    /// when the format reported them.
    fn extract_single_plane(scan: &ScanAcquisition, raw: &ParsedScan) -> ScanResult<Vec<FieldGeometry>> {
        let [x_zero, y_zero, z_zero] = scan.motor_zero();
        let um_size = raw.image_size_in_microns();
        let depths = raw.scanning_depths()?;

        let mut fields = Vec::with_capacity(depths.len());
        for (field_idx, depth) in depths.iter().enumerate() {
            fields.push(FieldGeometry {
                field_idx,
                px_height: raw.image_height(),
                px_width: raw.image_width(),
                um_height: um_size.map(|(height, _)| height),
                um_width: um_size.map(|(_, width)| width),
                field_x: x_zero,
                field_y: y_zero,
                field_z: z_zero + depth,
                delay_image: raw.field_delay_image(field_idx)?,
            });
        }

        Ok(fields)
    }
}
