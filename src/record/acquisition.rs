//! Acquisition-wide scan record

use log::debug;
use serde::Serialize;

use crate::geometry::units;
use crate::scanfile::errors::{ScanError, ScanResult};
use crate::scanfile::scan::ParsedScan;

/// General data about a scan, distilled from the ScanImage header
///
/// Units are canonical record units: microns, Hz, microseconds. The
/// line period arrives in seconds from the format and is converted
/// here; fill fraction and the bidirectional flag pass through
/// unchanged.
#[derive(Debug, Clone, Serialize)]
pub struct ScanAcquisition {
    /// Number of imaged fields
    pub num_fields: usize,
    /// Number of recorded channels
    pub num_channels: usize,
    /// Number of scanning depths (planes)
    pub num_scanning_depths: usize,
    /// Number of recorded frames
    pub num_frames: u32,
    /// Number of ROIs; 0 when the scan is not multi-ROI
    pub num_rois: usize,
    /// Motor x at the acquisition's zero point, microns
    pub x: f64,
    /// Motor y at the acquisition's zero point, microns
    pub y: f64,
    /// Motor z at the acquisition's zero point, microns
    pub z: f64,
    /// Frames per second, Hz
    pub fps: f64,
    /// Whether scanning was bidirectional
    pub bidirectional: bool,
    /// Microseconds per scan line
    pub usecs_per_line: f64,
    /// Raster scan temporal fill fraction
    pub fill_fraction: f64,
    /// ScanImage version string, when reported
    pub version: Option<String>,
}

impl ScanAcquisition {
    /// Distills the acquisition-wide record from a parsed scan
    ///
    /// # Returns
    /// The record, or an error when required header parameters are
    /// missing or the frame rate is not positive
    pub fn read(raw: &ParsedScan) -> ScanResult<ScanAcquisition> {
        let fps = raw.fps()?;
        if fps <= 0.0 {
            return Err(ScanError::InvalidParameter {
                key: "hRoiManager.scanFrameRate".to_string(),
                value: fps.to_string(),
            });
        }

        let num_rois = if raw.is_multiroi()? { raw.num_rois() } else { 0 };
        let [x, y, z] = raw.motor_position_at_zero()?;

        let acquisition = ScanAcquisition {
            num_fields: raw.num_fields()?,
            num_channels: raw.num_channels()?,
            num_scanning_depths: raw.num_scanning_depths()?,
            num_frames: raw.num_frames()?,
            num_rois,
            x,
            y,
            z,
            fps,
            bidirectional: raw.is_bidirectional()?,
            usecs_per_line: units::seconds_to_microseconds(raw.seconds_per_line()?),
            fill_fraction: raw.temporal_fill_fraction()?,
            version: raw.version(),
        };

        debug!("Read scan header: {} fields, {} channels, {} depths, {} frames",
               acquisition.num_fields, acquisition.num_channels,
               acquisition.num_scanning_depths, acquisition.num_frames);

        Ok(acquisition)
    }

    /// Motor position at the acquisition's zero point
    pub fn motor_zero(&self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }
}
